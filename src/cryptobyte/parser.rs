use core::ops::Index;

use super::asn1::{ASN1Object, ObjectIdentifier};

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser<'a> {
    pub v: &'a [u8],
    // records how many bytes have parsed.
    bytes: usize,
}

impl<'a> From<&'a [u8]> for Parser<'a> {
    fn from(value: &'a [u8]) -> Self {
        Parser::new(value)
    }
}


impl<'a> Index<usize> for Parser<'a> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.v[index]
    }
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a [u8]) -> Self {
        Parser {
            v: s,
            bytes: 0,
        }
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn empty(&self) -> bool {
        self.v.is_empty()
    }

    pub fn read(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.v.len() >= n {
            let (v1, v2) = self.v.split_at(n);
            self.v = v2;
            self.bytes += n;
            Some(v1)
        } else {
            None
        }
    }

    pub fn skip(&mut self, n: usize) -> bool {
        self.read(n).is_some()
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.read(1).map(|v| v[0])
    }

    fn read_unsigned(&mut self, length: usize) -> Option<u32> {
        if length > 4 {
            return None;
        }
        let bytes = self.read(length)?;
        let mut res = 0u32;
        for i in bytes {
            res = (res << 8) | (*i as u32);
        }
        Some(res)
    }

    // Reads one base-128 encoded integer, most significant group first, the
    // high bit of every octet except the last set. Used by OID subidentifiers.
    pub fn read_base128_u32(&mut self) -> Result<u32> {
        let mut n = 0u32;
        for (i, b) in self.v.iter().enumerate() {
            // 0x80 as the first octet is a non-minimal encoding.
            if i == 0 && *b == 0x80 {
                return Err(Error::ASN1InvalidOidEncoding);
            }
            if n > u32::MAX >> 7 {
                return Err(Error::ASN1InvalidOidEncoding);
            }
            n = (n << 7) | (*b & 0x7f) as u32;
            if *b & 0x80 == 0 {
                self.skip(i + 1);
                return Ok(n);
            }
        }
        Err(Error::ASN1InvalidOidEncoding)
    }

    // ASN.1

    // Returns the tag of the next element if at least a tag and a length
    // byte are present. Nothing is consumed.
    pub fn peek_tag(&self) -> Option<Tag> {
        if self.v.len() < 2 {
            return None;
        }
        Some(Tag(self[0]))
    }

    // read_asn1_object reads one DER element (tag < 31, definite length).
    // The parser is left untouched on error.
    pub fn read_asn1_object(&mut self) -> Result<ASN1Object<'a>> {
        let raw = self.v;
        if raw.len() < 2 {
            return Err(Error::ASN1Truncated);
        }

        let tag = Tag(raw[0]);
        if tag.is_high_tag() {
            return Err(Error::ASN1HighTag(tag.0));
        }
        let len_byte = raw[1];

        let length: usize;
        let header_len: usize;
        if len_byte & 0x80 == 0 {
            // short-form encoding.
            length = len_byte as usize;
            header_len = 2;
        } else {
            let len_len = (len_byte & 0x7f) as usize;
            if len_len == 0 {
                return Err(Error::ASN1IndefiniteLength);
            }
            if len_len > 4 {
                return Err(Error::ASN1LengthTooLarge);
            }
            let len_bytes = raw.get(2..2 + len_len).ok_or(Error::ASN1Truncated)?;
            if len_bytes[0] == 0 {
                // leading zero octet in a long-form length.
                return Err(Error::ASN1NonMinimalLength);
            }
            let len32 = Parser::new(len_bytes)
                .read_unsigned(len_len)
                .ok_or(Error::ASN1Truncated)?;
            if len32 < 128 {
                // length should have used short-form encoding.
                return Err(Error::ASN1NonMinimalLength);
            }
            header_len = 2 + len_len;
            length = usize::try_from(len32).map_err(|_| Error::ASN1LengthTooLarge)?;
        }

        let total = header_len.checked_add(length).ok_or(Error::ASN1LengthTooLarge)?;
        let element = self.read(total).ok_or(Error::ASN1Truncated)?;

        Ok(ASN1Object {
            raw: element,
            tag,
            value: &element[header_len..],
        })
    }

    // read_asn1 reads an element with the given tag and returns its value.
    pub fn read_asn1(&mut self, tag: Tag) -> Result<&'a [u8]> {
        match self.peek_tag() {
            None => return Err(Error::ASN1Truncated),
            Some(found) if found != tag => {
                return Err(Error::ASN1UnexpectedTag {
                    expected: tag.0,
                    found: found.0,
                });
            }
            Some(_) => {}
        }
        Ok(self.read_asn1_object()?.value)
    }

    // Reads the next element only if it carries `tag`. Any other next element
    // (or no element at all) means the optional field is absent.
    pub fn read_optional_asn1(&mut self, tag: Tag) -> Result<Option<&'a [u8]>> {
        if self.peek_tag() != Some(tag) {
            return Ok(None);
        }
        self.read_asn1(tag).map(Some)
    }

    pub fn read_asn1_sequence(&mut self) -> Result<Parser<'a>> {
        Ok(Parser::new(self.read_asn1(SEQUENCE)?))
    }

    pub fn read_asn1_octet_string(&mut self) -> Result<&'a [u8]> {
        self.read_asn1(OCTET_STRING)
    }

    pub fn read_asn1_object_identifier(&mut self) -> Result<ObjectIdentifier> {
        let bytes = self.read_asn1(OBJECT_IDENTIFIER)?;
        ObjectIdentifier::from_der(bytes)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_read_u8() {
        let mut s = Parser::new(&[1, 2, 3]);
        assert_eq!(s.read_u8(), Some(1));
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], 2);
        assert_eq!(s.bytes_read(), 1);
        assert!(s.read(3).is_none());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_read_base128() {
        // 840 = 0x06 * 128 + 0x48
        let mut s = Parser::new(&hex!("8648 01"));
        assert_eq!(s.read_base128_u32().unwrap(), 840);
        assert_eq!(s.read_base128_u32().unwrap(), 1);
        assert!(s.empty());

        // 113549 = 6 * 128^2 + 0x77 * 128 + 0x0d
        let mut s = Parser::new(&hex!("86f70d"));
        assert_eq!(s.read_base128_u32().unwrap(), 113549);

        assert_eq!(
            Parser::new(&hex!("8001")).read_base128_u32(),
            Err(Error::ASN1InvalidOidEncoding)
        );
        // continuation bit set on the last octet.
        assert_eq!(
            Parser::new(&hex!("8686")).read_base128_u32(),
            Err(Error::ASN1InvalidOidEncoding)
        );
        // 2^35 does not fit.
        assert_eq!(
            Parser::new(&hex!("818080808000")).read_base128_u32(),
            Err(Error::ASN1InvalidOidEncoding)
        );
        assert_eq!(
            Parser::new(&hex!("8fffffff7f")).read_base128_u32().unwrap(),
            u32::MAX
        );
    }

    #[test]
    fn test_read_asn1_short_and_long_form() {
        let mut s = Parser::new(&hex!("0403 010203 05"));
        let obj = s.read_asn1_object().unwrap();
        assert_eq!(obj.tag, OCTET_STRING);
        assert_eq!(obj.value, &[1, 2, 3]);
        assert_eq!(obj.raw, &hex!("0403010203"));
        assert_eq!(s.v, &[5]);

        let mut long = vec![0x04, 0x81, 0x80];
        long.extend_from_slice(&[0xaa; 0x80]);
        let mut s = Parser::new(&long);
        assert_eq!(s.read_asn1_octet_string().unwrap().len(), 0x80);
        assert!(s.empty());
    }

    #[test]
    fn test_read_asn1_rejects_bad_lengths() {
        assert_eq!(Parser::new(&[]).read_asn1_object().unwrap_err(), Error::ASN1Truncated);
        assert_eq!(Parser::new(&[0x30]).read_asn1_object().unwrap_err(), Error::ASN1Truncated);
        assert_eq!(
            Parser::new(&hex!("3080 0000")).read_asn1_object().unwrap_err(),
            Error::ASN1IndefiniteLength
        );
        assert_eq!(
            Parser::new(&hex!("3081 05 0000000000")).read_asn1_object().unwrap_err(),
            Error::ASN1NonMinimalLength
        );
        assert_eq!(
            Parser::new(&hex!("3082 0080")).read_asn1_object().unwrap_err(),
            Error::ASN1NonMinimalLength
        );
        assert_eq!(
            Parser::new(&hex!("3085 0000000001")).read_asn1_object().unwrap_err(),
            Error::ASN1LengthTooLarge
        );
        assert_eq!(
            Parser::new(&hex!("3082 01")).read_asn1_object().unwrap_err(),
            Error::ASN1Truncated
        );
        assert_eq!(
            Parser::new(&hex!("3005 0102")).read_asn1_object().unwrap_err(),
            Error::ASN1Truncated
        );
        assert_eq!(
            Parser::new(&hex!("1f01 00")).read_asn1_object().unwrap_err(),
            Error::ASN1HighTag(0x1f)
        );
    }

    #[test]
    fn test_read_asn1_tag_mismatch_leaves_input() {
        let input = hex!("0201 03");
        let mut s = Parser::new(&input);
        assert_eq!(
            s.read_asn1_sequence().unwrap_err(),
            Error::ASN1UnexpectedTag { expected: 0x30, found: 0x02 }
        );
        assert_eq!(s.v, &input);
        assert_eq!(s.read_optional_asn1(Tag::explicit(0)).unwrap(), None);
        assert_eq!(s.read_asn1(INTEGER).unwrap(), &[3]);
    }

    #[test]
    fn test_read_asn1_object_identifier() {
        let mut s = Parser::new(&hex!("0609 2a864886f70d010701"));
        let oid = s.read_asn1_object_identifier().unwrap();
        assert_eq!(oid.to_string(), "1.2.840.113549.1.7.1");

        assert_eq!(
            Parser::new(&hex!("0600")).read_asn1_object_identifier().unwrap_err(),
            Error::ASN1InvalidOidEncoding
        );
    }
}
