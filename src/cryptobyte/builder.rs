use core::mem;

use alloc::vec::Vec;

use super::*;
use super::asn1::ObjectIdentifier;

// Builder appends DER elements to a byte buffer. The first error sticks and
// every later call becomes a no-op; take() reports it.
#[derive(Default, Debug)]
pub struct Builder {
    err: Option<Error>,
    result: Vec<u8>,
}

impl Builder {
    pub fn new(out: Vec<u8>) -> Self {
        Builder {
            err: None,
            result: out,
        }
    }

    fn set_error(&mut self, err: Error) {
        if self.err.is_none() {
            self.err = Some(err)
        }
    }

    // take returns the result (or the first error) and resets the Builder.
    pub fn take(&mut self) -> Result<Vec<u8>> {
        match self.err.take() {
            Some(err) => Err(err),
            None => Ok(mem::take(&mut self.result)),
        }
    }

    pub fn add_u8(&mut self, v: u8) {
        self.add_bytes(&[v]);
    }

    pub fn add_bytes(&mut self, bytes: &[u8]) {
        if self.err.is_some() {
            return;
        }

        if self.result.len().checked_add(bytes.len()).is_none() {
            self.set_error(Error::LengthOverflow);
            return;
        }

        self.result.extend_from_slice(bytes);
    }

    // DER length: short form below 0x80, otherwise (0x80 | n) followed by n
    // big-endian length octets.
    fn add_asn1_length(&mut self, length: usize) {
        if length > 0xfffffffe {
            self.set_error(Error::ASN1PendingChildTooLong);
            return;
        }
        if length < 0x80 {
            self.add_u8(length as u8);
            return;
        }

        let length = length as u32;
        let len_len = 4 - (length.leading_zeros() / 8) as usize;
        self.add_u8(0x80 | len_len as u8);
        self.add_bytes(&length.to_be_bytes()[4 - len_len..]);
    }
}

// ASN.1 related functions
impl Builder {
    // add_asn1 appends an ASN.1 object. The object is prefixed with the given tag.
    // Tags greater than 30 are not supported and result in an error (i.e.
    // low-tag-number form only). The child builder passed to `f` builds the
    // content of the ASN.1 object.
    pub fn add_asn1<F>(&mut self, tag: Tag, f: F)
    where
        F: FnOnce(&mut Builder),
    {
        if self.err.is_some() {
            return;
        }

        if tag.is_high_tag() {
            self.set_error(Error::ASN1HighTag(tag.0));
            return;
        }

        let mut child = Builder::new(Vec::new());
        f(&mut child);

        match child.take() {
            Err(e) => self.set_error(e),
            Ok(content) => {
                self.add_u8(tag.0);
                self.add_asn1_length(content.len());
                self.add_bytes(&content);
            }
        }
    }

    pub fn add_asn1_sequence<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Builder),
    {
        self.add_asn1(SEQUENCE, f)
    }

    // [n] EXPLICIT wrapper around whatever `f` appends.
    pub fn add_asn1_explicit<F>(&mut self, n: u8, f: F)
    where
        F: FnOnce(&mut Builder),
    {
        self.add_asn1(Tag::explicit(n), f)
    }

    pub fn add_asn1_u64(&mut self, v: u64) {
        self.add_asn1(INTEGER, |b| {
            let mut length = 1;
            let mut i = v;
            while i >= 0x80 {
                length += 1;
                i >>= 8;
            }
            while length > 0 {
                let i = v >> ((length - 1) * 8) & 0xff;
                b.add_u8(i as u8);
                length -= 1;
            }
        })
    }

    // add_asn1_octet_string appends a DER-encoded ASN.1 OCTET STRING.
    pub fn add_asn1_octet_string(&mut self, bytes: &[u8]) {
        self.add_asn1(OCTET_STRING, |b| b.add_bytes(bytes))
    }

    pub fn add_asn1_object_identifier(&mut self, oid: &ObjectIdentifier) {
        self.add_asn1(OBJECT_IDENTIFIER, |b| b.add_bytes(&oid.to_der()));
    }

    pub fn add_asn1_null(&mut self) {
        self.add_bytes(&[u8::from(NULL), 0])
    }
}
