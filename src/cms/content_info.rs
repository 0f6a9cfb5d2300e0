use alloc::vec::Vec;

use crate::cryptobyte::{self, asn1::ObjectIdentifier, Builder, Parser, Tag};
use crate::traits::{MarshalAsn1, UnmarshalAsn1};

use super::{CmsError, Result};

// content [0] EXPLICIT
const CONTENT_TAG: Tag = Tag::explicit(0);

/// The outer `ContentInfo` wrapper of a CMS/PKCS#7 or PKCS#12 blob.
///
/// `content` is an owned copy of the bytes inside the `[0]` wrapper, kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentInfo {
    pub content_type: ObjectIdentifier,
    pub content: Option<Vec<u8>>,
}

impl ContentInfo {
    pub fn new(content_type: ObjectIdentifier, content: Option<Vec<u8>>) -> Self {
        ContentInfo { content_type, content }
    }

    /// Reads the envelope at the start of `data`.
    ///
    /// Bytes after the outer SEQUENCE are ignored, and so is any element
    /// following the content type that is not tagged `[0]`. Some producers
    /// append non-canonical trailers that this tolerates.
    pub fn from_der(data: &[u8]) -> Result<Self> {
        Self::parse(data, false)
    }

    /// Like [`ContentInfo::from_der`], but the envelope must span all of
    /// `data` and hold nothing besides the content type and `[0]` content.
    pub fn from_der_strict(data: &[u8]) -> Result<Self> {
        Self::parse(data, true)
    }

    fn parse(data: &[u8], strict: bool) -> Result<Self> {
        let mut input = Parser::new(data);
        let mut seq = input.read_asn1_sequence()?;
        if strict && !input.empty() {
            return Err(cryptobyte::Error::ASN1TrailingData.into());
        }

        let content_type = seq.read_asn1_object_identifier()?;
        let content = seq.read_optional_asn1(CONTENT_TAG)?.map(|c| c.to_vec());
        if strict && !seq.empty() {
            return Err(cryptobyte::Error::ASN1TrailingData.into());
        }

        Ok(ContentInfo { content_type, content })
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        let mut b = Builder::new(Vec::new());
        b.add_asn1_sequence(|b| {
            b.add_asn1_object_identifier(&self.content_type);
            if let Some(content) = &self.content {
                b.add_asn1_explicit(0, |b| b.add_bytes(content));
            }
        });
        Ok(b.take()?)
    }
}

impl MarshalAsn1 for ContentInfo {
    type Error = CmsError;

    fn marshal_asn1(&self) -> Result<Vec<u8>> {
        self.to_der()
    }
}

impl UnmarshalAsn1 for ContentInfo {
    type Error = CmsError;

    fn unmarshal_asn1(data: &[u8]) -> Result<Self> {
        Self::from_der(data)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::cryptobyte::oid::*;
    use crate::cryptobyte::Error;

    // SEQUENCE { OID 1.2.840.113549.1.7.2, [0] { OCTET STRING de ad } }
    const SIGNED_DATA: [u8; 19] = hex!("3011 0609 2a864886f70d010702 a004 0402dead");

    #[test]
    fn test_from_der_with_content() {
        let ci = ContentInfo::from_der(&SIGNED_DATA).unwrap();
        assert_eq!(ci.content_type, OidPkcs7SignedData);
        assert_eq!(ci.content.as_deref(), Some(&hex!("0402dead")[..]));
    }

    #[test]
    fn test_from_der_without_content() {
        let ci = ContentInfo::from_der(&hex!("300b 0609 2a864886f70d010701")).unwrap();
        assert_eq!(ci.content_type, OidPkcs7Data);
        assert_eq!(ci.content, None);
    }

    #[test]
    fn test_to_der() {
        let ci = ContentInfo::new(OidPkcs7SignedData, Some(hex!("0402dead").to_vec()));
        assert_eq!(ci.to_der().unwrap(), SIGNED_DATA);
        assert_eq!(ci.marshal_asn1().unwrap(), SIGNED_DATA);
        assert_eq!(ContentInfo::unmarshal_asn1(&SIGNED_DATA).unwrap(), ci);
    }

    #[test]
    fn test_trailing_bytes() {
        let mut data = SIGNED_DATA.to_vec();
        data.extend_from_slice(b"trailer");

        assert!(ContentInfo::from_der(&data).is_ok());
        assert_eq!(
            ContentInfo::from_der_strict(&data),
            Err(CmsError::MalformedEnvelope(Error::ASN1TrailingData))
        );
        assert!(ContentInfo::from_der_strict(&SIGNED_DATA).is_ok());
    }

    #[test]
    fn test_unrecognized_second_element_is_absent() {
        // SEQUENCE { OID, INTEGER 3 }
        let data = hex!("300e 0609 2a864886f70d010701 020103");
        let ci = ContentInfo::from_der(&data).unwrap();
        assert_eq!(ci.content_type, OidPkcs7Data);
        assert_eq!(ci.content, None);

        assert_eq!(
            ContentInfo::from_der_strict(&data),
            Err(CmsError::MalformedEnvelope(Error::ASN1TrailingData))
        );
    }

    #[test]
    fn test_malformed_content_field() {
        // [0] claims 5 bytes but the sequence only holds 2.
        let data = hex!("300f 0609 2a864886f70d010701 a005 0500");
        assert_eq!(
            ContentInfo::from_der(&data),
            Err(CmsError::MalformedEnvelope(Error::ASN1Truncated))
        );
    }

    #[test]
    fn test_malformed_envelopes() {
        assert_eq!(
            ContentInfo::from_der(&[]),
            Err(CmsError::MalformedEnvelope(Error::ASN1Truncated))
        );
        assert_eq!(
            ContentInfo::from_der(b"This would be binary CMS data"),
            Err(CmsError::MalformedEnvelope(Error::ASN1UnexpectedTag { expected: 0x30, found: b'T' }))
        );
        // outer length runs past the buffer.
        assert_eq!(
            ContentInfo::from_der(&hex!("3020 0609 2a864886f70d010701")),
            Err(CmsError::MalformedEnvelope(Error::ASN1Truncated))
        );
        // first element is not an OID.
        assert_eq!(
            ContentInfo::from_der(&hex!("3003 020103")),
            Err(CmsError::MalformedEnvelope(Error::ASN1UnexpectedTag { expected: 0x06, found: 0x02 }))
        );
        // empty SEQUENCE.
        assert_eq!(
            ContentInfo::from_der(&hex!("3000")),
            Err(CmsError::MalformedEnvelope(Error::ASN1Truncated))
        );
        // OID with a dangling continuation octet.
        assert_eq!(
            ContentInfo::from_der(&hex!("3004 0602 2a86")),
            Err(CmsError::MalformedEnvelope(Error::ASN1InvalidOidEncoding))
        );
    }
}
