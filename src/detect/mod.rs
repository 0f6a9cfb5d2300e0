// Module detect classifies a byte buffer as a CMS/PKCS#7 or PKCS#12
// container.
//
// The ContentInfo envelope is read first and its content type decides. If
// the envelope does not parse, the PKCS#12 heuristics get a chance to
// recognize an encrypted key container.

pub mod heuristic;
mod error;

pub use error::{DetectError, Result};

use alloc::string::String;
use core::fmt;

use crate::cms::ContentInfo;
use crate::cryptobyte::asn1::ObjectIdentifier;
use crate::cryptobyte::oid::*;

/// The kind of container found in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Pkcs7Data,
    Pkcs7SignedData,
    Pkcs7EnvelopedData,
    Pkcs7SignedAndEnvelopedData,
    Pkcs7DigestedData,
    Pkcs7EncryptedData,
    Pkcs12,
    /// A PKCS#12 key container recognized by the heuristics only. It never
    /// comes out of a successful envelope parse.
    EncryptedPkcs12,
    UnknownOid(ObjectIdentifier),
}

// Every kind that is identified by a content type OID.
const KINDS_BY_OID: [(ObjectIdentifier, ContainerKind); 7] = [
    (OidPkcs7Data, ContainerKind::Pkcs7Data),
    (OidPkcs7SignedData, ContainerKind::Pkcs7SignedData),
    (OidPkcs7EnvelopedData, ContainerKind::Pkcs7EnvelopedData),
    (OidPkcs7SignedAndEnvelopedData, ContainerKind::Pkcs7SignedAndEnvelopedData),
    (OidPkcs7DigestedData, ContainerKind::Pkcs7DigestedData),
    (OidPkcs7EncryptedData, ContainerKind::Pkcs7EncryptedData),
    (OidPkcs12, ContainerKind::Pkcs12),
];

impl ContainerKind {
    pub fn from_oid(oid: &ObjectIdentifier) -> ContainerKind {
        KINDS_BY_OID
            .iter()
            .find(|(known, _)| known == oid)
            .map(|(_, kind)| *kind)
            .unwrap_or(ContainerKind::UnknownOid(*oid))
    }

    /// The content type OID behind this kind, `None` for
    /// [`ContainerKind::EncryptedPkcs12`].
    pub fn oid(&self) -> Option<ObjectIdentifier> {
        match self {
            ContainerKind::Pkcs7Data => Some(OidPkcs7Data),
            ContainerKind::Pkcs7SignedData => Some(OidPkcs7SignedData),
            ContainerKind::Pkcs7EnvelopedData => Some(OidPkcs7EnvelopedData),
            ContainerKind::Pkcs7SignedAndEnvelopedData => Some(OidPkcs7SignedAndEnvelopedData),
            ContainerKind::Pkcs7DigestedData => Some(OidPkcs7DigestedData),
            ContainerKind::Pkcs7EncryptedData => Some(OidPkcs7EncryptedData),
            ContainerKind::Pkcs12 => Some(OidPkcs12),
            ContainerKind::EncryptedPkcs12 => None,
            ContainerKind::UnknownOid(oid) => Some(*oid),
        }
    }

    /// The fixed label of a known kind; `None` for an unknown OID.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            ContainerKind::Pkcs7Data => Some("PKCS#7 Data"),
            ContainerKind::Pkcs7SignedData => Some("PKCS#7 Signed Data"),
            ContainerKind::Pkcs7EnvelopedData => Some("PKCS#7 Enveloped Data"),
            ContainerKind::Pkcs7SignedAndEnvelopedData => Some("PKCS#7 Signed And Enveloped Data"),
            ContainerKind::Pkcs7DigestedData => Some("PKCS#7 Digested Data"),
            ContainerKind::Pkcs7EncryptedData => Some("PKCS#7 Encrypted Data"),
            ContainerKind::Pkcs12 => Some("PKCS#12"),
            ContainerKind::EncryptedPkcs12 => Some("Encrypted PKCS#12"),
            ContainerKind::UnknownOid(_) => None,
        }
    }

    pub fn is_pkcs12(&self) -> bool {
        matches!(self, ContainerKind::Pkcs12 | ContainerKind::EncryptedPkcs12)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self) {
            (Some(name), _) => f.write_str(name),
            (None, ContainerKind::UnknownOid(oid)) => write!(f, "Unknown OID: {}", oid),
            (None, _) => unreachable!("every kind but UnknownOid has a name"),
        }
    }
}

/// Returns the human-readable label for a content type OID, or
/// `"Unknown OID: <dotted-decimal>"`.
pub fn describe_oid(oid: &ObjectIdentifier) -> String {
    format!("{}", ContainerKind::from_oid(oid))
}

/// Outcome of one detection.
///
/// `content_type` is set exactly when the envelope parsed; `is_encrypted`
/// only for a heuristic [`ContainerKind::EncryptedPkcs12`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionResult {
    pub kind: ContainerKind,
    pub content_type: Option<ObjectIdentifier>,
    pub is_encrypted: bool,
}

impl DetectionResult {
    fn from_content_type(oid: ObjectIdentifier) -> Self {
        DetectionResult {
            kind: ContainerKind::from_oid(&oid),
            content_type: Some(oid),
            is_encrypted: false,
        }
    }

    fn encrypted_pkcs12() -> Self {
        DetectionResult {
            kind: ContainerKind::EncryptedPkcs12,
            content_type: None,
            is_encrypted: true,
        }
    }

    /// The label of the detected kind.
    pub fn type_name(&self) -> String {
        format!("{}", self.kind)
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content_type {
            Some(oid) => write!(f, "{} ({})", self.kind, oid),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Reject bytes after the envelope and unexpected elements inside it.
    pub strict: bool,
    /// Try the PKCS#12 heuristics when the envelope does not parse.
    pub heuristic_fallback: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            strict: false,
            heuristic_fallback: true,
        }
    }
}

/// Runs detection with a fixed set of [`Options`].
///
/// A `Detector` holds no state besides its options; every call is a pure
/// function of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detector {
    options: Options,
}

impl Detector {
    pub const fn new(options: Options) -> Self {
        Detector { options }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn detect(&self, data: &[u8]) -> Result<DetectionResult> {
        let parsed = if self.options.strict {
            ContentInfo::from_der_strict(data)
        } else {
            ContentInfo::from_der(data)
        };

        let err = match parsed {
            Ok(content_info) => {
                let result = DetectionResult::from_content_type(content_info.content_type);
                log::debug!("detected {}", result);
                return Ok(result);
            }
            Err(err) => err,
        };

        log::debug!("{}, trying key container heuristics on {} bytes", err, data.len());
        if self.options.heuristic_fallback && heuristic::looks_like_pkcs12(data) {
            log::debug!("detected {}", ContainerKind::EncryptedPkcs12);
            return Ok(DetectionResult::encrypted_pkcs12());
        }

        Err(DetectError::DetectionFailed(err))
    }

    fn has_content_type(&self, data: &[u8], oid: &ObjectIdentifier) -> bool {
        match self.detect(data) {
            Ok(result) => result.content_type.as_ref() == Some(oid),
            Err(_) => false,
        }
    }

    pub fn is_pkcs7_data(&self, data: &[u8]) -> bool {
        self.has_content_type(data, &OidPkcs7Data)
    }

    pub fn is_pkcs7_signed_data(&self, data: &[u8]) -> bool {
        self.has_content_type(data, &OidPkcs7SignedData)
    }

    pub fn is_pkcs7_enveloped_data(&self, data: &[u8]) -> bool {
        self.has_content_type(data, &OidPkcs7EnvelopedData)
    }

    pub fn is_pkcs7_signed_and_enveloped_data(&self, data: &[u8]) -> bool {
        self.has_content_type(data, &OidPkcs7SignedAndEnvelopedData)
    }

    pub fn is_pkcs7_digested_data(&self, data: &[u8]) -> bool {
        self.has_content_type(data, &OidPkcs7DigestedData)
    }

    pub fn is_pkcs7_encrypted_data(&self, data: &[u8]) -> bool {
        self.has_content_type(data, &OidPkcs7EncryptedData)
    }

    /// PKCS#12 by content type, or an encrypted PKCS#12 found by the
    /// heuristics.
    pub fn is_pkcs12(&self, data: &[u8]) -> bool {
        match self.detect(data) {
            Ok(result) => result.kind.is_pkcs12(),
            Err(_) => false,
        }
    }

    /// A user key container: same verdict as [`Detector::is_pkcs12`] behind
    /// the cheap [`heuristic::looks_like_user_key`] pre-check.
    pub fn is_user_key_pkcs12(&self, data: &[u8]) -> bool {
        heuristic::looks_like_user_key(data) && self.is_pkcs12(data)
    }

    /// A user key container that also matches the NCA RK / KalkanCrypt
    /// profile.
    pub fn is_regional_key_pkcs12(&self, data: &[u8]) -> bool {
        self.is_user_key_pkcs12(data) && heuristic::matches_regional_profile(data)
    }
}

const DEFAULT_DETECTOR: Detector = Detector::new(Options {
    strict: false,
    heuristic_fallback: true,
});

/// Detects the container type of `data` with default [`Options`].
pub fn detect(data: &[u8]) -> Result<DetectionResult> {
    DEFAULT_DETECTOR.detect(data)
}

pub fn is_pkcs7_data(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_pkcs7_data(data)
}

pub fn is_pkcs7_signed_data(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_pkcs7_signed_data(data)
}

pub fn is_pkcs7_enveloped_data(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_pkcs7_enveloped_data(data)
}

pub fn is_pkcs7_signed_and_enveloped_data(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_pkcs7_signed_and_enveloped_data(data)
}

pub fn is_pkcs7_digested_data(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_pkcs7_digested_data(data)
}

pub fn is_pkcs7_encrypted_data(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_pkcs7_encrypted_data(data)
}

pub fn is_pkcs12(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_pkcs12(data)
}

pub fn is_user_key_pkcs12(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_user_key_pkcs12(data)
}

pub fn is_regional_key_pkcs12(data: &[u8]) -> bool {
    DEFAULT_DETECTOR.is_regional_key_pkcs12(data)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use hex_literal::hex;

    use super::*;
    use crate::cms::CmsError;
    use crate::cryptobyte::Error;

    fn envelope(oid: ObjectIdentifier) -> Vec<u8> {
        ContentInfo::new(oid, Some(hex!("0402dead").to_vec())).to_der().unwrap()
    }

    #[test]
    fn test_from_oid_and_back() {
        for (oid, kind) in KINDS_BY_OID {
            assert_eq!(ContainerKind::from_oid(&oid), kind);
            assert_eq!(kind.oid(), Some(oid));
        }
        let unknown = ObjectIdentifier::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(ContainerKind::from_oid(&unknown), ContainerKind::UnknownOid(unknown));
        assert_eq!(ContainerKind::EncryptedPkcs12.oid(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(describe_oid(&OidPkcs7Data), "PKCS#7 Data");
        assert_eq!(describe_oid(&OidPkcs7SignedData), "PKCS#7 Signed Data");
        assert_eq!(describe_oid(&OidPkcs7EnvelopedData), "PKCS#7 Enveloped Data");
        assert_eq!(describe_oid(&OidPkcs7SignedAndEnvelopedData), "PKCS#7 Signed And Enveloped Data");
        assert_eq!(describe_oid(&OidPkcs7DigestedData), "PKCS#7 Digested Data");
        assert_eq!(describe_oid(&OidPkcs7EncryptedData), "PKCS#7 Encrypted Data");
        assert_eq!(describe_oid(&OidPkcs12), "PKCS#12");
        assert_eq!(ContainerKind::EncryptedPkcs12.to_string(), "Encrypted PKCS#12");
        assert_eq!(
            describe_oid(&ObjectIdentifier::try_from("1.2.3.4.5").unwrap()),
            "Unknown OID: 1.2.3.4.5"
        );
    }

    #[test]
    fn test_detect_pkcs12_oid_is_never_encrypted() {
        let result = detect(&envelope(OidPkcs12)).unwrap();
        assert_eq!(result.kind, ContainerKind::Pkcs12);
        assert_eq!(result.content_type, Some(OidPkcs12));
        assert!(!result.is_encrypted);
        assert_eq!(result.to_string(), "PKCS#12 (1.2.840.113549.1.12.10.1)");
    }

    #[test]
    fn test_detect_error_keeps_cause() {
        let err = detect(&[0x30, 0x03]).unwrap_err();
        assert_eq!(err.cause(), &CmsError::MalformedEnvelope(Error::ASN1Truncated));
        assert_eq!(
            err.to_string(),
            "failed to parse ASN.1 structure: malformed ContentInfo envelope: ASN.1 input truncated"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;

        let err = detect(&[0x30, 0x03]).unwrap_err();
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "malformed ContentInfo envelope: ASN.1 input truncated");
        assert_eq!(source.source().unwrap().to_string(), "ASN.1 input truncated");
    }

    #[test]
    fn test_options() {
        let mut data = envelope(OidPkcs7Data);
        data.push(0x00);

        let strict = Detector::new(Options { strict: true, ..Options::default() });
        assert!(detect(&data).is_ok());
        assert_eq!(
            strict.detect(&data).unwrap_err().cause(),
            &CmsError::MalformedEnvelope(Error::ASN1TrailingData)
        );
        assert!(!strict.is_pkcs7_data(&data));

        // starts with SEQUENCE, holds INTEGER 3 and "KEY", but does not parse.
        let mut key = vec![0x30, 0x82, 0x01, 0x00, 0x02, 0x01, 0x03];
        key.extend_from_slice(&[0u8; 16]);
        key.extend_from_slice(b"KEY");

        let no_fallback = Detector::new(Options { heuristic_fallback: false, ..Options::default() });
        assert_eq!(detect(&key).unwrap().kind, ContainerKind::EncryptedPkcs12);
        assert!(no_fallback.detect(&key).is_err());
        assert!(!no_fallback.is_pkcs12(&key));
        assert_eq!(Detector::default(), DEFAULT_DETECTOR);
    }
}
