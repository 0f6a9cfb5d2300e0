use thiserror;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cryptobyte: length overflow")]
    LengthOverflow,

    #[error("ASN.1 tag number {} not supported", .0)]
    ASN1HighTag(u8),

    #[error("ASN.1 input truncated")]
    ASN1Truncated,

    #[error("ASN.1 tag mismatch: expected {:#04x}, found {:#04x}", .expected, .found)]
    ASN1UnexpectedTag { expected: u8, found: u8 },

    #[error("indefinite length found (not DER)")]
    ASN1IndefiniteLength,

    #[error("non-minimal length (not DER)")]
    ASN1NonMinimalLength,

    #[error("ASN.1 length too large")]
    ASN1LengthTooLarge,

    #[error("pending ASN.1 child too long")]
    ASN1PendingChildTooLong,

    #[error("invalid OID")]
    ASN1InvalidOid,

    #[error("invalid OID encoding")]
    ASN1InvalidOidEncoding,

    #[error("trailing data after ASN.1 element")]
    ASN1TrailingData,
}

pub type Result<T> = core::result::Result<T, Error>;
