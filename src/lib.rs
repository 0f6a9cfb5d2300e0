//! Detection of CMS/PKCS#7 and PKCS#12 containers from raw bytes.
//!
//! The outer `ContentInfo` envelope is read with a small DER parser; its
//! content type names the container. Encrypted PKCS#12 key containers that
//! do not parse are recognized by byte-pattern heuristics instead.
//!
//! ```
//! use cmsdetect::{detect, ContainerKind};
//!
//! // SEQUENCE { OID 1.2.840.113549.1.7.2 }
//! let der = [
//!     0x30, 0x0b, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x02,
//! ];
//! let result = detect(&der).unwrap();
//! assert_eq!(result.kind, ContainerKind::Pkcs7SignedData);
//! assert_eq!(result.kind.to_string(), "PKCS#7 Signed Data");
//! assert!(cmsdetect::is_pkcs7_signed_data(&der));
//! ```

#![no_std]
#![warn(clippy::std_instead_of_alloc, clippy::std_instead_of_core)]

pub mod cryptobyte;
pub mod cms;
pub mod detect;
pub mod traits;

pub use cryptobyte::asn1::ObjectIdentifier;
pub use detect::{
    describe_oid, detect, is_pkcs12, is_pkcs7_data, is_pkcs7_digested_data,
    is_pkcs7_encrypted_data, is_pkcs7_enveloped_data, is_pkcs7_signed_and_enveloped_data,
    is_pkcs7_signed_data, is_regional_key_pkcs12, is_user_key_pkcs12, ContainerKind,
    DetectError, DetectionResult, Detector, Options,
};

#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;
