use crate::oid;
use super::asn1::ObjectIdentifier;

// PKCS#7 / CMS content types, RFC 2315 section 14.
pub const OidPkcs7Data: ObjectIdentifier = oid!(1, 2, 840, 113549, 1, 7, 1);
pub const OidPkcs7SignedData: ObjectIdentifier = oid!(1, 2, 840, 113549, 1, 7, 2);
pub const OidPkcs7EnvelopedData: ObjectIdentifier = oid!(1, 2, 840, 113549, 1, 7, 3);
pub const OidPkcs7SignedAndEnvelopedData: ObjectIdentifier = oid!(1, 2, 840, 113549, 1, 7, 4);
pub const OidPkcs7DigestedData: ObjectIdentifier = oid!(1, 2, 840, 113549, 1, 7, 5);
pub const OidPkcs7EncryptedData: ObjectIdentifier = oid!(1, 2, 840, 113549, 1, 7, 6);

// pkcs-12 bag types (pkcs-12 10 1), RFC 7292 appendix D.
pub const OidPkcs12: ObjectIdentifier = oid!(1, 2, 840, 113549, 1, 12, 10, 1);

// Kazakhstan national cryptography arc used by NCA RK / KalkanCrypt
// (GOST 34.310 keys live under 1.2.398.3.10.1).
pub const OidKzCrypto: ObjectIdentifier = oid!(1, 2, 398, 3, 10);
