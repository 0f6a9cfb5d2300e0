// Byte-pattern checks for key containers that do not parse as a ContentInfo.
//
// Password-protected PKCS#12 files from some providers (notably NCA RK
// keys written by KalkanCrypt) deviate enough from DER that the envelope
// reader rejects them. These checks never look at structure beyond the
// first byte; they only search for markers. They are tuned to rather flag
// an unrelated DER blob than miss a real key container.

use crate::cryptobyte::SEQUENCE;

/// Minimum length for the general PKCS#12 check.
pub const GENERAL_MIN_LEN: usize = 20;

/// Minimum length for the cheap user key pre-check.
pub const USER_KEY_MIN_LEN: usize = 8;

/// Upper bound of the size range in which the version marker alone is
/// accepted as evidence.
pub const MAX_PLAUSIBLE_LEN: usize = 100_000;

// INTEGER 3, the PFX version.
const VERSION_3: [u8; 3] = [0x02, 0x01, 0x03];

// Content octets of 1.2.840.113549.1.12.10.1.
const PKCS12_OID_DER: [u8; 10] = [0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x0a, 0x01];

// Content octets of the 1.2.398.3.10 arc (Kazakhstan national cryptography).
const KZ_OID_PREFIX_DER: [u8; 5] = [0x2a, 0x83, 0x0e, 0x03, 0x0a];

const KEY_MARKERS: [&[u8]; 2] = [b"KEY", b"PrivateKey"];

// Matched in addition to a case-insensitive ASCII "gost".
const GOST_CYRILLIC: [&[u8]; 2] = ["ГОСТ".as_bytes(), "гост".as_bytes()];

// Matched in addition to a case-insensitive ASCII "kalkan".
const KALKAN_CYRILLIC: [&[u8]; 3] = [
    "Калкан".as_bytes(),
    "КАЛКАН".as_bytes(),
    "калкан".as_bytes(),
];

#[inline]
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[inline]
fn contains_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len()
        && haystack.windows(needle.len()).any(|w| w.eq_ignore_ascii_case(needle))
}

fn contains_any(haystack: &[u8], needles: &[&[u8]]) -> bool {
    needles.iter().any(|n| contains(haystack, n))
}

/// Whether `data` names a GOST algorithm family, in Latin or Cyrillic script.
pub fn has_gost_marker(data: &[u8]) -> bool {
    contains_ignore_ascii_case(data, b"gost") || contains_any(data, &GOST_CYRILLIC)
}

/// Whether `data` names the KalkanCrypt provider.
pub fn has_kalkan_marker(data: &[u8]) -> bool {
    contains_ignore_ascii_case(data, b"kalkan") || contains_any(data, &KALKAN_CYRILLIC)
}

/// General PKCS#12 plausibility.
///
/// Requires at least [`GENERAL_MIN_LEN`] bytes, a leading SEQUENCE tag and an
/// `INTEGER 3` somewhere in the buffer. Then any of the PKCS#12 OID, a key
/// marker or a GOST marker decides. Without any marker, a buffer of at most
/// [`MAX_PLAUSIBLE_LEN`] bytes is still accepted.
pub fn looks_like_pkcs12(data: &[u8]) -> bool {
    if data.len() < GENERAL_MIN_LEN || data[0] != SEQUENCE.0 {
        return false;
    }

    if !contains(data, &VERSION_3) {
        return false;
    }

    if contains(data, &PKCS12_OID_DER) {
        log::trace!("pkcs12 heuristic: PKCS#12 OID found");
        return true;
    }

    if contains_any(data, &KEY_MARKERS) {
        log::trace!("pkcs12 heuristic: private key marker found");
        return true;
    }

    if has_gost_marker(data) {
        log::trace!("pkcs12 heuristic: GOST marker found");
        return true;
    }

    log::trace!("pkcs12 heuristic: no marker, deciding on size {}", data.len());
    data.len() <= MAX_PLAUSIBLE_LEN
}

/// Cheap pre-check for user key containers: [`USER_KEY_MIN_LEN`] bytes and
/// a leading SEQUENCE tag.
pub fn looks_like_user_key(data: &[u8]) -> bool {
    data.len() >= USER_KEY_MIN_LEN && data[0] == SEQUENCE.0
}

/// The NCA RK / KalkanCrypt key container profile.
///
/// Only buffers passing [`looks_like_pkcs12`] qualify; they must also carry
/// a GOST marker, a KalkanCrypt marker or an OID from the 1.2.398.3.10 arc.
pub fn matches_regional_profile(data: &[u8]) -> bool {
    if !looks_like_pkcs12(data) {
        return false;
    }

    if has_gost_marker(data) || has_kalkan_marker(data) {
        return true;
    }

    contains(data, &KZ_OID_PREFIX_DER)
}
