use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use crate::cryptobyte::{Error, Parser, Result};


// OBJECT IDENTIFIER
#[macro_export]
macro_rules! oid{
    ($($d:expr),*) => {
        match $crate::cryptobyte::asn1::ObjectIdentifier::from_slice(&[$($d,)*]) {
            Some(oid) => oid,
            None => panic!("invalid object identifier"),
        }
    }
}

// Longest OID accepted, in arcs.
pub const OID_MAX_ARCS: usize = 32;

// An ObjectIdentifier represents an ASN.1 OBJECT IDENTIFIER as its ordered
// arcs, e.g. [1, 2, 840, 113549]. Two OIDs are equal iff their arc
// sequences are equal.
#[derive(Clone, Copy)]
pub struct ObjectIdentifier{
    arcs: [u32; OID_MAX_ARCS],
    len: u8,
}

impl PartialEq for ObjectIdentifier{
    fn eq(&self, other: &Self) -> bool {
        self.arcs() == other.arcs()
    }
}
impl Eq for ObjectIdentifier{}

impl Hash for ObjectIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.arcs().hash(state)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectIdentifier({})", self)
    }
}

impl TryFrom<&str> for ObjectIdentifier {
    type Error = Error;
    fn try_from(value: &str) -> Result<Self> {
        let mut v = [0u32; OID_MAX_ARCS];
        let mut i = 0;
        for s in value.split('.'){
            if i == OID_MAX_ARCS {
                return Err(Error::ASN1InvalidOid);
            }
            v[i] = s.parse::<u32>().map_err(|_| Error::ASN1InvalidOid)?;
            i += 1;
        }
        ObjectIdentifier::from_slice(&v[..i]).ok_or(Error::ASN1InvalidOid)
    }
}

impl From<&ObjectIdentifier> for String {
    fn from(oid: &ObjectIdentifier) -> Self {
        format!("{}", oid)
    }
}


impl ObjectIdentifier {
    /// Builds an OID from its arcs, e.g. [1, 2, 840, 113549].
    ///
    /// Returns `None` for fewer than two or more than `OID_MAX_ARCS` arcs, or
    /// when the first two arcs cannot share one subidentifier.
    pub const fn from_slice(parts: &[u32]) -> Option<ObjectIdentifier> {
        if parts.len() < 2 || parts.len() > OID_MAX_ARCS {
            return None;
        }

        if parts[0] > 2 || (parts[0] < 2 && parts[1] >= 40) {
            return None;
        }
        // 40 * 2 + parts[1] must fit into the first subidentifier.
        if parts[0] == 2 && parts[1] > u32::MAX - 80 {
            return None;
        }

        let mut arcs = [0u32; OID_MAX_ARCS];
        let mut i = 0;
        while i < parts.len() {
            arcs[i] = parts[i];
            i += 1;
        }

        Some(ObjectIdentifier {
            arcs,
            len: parts.len() as u8,
        })
    }

    pub fn arcs(&self) -> &[u32] {
        &self.arcs[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }
}


impl ObjectIdentifier {
    // ObjectIdentifier from the content octets of a DER OBJECT IDENTIFIER.
    //
    // The first subidentifier carries the first two arcs as 40 * a0 + a1.
    // Every subidentifier is base 128, most significant digit first, with
    // the high bit set on all octets but the last.
    pub fn from_der(v: &[u8]) -> Result<Self> {
        if v.is_empty() {
            return Err(Error::ASN1InvalidOidEncoding);
        }

        let mut arcs = [0u32; OID_MAX_ARCS];
        let mut p = Parser::new(v);

        let first = p.read_base128_u32()?;
        if first < 80 {
            arcs[0] = first / 40;
            arcs[1] = first % 40;
        } else {
            arcs[0] = 2;
            arcs[1] = first - 80;
        }

        let mut len = 2;
        while !p.empty() {
            if len == OID_MAX_ARCS {
                return Err(Error::ASN1InvalidOid);
            }
            arcs[len] = p.read_base128_u32()?;
            len += 1;
        }

        Ok(ObjectIdentifier { arcs, len: len as u8 })
    }

    // The content octets of the DER encoding, without tag and length.
    // For example, for oid { 1 2 840 113549 }:
    // 40 * 1 + 2 = 42 = 0x2a.
    // 840 = 0x06 * 128 + 0x48
    // 113549 = 6 * 128^2 + 0x77 * 128 + 0x0d
    // The content is 2a 86 48 86 f7 0d
    pub fn to_der(&self) -> Vec<u8> {
        let arcs = self.arcs();
        let mut out = Vec::with_capacity(arcs.len() + 4);
        push_base128(&mut out, 40 * arcs[0] + arcs[1]);
        for arc in &arcs[2..] {
            push_base128(&mut out, *arc);
        }
        out
    }
}

fn push_base128(out: &mut Vec<u8>, n: u32) {
    // How many 7-bit groups to encode n.
    let mut length = (32 - n.leading_zeros()).div_ceil(7);
    if length == 0 {
        length = 1;
    }

    let mut i = length - 1;
    while i > 0 {
        out.push(0x80 | (n >> (7 * i)) as u8);
        i -= 1;
    }
    out.push((n & 0x7f) as u8);
}
