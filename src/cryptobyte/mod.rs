// Module cryptobyte contains the small DER toolkit the detector is built on:
// a Parser for reading tag-length-value elements out of untrusted input and
// a Builder for writing them back.
//
// Only the low-tag-number form and definite lengths are supported.

#![allow(non_upper_case_globals)]

pub mod asn1;
pub mod builder;
pub mod errors;
pub mod parser;
pub mod oid;
pub use builder::Builder;
pub use errors::{Error, Result};
pub use parser::Parser;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Tag(pub u8);

impl From<Tag> for u8 {
    fn from(v: Tag) -> Self {
        v.0
    }
}

impl Tag {
    // [n] EXPLICIT, i.e. context-specific and constructed.
    pub const fn explicit(n: u8) -> Tag {
        Tag(ClassContextSpecific | ClassConstructed | (n & 0x1f))
    }

    pub const fn is_constructed(self) -> bool {
        self.0 & ClassConstructed != 0
    }

    pub const fn class(self) -> u8 {
        self.0 & 0xc0
    }

    pub const fn number(self) -> u8 {
        self.0 & 0x1f
    }

    // Identifiers with the low five bits set indicate high-tag-number format
    // (two or more octets), which we don't support.
    pub const fn is_high_tag(self) -> bool {
        self.0 & 0x1f == 0x1f
    }
}

// Bit 6 has value "1," indicating that the encoding is constructed.
pub const ClassConstructed: u8 = 0x20;

// [[class] number] EXPLICIT/IMPLICIT Type
// class = UNIVERSAL | APPLICATION | PRIVATE
// If the class name is absent, then the tag is context-specific.
// EX:
// content [0] EXPLICIT ANY DEFINED BY contentType OPTIONAL
// ClassContextSpecific | ClassConstructed | 0 = 0x80 | 0x20 = 0xa0
pub const ClassUniversal: u8 = 0<<6;
pub const ClassContextSpecific: u8 = 2<<6;

// The universal tags the envelope reader and writer need.
pub const INTEGER: Tag = Tag(2);
pub const OCTET_STRING: Tag = Tag(4);
pub const NULL: Tag = Tag(5);
pub const OBJECT_IDENTIFIER: Tag = Tag(6);
pub const SEQUENCE: Tag = Tag(16 | ClassConstructed); // 0x30

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_bits() {
        assert_eq!(Tag::explicit(0), Tag(0xa0));
        assert_eq!(Tag::explicit(3), Tag(0xa3));
        assert!(SEQUENCE.is_constructed());
        assert!(!OBJECT_IDENTIFIER.is_constructed());
        assert_eq!(Tag::explicit(0).class(), ClassContextSpecific);
        assert_eq!(SEQUENCE.class(), ClassUniversal);
        assert_eq!(SEQUENCE.number(), 16);
        assert!(Tag(0x1f).is_high_tag());
        assert!(!SEQUENCE.is_high_tag());
    }
}
