mod object_identifier;

pub use object_identifier::*;

use super::Tag;


// One DER element as read by Parser::read_asn1_object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ASN1Object<'a>{
    // the TLV of the ASN.1 object
    pub raw: &'a [u8],
    pub tag: Tag,
    // the Value of the ASN.1 object
    pub value: &'a [u8],
}
