use alloc::vec::Vec;

pub trait MarshalAsn1{
    type Error;

    // Returns the DER encoding of self.
    fn marshal_asn1(&self)-> Result<Vec::<u8>, Self::Error>;
}
pub trait UnmarshalAsn1: Sized{
    type Error;
    fn unmarshal_asn1(data: &[u8])-> Result<Self, Self::Error>;
}
