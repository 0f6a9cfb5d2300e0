use thiserror;

use crate::cryptobyte;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CmsError {
    #[error("malformed ContentInfo envelope: {0}")]
    MalformedEnvelope(#[from] cryptobyte::Error),
}

pub type Result<T> = core::result::Result<T, CmsError>;
