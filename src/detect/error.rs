use thiserror;

use crate::cms::CmsError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// Neither the envelope reader nor the heuristics recognized the input.
    #[error("failed to parse ASN.1 structure: {0}")]
    DetectionFailed(#[source] CmsError),
}

impl DetectError {
    /// The envelope error that made detection fail.
    pub fn cause(&self) -> &CmsError {
        match self {
            DetectError::DetectionFailed(e) => e,
        }
    }
}

pub type Result<T> = core::result::Result<T, DetectError>;
