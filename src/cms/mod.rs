// Module cms reads and writes the outer CMS/PKCS#7 ContentInfo envelope.
//
//  ContentInfo ::= SEQUENCE {
//      contentType ContentType,
//      content [0] EXPLICIT ANY DEFINED BY contentType OPTIONAL }
//
// Nothing below the envelope is interpreted.

mod content_info;
mod error;

pub use content_info::*;
pub use error::{CmsError, Result};
