//! HTTP protocol layer module
//!
//! Response builders shared by the request handler.

pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, build_ok_response, build_text_response};
