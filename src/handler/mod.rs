//! Request handler module
//!
//! Responsible for method validation, route dispatch and the single state
//! mutation the fixture allows.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
