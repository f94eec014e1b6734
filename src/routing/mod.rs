//! Routing module
//!
//! Two fixed routes, checked in order:
//! - `/metrics` (trailing slashes ignored)
//! - `/set-response-time/<digits>`
//!
//! Everything else falls through to `Route::NotFound`.

mod matcher;

pub use matcher::{match_route, Route};
