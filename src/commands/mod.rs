//! Host entry points.
//!
//! The host owns the HTTP layer; it passes the raw query string of each
//! widget request here and writes the returned [`Reply`] back as-is.

mod requests;

pub use requests::{handle_request, Reply};
