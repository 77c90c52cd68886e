//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns:
//! trace identifiers with request logging, and the JSON content type applied
//! to every API response.

pub mod content_type;
pub mod trace;

pub use content_type::JsonContentType;
pub use trace::Trace;
