//! HTTP inbound adapter exposing the person REST endpoints.

pub mod envelope;
pub mod error;
pub mod persons;
pub mod routes;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
