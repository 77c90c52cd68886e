//! Domain primitives, ports and use cases.
//!
//! Purpose: define the person resource and the operations on it without
//! reference to HTTP or to a particular store. Inbound adapters translate
//! requests into [`PersonService`] calls; outbound adapters implement the
//! [`ports`] traits.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable failure category.
//! - Person, PersonId: the stored document and its identity.
//! - PersonPatch: ordered field assignments for partial updates.
//! - PersonService: create, get, list and update use cases.
//! - TraceId: per-request correlation identifier.

pub mod error;
pub mod person;
pub mod person_patch;
pub mod person_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::person::{Person, PersonId, PersonIdError};
pub use self::person_patch::{PersonPatch, PersonPatchError};
pub use self::person_service::PersonService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use person_api::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("person not found"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
