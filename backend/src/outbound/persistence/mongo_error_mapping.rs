//! Shared classification of MongoDB driver errors.
//!
//! Adapters call [`classify`] and then pick their own port error constructor
//! for each [`StoreFailure`], so every port sees the same split between
//! uniqueness violations, client-caused rejections, timeouts and
//! connectivity.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

/// Server code for a unique index violation.
pub(crate) const DUPLICATE_KEY: i32 = 11000;
/// Server code for an operation that ran out of `maxTimeMS`.
const MAX_TIME_EXPIRED: i32 = 50;
/// Server codes for updates the server refuses to apply to a document.
const REJECTED_UPDATE: [i32; 4] = [
    28, // PathNotViable
    52, // DollarPrefixedFieldName
    56, // EmptyFieldName
    66, // ImmutableField
];
/// Server codes for index definitions that clash with an existing index.
const INDEX_CONFLICT: [i32; 2] = [
    85, // IndexOptionsConflict
    86, // IndexKeySpecsConflict
];

/// Driver failure category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    DuplicateKey(String),
    IndexConflict(String),
    RejectedValue(String),
    Timeout(String),
    Connection(String),
    Other(String),
}

/// Server-reported error code, if the failure came from the server.
fn server_code(kind: &ErrorKind) -> Option<i32> {
    match kind {
        ErrorKind::Write(WriteFailure::WriteError(error)) => Some(error.code),
        ErrorKind::Write(WriteFailure::WriteConcernError(error)) => Some(error.code),
        ErrorKind::Command(error) => Some(error.code),
        _ => None,
    }
}

/// Classify a driver error.
pub(crate) fn classify(error: &MongoError) -> StoreFailure {
    let message = error.to_string();
    let kind = error.kind.as_ref();
    let code = server_code(kind);
    debug!(?code, error = %message, "mongodb operation failed");

    match (kind, code) {
        (_, Some(DUPLICATE_KEY)) => StoreFailure::DuplicateKey(message),
        (_, Some(MAX_TIME_EXPIRED)) => StoreFailure::Timeout(message),
        (_, Some(code)) if INDEX_CONFLICT.contains(&code) => StoreFailure::IndexConflict(message),
        (_, Some(code)) if REJECTED_UPDATE.contains(&code) => StoreFailure::RejectedValue(message),
        (ErrorKind::BsonSerialization(_), _) => StoreFailure::RejectedValue(message),
        (
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Authentication { .. },
            _,
        ) => StoreFailure::Connection(message),
        _ => StoreFailure::Other(message),
    }
}
