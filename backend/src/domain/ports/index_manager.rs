//! Port for declaring store-enforced uniqueness constraints.

use async_trait::async_trait;

use crate::domain::person::fields;

use super::define_port_error;

define_port_error! {
    /// Errors raised while installing an index.
    pub enum IndexManagerError {
        /// The store could not be reached.
        Connection { message: String } => "index store connection failed: {message}",
        /// The server-side time budget ran out.
        Timeout { message: String } => "index creation timed out: {message}",
        /// An index with the same name but a different definition exists, or
        /// existing documents already violate the constraint.
        Conflict { message: String } => "index definition conflicts: {message}",
        /// Any other failure reported by the store.
        Command { message: String } => "index creation failed: {message}",
    }
}

/// Compound unique index over ascending keys.
///
/// # Examples
/// ```
/// use person_api::domain::ports::UniqueIndex;
///
/// let index = UniqueIndex::person();
/// assert_eq!(index.name(), "username_1_email_1");
/// assert_eq!(index.keys(), ["username", "email"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueIndex {
    name: String,
    keys: Vec<String>,
}

impl UniqueIndex {
    /// Declare an index over `keys`, named the way the store names indexes
    /// by default (`field_1_other_1`).
    pub fn ascending<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let name = keys
            .iter()
            .map(|key| format!("{key}_1"))
            .collect::<Vec<_>>()
            .join("_");
        Self { name, keys }
    }

    /// Uniqueness constraint for person documents: the `(username, email)`
    /// pair may appear at most once.
    pub fn person() -> Self {
        Self::ascending([fields::USERNAME, fields::EMAIL])
    }

    /// Index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Indexed fields in declaration order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// Port that installs unique indexes idempotently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IndexManager: Send + Sync {
    /// Create `index` if it does not exist. An identical existing index is a
    /// no-op.
    async fn ensure_unique_index(&self, index: &UniqueIndex) -> Result<(), IndexManagerError>;
}
