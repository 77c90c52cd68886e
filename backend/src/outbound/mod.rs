//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed person repository and index manager
//! - **memory**: in-memory store with the same semantics, for tests and
//!   database-free runs
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

mod json_numbers;
pub mod memory;
pub mod persistence;
