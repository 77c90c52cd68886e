//! MongoDB persistence adapters.
//!
//! This module provides concrete implementations of the domain person ports
//! backed by MongoDB via the official `mongodb` driver.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between stored documents
//!   and domain types. No business logic resides here.
//! - **Internal models**: BSON document structs (`documents.rs`) are
//!   implementation details, never exposed to the domain layer.
//! - **Shared client**: one [`MongoStore`] is connected at startup; the
//!   driver pools connections internally.
//! - **Strongly typed errors**: driver errors are classified once and mapped
//!   to the port error enums.
//!
//! # Example
//!
//! ```ignore
//! use person_api::outbound::persistence::{MongoPersonRepository, MongoStore, StoreConfig};
//!
//! let store = MongoStore::connect(StoreConfig::new("mongodb://localhost:27017")).await?;
//! let repo = MongoPersonRepository::new(&store);
//! ```

mod documents;
mod mongo_error_mapping;
mod mongo_index_manager;
mod mongo_person_repository;
mod store;

pub use mongo_index_manager::MongoIndexManager;
pub use mongo_person_repository::MongoPersonRepository;
pub use store::{MongoStore, StoreConfig, StoreError};
