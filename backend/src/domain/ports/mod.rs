//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod index_manager;
mod person_repository;

#[cfg(test)]
pub use index_manager::MockIndexManager;
pub use index_manager::{IndexManager, IndexManagerError, UniqueIndex};
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{PersonRepository, PersonRepositoryError};
