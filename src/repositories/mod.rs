//! Persistence collaborator interfaces.
//!
//! The pipeline only ever needs two operations from storage: list the
//! active contracts and record a classified event. The trait is the seam to
//! whatever engine the surrounding deployment uses; the bundled
//! [`ContractRepository`] keeps everything in memory (optionally seeded
//! from a JSON file) for the binary and for tests.

mod contract;
mod error;

pub use contract::{ContractRepository, ContractRepositoryTrait};
pub use error::RepositoryError;
