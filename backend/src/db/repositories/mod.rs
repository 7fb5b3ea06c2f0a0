//! Repository implementations module.
//!
//! This module contains the implementations of the repository traits:
//! - `mongo`: MongoDB implementation over the official async driver
//! - `local`: In-memory implementation for unit testing and local development
pub mod local;
#[cfg(feature = "mongo-repo")]
pub mod mongo;

pub use local::LocalRepository;
#[cfg(feature = "mongo-repo")]
pub use mongo::MongoRepository;
