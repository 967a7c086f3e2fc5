//! Job card storage for the depot.
//!
//! This crate provides a trait-based store interface with an in-memory
//! provider and a JSON file backend.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod seed;

pub use trait_::{JobCardStore, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use seed::sample_job_cards;
