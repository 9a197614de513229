//! Common library for the SmartVet application
//!
//! This crate provides shared functionality used across the SmartVet
//! crates: client-side key/value storage, error types, layered settings
//! and logging setup.

pub mod error;
pub mod logging;
pub mod settings;
pub mod storage;

pub use error::{StorageError, StorageResult, ValidationError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageConfig};
