//! # Vivarium IO
//!
//! Persistence layer for the Vivarium sandbox.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The sparse board codec and the base64 import/export token format
//! - The named pattern library with replace-on-save semantics
//! - Key-value settings storage with in-memory and file backends

/// Sparse board encoding and the shareable token format
pub mod codec;
/// Error types and result aliases for persistence operations
pub mod error;
/// Named, timestamped pattern collection
pub mod patterns;
/// Key-value settings storage backends
pub mod storage;

pub use codec::{encode, export_token, import_token, is_valid_token, CellList, SavedState};
pub use error::{ImportError, IoError, Result};
pub use patterns::{Pattern, PatternLibrary, PatternOrder, MAX_NAME_LEN};
pub use storage::{load_or, store_value, JsonFileStore, KeyValueStore, MemoryStore};
