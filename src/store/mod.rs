//! Durable key-value storage backends
//!
//! The synchronizer only ever talks to a `DurableStore`. Two native backends
//! are provided:
//! - **memory**: volatile map, used for tests and throwaway sessions
//! - **file**: flat JSON object on disk, survives across runs

use anyhow::Result;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Persistent string key-value store (the native counterpart of `localStorage`)
pub trait DurableStore {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
