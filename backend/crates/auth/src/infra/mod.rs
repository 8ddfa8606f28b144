//! Infrastructure Layer
//!
//! Credential store implementations.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryAccountStore;
pub use sqlite::{SqliteAccountStore, StoreConfig};
