//! examtrack-store: exam and field store implementations.
//!
//! Implements the `ExamStore` and `FieldStore` traits over a JSON data file
//! and over in-memory collections, and loads the configuration that picks
//! between them.

pub mod config;
pub mod json;
pub mod memory;

pub use config::{create_store, load_config, load_config_from, ExamtrackConfig, StoreConfig};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
