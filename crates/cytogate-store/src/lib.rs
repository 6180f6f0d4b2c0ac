//! Cytogate Store - Session store adapters
//!
//! This crate provides implementations of the `SessionStore` port: an in-memory
//! store for tests and embedding, and a JSON file store for durable sessions.

pub mod file;
pub mod memory;
mod records;

pub use file::JsonFileStore;
pub use memory::MemorySessionStore;
