//! Adapter implementations
//!
//! Concrete implementations of the port traits: plain files on disk and an
//! in-memory balance store.

pub mod json_file;
pub mod memory;
pub mod text_file;

pub use json_file::JsonFileStore;
pub use memory::MemoryBalanceStore;
pub use text_file::TextBalanceStore;
