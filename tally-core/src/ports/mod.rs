//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for storage. Services depend only on these
//! traits, not on concrete implementations.

mod balance_store;
mod document_store;

pub use balance_store::BalanceStore;
pub use document_store::DocumentStore;
