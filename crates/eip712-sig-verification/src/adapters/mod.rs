//! # Adapters
//!
//! Account store implementations of the `AccountKeeper` port.

pub mod memory;

pub use memory::InMemoryAccountKeeper;
