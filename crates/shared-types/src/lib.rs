//! # Shared Types Crate
//!
//! Domain entities handed to the signature verification decorator by the
//! upstream transaction and account decoders.
//!
//! ## Design Principles
//!
//! - **Already decoded**: Everything here is an in-memory structure. Wire
//!   decoding happens before these types are constructed, with the single
//!   exception of extension options, which stay as `Any` payloads until a
//!   registry decodes them.
//! - **Read-only to verification**: Transactions and accounts are borrowed for
//!   one verification pass and never mutated by it.

pub mod entities;
pub mod errors;
pub mod web3;

pub use entities::*;
pub use errors::*;
pub use web3::{ExtensionOptionsWeb3Tx, WEB3_TX_TYPE_URL};

pub use prost_types::Any;
