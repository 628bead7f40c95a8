//! # EIP-712 Signature Verification
//!
//! Ante decorator that proves a Cosmos-style transaction was authorized by
//! all of its signers, using Ethereum wallet signatures over an EIP-712
//! wrapping of the legacy amino-JSON sign document.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Typed-data building and hashing, ECDSA,
//!   fee delegation; no I/O
//! - **Ports Layer** (`ports/`): `AnteDecorator` (inbound), `AccountKeeper`
//!   (outbound)
//! - **Adapters** (`adapters/`): In-memory account store
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Replay Protection**: signatures bind account number, chain id and
//!   account sequence
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are
//!   rejected
//! - **Fee Delegation**: the fee payer co-signs the same digest and is
//!   authenticated by public key recovery

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::InMemoryAccountKeeper;
pub use domain::builder::{compute_typed_data_hash, wrap_tx_to_typed_data};
pub use domain::config::{ConfigError, VerificationConfig};
pub use domain::ecdsa::{address_from_pubkey, keccak256};
pub use domain::entities::{AnteContext, FeeDelegation, Hash, SignerData, Web3TxOptions};
pub use domain::errors::{SignatureError, VerificationError};
pub use domain::extensions::{DecodedExtension, ExtensionRegistry};
pub use domain::sign_doc::std_sign_bytes;
pub use domain::typed_data::{TypedData, TypedDataDomain, TypedDataError, TypedField, Types};
pub use domain::verifier::Eip712Verifier;
pub use ports::inbound::AnteDecorator;
pub use ports::outbound::AccountKeeper;
pub use service::Eip712SigVerificationDecorator;
