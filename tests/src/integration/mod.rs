//! # Integration Tests
//!
//! End-to-end decorator flows with real secp256k1 keys.
//!
//! - `decorator_flows`: signing, replay protection, chain id override, batches
//! - `fee_delegation`: fee payer co-signatures
//! - `properties`: property-based tamper checks
//! - `telemetry`: metrics emitted per ante pass
//! - `wire_format`: fixed byte and hash vectors

pub mod fee_delegation;
pub mod properties;
pub mod wire_format;
