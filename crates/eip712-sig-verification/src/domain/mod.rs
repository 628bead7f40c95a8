//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod builder;
pub mod config;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod extensions;
pub mod fee_delegation;
pub mod sign_doc;
pub mod typed_data;
pub mod verifier;
