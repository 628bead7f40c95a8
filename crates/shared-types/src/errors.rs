//! # Error Types
//!
//! Errors raised while constructing or inspecting decoded transactions.

use thiserror::Error;

/// Errors from parsing or encoding account addresses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Address is not valid bech32.
    #[error("Invalid bech32 address: {0}")]
    InvalidBech32(String),

    /// Human-readable part does not match the expected account prefix.
    #[error("Invalid address prefix: expected {expected}, got {actual}")]
    WrongPrefix { expected: String, actual: String },

    /// Decoded payload has the wrong number of bytes.
    #[error("Invalid address length: expected 20, got {0}")]
    InvalidLength(usize),

    /// Account prefix is not a valid bech32 human-readable part.
    #[error("Invalid address prefix: {0}")]
    InvalidPrefix(String),
}

/// Errors from signature extraction on a decoded transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TxError {
    /// Signer info could not be turned into signature data.
    #[error("Invalid signer info at index {index}: {reason}")]
    InvalidSignerInfo { index: usize, reason: String },

    /// Transaction carries no messages.
    #[error("Transaction has no messages")]
    EmptyMessages,
}
