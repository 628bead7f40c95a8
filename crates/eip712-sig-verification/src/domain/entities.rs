//! # Domain Entities
//!
//! Per-verification data built by the decorator and the engine. None of it
//! outlives a single `ante_handle` call.

use shared_types::AccAddress;

/// A 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// Anti-replay tuple bound into every signed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerData {
    pub chain_id: String,
    /// `0` when verifying at genesis height.
    pub account_number: u64,
    pub sequence: u64,
}

/// Block-processing context the decorator runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnteContext {
    pub chain_id: String,
    pub block_height: i64,
    /// Transaction already passed a full check; signatures are skipped.
    pub is_recheck: bool,
    /// Gas simulation: bookkeeping runs, cryptography does not.
    pub simulate: bool,
}

impl AnteContext {
    pub fn new(chain_id: impl Into<String>, block_height: i64) -> Self {
        Self {
            chain_id: chain_id.into(),
            block_height,
            is_recheck: false,
            simulate: false,
        }
    }

    pub fn with_recheck(mut self, is_recheck: bool) -> Self {
        self.is_recheck = is_recheck;
        self
    }

    pub fn with_simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    pub fn is_genesis(&self) -> bool {
        self.block_height == 0
    }
}

/// A validated fee delegation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeDelegation {
    pub fee_payer: AccAddress,
    /// 65-byte `R || S || V` signature of the fee payer.
    pub fee_payer_sig: Vec<u8>,
}

/// Outcome of resolving a transaction's Web3 extension option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Web3TxOptions {
    /// Allow-listed EIP-712 domain chain id overriding the signer-data one.
    pub typed_data_chain_id: Option<u64>,
    pub fee_delegation: Option<FeeDelegation>,
}
