//! # Core Domain Entities
//!
//! Decoded Cosmos-style transaction and account types.
//!
//! ## Clusters
//!
//! - **Identity**: `AccAddress`, `PublicKey`
//! - **Transaction**: `LegacyMsg`, `Fee`, `Coin`, `Transaction`
//! - **Signatures**: `SignMode`, `SignatureData`, `SignatureV2`
//! - **State**: `Account`

use crate::errors::{AddressError, TxError};
use bech32::{Bech32, Hrp};
use prost_types::Any;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte account address.
///
/// Derived from a secp256k1 key as `keccak256(uncompressed_pubkey[1..])[12..]`,
/// so the same bytes double as the Ethereum address of that key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AccAddress(pub [u8; 20]);

impl AccAddress {
    /// Address length in bytes.
    pub const LEN: usize = 20;

    /// Build an address from a byte slice of exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let array: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }

    /// Parse a bech32 address, requiring the given human-readable prefix.
    pub fn from_bech32(address: &str, prefix: &str) -> Result<Self, AddressError> {
        let (hrp, data) =
            bech32::decode(address).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;

        if !hrp.as_str().eq_ignore_ascii_case(prefix) {
            return Err(AddressError::WrongPrefix {
                expected: prefix.to_string(),
                actual: hrp.to_string(),
            });
        }

        Self::from_slice(&data)
    }

    /// Encode as bech32 with the given human-readable prefix.
    pub fn to_bech32(&self, prefix: &str) -> Result<String, AddressError> {
        let hrp = Hrp::parse(prefix).map_err(|e| AddressError::InvalidPrefix(e.to_string()))?;
        bech32::encode::<Bech32>(hrp, &self.0).map_err(|e| AddressError::InvalidBech32(e.to_string()))
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl From<[u8; 20]> for AccAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccAddress({})", self)
    }
}

/// A secp256k1 public key in SEC1 encoding (33-byte compressed or 65-byte
/// uncompressed).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub Vec<u8>);

impl PublicKey {
    /// Raw SEC1 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(0x{})", hex::encode(&self.0))
    }
}

// =============================================================================
// CLUSTER B: TRANSACTION
// =============================================================================

/// A token amount. `amount` is a base-10 integer string, as in amino JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }
}

/// Transaction fee: coins paid plus the gas limit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,
}

/// A message in its legacy amino-JSON form.
///
/// `value` is the amino JSON body of the message; `msg_type` is its amino
/// route name (e.g. `cosmos-sdk/MsgSend`). Signers are resolved by the
/// decoder that produced the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyMsg {
    pub msg_type: String,
    pub value: serde_json::Value,
    pub signers: Vec<AccAddress>,
}

impl LegacyMsg {
    pub fn new(
        msg_type: impl Into<String>,
        value: serde_json::Value,
        signers: Vec<AccAddress>,
    ) -> Self {
        Self {
            msg_type: msg_type.into(),
            value,
            signers,
        }
    }

    /// The `{"type", "value"}` object embedded in the legacy sign document.
    pub fn sign_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.msg_type,
            "value": self.value,
        })
    }
}

// =============================================================================
// CLUSTER C: SIGNATURES
// =============================================================================

/// Signing modes as numbered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum SignMode {
    Unspecified = 0,
    Direct = 1,
    Textual = 2,
    LegacyAminoJson = 127,
    Eip191 = 191,
}

/// Signature payload for one signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureData {
    /// One key, one signature.
    Single {
        sign_mode: SignMode,
        signature: Vec<u8>,
    },
    /// Threshold multisig; each entry is a nested signature.
    Multi { signatures: Vec<SignatureData> },
}

/// Signature of one signer together with the sequence it claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureV2 {
    pub public_key: Option<PublicKey>,
    pub data: SignatureData,
    pub sequence: u64,
}

// =============================================================================
// CLUSTER D: STATE
// =============================================================================

/// On-chain account record, as returned by the account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: AccAddress,
    pub public_key: Option<PublicKey>,
    pub account_number: u64,
    pub sequence: u64,
}

// =============================================================================
// TRANSACTION ACCESSORS
// =============================================================================

/// Any decoded transaction entering the ante pipeline.
pub trait Tx: Send + Sync {
    /// Messages carried by the transaction.
    fn msgs(&self) -> &[LegacyMsg];

    /// Signature accessors, if this transaction type carries signatures.
    fn as_sig_verifiable(&self) -> Option<&dyn SigVerifiableTx> {
        None
    }
}

/// A transaction that exposes signers, signatures, and the signable fields.
pub trait SigVerifiableTx: Tx {
    /// Signers in order of first appearance across all messages.
    fn signers(&self) -> Vec<AccAddress>;

    /// One signature per signer, in signer order.
    fn signatures(&self) -> Result<Vec<SignatureV2>, TxError>;

    fn fee(&self) -> &Fee;

    fn memo(&self) -> &str;

    fn timeout_height(&self) -> u64;

    fn extension_options(&self) -> &[Any];
}

/// A decoded Cosmos transaction.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub msgs: Vec<LegacyMsg>,
    pub fee: Fee,
    pub memo: String,
    pub timeout_height: u64,
    pub extension_options: Vec<Any>,
    pub signatures: Vec<SignatureV2>,
}

impl Tx for Transaction {
    fn msgs(&self) -> &[LegacyMsg] {
        &self.msgs
    }

    fn as_sig_verifiable(&self) -> Option<&dyn SigVerifiableTx> {
        Some(self)
    }
}

impl SigVerifiableTx for Transaction {
    fn signers(&self) -> Vec<AccAddress> {
        let mut signers: Vec<AccAddress> = Vec::new();
        for signer in self.msgs.iter().flat_map(|msg| msg.signers.iter()) {
            if !signers.contains(signer) {
                signers.push(*signer);
            }
        }
        signers
    }

    fn signatures(&self) -> Result<Vec<SignatureV2>, TxError> {
        if self.msgs.is_empty() {
            return Err(TxError::EmptyMessages);
        }

        for (index, sig) in self.signatures.iter().enumerate() {
            if let SignatureData::Multi { signatures } = &sig.data {
                if signatures.is_empty() {
                    return Err(TxError::InvalidSignerInfo {
                        index,
                        reason: "multisig without signatures".to_string(),
                    });
                }
            }
        }

        Ok(self.signatures.clone())
    }

    fn fee(&self) -> &Fee {
        &self.fee
    }

    fn memo(&self) -> &str {
        &self.memo
    }

    fn timeout_height(&self) -> u64 {
        self.timeout_height
    }

    fn extension_options(&self) -> &[Any] {
        &self.extension_options
    }
}
