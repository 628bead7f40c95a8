//! # Web3 Extension Option
//!
//! Wire type for `ethermint.types.v1.ExtensionOptionsWeb3Tx`, the transaction
//! extension that carries EIP-712 domain overrides and fee delegation data.
//!
//! The record is protobuf-encoded and consumed by remote signers, so its
//! encoding must stay byte-compatible: fields in tag order, proto3 defaults
//! omitted.

use prost::Message;
use prost_types::Any;

/// Type URL under which the extension is packed into an `Any`.
pub const WEB3_TX_TYPE_URL: &str = "/ethermint.types.v1.ExtensionOptionsWeb3Tx";

/// EIP-712 / fee delegation options attached to a transaction.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct ExtensionOptionsWeb3Tx {
    /// Chain id used only in the EIP-712 domain; should match the network id
    /// configured in the signing wallet.
    #[prost(uint64, tag = "1")]
    pub typed_data_chain_id: u64,
    /// Bech32 address of the account paying fees on behalf of the signer.
    #[prost(string, tag = "2")]
    pub fee_payer: String,
    /// Fee payer's 65-byte `R || S || V` signature over the same typed data.
    #[prost(bytes = "vec", tag = "3")]
    pub fee_payer_sig: Vec<u8>,
}

impl ExtensionOptionsWeb3Tx {
    /// Pack into an `Any` for inclusion in a transaction's extension options.
    pub fn to_any(&self) -> Any {
        Any {
            type_url: WEB3_TX_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }

    /// Decode from raw protobuf bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, prost::DecodeError> {
        Self::decode(bytes)
    }

    /// Whether fee delegation is requested.
    pub fn is_fee_delegated(&self) -> bool {
        !self.fee_payer.is_empty()
    }
}
