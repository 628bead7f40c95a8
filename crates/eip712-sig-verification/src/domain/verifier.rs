//! # Signature Verification Engine
//!
//! Checks one signer's signature over the EIP-712 wrapping of the
//! transaction's legacy sign document.
//!
//! ## Algorithm
//!
//! 1. Accept only single legacy-amino-JSON signatures.
//! 2. Build the canonical sign bytes from the transaction and signer data.
//! 3. Resolve the Web3 extension (chain id override, fee delegation).
//! 4. Wrap into typed data and compute the digest.
//! 5. If delegated, the fee payer signature must recover to the fee payer.
//! 6. Verify `R || S` of the 65-byte signature against the account key.

use super::builder::{compute_typed_data_hash, wrap_tx_to_typed_data};
use super::config::VerificationConfig;
use super::ecdsa::{parse_public_key, verify_prehash_rs, SIGNATURE_LEN};
use super::entities::{Hash, SignerData, Web3TxOptions};
use super::errors::SignatureError;
use super::extensions::ExtensionRegistry;
use super::fee_delegation::{resolve, verify_fee_payer};
use super::sign_doc::std_sign_bytes;
use shared_types::{PublicKey, SigVerifiableTx, SignMode, SignatureData};

/// Stateless EIP-712 signature checker.
#[derive(Debug, Clone, Default)]
pub struct Eip712Verifier {
    config: VerificationConfig,
    registry: ExtensionRegistry,
}

impl Eip712Verifier {
    pub fn new(config: VerificationConfig, registry: ExtensionRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// The digest that a signer, and the fee payer if any, must sign for
    /// `tx` under `signer_data`.
    pub fn sign_doc_hash(
        &self,
        signer_data: &SignerData,
        tx: &dyn SigVerifiableTx,
    ) -> Result<Hash, SignatureError> {
        let options = resolve(&self.config, &self.registry, tx)?;
        self.typed_data_hash(signer_data, tx, &options)
    }

    /// Verify one signer's signature.
    pub fn verify_signature(
        &self,
        public_key: &PublicKey,
        signer_data: &SignerData,
        sig_data: &SignatureData,
        tx: &dyn SigVerifiableTx,
    ) -> Result<(), SignatureError> {
        let signature = match sig_data {
            SignatureData::Single {
                sign_mode: SignMode::LegacyAminoJson,
                signature,
            } => signature,
            SignatureData::Single { sign_mode, .. } => {
                return Err(SignatureError::UnsupportedSignMode(format!(
                    "sign mode {:?}",
                    sign_mode
                )))
            }
            SignatureData::Multi { .. } => {
                return Err(SignatureError::UnsupportedSignMode(
                    "multisig".to_string(),
                ))
            }
        };

        let options = resolve(&self.config, &self.registry, tx)?;
        let digest = self.typed_data_hash(signer_data, tx, &options)?;

        if let Some(delegation) = &options.fee_delegation {
            verify_fee_payer(&digest, delegation)?;
        }

        if signature.len() != SIGNATURE_LEN {
            return Err(SignatureError::BadSignatureLength(signature.len()));
        }

        let verifying_key = parse_public_key(public_key)?;
        let mut rs = [0u8; 64];
        rs.copy_from_slice(&signature[..64]);

        verify_prehash_rs(&digest, &verifying_key, &rs)
    }

    fn typed_data_hash(
        &self,
        signer_data: &SignerData,
        tx: &dyn SigVerifiableTx,
        options: &Web3TxOptions,
    ) -> Result<Hash, SignatureError> {
        let chain_id = match options.typed_data_chain_id {
            Some(chain_id) => chain_id,
            None => signer_data.chain_id.parse::<u64>().map_err(|_| {
                SignatureError::TypedDataBuildFailed(format!(
                    "invalid chain-id {:?}",
                    signer_data.chain_id
                ))
            })?,
        };

        let first_msg = tx.msgs().first().ok_or_else(|| {
            SignatureError::TypedDataBuildFailed("transaction has no messages".to_string())
        })?;

        let sign_bytes = std_sign_bytes(
            signer_data,
            tx.fee(),
            tx.msgs(),
            tx.memo(),
            tx.timeout_height(),
        );

        let typed_data = wrap_tx_to_typed_data(
            &self.config,
            chain_id,
            first_msg,
            &sign_bytes,
            options.fee_delegation.as_ref(),
        )?;

        compute_typed_data_hash(&typed_data)
    }
}
