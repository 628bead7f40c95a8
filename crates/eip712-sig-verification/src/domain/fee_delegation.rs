//! # Fee-Delegation Resolver
//!
//! Reads the transaction's Web3 extension option, which may:
//!
//! - override the EIP-712 domain chain id with an allow-listed value, so that
//!   wallets locked to Ethereum networks can still sign;
//! - name a fee payer who co-signs the same typed data and pays the fees.
//!
//! Only the first extension option is considered.

use super::config::VerificationConfig;
use super::ecdsa::recover_address;
use super::entities::{FeeDelegation, Hash, Web3TxOptions};
use super::errors::SignatureError;
use super::extensions::{DecodedExtension, ExtensionRegistry};
use shared_types::{AccAddress, SigVerifiableTx};
use tracing::warn;

/// Resolve the chain id override and fee delegation request of a transaction.
pub fn resolve(
    config: &VerificationConfig,
    registry: &ExtensionRegistry,
    tx: &dyn SigVerifiableTx,
) -> Result<Web3TxOptions, SignatureError> {
    let Some(option) = tx.extension_options().first() else {
        return Ok(Web3TxOptions::default());
    };

    let web3_tx = match registry
        .decode(option)
        .map_err(SignatureError::ExtensionDecodeFailed)?
    {
        DecodedExtension::Web3Tx(web3_tx) => web3_tx,
        DecodedExtension::Other(_) => return Ok(Web3TxOptions::default()),
    };

    let typed_data_chain_id = Some(web3_tx.typed_data_chain_id)
        .filter(|chain_id| config.is_override_allowed(*chain_id));

    let fee_delegation = if web3_tx.is_fee_delegated() {
        let fee_payer = AccAddress::from_bech32(&web3_tx.fee_payer, &config.bech32_prefix)
            .map_err(|e| SignatureError::InvalidFeePayerAddress(e.to_string()))?;

        if web3_tx.fee_payer_sig.is_empty() {
            return Err(SignatureError::MissingFeePayerSig);
        }

        Some(FeeDelegation {
            fee_payer,
            fee_payer_sig: web3_tx.fee_payer_sig,
        })
    } else {
        None
    };

    Ok(Web3TxOptions {
        typed_data_chain_id,
        fee_delegation,
    })
}

/// Check that the fee payer signature over `digest` recovers to the declared
/// fee payer.
pub fn verify_fee_payer(digest: &Hash, delegation: &FeeDelegation) -> Result<(), SignatureError> {
    let recovered = recover_address(digest, &delegation.fee_payer_sig)
        .map_err(|e| SignatureError::FeePayerSignatureInvalid(e.to_string()))?;

    if recovered != delegation.fee_payer {
        warn!(
            fee_payer = %delegation.fee_payer,
            recovered = %recovered,
            "Fee payer signature recovers to a different account"
        );
        return Err(SignatureError::FeePayerSignatureInvalid(format!(
            "recovered {}, expected {}",
            recovered, delegation.fee_payer
        )));
    }

    Ok(())
}
