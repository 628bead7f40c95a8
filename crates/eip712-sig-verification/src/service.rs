//! # EIP-712 Signature Verification Decorator
//!
//! Application service layer that implements the `AnteDecorator` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AnteDecorator`)
//! - Uses the outbound port (`AccountKeeper`) for signer accounts
//! - Delegates cryptographic operations to the domain layer
//!
//! ## Replay Protection
//!
//! Each signature commits to the signer's account number, the chain id and
//! the account's current sequence. A signature whose claimed sequence is not
//! the account's current one is rejected before any cryptography runs; the
//! sequence itself is advanced by a later pipeline step, never here.

use crate::domain::entities::{AnteContext, SignerData};
use crate::domain::errors::VerificationError;
use crate::domain::verifier::Eip712Verifier;
use crate::ports::inbound::AnteDecorator;
use crate::ports::outbound::AccountKeeper;
use ante_telemetry::metrics::{record_failure, record_success, SIGNATURE_VERIFICATIONS};
use rayon::prelude::*;
use shared_types::Tx;
use std::time::Instant;
use tracing::{debug, trace};

/// Verifies every signer's EIP-712 signature on incoming transactions.
///
/// All signers must pass; the first failing signer, in signer order,
/// determines the error.
pub struct Eip712SigVerificationDecorator<K: AccountKeeper> {
    accounts: K,
    verifier: Eip712Verifier,
}

impl<K: AccountKeeper> Eip712SigVerificationDecorator<K> {
    /// Create a decorator over an account store.
    ///
    /// # Arguments
    /// * `accounts` - Read-only account lookup
    /// * `verifier` - Engine carrying configuration and the extension registry
    pub fn new(accounts: K, verifier: Eip712Verifier) -> Self {
        Self { accounts, verifier }
    }

    /// Create a decorator with default configuration.
    pub fn with_defaults(accounts: K) -> Self {
        Self::new(accounts, Eip712Verifier::default())
    }

    pub fn accounts(&self) -> &K {
        &self.accounts
    }

    pub fn verifier(&self) -> &Eip712Verifier {
        &self.verifier
    }

    fn check(&self, ctx: &AnteContext, tx: &dyn Tx) -> Result<(), VerificationError> {
        let sig_tx = tx.as_sig_verifiable().ok_or_else(|| {
            VerificationError::MalformedTransaction(
                "transaction does not carry signatures".to_string(),
            )
        })?;

        let signatures = sig_tx
            .signatures()
            .map_err(|e| VerificationError::MalformedTransaction(e.to_string()))?;
        let signers = sig_tx.signers();

        if signatures.len() != signers.len() {
            return Err(VerificationError::SignerCountMismatch {
                expected: signers.len(),
                got: signatures.len(),
            });
        }

        for (index, (signer, sig)) in signers.iter().zip(signatures.iter()).enumerate() {
            let account = self
                .accounts
                .get_account(signer)
                .ok_or(VerificationError::SignerNotFound(*signer))?;

            // simulation tolerates accounts that have never signed before
            if !ctx.simulate && account.public_key.is_none() {
                return Err(VerificationError::MissingPubKey(*signer));
            }

            if sig.sequence != account.sequence {
                return Err(VerificationError::SequenceMismatch {
                    expected: account.sequence,
                    got: sig.sequence,
                });
            }

            let account_number = if ctx.is_genesis() {
                0
            } else {
                account.account_number
            };

            let Some(public_key) = account.public_key.as_ref().filter(|_| !ctx.simulate) else {
                continue;
            };

            let signer_data = SignerData {
                chain_id: ctx.chain_id.clone(),
                account_number,
                sequence: account.sequence,
            };

            if let Err(source) =
                self.verifier
                    .verify_signature(public_key, &signer_data, &sig.data, sig_tx)
            {
                debug!(
                    signer_index = index,
                    signer = %signer,
                    account_number,
                    chain_id = %ctx.chain_id,
                    error = %source,
                    "Signer rejected"
                );
                return Err(VerificationError::SignatureInvalid {
                    account_number,
                    chain_id: ctx.chain_id.clone(),
                    source,
                });
            }

            trace!(
                signer_index = index,
                signer = %signer,
                sequence = account.sequence,
                "Signer verified"
            );
        }

        Ok(())
    }
}

impl<K: AccountKeeper> AnteDecorator for Eip712SigVerificationDecorator<K> {
    fn ante_handle(&self, ctx: &AnteContext, tx: &dyn Tx) -> Result<(), VerificationError> {
        // signatures were already checked when the transaction first entered
        if ctx.is_recheck {
            SIGNATURE_VERIFICATIONS.with_label_values(&["skipped"]).inc();
            return Ok(());
        }

        let start = Instant::now();
        let result = self.check(ctx, tx);
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(()) => record_success(elapsed),
            Err(e) => record_failure(e.reason(), elapsed),
        }

        result
    }

    fn verify_batch(
        &self,
        ctx: &AnteContext,
        txs: &[&dyn Tx],
    ) -> Vec<Result<(), VerificationError>> {
        txs.par_iter().map(|tx| self.ante_handle(ctx, *tx)).collect()
    }
}
