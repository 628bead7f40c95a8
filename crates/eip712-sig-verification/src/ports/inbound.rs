//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::AnteContext;
use crate::domain::errors::VerificationError;
use shared_types::Tx;

/// A pluggable step of the transaction admission pipeline.
///
/// Implementations must be thread-safe (`Send + Sync`) and must not mutate
/// account state.
pub trait AnteDecorator: Send + Sync {
    /// Check one transaction in the given block context.
    ///
    /// # Errors
    /// Any error is terminal for the transaction.
    fn ante_handle(&self, ctx: &AnteContext, tx: &dyn Tx) -> Result<(), VerificationError>;

    /// Check independent transactions in parallel.
    ///
    /// Each result is identical to what `ante_handle` returns for that
    /// transaction; results keep the input order.
    fn verify_batch(
        &self,
        ctx: &AnteContext,
        txs: &[&dyn Tx],
    ) -> Vec<Result<(), VerificationError>>;
}
