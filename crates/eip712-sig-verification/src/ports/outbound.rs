//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this subsystem needs.

use shared_types::{AccAddress, Account};

/// Read-only view of account state.
///
/// Lookups are synchronous; the decorator runs inside block processing and
/// expects a consistent snapshot for the duration of one call.
pub trait AccountKeeper: Send + Sync {
    /// Fetch an account, or `None` if it does not exist.
    fn get_account(&self, address: &AccAddress) -> Option<Account>;
}
