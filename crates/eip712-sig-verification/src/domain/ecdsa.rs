//! # ECDSA (secp256k1)
//!
//! The two signature operations the decorator needs, kept deliberately apart:
//!
//! - **Known-key verification** (`verify_prehash_rs`): the signer's public key
//!   comes from the account store and only `R || S` is checked against it.
//!   The recovery id is never consumed on this path.
//! - **Key recovery** (`recover_address`): used only for the fee payer, whose
//!   key is not on record. All 65 bytes are consumed, `V` being the raw
//!   recovery id, and the recovered address is compared by the caller.
//!
//! ## Security Notes
//!
//! - High-S signatures are rejected on the known-key path (EIP-2) but
//!   recover normally, as libsecp256k1 recovery does.
//! - Uses the k256 crate for all curve operations.

use super::entities::Hash;
use super::errors::SignatureError;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{AccAddress, PublicKey};
use thiserror::Error;

/// Length of an `R || S || V` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Errors from public key recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("Recoverable signature must be 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    #[error("Invalid signature format")]
    InvalidFormat,

    #[error("Failed to recover public key")]
    RecoveryFailed,
}

// =============================================================================
// KNOWN-KEY VERIFICATION
// =============================================================================

/// Parse a SEC1-encoded secp256k1 public key (compressed or uncompressed).
pub fn parse_public_key(public_key: &PublicKey) -> Result<VerifyingKey, SignatureError> {
    VerifyingKey::from_sec1_bytes(public_key.as_bytes()).map_err(|_| SignatureError::InvalidPublicKey)
}

/// Verify a 64-byte `R || S` signature over a prehashed message against a
/// known public key.
pub fn verify_prehash_rs(
    message_hash: &Hash,
    public_key: &VerifyingKey,
    rs: &[u8; 64],
) -> Result<(), SignatureError> {
    let signature = Signature::from_slice(rs).map_err(|_| SignatureError::SignatureMismatch)?;

    // normalize_s returns Some only when S was in the upper half
    if signature.normalize_s().is_some() {
        return Err(SignatureError::SignatureMismatch);
    }

    public_key
        .verify_prehash(message_hash, &signature)
        .map_err(|_| SignatureError::SignatureMismatch)
}

// =============================================================================
// KEY RECOVERY
// =============================================================================

/// Recover the signer's address from a 65-byte `R || S || V` signature.
///
/// `V` is the raw recovery id (0..=3). High-S signatures are accepted and
/// recover the same key as their low-S twin.
pub fn recover_address(message_hash: &Hash, signature: &[u8]) -> Result<AccAddress, RecoveryError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(RecoveryError::InvalidLength(signature.len()));
    }

    let recovery_id = parse_recovery_id(signature[64])?;
    let sig = Signature::from_slice(&signature[..64]).map_err(|_| RecoveryError::InvalidFormat)?;

    // negating S negates R, so the y parity flips with it
    let (sig, recovery_id) = match sig.normalize_s() {
        Some(low_s) => (
            low_s,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (sig, recovery_id),
    };

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| RecoveryError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Parse a raw recovery id. Ethereum-style 27/28 values are not accepted.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, RecoveryError> {
    RecoveryId::from_byte(v).ok_or(RecoveryError::InvalidRecoveryId(v))
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the account address of a public key: last 20 bytes of the
/// Keccak256 of the uncompressed key without its `0x04` prefix.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> AccAddress {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    AccAddress(address)
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================
