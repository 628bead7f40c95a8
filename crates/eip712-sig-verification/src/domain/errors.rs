//! # Verification Errors
//!
//! Two layers: `SignatureError` is what the engine reports for one signer;
//! `VerificationError` is what the decorator returns for the whole
//! transaction, wrapping engine failures with the signer's replay context.
//!
//! No variant carries raw signature bytes.

use shared_types::AccAddress;
use thiserror::Error;

/// Failure while checking one signer's signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Signature data is not a single legacy-amino-JSON signature.
    #[error("Unsupported signature data: {0}")]
    UnsupportedSignMode(String),

    /// Signature is not the 65-byte `R || S || V` layout.
    #[error("Signature length {0} doesn't match typical [R||S||V] signature 65 bytes")]
    BadSignatureLength(usize),

    /// Signature does not verify against the account's public key.
    #[error("Unable to verify signer signature of EIP712 typed data")]
    SignatureMismatch,

    /// Account public key is not a valid secp256k1 point.
    #[error("Invalid secp256k1 public key")]
    InvalidPublicKey,

    /// Fee payer in the extension option is not a valid account address.
    #[error("Failed to parse fee payer from ExtensionOptionsWeb3Tx: {0}")]
    InvalidFeePayerAddress(String),

    /// Fee payer set without a fee payer signature.
    #[error("No feePayerSig provided in ExtensionOptionsWeb3Tx")]
    MissingFeePayerSig,

    /// Fee payer signature does not recover to the declared fee payer.
    #[error("Failed to verify delegated fee payer sig: {0}")]
    FeePayerSignatureInvalid(String),

    /// Canonical document could not be built or hashed.
    #[error("Failed to pack tx data in EIP712 object: {0}")]
    TypedDataBuildFailed(String),

    /// Extension option could not be unpacked.
    #[error("Failed to unpack extension option: {0}")]
    ExtensionDecodeFailed(String),
}

/// Rejection of a whole transaction by the decorator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Transaction does not expose signers and signatures.
    #[error("Invalid transaction type: {0}")]
    MalformedTransaction(String),

    /// Number of signatures differs from number of signers.
    #[error("Invalid number of signer; expected: {expected}, got {got}")]
    SignerCountMismatch { expected: usize, got: usize },

    /// Signer has no account in state.
    #[error("Account {0} does not exist")]
    SignerNotFound(AccAddress),

    /// Signer's account has no registered public key.
    #[error("Pubkey on account {0} is not set")]
    MissingPubKey(AccAddress),

    /// Signature sequence does not match the account's current sequence.
    #[error("Account sequence mismatch, expected {expected}, got {got}")]
    SequenceMismatch { expected: u64, got: u64 },

    /// Engine rejected the signature of one signer.
    #[error(
        "Signature verification failed; please verify account number ({account_number}) and chain-id ({chain_id})"
    )]
    SignatureInvalid {
        account_number: u64,
        chain_id: String,
        #[source]
        source: SignatureError,
    },
}

impl VerificationError {
    /// Engine-level cause, if the rejection came from signature checking.
    pub fn cause(&self) -> Option<&SignatureError> {
        match self {
            Self::SignatureInvalid { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Stable short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MalformedTransaction(_) => "malformed_transaction",
            Self::SignerCountMismatch { .. } => "signer_count_mismatch",
            Self::SignerNotFound(_) => "signer_not_found",
            Self::MissingPubKey(_) => "missing_pubkey",
            Self::SequenceMismatch { .. } => "sequence_mismatch",
            Self::SignatureInvalid { source, .. } => source.reason(),
        }
    }
}

impl SignatureError {
    /// Stable short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnsupportedSignMode(_) => "unsupported_sign_mode",
            Self::BadSignatureLength(_) => "bad_signature_length",
            Self::SignatureMismatch => "signature_mismatch",
            Self::InvalidPublicKey => "invalid_pubkey",
            Self::InvalidFeePayerAddress(_) => "invalid_fee_payer_address",
            Self::MissingFeePayerSig => "missing_fee_payer_sig",
            Self::FeePayerSignatureInvalid(_) => "fee_payer_signature_invalid",
            Self::TypedDataBuildFailed(_) => "typed_data_build_failed",
            Self::ExtensionDecodeFailed(_) => "extension_decode_failed",
        }
    }
}
