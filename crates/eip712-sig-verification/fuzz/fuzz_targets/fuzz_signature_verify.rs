//! Fuzz target for signature verification over EIP-712 digests.
//!
//! Arbitrary keys, signatures and message bodies must produce an error, never
//! a panic, and never an acceptance.
//!
//! ## Running
//!
//! ```bash
//! cd crates/eip712-sig-verification
//! cargo +nightly fuzz run fuzz_signature_verify
//! ```

#![no_main]

use eip712_sig_verification::{Eip712Verifier, SignerData};
use libfuzzer_sys::fuzz_target;
use shared_types::{
    AccAddress, LegacyMsg, PublicKey, SignMode, SignatureData, Transaction,
};

/// Fuzz input structure for verification.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    public_key: Vec<u8>,
    signature: Vec<u8>,
    /// Message body, parsed as JSON when possible
    body: String,
    chain_id: String,
    sequence: u64,
}

fuzz_target!(|input: FuzzInput| {
    let value = serde_json::from_str(&input.body).unwrap_or(serde_json::Value::Null);
    let tx = Transaction {
        msgs: vec![LegacyMsg::new("fuzz/Msg", value, vec![AccAddress::default()])],
        ..Default::default()
    };
    let signer_data = SignerData {
        chain_id: input.chain_id,
        account_number: 0,
        sequence: input.sequence,
    };
    let sig_data = SignatureData::Single {
        sign_mode: SignMode::LegacyAminoJson,
        signature: input.signature,
    };

    let verifier = Eip712Verifier::default();
    let result = verifier.verify_signature(&PublicKey(input.public_key), &signer_data, &sig_data, &tx);

    // Forging a signature without the private key is infeasible
    assert!(result.is_err());

    // Deterministic digest
    let first = verifier.sign_doc_hash(&signer_data, &tx);
    let second = verifier.sign_doc_hash(&signer_data, &tx);
    assert_eq!(first, second);
});
