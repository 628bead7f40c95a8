//! # Test Fixtures
//!
//! Wallet-side helpers: key generation, transaction construction and signing
//! of the EIP-712 digest exactly as an Ethereum wallet would.

use eip712_sig_verification::{
    address_from_pubkey, AnteContext, Eip712SigVerificationDecorator, Eip712Verifier, Hash,
    InMemoryAccountKeeper, SignerData,
};
use k256::ecdsa::SigningKey;
use serde_json::json;
use shared_types::{
    AccAddress, Account, Coin, ExtensionOptionsWeb3Tx, Fee, LegacyMsg, PublicKey, SignMode,
    SignatureData, SignatureV2, Transaction,
};

pub const CHAIN_ID: &str = "9000";
pub const BECH32_PREFIX: &str = "ethm";

pub type Decorator = Eip712SigVerificationDecorator<InMemoryAccountKeeper>;

/// A secp256k1 key pair and its account address.
pub struct TestWallet {
    pub key: SigningKey,
    pub address: AccAddress,
}

impl TestWallet {
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    /// Compressed SEC1 key, as stored on the account.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(
            self.key
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
        )
    }

    /// `R || S || V` over a digest, `V` in {27, 28} as Ethereum wallets
    /// produce it.
    pub fn sign_digest(&self, digest: &Hash) -> Vec<u8> {
        let mut out = self.sign_digest_raw(digest);
        out[64] += 27;
        out
    }

    /// `R || S || V` with the raw recovery id as `V`, the form a fee payer
    /// signature must take.
    pub fn sign_digest_raw(&self, digest: &Hash) -> Vec<u8> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest)
            .expect("signing failed");
        let mut out = signature.to_bytes().to_vec();
        out.push(recovery_id.to_byte());
        out
    }

    pub fn bech32(&self) -> String {
        self.address
            .to_bech32(BECH32_PREFIX)
            .expect("valid prefix")
    }
}

pub fn decorator() -> Decorator {
    Eip712SigVerificationDecorator::with_defaults(InMemoryAccountKeeper::new())
}

pub fn ctx() -> AnteContext {
    AnteContext::new(CHAIN_ID, 100)
}

/// Create the wallet's account in the store.
pub fn register(decorator: &Decorator, wallet: &TestWallet, account_number: u64, sequence: u64) {
    decorator.accounts().set_account(Account {
        address: wallet.address,
        public_key: Some(wallet.public_key()),
        account_number,
        sequence,
    });
}

/// A bank send signed by `signers`.
pub fn send_tx(signers: &[AccAddress], amount: u128) -> Transaction {
    Transaction {
        msgs: vec![LegacyMsg::new(
            "cosmos-sdk/MsgSend",
            json!({
                "from_address": "ethm1sender",
                "to_address": "ethm1recipient",
                "amount": [{"denom": "aphoton", "amount": amount.to_string()}],
            }),
            signers.to_vec(),
        )],
        fee: Fee {
            amount: vec![Coin::new("aphoton", 20)],
            gas_limit: 200_000,
        },
        memo: "integration".to_string(),
        ..Default::default()
    }
}

pub fn signer_data(account_number: u64, sequence: u64) -> SignerData {
    SignerData {
        chain_id: CHAIN_ID.to_string(),
        account_number,
        sequence,
    }
}

/// Append `wallet`'s signature for the given replay context.
pub fn sign_tx(
    verifier: &Eip712Verifier,
    tx: &mut Transaction,
    wallet: &TestWallet,
    account_number: u64,
    sequence: u64,
) {
    let digest = verifier
        .sign_doc_hash(&signer_data(account_number, sequence), &*tx)
        .expect("digest");

    tx.signatures.push(SignatureV2 {
        public_key: Some(wallet.public_key()),
        data: SignatureData::Single {
            sign_mode: SignMode::LegacyAminoJson,
            signature: wallet.sign_digest(&digest),
        },
        sequence,
    });
}

/// Attach a Web3 extension naming `payer`, signed by `payer_signer` over the
/// digest the signer will also sign.
pub fn attach_fee_payer(
    verifier: &Eip712Verifier,
    tx: &mut Transaction,
    payer: &TestWallet,
    payer_signer: &TestWallet,
    typed_data_chain_id: u64,
    signer_data: &SignerData,
) {
    let mut option = ExtensionOptionsWeb3Tx {
        typed_data_chain_id,
        fee_payer: payer.bech32(),
        // the digest does not cover the signature itself
        fee_payer_sig: vec![0; 65],
    };
    tx.extension_options = vec![option.to_any()];

    let digest = verifier.sign_doc_hash(signer_data, &*tx).expect("digest");
    option.fee_payer_sig = payer_signer.sign_digest_raw(&digest);
    tx.extension_options = vec![option.to_any()];
}

pub fn raw_signature(tx: &Transaction, index: usize) -> Vec<u8> {
    match &tx.signatures[index].data {
        SignatureData::Single { signature, .. } => signature.clone(),
        SignatureData::Multi { .. } => Vec::new(),
    }
}

pub fn replace_signature(tx: &mut Transaction, index: usize, signature: Vec<u8>) {
    tx.signatures[index].data = SignatureData::Single {
        sign_mode: SignMode::LegacyAminoJson,
        signature,
    };
}
