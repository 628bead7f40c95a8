//! # Fee Delegation Flows
//!
//! A fee payer co-signs the signer's digest and is authenticated by public
//! key recovery. The fee payer needs no account in the store.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use eip712_sig_verification::{AnteDecorator, SignatureError, VerificationError};
    use shared_types::{ExtensionOptionsWeb3Tx, Transaction};

    struct Delegated {
        decorator: Decorator,
        signer: TestWallet,
        payer: TestWallet,
    }

    fn setup() -> Delegated {
        let decorator = decorator();
        let signer = TestWallet::random();
        register(&decorator, &signer, 3, 2);
        Delegated {
            decorator,
            signer,
            payer: TestWallet::random(),
        }
    }

    fn delegated_tx(env: &Delegated, payer_signer: &TestWallet, chain_id: u64) -> Transaction {
        let verifier = env.decorator.verifier();
        let mut tx = send_tx(&[env.signer.address], 250);
        attach_fee_payer(
            verifier,
            &mut tx,
            &env.payer,
            payer_signer,
            chain_id,
            &signer_data(3, 2),
        );
        sign_tx(verifier, &mut tx, &env.signer, 3, 2);
        tx
    }

    fn web3_option(tx: &Transaction) -> ExtensionOptionsWeb3Tx {
        ExtensionOptionsWeb3Tx::from_bytes(&tx.extension_options[0].value).unwrap()
    }

    fn expect_cause(result: Result<(), VerificationError>) -> SignatureError {
        result
            .unwrap_err()
            .cause()
            .cloned()
            .expect("signature failure")
    }

    #[test]
    fn test_payer_and_signer_both_sign() {
        let env = setup();
        let tx = delegated_tx(&env, &env.payer, 0);

        assert_eq!(env.decorator.ante_handle(&ctx(), &tx), Ok(()));
    }

    #[test]
    fn test_delegation_with_chain_override() {
        let env = setup();
        let tx = delegated_tx(&env, &env.payer, 1);

        assert_eq!(web3_option(&tx).typed_data_chain_id, 1);
        assert_eq!(env.decorator.ante_handle(&ctx(), &tx), Ok(()));
    }

    #[test]
    fn test_stranger_cannot_sign_for_payer() {
        let env = setup();
        let stranger = TestWallet::random();
        let tx = delegated_tx(&env, &stranger, 0);

        assert!(matches!(
            expect_cause(env.decorator.ante_handle(&ctx(), &tx)),
            SignatureError::FeePayerSignatureInvalid(_)
        ));
    }

    #[test]
    fn test_payer_checked_before_signer() {
        let env = setup();
        let mut tx = delegated_tx(&env, &env.payer, 0);
        // both signatures now cover a stale digest
        tx.memo = "edited".to_string();

        assert!(matches!(
            expect_cause(env.decorator.ante_handle(&ctx(), &tx)),
            SignatureError::FeePayerSignatureInvalid(_)
        ));
    }

    #[test]
    fn test_ethereum_style_recovery_id_rejected() {
        let env = setup();
        let mut tx = delegated_tx(&env, &env.payer, 0);
        let mut option = web3_option(&tx);
        option.fee_payer_sig[64] += 27;
        tx.extension_options = vec![option.to_any()];

        assert!(matches!(
            expect_cause(env.decorator.ante_handle(&ctx(), &tx)),
            SignatureError::FeePayerSignatureInvalid(_)
        ));
    }

    #[test]
    fn test_bad_recovery_id_rejected() {
        let env = setup();
        let mut tx = delegated_tx(&env, &env.payer, 0);
        let mut option = web3_option(&tx);
        option.fee_payer_sig[64] = 5;
        tx.extension_options = vec![option.to_any()];

        assert!(matches!(
            expect_cause(env.decorator.ante_handle(&ctx(), &tx)),
            SignatureError::FeePayerSignatureInvalid(_)
        ));
    }

    #[test]
    fn test_missing_payer_signature() {
        let env = setup();
        let mut tx = delegated_tx(&env, &env.payer, 0);
        let mut option = web3_option(&tx);
        option.fee_payer_sig.clear();
        tx.extension_options = vec![option.to_any()];

        assert_eq!(
            expect_cause(env.decorator.ante_handle(&ctx(), &tx)),
            SignatureError::MissingFeePayerSig
        );
    }

    #[test]
    fn test_foreign_prefix_payer() {
        let env = setup();
        let mut tx = delegated_tx(&env, &env.payer, 0);
        let mut option = web3_option(&tx);
        option.fee_payer = env.payer.address.to_bech32("cosmos").unwrap();
        tx.extension_options = vec![option.to_any()];

        assert!(matches!(
            expect_cause(env.decorator.ante_handle(&ctx(), &tx)),
            SignatureError::InvalidFeePayerAddress(_)
        ));
    }

    #[test]
    fn test_payer_signature_is_signer_specific() {
        let env = setup();
        let tx = delegated_tx(&env, &env.payer, 0);

        // the same tx under a different account number changes the digest
        let other = decorator();
        register(&other, &env.signer, 4, 2);
        assert!(matches!(
            expect_cause(other.ante_handle(&ctx(), &tx)),
            SignatureError::FeePayerSignatureInvalid(_)
        ));
    }
}
