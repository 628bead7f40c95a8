//! # Property Tests
//!
//! Tampering with any signed byte must be caught; the recovery id byte is
//! never consulted on the known-key path.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use eip712_sig_verification::{AnteDecorator, SignatureError};
    use proptest::prelude::*;
    use shared_types::Transaction;

    fn signed() -> (Decorator, Transaction) {
        let decorator = decorator();
        let wallet = TestWallet::random();
        register(&decorator, &wallet, 21, 0);
        let mut tx = send_tx(&[wallet.address], 77);
        sign_tx(decorator.verifier(), &mut tx, &wallet, 21, 0);
        (decorator, tx)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_flipped_rs_byte_rejected(index in 0usize..64, mask in 1u8..=255) {
            let (decorator, mut tx) = signed();
            let mut signature = raw_signature(&tx, 0);
            signature[index] ^= mask;
            replace_signature(&mut tx, 0, signature);

            let err = decorator.ante_handle(&ctx(), &tx).unwrap_err();
            prop_assert_eq!(err.cause(), Some(&SignatureError::SignatureMismatch));
        }

        #[test]
        fn prop_recovery_byte_ignored(v in any::<u8>()) {
            let (decorator, mut tx) = signed();
            let mut signature = raw_signature(&tx, 0);
            signature[64] = v;
            replace_signature(&mut tx, 0, signature);

            prop_assert_eq!(decorator.ante_handle(&ctx(), &tx), Ok(()));
        }

        #[test]
        fn prop_memo_edit_rejected(memo in "[a-z ]{0,32}") {
            let (decorator, mut tx) = signed();
            prop_assume!(memo != tx.memo);
            tx.memo = memo;

            let err = decorator.ante_handle(&ctx(), &tx).unwrap_err();
            prop_assert_eq!(err.reason(), "signature_mismatch");
        }

        #[test]
        fn prop_wrong_length_rejected(len in 0usize..130) {
            prop_assume!(len != 65);
            let (decorator, mut tx) = signed();
            replace_signature(&mut tx, 0, vec![1; len]);

            let err = decorator.ante_handle(&ctx(), &tx).unwrap_err();
            prop_assert_eq!(err.cause(), Some(&SignatureError::BadSignatureLength(len)));
        }
    }
}
