//! # Wire Format Vectors
//!
//! Fixed byte and hash vectors that remote signers depend on.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use eip712_sig_verification::{
        std_sign_bytes, wrap_tx_to_typed_data, ExtensionRegistry, DecodedExtension, TypedData,
        VerificationConfig,
    };
    use shared_types::{ExtensionOptionsWeb3Tx, WEB3_TX_TYPE_URL};

    #[test]
    fn test_web3_extension_bytes() {
        let option = ExtensionOptionsWeb3Tx {
            typed_data_chain_id: 1,
            fee_payer: "ab".to_string(),
            fee_payer_sig: vec![0x01, 0x02],
        };
        let any = option.to_any();

        assert_eq!(any.type_url, WEB3_TX_TYPE_URL);
        assert_eq!(hex::encode(&any.value), "0801120261621a020102");
        assert_eq!(ExtensionOptionsWeb3Tx::from_bytes(&any.value).unwrap(), option);
    }

    #[test]
    fn test_default_extension_encodes_empty() {
        assert!(ExtensionOptionsWeb3Tx::default().to_any().value.is_empty());
    }

    #[test]
    fn test_registry_decodes_packed_extension() {
        let option = ExtensionOptionsWeb3Tx {
            typed_data_chain_id: 42,
            ..Default::default()
        };

        assert_eq!(
            ExtensionRegistry::new().decode(&option.to_any()),
            Ok(DecodedExtension::Web3Tx(option))
        );
    }

    #[test]
    fn test_wallet_payload_parses() {
        let payload = r#"{
            "types": {
                "EIP712Domain": [
                    {"name": "name", "type": "string"},
                    {"name": "version", "type": "string"},
                    {"name": "chainId", "type": "uint256"},
                    {"name": "verifyingContract", "type": "address"}
                ],
                "Person": [
                    {"name": "name", "type": "string"},
                    {"name": "wallet", "type": "address"}
                ],
                "Mail": [
                    {"name": "from", "type": "Person"},
                    {"name": "to", "type": "Person"},
                    {"name": "contents", "type": "string"}
                ]
            },
            "primaryType": "Mail",
            "domain": {
                "name": "Ether Mail",
                "version": "1",
                "chainId": "0x1",
                "verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
            },
            "message": {
                "from": {"name": "Cow", "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"},
                "to": {"name": "Bob", "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"},
                "contents": "Hello, Bob!"
            }
        }"#;
        let typed_data: TypedData = serde_json::from_str(payload).unwrap();

        assert_eq!(
            hex::encode(typed_data.signing_hash().unwrap()),
            "be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2"
        );
    }

    #[test]
    fn test_tx_payload_shape() {
        let tx = send_tx(&[TestWallet::random().address], 9);
        let sign_bytes = std_sign_bytes(&signer_data(5, 6), &tx.fee, &tx.msgs, &tx.memo, 0);
        let typed_data = wrap_tx_to_typed_data(
            &VerificationConfig::default(),
            9000,
            &tx.msgs[0],
            &sign_bytes,
            None,
        )
        .unwrap();

        let json = serde_json::to_value(&typed_data).unwrap();
        assert_eq!(json["primaryType"], "Tx");
        assert_eq!(json["domain"]["name"], "Cosmos Web3");
        assert_eq!(json["domain"]["verifyingContract"], "cosmos");
        assert_eq!(json["message"]["account_number"], "5");
        assert_eq!(json["message"]["sequence"], "6");
        assert_eq!(json["message"]["chain_id"], CHAIN_ID);
        assert_eq!(json["message"]["msgs"][0]["type"], "cosmos-sdk/MsgSend");

        // what a wallet signs must hash identically after a JSON round trip
        let reparsed: TypedData = serde_json::from_value(json).unwrap();
        assert_eq!(reparsed.signing_hash(), typed_data.signing_hash());
    }
}
