//! Legacy amino-JSON sign document.
//!
//! Keys are emitted in lexicographic order at every level, without
//! whitespace; integers are rendered as decimal strings.

use super::entities::SignerData;
use serde_json::{json, Map, Value};
use shared_types::{Fee, LegacyMsg};

/// Canonical sign bytes bound by every signer.
pub fn std_sign_bytes(
    signer_data: &SignerData,
    fee: &Fee,
    msgs: &[LegacyMsg],
    memo: &str,
    timeout_height: u64,
) -> Vec<u8> {
    let mut doc = Map::new();
    doc.insert(
        "account_number".into(),
        Value::String(signer_data.account_number.to_string()),
    );
    doc.insert("chain_id".into(), Value::String(signer_data.chain_id.clone()));
    doc.insert("fee".into(), fee_json(fee));
    doc.insert("memo".into(), Value::String(memo.to_string()));
    doc.insert(
        "msgs".into(),
        Value::Array(msgs.iter().map(LegacyMsg::sign_json).collect()),
    );
    doc.insert(
        "sequence".into(),
        Value::String(signer_data.sequence.to_string()),
    );
    if timeout_height != 0 {
        doc.insert(
            "timeout_height".into(),
            Value::String(timeout_height.to_string()),
        );
    }

    // serde_json's Map is ordered by key, so this is already sorted
    Value::Object(doc).to_string().into_bytes()
}

fn fee_json(fee: &Fee) -> Value {
    let amount: Vec<Value> = fee
        .amount
        .iter()
        .map(|coin| json!({"amount": coin.amount, "denom": coin.denom}))
        .collect();

    json!({
        "amount": amount,
        "gas": fee.gas_limit.to_string(),
    })
}
