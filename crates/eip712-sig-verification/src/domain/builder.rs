//! # Typed-Data Builder
//!
//! Wraps the legacy amino-JSON sign document into an EIP-712 document so
//! that Ethereum wallets can sign Cosmos transactions:
//!
//! ```text
//! Tx(string account_number,string chain_id,Fee fee,string memo,Msg[] msgs,string sequence)
//! Fee(Coin[] amount,string gas)            // or Fee(string feePayer,Coin[] amount,string gas)
//! Coin(string denom,string amount)
//! Msg(string type,MsgValue value)
//! ```
//!
//! `MsgValue` is derived from the JSON body of the first message, fields in
//! key order:
//!
//! | JSON value              | EIP-712 type                                   |
//! |-------------------------|------------------------------------------------|
//! | string                  | `string`                                       |
//! | bool                    | `bool`                                         |
//! | integer >= 0 / < 0      | `uint64` / `int64`                             |
//! | object at `a.b_c`       | struct `TypeABC`                               |
//! | array                   | element type + `[]` (empty: `string[]`)        |
//! | null                    | dropped                                        |
//!
//! Inference only sees the amino JSON, where 64-bit proto integers are
//! rendered as strings: `"proposal_id": "1"` becomes `string`, not the
//! `uint64` some wallets declare. Message types registered in
//! `VerificationConfig::msg_schemas` use the registered types instead.
//!
//! `EIP712Domain` declares only the domain fields that are configured
//! non-empty, in canonical order.

use super::config::VerificationConfig;
use super::entities::{FeeDelegation, Hash};
use super::errors::SignatureError;
use super::typed_data::{TypedData, TypedDataDomain, TypedField, Types, EIP712_DOMAIN};
use primitive_types::U256;
use serde_json::{Map, Value};
use shared_types::LegacyMsg;

/// Root type of the derived message schema.
pub const MSG_VALUE_TYPE: &str = "MsgValue";

const PRIMARY_TYPE: &str = "Tx";

/// Build the EIP-712 document for a transaction's canonical sign bytes.
pub fn wrap_tx_to_typed_data(
    config: &VerificationConfig,
    chain_id: u64,
    first_msg: &LegacyMsg,
    sign_bytes: &[u8],
    fee_delegation: Option<&FeeDelegation>,
) -> Result<TypedData, SignatureError> {
    let document: Value = serde_json::from_slice(sign_bytes)
        .map_err(|e| build_failed(format!("sign bytes are not JSON: {}", e)))?;
    let Value::Object(mut message) = strip_nulls(document) else {
        return Err(build_failed("sign bytes are not a JSON object"));
    };

    let domain = TypedDataDomain {
        name: non_empty(&config.domain_name),
        version: non_empty(&config.domain_version),
        chain_id: Some(U256::from(chain_id)),
        verifying_contract: non_empty(&config.verifying_contract),
        salt: non_empty(&config.salt),
    };

    let mut types = base_types();
    types.insert(EIP712_DOMAIN.into(), domain_fields(&domain));

    match config.msg_schemas.get(&first_msg.msg_type) {
        Some(schema) => insert_schema(&first_msg.msg_type, schema, &mut types)?,
        None => {
            let Value::Object(msg_value) = strip_nulls(first_msg.value.clone()) else {
                return Err(build_failed("message value is not a JSON object"));
            };
            derive_struct(MSG_VALUE_TYPE, "", &msg_value, &mut types)?;
        }
    }

    if let Some(delegation) = fee_delegation {
        let fee_payer = delegation
            .fee_payer
            .to_bech32(&config.bech32_prefix)
            .map_err(|e| build_failed(e.to_string()))?;

        let fee = message
            .get_mut("fee")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| build_failed("sign document has no fee object"))?;
        fee.insert("feePayer".into(), Value::String(fee_payer));

        types.insert(
            "Fee".into(),
            fields(&[("feePayer", "string"), ("amount", "Coin[]"), ("gas", "string")]),
        );
    }

    Ok(TypedData {
        types,
        primary_type: PRIMARY_TYPE.into(),
        domain,
        message,
    })
}

/// EIP-712 digest of a built document.
pub fn compute_typed_data_hash(typed_data: &TypedData) -> Result<Hash, SignatureError> {
    typed_data
        .signing_hash()
        .map_err(|e| build_failed(e.to_string()))
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}

fn domain_fields(domain: &TypedDataDomain) -> Vec<TypedField> {
    let declared = [
        ("name", "string", domain.name.is_some()),
        ("version", "string", domain.version.is_some()),
        ("chainId", "uint256", domain.chain_id.is_some()),
        ("verifyingContract", "string", domain.verifying_contract.is_some()),
        ("salt", "string", domain.salt.is_some()),
    ];
    declared
        .into_iter()
        .filter(|(_, _, set)| *set)
        .map(|(name, type_, _)| TypedField::new(name, type_))
        .collect()
}

/// Copy a registered message schema; it may not redefine the envelope types.
fn insert_schema(msg_type: &str, schema: &Types, types: &mut Types) -> Result<(), SignatureError> {
    if !schema.contains_key(MSG_VALUE_TYPE) {
        return Err(build_failed(format!(
            "schema for {} does not define {}",
            msg_type, MSG_VALUE_TYPE
        )));
    }
    for (name, struct_fields) in schema {
        if types.contains_key(name) {
            return Err(build_failed(format!(
                "schema for {} redefines type {}",
                msg_type, name
            )));
        }
        types.insert(name.clone(), struct_fields.clone());
    }
    Ok(())
}

fn base_types() -> Types {
    let mut types = Types::new();
    types.insert(
        PRIMARY_TYPE.into(),
        fields(&[
            ("account_number", "string"),
            ("chain_id", "string"),
            ("fee", "Fee"),
            ("memo", "string"),
            ("msgs", "Msg[]"),
            ("sequence", "string"),
        ]),
    );
    types.insert(
        "Fee".into(),
        fields(&[("amount", "Coin[]"), ("gas", "string")]),
    );
    types.insert(
        "Coin".into(),
        fields(&[("denom", "string"), ("amount", "string")]),
    );
    types.insert(
        "Msg".into(),
        fields(&[("type", "string"), ("value", MSG_VALUE_TYPE)]),
    );
    types
}

fn fields(list: &[(&str, &str)]) -> Vec<TypedField> {
    list.iter().map(|(n, t)| TypedField::new(*n, *t)).collect()
}

// =============================================================================
// MESSAGE SCHEMA DERIVATION
// =============================================================================

fn derive_struct(
    type_name: &str,
    path: &str,
    object: &Map<String, Value>,
    types: &mut Types,
) -> Result<(), SignatureError> {
    let mut struct_fields = Vec::with_capacity(object.len());
    for (key, value) in object {
        let field_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };
        let field_type = infer_type(&field_path, value, types)?;
        struct_fields.push(TypedField::new(key.clone(), field_type));
    }

    match types.get(type_name) {
        Some(existing) if *existing != struct_fields => Err(build_failed(format!(
            "conflicting definitions for type {}",
            type_name
        ))),
        Some(_) => Ok(()),
        None => {
            types.insert(type_name.to_string(), struct_fields);
            Ok(())
        }
    }
}

fn infer_type(path: &str, value: &Value, types: &mut Types) -> Result<String, SignatureError> {
    match value {
        Value::String(_) => Ok("string".into()),
        Value::Bool(_) => Ok("bool".into()),
        Value::Number(n) if n.is_u64() => Ok("uint64".into()),
        Value::Number(n) if n.is_i64() => Ok("int64".into()),
        Value::Number(n) => Err(build_failed(format!(
            "non-integral number {} at {}",
            n, path
        ))),
        Value::Object(object) => {
            let type_name = struct_type_name(path);
            derive_struct(&type_name, path, object, types)?;
            Ok(type_name)
        }
        Value::Array(items) => match items.first() {
            None => Ok("string[]".into()),
            Some(Value::Array(_)) => Err(build_failed(format!("nested array at {}", path))),
            Some(first) => Ok(format!("{}[]", infer_type(path, first, types)?)),
        },
        Value::Null => Err(build_failed(format!("null value at {}", path))),
    }
}

/// `description.max_rate` -> `TypeDescriptionMaxRate`
fn struct_type_name(path: &str) -> String {
    let mut name = String::from("Type");
    for part in path.split('.').flat_map(|p| p.split('_')) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

fn build_failed(reason: impl Into<String>) -> SignatureError {
    SignatureError::TypedDataBuildFailed(reason.into())
}
