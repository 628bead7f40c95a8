//! # EIP-712 Typed Data Hashing
//!
//! Structured-data hashing over a JSON message and a set of named struct
//! types, producing the digest that wallets sign:
//!
//! ```text
//! digest = keccak256(0x19 ‖ 0x01 ‖ hashStruct(EIP712Domain, domain) ‖ hashStruct(primary, message))
//! hashStruct(T, v) = keccak256(typeHash(T) ‖ encodeData(T, v))
//! ```
//!
//! Encoding walks the *type's* field list and looks each field up in the
//! value map; a value map with more entries than the type has fields is
//! rejected as extra data.

use super::ecdsa::keccak256;
use super::entities::Hash;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Name of the domain struct type.
pub const EIP712_DOMAIN: &str = "EIP712Domain";

/// Errors from encoding or hashing typed data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypedDataError {
    #[error("unknown type {0:?}")]
    UnknownType(String),

    #[error("there is extra data provided in the message ({fields} < {values})")]
    ExtraData { fields: usize, values: usize },

    #[error("provided data {value} doesn't match type {type_}")]
    Mismatch { type_: String, value: String },

    #[error("integer {value} out of range for {type_}")]
    OutOfRange { type_: String, value: String },

    #[error("unsupported type {0:?}")]
    UnsupportedType(String),
}

/// One field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl TypedField {
    pub fn new(name: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: type_.into(),
        }
    }
}

/// Struct type name to its ordered field list.
pub type Types = BTreeMap<String, Vec<TypedField>>;

/// EIP-712 domain. Only fields that are set take part in the domain map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl TypedDataDomain {
    /// Value map hashed against the `EIP712Domain` type.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(chain_id) = self.chain_id {
            map.insert("chainId".into(), Value::String(chain_id.to_string()));
        }
        let strings = [
            ("name", &self.name),
            ("version", &self.version),
            ("verifyingContract", &self.verifying_contract),
            ("salt", &self.salt),
        ];
        for (key, value) in strings {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                map.insert(key.into(), Value::String(value.clone()));
            }
        }
        map
    }
}

/// A complete typed-data document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub types: Types,
    pub primary_type: String,
    pub domain: TypedDataDomain,
    pub message: Map<String, Value>,
}

impl TypedData {
    /// The digest a wallet signs for this document.
    pub fn signing_hash(&self) -> Result<Hash, TypedDataError> {
        let domain_separator = self.domain_separator()?;
        let message_hash = self.hash_struct(&self.primary_type, &self.message)?;

        let mut raw = Vec::with_capacity(66);
        raw.extend_from_slice(&[0x19, 0x01]);
        raw.extend_from_slice(&domain_separator);
        raw.extend_from_slice(&message_hash);
        Ok(keccak256(&raw))
    }

    pub fn domain_separator(&self) -> Result<Hash, TypedDataError> {
        self.hash_struct(EIP712_DOMAIN, &self.domain.to_map())
    }

    pub fn hash_struct(
        &self,
        primary_type: &str,
        data: &Map<String, Value>,
    ) -> Result<Hash, TypedDataError> {
        Ok(keccak256(&self.encode_data(primary_type, data)?))
    }

    /// `typeHash ‖ enc(field_1) ‖ … ‖ enc(field_n)`, each encoding 32 bytes.
    pub fn encode_data(
        &self,
        primary_type: &str,
        data: &Map<String, Value>,
    ) -> Result<Vec<u8>, TypedDataError> {
        let fields = self.fields(primary_type)?;
        if fields.len() < data.len() {
            return Err(TypedDataError::ExtraData {
                fields: fields.len(),
                values: data.len(),
            });
        }

        let mut buffer = Vec::with_capacity(32 * (fields.len() + 1));
        buffer.extend_from_slice(&self.type_hash(primary_type)?);

        for field in fields {
            let value = data.get(&field.name).unwrap_or(&Value::Null);
            buffer.extend_from_slice(&self.encode_value(&field.type_, value)?);
        }

        Ok(buffer)
    }

    pub fn type_hash(&self, primary_type: &str) -> Result<Hash, TypedDataError> {
        Ok(keccak256(self.encode_type(primary_type)?.as_bytes()))
    }

    /// Primary type followed by its struct dependencies in name order, e.g.
    /// `Mail(Person from,Person to,string contents)Person(string name,address wallet)`.
    pub fn encode_type(&self, primary_type: &str) -> Result<String, TypedDataError> {
        let mut deps = BTreeSet::new();
        self.collect_dependencies(primary_type, &mut deps)?;
        deps.remove(primary_type);

        let mut out = String::new();
        for name in std::iter::once(primary_type).chain(deps.iter().map(String::as_str)) {
            let fields = self.fields(name)?;
            out.push_str(name);
            out.push('(');
            let rendered: Vec<String> = fields
                .iter()
                .map(|f| format!("{} {}", f.type_, f.name))
                .collect();
            out.push_str(&rendered.join(","));
            out.push(')');
        }
        Ok(out)
    }

    fn fields(&self, type_name: &str) -> Result<&[TypedField], TypedDataError> {
        self.types
            .get(type_name)
            .map(Vec::as_slice)
            .ok_or_else(|| TypedDataError::UnknownType(type_name.to_string()))
    }

    fn collect_dependencies(
        &self,
        type_name: &str,
        found: &mut BTreeSet<String>,
    ) -> Result<(), TypedDataError> {
        if found.contains(type_name) {
            return Ok(());
        }
        found.insert(type_name.to_string());

        for field in self.fields(type_name)? {
            let base = base_type(&field.type_);
            if self.types.contains_key(base) {
                self.collect_dependencies(base, found)?;
            }
        }
        Ok(())
    }

    fn encode_value(&self, type_: &str, value: &Value) -> Result<[u8; 32], TypedDataError> {
        if let Some(element_type) = array_element_type(type_) {
            let items = value.as_array().ok_or_else(|| mismatch(type_, value))?;
            let mut concatenated = Vec::with_capacity(32 * items.len());
            for item in items {
                concatenated.extend_from_slice(&self.encode_value(element_type, item)?);
            }
            return Ok(keccak256(&concatenated));
        }

        if self.types.contains_key(type_) {
            let map = value.as_object().ok_or_else(|| mismatch(type_, value))?;
            return self.hash_struct(type_, map);
        }

        encode_primitive(type_, value)
    }
}

// =============================================================================
// PRIMITIVE ENCODING
// =============================================================================

fn encode_primitive(type_: &str, value: &Value) -> Result<[u8; 32], TypedDataError> {
    match type_ {
        "string" => {
            let s = value.as_str().ok_or_else(|| mismatch(type_, value))?;
            Ok(keccak256(s.as_bytes()))
        }
        "bytes" => Ok(keccak256(&parse_hex_bytes(type_, value)?)),
        "bool" => {
            let b = value.as_bool().ok_or_else(|| mismatch(type_, value))?;
            let mut word = [0u8; 32];
            word[31] = b as u8;
            Ok(word)
        }
        "address" => {
            let bytes = parse_hex_bytes(type_, value)?;
            if bytes.len() != 20 {
                return Err(mismatch(type_, value));
            }
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(&bytes);
            Ok(word)
        }
        _ => {
            if let Some(size) = type_.strip_prefix("bytes") {
                let size = parse_size(type_, size, 1, 32)?;
                let bytes = parse_hex_bytes(type_, value)?;
                if bytes.len() != size {
                    return Err(mismatch(type_, value));
                }
                let mut word = [0u8; 32];
                word[..size].copy_from_slice(&bytes);
                Ok(word)
            } else if let Some(bits) = type_.strip_prefix("uint") {
                let bits = parse_int_bits(type_, bits)?;
                encode_uint(type_, bits, value)
            } else if let Some(bits) = type_.strip_prefix("int") {
                let bits = parse_int_bits(type_, bits)?;
                encode_int(type_, bits, value)
            } else {
                Err(TypedDataError::UnsupportedType(type_.to_string()))
            }
        }
    }
}

fn encode_uint(type_: &str, bits: usize, value: &Value) -> Result<[u8; 32], TypedDataError> {
    let (negative, magnitude) = parse_integer(type_, value)?;
    if (negative && !magnitude.is_zero()) || magnitude.bits() > bits {
        return Err(out_of_range(type_, value));
    }
    Ok(to_word(magnitude))
}

fn encode_int(type_: &str, bits: usize, value: &Value) -> Result<[u8; 32], TypedDataError> {
    let (negative, magnitude) = parse_integer(type_, value)?;
    let limit = U256::one() << (bits - 1);

    if !negative {
        if magnitude >= limit {
            return Err(out_of_range(type_, value));
        }
        return Ok(to_word(magnitude));
    }

    if magnitude > limit {
        return Err(out_of_range(type_, value));
    }
    // two's complement across the full word
    let (twos, _) = (!magnitude).overflowing_add(U256::one());
    Ok(to_word(twos))
}

/// Sign and magnitude of an integer given as a JSON number or a decimal or
/// `0x` hex string.
fn parse_integer(type_: &str, value: &Value) -> Result<(bool, U256), TypedDataError> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok((false, U256::from(u)))
            } else if let Some(i) = n.as_i64() {
                Ok((true, U256::from(i.unsigned_abs())))
            } else {
                Err(mismatch(type_, value))
            }
        }
        Value::String(s) => {
            let (negative, digits) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s.as_str()),
            };
            let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
                Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
                Some(_) => None,
                None if !digits.is_empty() => U256::from_dec_str(digits).ok(),
                None => None,
            };
            magnitude
                .map(|m| (negative, m))
                .ok_or_else(|| mismatch(type_, value))
        }
        _ => Err(mismatch(type_, value)),
    }
}

fn parse_hex_bytes(type_: &str, value: &Value) -> Result<Vec<u8>, TypedDataError> {
    let s = value.as_str().ok_or_else(|| mismatch(type_, value))?;
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| mismatch(type_, value))?;
    hex::decode(digits).map_err(|_| mismatch(type_, value))
}

fn parse_int_bits(type_: &str, bits: &str) -> Result<usize, TypedDataError> {
    let bits = parse_size(type_, bits, 8, 256)?;
    if bits % 8 != 0 {
        return Err(TypedDataError::UnsupportedType(type_.to_string()));
    }
    Ok(bits)
}

fn parse_size(type_: &str, size: &str, min: usize, max: usize) -> Result<usize, TypedDataError> {
    size.parse::<usize>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| TypedDataError::UnsupportedType(type_.to_string()))
}

fn to_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// `Coin[]` -> `Coin`, `uint8[2][]` -> `uint8[2]`, scalars -> `None`.
fn array_element_type(type_: &str) -> Option<&str> {
    if !type_.ends_with(']') {
        return None;
    }
    type_.rfind('[').map(|open| &type_[..open])
}

/// Type name with every array suffix removed.
fn base_type(type_: &str) -> &str {
    type_.split('[').next().unwrap_or(type_)
}

fn mismatch(type_: &str, value: &Value) -> TypedDataError {
    TypedDataError::Mismatch {
        type_: type_.to_string(),
        value: value.to_string(),
    }
}

fn out_of_range(type_: &str, value: &Value) -> TypedDataError {
    TypedDataError::OutOfRange {
        type_: type_.to_string(),
        value: value.to_string(),
    }
}
