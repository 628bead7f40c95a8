//! Verification configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use eip712_sig_verification::VerificationConfig;
//!
//! let config = VerificationConfig::default()
//!     .with_chain_id_overrides(vec![1, 42, 11155111])
//!     .with_bech32_prefix("evmos");
//! config.validate()?;
//! ```

use super::builder::MSG_VALUE_TYPE;
use super::typed_data::Types;
use serde::{Deserialize, Serialize};
use shared_types::AccAddress;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from loading or validating a [`VerificationConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid bech32 prefix {0:?}")]
    InvalidBech32Prefix(String),

    #[error("EIP-712 domain field {0} cannot be empty")]
    EmptyDomainField(&'static str),

    #[error("Message schema for {0:?} does not define MsgValue")]
    IncompleteMsgSchema(String),

    #[error("Chain id override list contains 0")]
    ZeroChainIdOverride,

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// EIP-712 verification configuration.
///
/// The domain fields must match what wallets put in the domain when signing;
/// changing any of them invalidates every existing signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Typed-data chain ids a transaction may select via its Web3 extension
    /// (exact match). Typically Ethereum mainnet and the Kovan test network,
    /// which hardware wallets accept.
    pub chain_id_overrides: Vec<u64>,
    /// Human-readable prefix of account addresses (fee payer parsing).
    pub bech32_prefix: String,
    pub domain_name: String,
    pub domain_version: String,
    pub verifying_contract: String,
    pub salt: String,
    /// Explicit `MsgValue` schemas keyed by amino message type, used instead
    /// of inferring field types from the message JSON.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub msg_schemas: BTreeMap<String, Types>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            chain_id_overrides: vec![1, 42],
            bech32_prefix: "ethm".to_string(),
            domain_name: "Cosmos Web3".to_string(),
            domain_version: "1.0.0".to_string(),
            verifying_contract: "cosmos".to_string(),
            salt: "0".to_string(),
            msg_schemas: BTreeMap::new(),
        }
    }
}

impl VerificationConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bech32_prefix.is_empty()
            || AccAddress::default().to_bech32(&self.bech32_prefix).is_err()
        {
            return Err(ConfigError::InvalidBech32Prefix(self.bech32_prefix.clone()));
        }

        let domain = [
            ("domain_name", &self.domain_name),
            ("domain_version", &self.domain_version),
            ("verifying_contract", &self.verifying_contract),
            ("salt", &self.salt),
        ];
        if let Some((field, _)) = domain.into_iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::EmptyDomainField(field));
        }

        if let Some(msg_type) = self
            .msg_schemas
            .iter()
            .find(|(_, schema)| !schema.contains_key(MSG_VALUE_TYPE))
            .map(|(msg_type, _)| msg_type)
        {
            return Err(ConfigError::IncompleteMsgSchema(msg_type.clone()));
        }

        if self.chain_id_overrides.contains(&0) {
            return Err(ConfigError::ZeroChainIdOverride);
        }

        Ok(())
    }

    /// Whether `chain_id` may replace the signer-data chain id in the domain.
    pub fn is_override_allowed(&self, chain_id: u64) -> bool {
        self.chain_id_overrides.contains(&chain_id)
    }

    pub fn with_chain_id_overrides(mut self, overrides: Vec<u64>) -> Self {
        self.chain_id_overrides = overrides;
        self
    }

    pub fn with_bech32_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bech32_prefix = prefix.into();
        self
    }

    pub fn with_domain_name(mut self, name: impl Into<String>) -> Self {
        self.domain_name = name.into();
        self
    }

    pub fn with_domain_version(mut self, version: impl Into<String>) -> Self {
        self.domain_version = version.into();
        self
    }

    /// Register the `MsgValue` schema for one amino message type.
    pub fn with_msg_schema(mut self, msg_type: impl Into<String>, schema: Types) -> Self {
        self.msg_schemas.insert(msg_type.into(), schema);
        self
    }
}
