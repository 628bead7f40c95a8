//! Extension option registry.
//!
//! Maps `Any` type URLs to protobuf decoders. Built explicitly and handed to
//! the verifier; there is no global interface registry.

use shared_types::{Any, ExtensionOptionsWeb3Tx, WEB3_TX_TYPE_URL};
use std::collections::HashMap;
use std::fmt;

/// An unpacked extension option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedExtension {
    Web3Tx(ExtensionOptionsWeb3Tx),
    /// A known extension this decorator does not act on.
    Other(String),
}

/// Decoder for one registered type URL.
pub type ExtensionDecoder = fn(&[u8]) -> Result<DecodedExtension, prost::DecodeError>;

#[derive(Clone)]
pub struct ExtensionRegistry {
    decoders: HashMap<String, ExtensionDecoder>,
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut urls: Vec<&String> = self.decoders.keys().collect();
        urls.sort();
        f.debug_struct("ExtensionRegistry")
            .field("type_urls", &urls)
            .finish()
    }
}

impl ExtensionRegistry {
    /// A registry with no known extensions.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// A registry that understands `ExtensionOptionsWeb3Tx`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(WEB3_TX_TYPE_URL, decode_web3_tx);
        registry
    }

    pub fn register(&mut self, type_url: impl Into<String>, decoder: ExtensionDecoder) {
        self.decoders.insert(type_url.into(), decoder);
    }

    /// Unpack an extension option.
    pub fn decode(&self, any: &Any) -> Result<DecodedExtension, String> {
        let decoder = self
            .decoders
            .get(&any.type_url)
            .ok_or_else(|| format!("unregistered type URL {}", any.type_url))?;
        decoder(&any.value).map_err(|e| e.to_string())
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_web3_tx(bytes: &[u8]) -> Result<DecodedExtension, prost::DecodeError> {
    ExtensionOptionsWeb3Tx::from_bytes(bytes).map(DecodedExtension::Web3Tx)
}
