//! The application's JSON codec and the registry of message types it can unpack

use crate::error::{GenesisError, Result};
use crate::modules::auth::BaseAccount;
use crate::types::{Any, Ed25519PubKey, ProtoMessage, Secp256k1PubKey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;

/// Type URLs that may appear inside an [`Any`] in genesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceRegistry {
    type_urls: BTreeSet<String>,
}

impl InterfaceRegistry {
    pub fn new() -> InterfaceRegistry {
        InterfaceRegistry::default()
    }

    pub fn register<T: ProtoMessage>(&mut self) {
        self.type_urls.insert(T::TYPE_URL.to_string());
    }

    pub fn is_registered(&self, type_url: &str) -> bool {
        self.type_urls.contains(type_url)
    }

    pub fn ensure_registered(&self, any: &Any) -> Result<()> {
        if self.is_registered(&any.type_url) {
            Ok(())
        } else {
            Err(GenesisError::Serialization(format!(
                "unable to resolve type URL {}",
                any.type_url
            )))
        }
    }

    pub fn type_urls(&self) -> impl Iterator<Item = &str> {
        self.type_urls.iter().map(String::as_str)
    }
}

/// JSON codec used for every genesis section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCodec {
    registry: InterfaceRegistry,
}

impl AppCodec {
    pub fn new(registry: InterfaceRegistry) -> AppCodec {
        AppCodec { registry }
    }

    pub fn interface_registry(&self) -> &InterfaceRegistry {
        &self.registry
    }

    pub fn marshal_json<T: Serialize>(&self, message: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(message)?)
    }

    pub fn unmarshal_json<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Unpacks an [`Any`] whose type URL is known to the registry.
    pub fn unpack_any<T: ProtoMessage>(&self, any: &Any) -> Result<T> {
        self.registry.ensure_registered(any)?;
        any.unpack()
    }
}

/// Everything the application needs to encode and decode its state.
#[derive(Debug, Clone)]
pub struct EncodingConfig {
    pub codec: AppCodec,
}

impl EncodingConfig {
    /// Registers the account and public key types used in genesis.
    pub fn make() -> EncodingConfig {
        let mut registry = InterfaceRegistry::new();
        registry.register::<BaseAccount>();
        registry.register::<Ed25519PubKey>();
        registry.register::<Secp256k1PubKey>();
        EncodingConfig {
            codec: AppCodec::new(registry),
        }
    }
}
