//! Application genesis: module name to that module's JSON-encoded section

use crate::app::codec::AppCodec;
use crate::error::{GenesisError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenesisState {
    sections: BTreeMap<String, Vec<u8>>,
}

impl GenesisState {
    pub fn new() -> GenesisState {
        GenesisState::default()
    }

    /// Replaces the raw section of `module`.
    pub fn with_raw_section(mut self, module: &str, bytes: Vec<u8>) -> GenesisState {
        self.sections.insert(module.to_string(), bytes);
        self
    }

    /// Encodes `section` with the codec and replaces the section of `module`.
    pub fn with_section<T: Serialize>(
        self,
        codec: &AppCodec,
        module: &str,
        section: &T,
    ) -> Result<GenesisState> {
        let bytes = codec.marshal_json(section)?;
        Ok(self.with_raw_section(module, bytes))
    }

    pub fn get(&self, module: &str) -> Option<&[u8]> {
        self.sections.get(module).map(Vec::as_slice)
    }

    /// Decodes the section of `module`, if there is one.
    pub fn section<T: DeserializeOwned>(&self, codec: &AppCodec, module: &str) -> Result<Option<T>> {
        self.get(module)
            .map(|bytes| codec.unmarshal_json(bytes))
            .transpose()
    }

    pub fn contains(&self, module: &str) -> bool {
        self.sections.contains_key(module)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.sections
            .iter()
            .map(|(module, bytes)| (module.as_str(), bytes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The whole genesis as one JSON object keyed by module name.
    pub fn to_app_state(&self) -> Result<Value> {
        let mut app_state = Map::new();
        for (module, bytes) in &self.sections {
            let section: Value = serde_json::from_slice(bytes).map_err(|e| {
                GenesisError::Serialization(format!("invalid {module} genesis section: {e}"))
            })?;
            app_state.insert(module.clone(), section);
        }
        Ok(Value::Object(app_state))
    }

    pub fn to_app_state_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_app_state()?)?)
    }

    pub fn from_app_state_bytes(bytes: &[u8]) -> Result<GenesisState> {
        let app_state: Map<String, Value> = serde_json::from_slice(bytes)?;
        let mut genesis = GenesisState::new();
        for (module, section) in app_state {
            let bytes = serde_json::to_vec(&section)?;
            genesis = genesis.with_raw_section(&module, bytes);
        }
        Ok(genesis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::codec::EncodingConfig;
    use crate::modules::bank;

    #[test]
    fn test_sections_are_replaced_not_merged() {
        let codec = EncodingConfig::make().codec;
        let first = bank::GenesisState::default();
        let mut second = bank::GenesisState::default();
        second.params.default_send_enabled = false;

        let genesis = GenesisState::new()
            .with_section(&codec, bank::MODULE_NAME, &first)
            .unwrap()
            .with_section(&codec, bank::MODULE_NAME, &second)
            .unwrap();

        assert_eq!(genesis.len(), 1);
        let stored: bank::GenesisState = genesis.section(&codec, "bank").unwrap().unwrap();
        assert_eq!(stored, second);
        assert!(genesis.section::<bank::GenesisState>(&codec, "auth").unwrap().is_none());
    }

    #[test]
    fn test_app_state_document() {
        let genesis = GenesisState::new()
            .with_raw_section("b", br#"{"x":"1"}"#.to_vec())
            .with_raw_section("a", b"{}".to_vec());

        let app_state = genesis.to_app_state().unwrap();
        assert_eq!(app_state["b"]["x"], "1");
        assert_eq!(genesis.modules().collect::<Vec<_>>(), vec!["a", "b"]);

        let bytes = genesis.to_app_state_bytes().unwrap();
        let decoded = GenesisState::from_app_state_bytes(&bytes).unwrap();
        assert_eq!(decoded.to_app_state().unwrap(), app_state);
    }

    #[test]
    fn test_invalid_section_is_reported() {
        let genesis = GenesisState::new().with_raw_section("evm", b"{oops".to_vec());
        assert!(matches!(
            genesis.to_app_state(),
            Err(GenesisError::Serialization(_))
        ));
    }
}
