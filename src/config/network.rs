//! Shape of an integration test network

use crate::config::settings::GLOBAL_CONFIG;
use crate::error::{GenesisError, Result};
use crate::modules::{CustomGenesisState, ModuleGenesis};
use crate::types::{validate_denom, AccAddress, Int};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_VALIDATOR_COUNT: usize = 3;
pub const DEFAULT_PRE_FUNDED_ACCOUNTS: usize = 3;
pub const DEFAULT_DENOM: &str = "aevmos";

/// 100_000 whole coins of an 18-decimal denomination.
pub const DEFAULT_INITIAL_BALANCE: u128 = 100_000_000_000_000_000_000_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub amount_of_validators: usize,
    pub pre_funded_accounts: Vec<AccAddress>,
    pub initial_balance: Int,
    pub denom: String,
    #[serde(skip)]
    pub custom_genesis_state: CustomGenesisState,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: GLOBAL_CONFIG.get_chain_id(),
            amount_of_validators: DEFAULT_VALIDATOR_COUNT,
            pre_funded_accounts: random_accounts(DEFAULT_PRE_FUNDED_ACCOUNTS),
            initial_balance: Int::from(DEFAULT_INITIAL_BALANCE),
            denom: DEFAULT_DENOM.to_string(),
            custom_genesis_state: CustomGenesisState::new(),
        }
    }
}

fn random_accounts(count: usize) -> Vec<AccAddress> {
    (0..count).map(|_| AccAddress::random()).collect()
}

impl NetworkConfig {
    pub fn from_toml_str(raw: &str) -> Result<NetworkConfig> {
        let config: NetworkConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NetworkConfig> {
        let raw = fs::read_to_string(path.as_ref()).map_err(|e| {
            GenesisError::Config(format!(
                "failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn with_chain_id(mut self, chain_id: &str) -> Self {
        self.chain_id = chain_id.to_string();
        self
    }

    pub fn with_amount_of_validators(mut self, amount: usize) -> Self {
        self.amount_of_validators = amount;
        self
    }

    pub fn with_pre_funded_accounts(mut self, accounts: Vec<AccAddress>) -> Self {
        self.pre_funded_accounts = accounts;
        self
    }

    /// Replaces the funded accounts with `count` fresh random addresses.
    pub fn with_random_accounts(self, count: usize) -> Self {
        self.with_pre_funded_accounts(random_accounts(count))
    }

    pub fn with_balance(mut self, denom: &str, amount: Int) -> Self {
        self.denom = denom.to_string();
        self.initial_balance = amount;
        self
    }

    pub fn with_custom_genesis(mut self, genesis: ModuleGenesis) -> Self {
        self.custom_genesis_state
            .insert(genesis.module_name().to_string(), genesis);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chain_id.trim().is_empty() {
            return Err(GenesisError::Config("chain id cannot be blank".to_string()));
        }
        if self.amount_of_validators == 0 {
            return Err(GenesisError::Config(
                "network needs at least one validator".to_string(),
            ));
        }
        validate_denom(&self.denom)?;
        if !self.initial_balance.is_positive() {
            return Err(GenesisError::Config(format!(
                "initial balance must be positive, got {}",
                self.initial_balance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::inflation;

    #[test]
    fn test_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.amount_of_validators, 3);
        assert_eq!(config.pre_funded_accounts.len(), 3);
        assert_eq!(config.denom, "aevmos");
        assert_eq!(config.initial_balance.to_string(), "100000000000000000000000");
        assert!(config.custom_genesis_state.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str_keeps_unset_defaults() {
        let config = NetworkConfig::from_toml_str(
            r#"
            chain_id = "evmos_9001-1"
            amount_of_validators = 5
            initial_balance = "42000"
            "#,
        )
        .unwrap();
        assert_eq!(config.chain_id, "evmos_9001-1");
        assert_eq!(config.amount_of_validators, 5);
        assert_eq!(config.initial_balance, Int::from(42_000u64));
        assert_eq!(config.denom, DEFAULT_DENOM);
        assert_eq!(config.pre_funded_accounts.len(), DEFAULT_PRE_FUNDED_ACCOUNTS);
    }

    #[test]
    fn test_from_toml_str_rejects_bad_values() {
        assert!(NetworkConfig::from_toml_str("amount_of_validators = 0").is_err());
        assert!(NetworkConfig::from_toml_str(r#"denom = "1x""#).is_err());
        assert!(NetworkConfig::from_toml_str(r#"pre_funded_accounts = ["nope"]"#).is_err());
    }

    #[test]
    fn test_builders() {
        let config = NetworkConfig::default()
            .with_chain_id("evmos_1-1")
            .with_amount_of_validators(1)
            .with_random_accounts(0)
            .with_custom_genesis(ModuleGenesis::Inflation(
                inflation::GenesisState::default_genesis().unwrap(),
            ));
        assert_eq!(config.chain_id, "evmos_1-1");
        assert_eq!(config.amount_of_validators, 1);
        assert!(config.pre_funded_accounts.is_empty());
        assert!(config.custom_genesis_state.contains_key("inflation"));
    }
}
