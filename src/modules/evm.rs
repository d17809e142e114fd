//! EVM module genesis: pre-deployed accounts, contract storage and chain config

use crate::error::{GenesisError, Result};
use crate::types::{validate_denom, Int};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MODULE_NAME: &str = "evm";
pub const DEFAULT_EVM_DENOM: &str = "aevmos";

const EVM_ADDRESS_LEN: usize = 20;
const EVM_HASH_LEN: usize = 32;

fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|e| GenesisError::InvalidAddress(format!("{value}: {e}")))
}

fn encode_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// One storage slot of a pre-deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub key: String,
    pub value: String,
}

impl State {
    pub fn new(key: &[u8; EVM_HASH_LEN], value: &[u8; EVM_HASH_LEN]) -> State {
        State {
            key: encode_hex_prefixed(key),
            value: encode_hex_prefixed(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: String,
    pub code: String,
    pub storage: Vec<State>,
}

impl GenesisAccount {
    pub fn new(address: &[u8; EVM_ADDRESS_LEN], code: &[u8], storage: Vec<State>) -> Self {
        Self {
            address: encode_hex_prefixed(address),
            code: encode_hex_prefixed(code),
            storage,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let address = decode_hex(&self.address)?;
        if address.len() != EVM_ADDRESS_LEN {
            return Err(GenesisError::InvalidAddress(format!(
                "invalid EVM address length: {}",
                self.address
            )));
        }
        decode_hex(&self.code)?;

        let mut keys = HashSet::new();
        for slot in &self.storage {
            if decode_hex(&slot.key)?.len() != EVM_HASH_LEN {
                return Err(GenesisError::InvalidGenesis(format!(
                    "invalid storage key {} for account {}",
                    slot.key, self.address
                )));
            }
            decode_hex(&slot.value)?;
            if !keys.insert(slot.key.to_lowercase()) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicate storage key {} for account {}",
                    slot.key, self.address
                )));
            }
        }
        Ok(())
    }
}

/// Fork activation heights. `None` leaves a fork unscheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub homestead_block: Option<Int>,
    pub dao_fork_block: Option<Int>,
    pub dao_fork_support: bool,
    pub eip150_block: Option<Int>,
    pub eip150_hash: String,
    pub eip155_block: Option<Int>,
    pub eip158_block: Option<Int>,
    pub byzantium_block: Option<Int>,
    pub constantinople_block: Option<Int>,
    pub petersburg_block: Option<Int>,
    pub istanbul_block: Option<Int>,
    pub muir_glacier_block: Option<Int>,
    pub berlin_block: Option<Int>,
    pub london_block: Option<Int>,
    pub arrow_glacier_block: Option<Int>,
    pub gray_glacier_block: Option<Int>,
    pub merge_netsplit_block: Option<Int>,
    pub shanghai_block: Option<Int>,
    pub cancun_block: Option<Int>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        let genesis = || Some(Int::zero());
        Self {
            homestead_block: genesis(),
            dao_fork_block: genesis(),
            dao_fork_support: true,
            eip150_block: genesis(),
            eip150_hash: encode_hex_prefixed(&[0u8; EVM_HASH_LEN]),
            eip155_block: genesis(),
            eip158_block: genesis(),
            byzantium_block: genesis(),
            constantinople_block: genesis(),
            petersburg_block: genesis(),
            istanbul_block: genesis(),
            muir_glacier_block: genesis(),
            berlin_block: genesis(),
            london_block: genesis(),
            arrow_glacier_block: genesis(),
            gray_glacier_block: genesis(),
            merge_netsplit_block: genesis(),
            shanghai_block: None,
            cancun_block: None,
        }
    }
}

impl ChainConfig {
    /// Scheduled forks must not activate before their predecessors.
    pub fn validate(&self) -> Result<()> {
        let forks = [
            ("homestead", &self.homestead_block),
            ("eip150", &self.eip150_block),
            ("eip155", &self.eip155_block),
            ("eip158", &self.eip158_block),
            ("byzantium", &self.byzantium_block),
            ("constantinople", &self.constantinople_block),
            ("petersburg", &self.petersburg_block),
            ("istanbul", &self.istanbul_block),
            ("muir glacier", &self.muir_glacier_block),
            ("berlin", &self.berlin_block),
            ("london", &self.london_block),
            ("arrow glacier", &self.arrow_glacier_block),
            ("gray glacier", &self.gray_glacier_block),
            ("merge netsplit", &self.merge_netsplit_block),
            ("shanghai", &self.shanghai_block),
            ("cancun", &self.cancun_block),
        ];

        let mut last: Option<(&str, &Int)> = None;
        for (name, block) in forks {
            let Some(block) = block else { continue };
            if block.is_negative() {
                return Err(GenesisError::InvalidGenesis(format!(
                    "{name} block cannot be negative: {block}"
                )));
            }
            if let Some((previous, previous_block)) = last {
                if block < previous_block {
                    return Err(GenesisError::InvalidGenesis(format!(
                        "unsupported fork ordering: {previous} enabled at {previous_block}, but {name} enabled at {block}"
                    )));
                }
            }
            last = Some((name, block));
        }

        if decode_hex(&self.eip150_hash)?.len() != EVM_HASH_LEN {
            return Err(GenesisError::InvalidGenesis(format!(
                "invalid eip150 hash: {}",
                self.eip150_hash
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub evm_denom: String,
    pub extra_eips: Vec<i64>,
    pub chain_config: ChainConfig,
    pub allow_unprotected_txs: bool,
    pub active_precompiles: Vec<String>,
    pub evm_channels: Vec<String>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            evm_denom: DEFAULT_EVM_DENOM.to_string(),
            extra_eips: Vec::new(),
            chain_config: ChainConfig::default(),
            allow_unprotected_txs: false,
            active_precompiles: Vec::new(),
            evm_channels: Vec::new(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        validate_denom(&self.evm_denom)?;

        let mut eips = HashSet::new();
        for eip in &self.extra_eips {
            if !eips.insert(eip) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicate EIP: {eip}"
                )));
            }
        }

        let mut precompiles = HashSet::new();
        for precompile in &self.active_precompiles {
            let address = decode_hex(precompile)?;
            if address.len() != EVM_ADDRESS_LEN || !precompiles.insert(address) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "invalid or duplicate precompile address: {precompile}"
                )));
            }
        }

        self.chain_config.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub accounts: Vec<GenesisAccount>,
    pub params: Params,
}

impl GenesisState {
    pub fn new(params: Params, accounts: Vec<GenesisAccount>) -> GenesisState {
        GenesisState { accounts, params }
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for account in &self.accounts {
            account.validate()?;
            if !seen.insert(account.address.to_lowercase()) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicated genesis account {}",
                    account.address
                )));
            }
        }
        self.params.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_genesis_is_valid() {
        let genesis = GenesisState::default();
        assert!(genesis.accounts.is_empty());
        assert_eq!(genesis.params.evm_denom, DEFAULT_EVM_DENOM);
        assert!(genesis.validate().is_ok());
    }

    #[test]
    fn test_account_with_storage() {
        let account = GenesisAccount::new(
            &[0xaa; EVM_ADDRESS_LEN],
            &[0x60, 0x80],
            vec![State::new(&[1; EVM_HASH_LEN], &[2; EVM_HASH_LEN])],
        );
        assert_eq!(account.code, "0x6080");
        assert!(account.address.starts_with("0x"));
        assert!(account.storage[0].key.starts_with("0x"));
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_duplicate_accounts_rejected() {
        let account = GenesisAccount::new(&[0xbb; EVM_ADDRESS_LEN], &[], vec![]);
        assert_eq!(account.code, "0x");
        assert!(account.validate().is_ok());
        let genesis = GenesisState::new(Params::default(), vec![account.clone(), account]);
        assert!(genesis.validate().is_err());
    }

    #[test]
    fn test_duplicate_storage_key_rejected() {
        let slot = State::new(&[1; EVM_HASH_LEN], &[2; EVM_HASH_LEN]);
        let account = GenesisAccount::new(&[0xcc; EVM_ADDRESS_LEN], &[], vec![slot.clone(), slot]);
        assert!(account.validate().is_err());
    }

    #[test]
    fn test_fork_ordering_enforced() {
        let mut config = ChainConfig::default();
        config.berlin_block = Some(Int::from(10u64));
        assert!(config.validate().is_err());

        let mut config = ChainConfig::default();
        config.shanghai_block = Some(Int::from(10u64));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_extra_eips_rejected() {
        let params = Params {
            extra_eips: vec![3855, 3855],
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }
}
