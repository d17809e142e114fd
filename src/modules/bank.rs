//! Bank module genesis: balances, total supply and denomination metadata

use crate::error::{GenesisError, Result};
use crate::types::{validate_denom, AccAddress, Coins};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MODULE_NAME: &str = "bank";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEnabled {
    pub denom: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub send_enabled: Vec<SendEnabled>,
    pub default_send_enabled: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            send_enabled: Vec::new(),
            default_send_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: String,
    pub coins: Coins,
}

impl Balance {
    pub fn new(address: &AccAddress, coins: Coins) -> Balance {
        Balance {
            address: address.to_string(),
            coins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u32,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub description: String,
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    pub display: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    pub balances: Vec<Balance>,
    pub supply: Coins,
    pub denom_metadata: Vec<Metadata>,
    pub send_enabled: Vec<SendEnabled>,
}

impl GenesisState {
    pub fn new(
        params: Params,
        balances: Vec<Balance>,
        supply: Coins,
        denom_metadata: Vec<Metadata>,
        send_enabled: Vec<SendEnabled>,
    ) -> GenesisState {
        GenesisState {
            params,
            balances,
            supply,
            denom_metadata,
            send_enabled,
        }
    }

    /// Sum of every balance entry.
    pub fn balances_total(&self) -> Coins {
        self.balances
            .iter()
            .fold(Coins::empty(), |total, balance| total.add(&balance.coins))
    }

    pub fn balance_of(&self, address: &AccAddress) -> Coins {
        let address = address.to_string();
        self.balances
            .iter()
            .filter(|b| b.address == address)
            .fold(Coins::empty(), |total, balance| total.add(&balance.coins))
    }

    /// Balances must be well formed and unique per address; a non-empty supply
    /// must equal the sum of all balances.
    pub fn validate(&self) -> Result<()> {
        for entry in self.params.send_enabled.iter().chain(&self.send_enabled) {
            validate_denom(&entry.denom)?;
        }

        let mut seen = HashSet::new();
        for balance in &self.balances {
            balance.address.parse::<AccAddress>()?;
            if !seen.insert(balance.address.as_str()) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicate balance for address {}",
                    balance.address
                )));
            }
            balance.coins.validate()?;
        }

        let mut bases = HashSet::new();
        for metadata in &self.denom_metadata {
            validate_denom(&metadata.base)?;
            if !bases.insert(metadata.base.as_str()) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicate client metadata for denom {}",
                    metadata.base
                )));
            }
        }

        let total = self.balances_total();
        if !self.supply.is_empty() && self.supply != total {
            return Err(GenesisError::InvalidGenesis(format!(
                "genesis supply is incorrect, expected {}, got {}",
                self.supply, total
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coin, Int};

    fn coins(amount: u64) -> Coins {
        Coins::from(Coin::new("aevmos", Int::from(amount)).unwrap())
    }

    #[test]
    fn test_supply_must_match_balances() {
        let a = AccAddress::random();
        let b = AccAddress::random();
        let balances = vec![Balance::new(&a, coins(10)), Balance::new(&b, coins(5))];

        let consistent = GenesisState::new(Params::default(), balances.clone(), coins(15), vec![], vec![]);
        assert!(consistent.validate().is_ok());

        let inconsistent = GenesisState::new(Params::default(), balances, coins(16), vec![], vec![]);
        assert!(matches!(
            inconsistent.validate(),
            Err(GenesisError::InvalidGenesis(_))
        ));
    }

    #[test]
    fn test_empty_supply_is_not_checked() {
        let genesis = GenesisState::new(
            Params::default(),
            vec![Balance::new(&AccAddress::random(), coins(3))],
            Coins::empty(),
            vec![],
            vec![],
        );
        assert!(genesis.validate().is_ok());
    }

    #[test]
    fn test_duplicate_balance_rejected() {
        let a = AccAddress::random();
        let genesis = GenesisState::new(
            Params::default(),
            vec![Balance::new(&a, coins(1)), Balance::new(&a, coins(1))],
            Coins::empty(),
            vec![],
            vec![],
        );
        assert!(genesis.validate().is_err());
    }

    #[test]
    fn test_balance_of() {
        let a = AccAddress::random();
        let genesis = GenesisState::new(
            Params::default(),
            vec![Balance::new(&a, coins(9))],
            coins(9),
            vec![],
            vec![],
        );
        assert_eq!(genesis.balance_of(&a), coins(9));
        assert!(genesis.balance_of(&AccAddress::random()).is_empty());
    }
}
