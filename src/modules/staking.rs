//! Staking module genesis: validators, delegations and bond parameters

use crate::consensus::PubKey;
use crate::error::{GenesisError, Result};
use crate::types::{validate_denom, AccAddress, Any, Int, LegacyDec, SdkPubKey, ValAddress};
use crate::utils::serialization::string_i64;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MODULE_NAME: &str = "staking";
pub const BONDED_POOL_NAME: &str = "bonded_tokens_pool";
pub const NOT_BONDED_POOL_NAME: &str = "not_bonded_tokens_pool";
pub const DEFAULT_BOND_DENOM: &str = "stake";

/// RFC 3339 rendering of the Unix epoch, used for zero-valued timestamps.
pub const UNIX_EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondStatus {
    #[serde(rename = "BOND_STATUS_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "BOND_STATUS_UNBONDED")]
    Unbonded,
    #[serde(rename = "BOND_STATUS_UNBONDING")]
    Unbonding,
    #[serde(rename = "BOND_STATUS_BONDED")]
    Bonded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub moniker: String,
    pub identity: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub rate: LegacyDec,
    pub max_rate: LegacyDec,
    pub max_change_rate: LegacyDec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub commission_rates: CommissionRates,
    pub update_time: String,
}

impl Commission {
    pub fn new(rate: LegacyDec, max_rate: LegacyDec, max_change_rate: LegacyDec) -> Commission {
        Commission {
            commission_rates: CommissionRates {
                rate,
                max_rate,
                max_change_rate,
            },
            update_time: UNIX_EPOCH_TIMESTAMP.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let rates = &self.commission_rates;
        let invalid = |msg: &str| Err(GenesisError::InvalidGenesis(format!("commission {msg}")));
        if rates.max_rate.is_negative() || rates.max_rate > LegacyDec::one() {
            return invalid("max rate must be within [0, 1]");
        }
        if rates.rate.is_negative() || rates.rate > rates.max_rate {
            return invalid("rate must be within [0, max rate]");
        }
        if rates.max_change_rate.is_negative() || rates.max_change_rate > rates.max_rate {
            return invalid("max change rate must be within [0, max rate]");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub operator_address: String,
    pub consensus_pubkey: Any,
    pub jailed: bool,
    pub status: BondStatus,
    pub tokens: Int,
    pub delegator_shares: LegacyDec,
    pub description: Description,
    #[serde(with = "string_i64")]
    pub unbonding_height: i64,
    pub unbonding_time: String,
    pub commission: Commission,
    pub min_self_delegation: Int,
}

impl Validator {
    pub fn is_bonded(&self) -> bool {
        self.status == BondStatus::Bonded
    }

    /// Consensus key unpacked from its envelope.
    pub fn consensus_pub_key(&self) -> Result<PubKey> {
        let sdk_pub_key = SdkPubKey::from_any(&self.consensus_pubkey)?;
        Ok(PubKey::from_sdk_pub_key(&sdk_pub_key))
    }

    /// Tokens divided by the power reduction, zero unless bonded.
    pub fn consensus_power(&self, power_reduction: &Int) -> Result<i64> {
        if !self.is_bonded() {
            return Ok(0);
        }
        self.tokens.quo(power_reduction)?.to_i64().ok_or_else(|| {
            GenesisError::InvalidGenesis(format!(
                "consensus power of {} overflows",
                self.operator_address
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator_address: String,
    pub validator_address: String,
    pub shares: LegacyDec,
}

impl Delegation {
    pub fn new(delegator: &AccAddress, validator: &ValAddress, shares: LegacyDec) -> Delegation {
        Delegation {
            delegator_address: delegator.to_string(),
            validator_address: validator.to_string(),
            shares,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbondingDelegationEntry {
    #[serde(with = "string_i64")]
    pub creation_height: i64,
    pub completion_time: String,
    pub initial_balance: Int,
    pub balance: Int,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbondingDelegation {
    pub delegator_address: String,
    pub validator_address: String,
    pub entries: Vec<UnbondingDelegationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedelegationEntry {
    #[serde(with = "string_i64")]
    pub creation_height: i64,
    pub completion_time: String,
    pub initial_balance: Int,
    pub shares_dst: LegacyDec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redelegation {
    pub delegator_address: String,
    pub validator_src_address: String,
    pub validator_dst_address: String,
    pub entries: Vec<RedelegationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastValidatorPower {
    pub address: String,
    #[serde(with = "string_i64")]
    pub power: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub unbonding_time: String,
    pub max_validators: u32,
    pub max_entries: u32,
    pub historical_entries: u32,
    pub bond_denom: String,
    pub min_commission_rate: LegacyDec,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            unbonding_time: "1814400s".to_string(),
            max_validators: 100,
            max_entries: 7,
            historical_entries: 10_000,
            bond_denom: DEFAULT_BOND_DENOM.to_string(),
            min_commission_rate: LegacyDec::zero(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        validate_denom(&self.bond_denom)?;
        if self.max_validators == 0 {
            return Err(GenesisError::InvalidGenesis(
                "max validators must be positive".to_string(),
            ));
        }
        if self.max_entries == 0 {
            return Err(GenesisError::InvalidGenesis(
                "max entries must be positive".to_string(),
            ));
        }
        if self.min_commission_rate.is_negative() || self.min_commission_rate > LegacyDec::one() {
            return Err(GenesisError::InvalidGenesis(format!(
                "minimum commission rate out of range: {}",
                self.min_commission_rate
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    pub last_total_power: Int,
    pub last_validator_powers: Vec<LastValidatorPower>,
    pub validators: Vec<Validator>,
    pub delegations: Vec<Delegation>,
    pub unbonding_delegations: Vec<UnbondingDelegation>,
    pub redelegations: Vec<Redelegation>,
    pub exported: bool,
}

impl Default for GenesisState {
    fn default() -> Self {
        GenesisState::new(Params::default(), Vec::new(), Vec::new())
    }
}

impl GenesisState {
    pub fn new(params: Params, validators: Vec<Validator>, delegations: Vec<Delegation>) -> Self {
        Self {
            params,
            last_total_power: Int::zero(),
            last_validator_powers: Vec::new(),
            validators,
            delegations,
            unbonding_delegations: Vec::new(),
            redelegations: Vec::new(),
            exported: false,
        }
    }

    /// Sum of the tokens held by bonded validators.
    pub fn bonded_tokens(&self) -> Int {
        self.validators
            .iter()
            .filter(|v| v.is_bonded())
            .fold(Int::zero(), |total, v| &total + &v.tokens)
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;

        let mut operators = HashSet::new();
        let mut consensus_keys = HashSet::new();
        for validator in &self.validators {
            validator.operator_address.parse::<ValAddress>()?;
            if !operators.insert(validator.operator_address.as_str()) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicate validator in genesis state: {}",
                    validator.operator_address
                )));
            }
            if !consensus_keys.insert(validator.consensus_pub_key()?) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicate consensus key for validator {}",
                    validator.operator_address
                )));
            }
            if validator.jailed && validator.is_bonded() {
                return Err(GenesisError::InvalidGenesis(format!(
                    "validator is bonded and jailed in genesis state: {}",
                    validator.operator_address
                )));
            }
            if validator.delegator_shares.is_zero() && validator.status != BondStatus::Unbonding {
                return Err(GenesisError::InvalidGenesis(format!(
                    "bonded/unbonded genesis validator cannot have zero delegator shares: {}",
                    validator.operator_address
                )));
            }
            validator.commission.validate()?;
        }

        for delegation in &self.delegations {
            delegation.delegator_address.parse::<AccAddress>()?;
            if !operators.contains(delegation.validator_address.as_str()) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "delegation to unknown validator {}",
                    delegation.validator_address
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::POWER_REDUCTION;

    fn validator(seed: u8, tokens: Int) -> Validator {
        let pub_key = PubKey::Ed25519(vec![seed; 32]);
        let operator = ValAddress::from_bytes(pub_key.address().as_bytes());
        Validator {
            operator_address: operator.to_string(),
            consensus_pubkey: pub_key.to_sdk_pub_key().unwrap().to_any().unwrap(),
            jailed: false,
            status: BondStatus::Bonded,
            tokens,
            delegator_shares: LegacyDec::one(),
            description: Description::default(),
            unbonding_height: 0,
            unbonding_time: UNIX_EPOCH_TIMESTAMP.to_string(),
            commission: Commission::new(LegacyDec::zero(), LegacyDec::zero(), LegacyDec::zero()),
            min_self_delegation: Int::zero(),
        }
    }

    #[test]
    fn test_default_params() {
        let params = Params::default();
        assert_eq!(params.bond_denom, "stake");
        assert_eq!(params.max_validators, 100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_bonded_tokens_and_power() {
        let tokens = POWER_REDUCTION.clone();
        let mut genesis =
            GenesisState::new(Params::default(), vec![validator(1, tokens.clone())], vec![]);
        genesis.validators.push(Validator {
            status: BondStatus::Unbonded,
            ..validator(2, tokens.clone())
        });

        assert_eq!(genesis.bonded_tokens(), tokens);
        assert_eq!(genesis.validators[0].consensus_power(&POWER_REDUCTION).unwrap(), 1);
        assert_eq!(genesis.validators[1].consensus_power(&POWER_REDUCTION).unwrap(), 0);
    }

    #[test]
    fn test_consensus_pub_key_roundtrip() {
        let v = validator(3, Int::one());
        assert_eq!(v.consensus_pub_key().unwrap(), PubKey::Ed25519(vec![3; 32]));
    }

    #[test]
    fn test_duplicate_validator_rejected() {
        let v = validator(4, Int::one());
        let genesis = GenesisState::new(Params::default(), vec![v.clone(), v], vec![]);
        assert!(genesis.validate().is_err());
    }

    #[test]
    fn test_delegation_to_unknown_validator_rejected() {
        let v = validator(5, Int::one());
        let stranger = ValAddress::from_bytes(&[9u8; 20]);
        let delegation = Delegation::new(&AccAddress::random(), &stranger, LegacyDec::one());
        let genesis = GenesisState::new(Params::default(), vec![v], vec![delegation]);
        assert!(genesis.validate().is_err());
    }

    #[test]
    fn test_json_layout() {
        let json = serde_json::to_value(validator(6, Int::one())).unwrap();
        assert_eq!(json["status"], "BOND_STATUS_BONDED");
        assert_eq!(json["delegator_shares"], "1.000000000000000000");
        assert_eq!(json["unbonding_height"], "0");
        assert_eq!(json["unbonding_time"], UNIX_EPOCH_TIMESTAMP);
        assert_eq!(
            json["consensus_pubkey"]["@type"],
            "/cosmos.crypto.ed25519.PubKey"
        );
    }
}
