//! Inflation module genesis: exponential issuance schedule driven by epochs

use crate::error::{GenesisError, Result};
use crate::types::{validate_denom, LegacyDec};
use crate::utils::serialization::{string_i64, string_u64};
use serde::{Deserialize, Serialize};

pub const MODULE_NAME: &str = "inflation";
pub const DEFAULT_MINT_DENOM: &str = "aevmos";

pub const DAY_EPOCH_ID: &str = "day";
pub const WEEK_EPOCH_ID: &str = "week";

/// Epochs in one inflation period.
pub const DEFAULT_EPOCHS_PER_PERIOD: i64 = 365;

/// `f(x) = a * (1 - r)^x + c`, scaled by the bonding ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExponentialCalculation {
    pub a: LegacyDec,
    pub r: LegacyDec,
    pub c: LegacyDec,
    pub bonding_target: LegacyDec,
    pub max_variance: LegacyDec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationDistribution {
    pub staking_rewards: LegacyDec,
    pub community_pool: LegacyDec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub mint_denom: String,
    pub exponential_calculation: ExponentialCalculation,
    pub inflation_distribution: InflationDistribution,
    pub enable_inflation: bool,
}

impl Params {
    pub fn default_params() -> Result<Params> {
        Ok(Params {
            mint_denom: DEFAULT_MINT_DENOM.to_string(),
            exponential_calculation: ExponentialCalculation {
                a: LegacyDec::new_with_prec(300_000_000, 0)?,
                r: LegacyDec::new_with_prec(50, 2)?,
                c: LegacyDec::new_with_prec(9_375_000, 0)?,
                bonding_target: LegacyDec::new_with_prec(66, 2)?,
                max_variance: LegacyDec::zero(),
            },
            inflation_distribution: InflationDistribution {
                staking_rewards: LegacyDec::new_with_prec(533_333_334, 9)?,
                community_pool: LegacyDec::new_with_prec(466_666_666, 9)?,
            },
            enable_inflation: true,
        })
    }

    pub fn validate(&self) -> Result<()> {
        validate_denom(&self.mint_denom)?;

        let calc = &self.exponential_calculation;
        let invalid = |msg: String| Err(GenesisError::InvalidGenesis(msg));
        if calc.a.is_negative() {
            return invalid(format!("initial value cannot be negative: {}", calc.a));
        }
        if calc.r.is_negative() || calc.r > LegacyDec::one() {
            return invalid(format!("reduction factor must be within [0, 1]: {}", calc.r));
        }
        if calc.c.is_negative() {
            return invalid(format!("long term inflation cannot be negative: {}", calc.c));
        }
        if !calc.bonding_target.is_positive() || calc.bonding_target > LegacyDec::one() {
            return invalid(format!(
                "bonding target must be within (0, 1]: {}",
                calc.bonding_target
            ));
        }
        if calc.max_variance.is_negative() {
            return invalid(format!("max variance cannot be negative: {}", calc.max_variance));
        }

        let distribution = &self.inflation_distribution;
        if distribution.staking_rewards.is_negative() || distribution.community_pool.is_negative() {
            return invalid("inflation distribution shares cannot be negative".to_string());
        }
        let total = distribution.staking_rewards.clone() + distribution.community_pool.clone();
        if total != LegacyDec::one() {
            return invalid(format!("inflation distribution must sum to one, got {total}"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    #[serde(with = "string_u64")]
    pub period: u64,
    pub epoch_identifier: String,
    #[serde(with = "string_i64")]
    pub epochs_per_period: i64,
    #[serde(with = "string_u64")]
    pub skipped_epochs: u64,
}

impl GenesisState {
    pub fn new(
        params: Params,
        period: u64,
        epoch_identifier: &str,
        epochs_per_period: i64,
        skipped_epochs: u64,
    ) -> GenesisState {
        GenesisState {
            params,
            period,
            epoch_identifier: epoch_identifier.to_string(),
            epochs_per_period,
            skipped_epochs,
        }
    }

    /// Module default: inflation enabled, daily epochs, 365 epochs per period.
    pub fn default_genesis() -> Result<GenesisState> {
        Ok(GenesisState::new(
            Params::default_params()?,
            0,
            DAY_EPOCH_ID,
            DEFAULT_EPOCHS_PER_PERIOD,
            0,
        ))
    }

    pub fn validate(&self) -> Result<()> {
        if self.epoch_identifier.trim().is_empty() {
            return Err(GenesisError::InvalidGenesis(
                "epoch identifier cannot be blank".to_string(),
            ));
        }
        if self.epochs_per_period <= 0 {
            return Err(GenesisError::InvalidGenesis(format!(
                "epochs per period must be positive: {}",
                self.epochs_per_period
            )));
        }
        self.params.validate()
    }
}
