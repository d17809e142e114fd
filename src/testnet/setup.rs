//! Building blocks of a test network genesis
//!
//! Each `set_*_genesis_state` composer takes the genesis being assembled by
//! value, replaces its module's section and hands the genesis back. Callers
//! thread one value through every composer before calling `init_chain`.

use crate::app::{GenesisState, TestApp};
use crate::consensus::{MockPV, PrivValidator, Signers, Validator, ValidatorSet};
use crate::error::{GenesisError, Result};
use crate::modules::auth::{self, BaseAccount};
use crate::modules::bank::{self, Balance};
use crate::modules::staking::{self, BondStatus, Commission, Delegation, Description};
use crate::modules::{evm, inflation, CustomGenesisState, ModuleGenesis};
use crate::types::{module_address, AccAddress, Coin, Coins, Int, LegacyDec, ValAddress};
use log::{debug, info};

/// Generates `n` validators of voting power 1, each with its own mock signer.
pub fn create_validator_set_and_signers(n: usize) -> Result<(ValidatorSet, Signers)> {
    let mut validators = Vec::with_capacity(n);
    let mut signers = Signers::new();

    for _ in 0..n {
        let signer = MockPV::new()?;
        let validator = Validator::new(signer.pub_key()?, 1);
        signers.insert(validator.address.to_string(), Box::new(signer));
        validators.push(validator);
    }

    debug!("Created {n} genesis validators");
    Ok((ValidatorSet::new(validators), signers))
}

/// Base accounts with no public key, account number 0 and sequence 0.
pub fn create_genesis_accounts(accounts: &[AccAddress]) -> Vec<BaseAccount> {
    accounts
        .iter()
        .map(|address| BaseAccount::new(address.clone(), None, 0, 0))
        .collect()
}

/// One balance of `coin` per account.
pub fn create_balances(accounts: &[AccAddress], coin: Coin) -> Vec<Balance> {
    accounts
        .iter()
        .map(|address| Balance::new(address, Coins::from(coin.clone())))
        .collect()
}

/// Bonded staking validator backing the consensus validator `validator`.
pub fn create_staking_validator(validator: &Validator, bonded: &Int) -> Result<staking::Validator> {
    let consensus_pubkey = validator.pub_key.to_sdk_pub_key()?.to_any()?;
    let operator = ValAddress::from_bytes(validator.address.as_bytes());

    Ok(staking::Validator {
        operator_address: operator.to_string(),
        consensus_pubkey,
        jailed: false,
        status: BondStatus::Bonded,
        tokens: bonded.clone(),
        delegator_shares: LegacyDec::one(),
        description: Description::default(),
        unbonding_height: 0,
        unbonding_time: staking::UNIX_EPOCH_TIMESTAMP.to_string(),
        commission: Commission::new(LegacyDec::zero(), LegacyDec::zero(), LegacyDec::zero()),
        min_self_delegation: Int::zero(),
    })
}

pub fn create_staking_validators(
    validators: &[Validator],
    bonded: &Int,
) -> Result<Vec<staking::Validator>> {
    validators
        .iter()
        .map(|validator| create_staking_validator(validator, bonded))
        .collect()
}

/// One delegation of a single share from `from` to every validator.
pub fn create_delegations(validators: &[Validator], from: &AccAddress) -> Vec<Delegation> {
    validators
        .iter()
        .map(|validator| {
            let operator = ValAddress::from_bytes(validator.address.as_bytes());
            Delegation::new(from, &operator, LegacyDec::one())
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct StakingCustomGenesisState {
    pub denom: String,
    pub validators: Vec<staking::Validator>,
    pub delegations: Vec<Delegation>,
}

/// Default staking params bonding in `overrides.denom`, plus the given validators and delegations.
pub fn set_staking_genesis_state(
    app: &TestApp,
    genesis: GenesisState,
    overrides: StakingCustomGenesisState,
) -> Result<GenesisState> {
    let params = staking::Params {
        bond_denom: overrides.denom,
        ..staking::Params::default()
    };
    let staking_genesis =
        staking::GenesisState::new(params, overrides.validators, overrides.delegations);

    info!(
        "Setting staking genesis: {} validators, {} delegations",
        staking_genesis.validators.len(),
        staking_genesis.delegations.len()
    );
    genesis.with_section(app.app_codec(), staking::MODULE_NAME, &staking_genesis)
}

pub fn set_auth_genesis_state(
    app: &TestApp,
    genesis: GenesisState,
    accounts: &[BaseAccount],
) -> Result<GenesisState> {
    let auth_genesis = auth::GenesisState::new(auth::Params::default(), accounts)?;
    info!("Setting auth genesis: {} accounts", accounts.len());
    genesis.with_section(app.app_codec(), auth::MODULE_NAME, &auth_genesis)
}

/// Installs the custom inflation genesis if there is one, otherwise the module
/// defaults with inflation switched off.
pub fn set_inflation_genesis_state(
    app: &TestApp,
    genesis: GenesisState,
    custom: &CustomGenesisState,
) -> Result<GenesisState> {
    let inflation_genesis = match custom.get(inflation::MODULE_NAME) {
        Some(ModuleGenesis::Inflation(custom)) => {
            debug!("Using custom inflation genesis");
            custom.clone()
        }
        Some(other) => {
            return Err(GenesisError::InvalidCustomGenesis {
                module: inflation::MODULE_NAME.to_string(),
                found: other.type_name().to_string(),
            })
        }
        None => {
            let params = inflation::Params {
                enable_inflation: false,
                ..inflation::Params::default_params()?
            };
            inflation::GenesisState::new(
                params,
                0,
                inflation::DAY_EPOCH_ID,
                inflation::DEFAULT_EPOCHS_PER_PERIOD,
                0,
            )
        }
    };

    genesis.with_section(app.app_codec(), inflation::MODULE_NAME, &inflation_genesis)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankCustomGenesisState {
    pub total_supply: Coins,
    pub balances: Vec<Balance>,
}

/// Default bank params with the given balances and supply. The supply is not
/// checked against the balances here; `init_chain` does that.
pub fn set_bank_genesis_state(
    app: &TestApp,
    genesis: GenesisState,
    overrides: BankCustomGenesisState,
) -> Result<GenesisState> {
    let bank_genesis = bank::GenesisState::new(
        bank::Params::default(),
        overrides.balances,
        overrides.total_supply,
        Vec::new(),
        Vec::new(),
    );
    info!(
        "Setting bank genesis: {} balances, supply {}",
        bank_genesis.balances.len(),
        bank_genesis.supply
    );
    genesis.with_section(app.app_codec(), bank::MODULE_NAME, &bank_genesis)
}

/// Installs the custom EVM genesis if there is one; otherwise leaves `genesis` untouched.
pub fn set_evm_genesis_state(
    app: &TestApp,
    genesis: GenesisState,
    custom: &CustomGenesisState,
) -> Result<GenesisState> {
    match custom.get(evm::MODULE_NAME) {
        Some(ModuleGenesis::Evm(evm_genesis)) => {
            debug!("Using custom evm genesis: {} accounts", evm_genesis.accounts.len());
            genesis.with_section(app.app_codec(), evm::MODULE_NAME, evm_genesis)
        }
        Some(other) => Err(GenesisError::InvalidCustomGenesis {
            module: evm::MODULE_NAME.to_string(),
            found: other.type_name().to_string(),
        }),
        None => Ok(genesis),
    }
}

pub fn calculate_total_supply(balances: &[Balance]) -> Coins {
    balances
        .iter()
        .fold(Coins::empty(), |total, balance| total.add(&balance.coins))
}

/// Appends a balance of `total_bonded` held by the bonded pool module account.
pub fn add_bonded_module_account_to_funded_balances(
    mut balances: Vec<Balance>,
    total_bonded: Coin,
) -> Vec<Balance> {
    let bonded_pool = module_address(staking::BONDED_POOL_NAME);
    balances.push(Balance::new(&bonded_pool, Coins::from(total_bonded)));
    balances
}
