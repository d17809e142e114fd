//! A fully initialised in-memory network for integration tests

use crate::app::{
    create_test_app_with_logger, AppLogger, GenesisState, InitChainRequest, InitChainResponse,
    TestApp, ValidatorUpdate,
};
use crate::config::NetworkConfig;
use crate::consensus::{Signers, ValidatorSet};
use crate::error::{GenesisError, Result};
use crate::testnet::setup::{
    add_bonded_module_account_to_funded_balances, calculate_total_supply, create_balances,
    create_delegations, create_genesis_accounts, create_staking_validators,
    create_validator_set_and_signers, set_auth_genesis_state, set_bank_genesis_state,
    set_evm_genesis_state, set_inflation_genesis_state, set_staking_genesis_state,
    BankCustomGenesisState, StakingCustomGenesisState,
};
use crate::types::{tokens_from_consensus_power, Coin, Int, POWER_REDUCTION};
use log::info;

pub const INITIAL_HEIGHT: i64 = 1;

/// Application plus the validators, signers and genesis it was initialised with.
pub struct IntegrationNetwork {
    cfg: NetworkConfig,
    app: TestApp,
    validators: ValidatorSet,
    signers: Signers,
    genesis: GenesisState,
    init_response: InitChainResponse,
}

impl IntegrationNetwork {
    /// Builds the genesis described by `cfg` and runs `init_chain` with it.
    ///
    /// Every validator is bonded with one unit of consensus power, delegated
    /// from the first pre-funded account.
    pub fn new(cfg: NetworkConfig) -> Result<IntegrationNetwork> {
        cfg.validate()?;
        info!(
            "Setting up network {} with {} validators",
            cfg.chain_id, cfg.amount_of_validators
        );

        let delegator = cfg.pre_funded_accounts.first().ok_or_else(|| {
            GenesisError::Config("network needs a pre-funded account to delegate from".to_string())
        })?;

        let (validators, signers) = create_validator_set_and_signers(cfg.amount_of_validators)?;

        let genesis_accounts = create_genesis_accounts(&cfg.pre_funded_accounts);
        let funded_balances = create_balances(
            &cfg.pre_funded_accounts,
            Coin::new(&cfg.denom, cfg.initial_balance.clone())?,
        );

        let bonded_amount = tokens_from_consensus_power(1, &POWER_REDUCTION);
        let total_bonded = &bonded_amount * &Int::from(validators.size() as u64);
        let funded_balances = add_bonded_module_account_to_funded_balances(
            funded_balances,
            Coin::new(&cfg.denom, total_bonded)?,
        );
        let total_supply = calculate_total_supply(&funded_balances);

        let staking_validators = create_staking_validators(&validators.validators, &bonded_amount)?;
        let delegations = create_delegations(&validators.validators, delegator);

        let app = create_test_app_with_logger(&cfg.chain_id, AppLogger::Facade)?;
        let genesis = app.default_genesis_state()?;
        let genesis = set_auth_genesis_state(&app, genesis, &genesis_accounts)?;
        let genesis = set_staking_genesis_state(
            &app,
            genesis,
            StakingCustomGenesisState {
                denom: cfg.denom.clone(),
                validators: staking_validators,
                delegations,
            },
        )?;
        let genesis = set_inflation_genesis_state(&app, genesis, &cfg.custom_genesis_state)?;
        let genesis = set_bank_genesis_state(
            &app,
            genesis,
            BankCustomGenesisState {
                total_supply,
                balances: funded_balances,
            },
        )?;
        let genesis = set_evm_genesis_state(&app, genesis, &cfg.custom_genesis_state)?;

        let init_response = app.init_chain(InitChainRequest {
            chain_id: cfg.chain_id.clone(),
            initial_height: INITIAL_HEIGHT,
            validators: validators
                .iter()
                .map(|validator| ValidatorUpdate {
                    pub_key: validator.pub_key.clone(),
                    power: validator.voting_power,
                })
                .collect(),
            app_state_bytes: genesis.to_app_state_bytes()?,
        })?;

        info!("Network {} initialised", cfg.chain_id);
        Ok(IntegrationNetwork {
            cfg,
            app,
            validators,
            signers,
            genesis,
            init_response,
        })
    }

    pub fn chain_id(&self) -> &str {
        &self.cfg.chain_id
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.cfg
    }

    pub fn app(&self) -> &TestApp {
        &self.app
    }

    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    pub fn signers(&self) -> &Signers {
        &self.signers
    }

    pub fn genesis(&self) -> &GenesisState {
        &self.genesis
    }

    pub fn init_response(&self) -> &InitChainResponse {
        &self.init_response
    }

    pub fn denom(&self) -> &str {
        &self.cfg.denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{bank, staking};
    use crate::types::module_address;

    #[test]
    fn test_default_network_initialises() {
        let network = IntegrationNetwork::new(NetworkConfig::default()).unwrap();
        assert_eq!(network.validators().size(), 3);
        assert_eq!(network.signers().len(), 3);
        assert_eq!(network.init_response().validators.len(), 3);
        assert!(network.app().is_initialized().unwrap());
        assert_eq!(network.app().logger(), AppLogger::Facade);
    }

    #[test]
    fn test_bonded_pool_holds_bonded_tokens() {
        let network = IntegrationNetwork::new(NetworkConfig::default().with_amount_of_validators(2))
            .unwrap();
        let codec = network.app().app_codec();
        let bank_genesis: bank::GenesisState = network
            .genesis()
            .section(codec, bank::MODULE_NAME)
            .unwrap()
            .unwrap();
        let staking_genesis: staking::GenesisState = network
            .genesis()
            .section(codec, staking::MODULE_NAME)
            .unwrap()
            .unwrap();

        let pool = bank_genesis.balance_of(&module_address(staking::BONDED_POOL_NAME));
        assert_eq!(pool.amount_of(network.denom()), staking_genesis.bonded_tokens());
        assert_eq!(staking_genesis.params.bond_denom, network.denom());
        assert_eq!(bank_genesis.supply, bank_genesis.balances_total());
    }

    #[test]
    fn test_network_without_funded_accounts_fails() {
        let cfg = NetworkConfig::default().with_random_accounts(0);
        assert!(matches!(
            IntegrationNetwork::new(cfg),
            Err(GenesisError::Config(_))
        ));
    }
}
