//! Integration test network scaffolding
//!
//! `setup` holds the individual genesis builders and composers; `network`
//! chains them into a ready-to-use application.

pub mod network;
pub mod setup;

pub use network::IntegrationNetwork;
pub use setup::{
    add_bonded_module_account_to_funded_balances, calculate_total_supply, create_balances,
    create_delegations, create_genesis_accounts, create_staking_validator,
    create_staking_validators, create_validator_set_and_signers, set_auth_genesis_state,
    set_bank_genesis_state, set_evm_genesis_state, set_inflation_genesis_state,
    set_staking_genesis_state, BankCustomGenesisState, StakingCustomGenesisState,
};
