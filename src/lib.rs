//! # Testnet Genesis - In-Memory Networks for Integration Tests
//!
//! This crate builds the genesis of an EVM-enabled Cosmos chain and hands it to
//! an in-memory application, so integration tests start from a running network
//! instead of a pile of JSON fixtures.
//!
//! ## What It Does
//! - **Validators**: ed25519 mock signers and the consensus validator set
//! - **Accounts**: base accounts and funded balances for test users
//! - **Genesis Composers**: auth, bank, staking, inflation and EVM sections
//! - **Application**: a `TestApp` over a temporary sled store that validates
//!   the genesis at `init_chain`, the way the real chain would
//!
//! ## How the Code Is Organized
//! - `types/`: amounts, coins, bech32 addresses and the `Any` envelope
//! - `consensus/`: validator public keys, validator sets and private signers
//! - `modules/`: one genesis section per application module
//! - `app/`: codec, genesis map and the test application
//! - `testnet/`: the setup functions and the `IntegrationNetwork` that chains them
//! - `config/`: environment defaults and network configuration files
//! - `utils/`: hashing, key generation and encoding helpers
//! - `cli/`: command-line interface of the `testnet-genesis` binary
//!
//! ## Where to Start
//! 1. `testnet/network.rs` shows the whole pipeline in order
//! 2. `testnet/setup.rs` has each composer on its own
//! 3. `app/mod.rs` has the checks `init_chain` runs on the final document

pub mod app;
pub mod cli;
pub mod config;
pub mod consensus;
pub mod error;
pub mod modules;
pub mod testnet;
pub mod types;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{create_test_app, create_test_app_with_logger, AppCodec, AppLogger, GenesisState, InitChainRequest, TestApp};
pub use cli::{Command, Opt};
pub use config::{Config, NetworkConfig, GLOBAL_CONFIG};
pub use consensus::{MockPV, PrivValidator, Signers, ValidatorSet};
pub use error::{GenesisError, Result};
pub use modules::{CustomGenesisState, ModuleGenesis};
pub use testnet::IntegrationNetwork;
pub use types::{AccAddress, Coin, Coins, Int, LegacyDec, ValAddress};
