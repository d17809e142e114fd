//! Configuration management
//!
//! `settings` holds the process-wide defaults read from the environment,
//! `network` describes the shape of a test network (validators, funded
//! accounts, balances, overrides) and can be loaded from a TOML file.

pub mod network;
pub mod settings;

pub use network::NetworkConfig;
pub use settings::{Config, DEFAULT_CHAIN_ID, GLOBAL_CONFIG};
