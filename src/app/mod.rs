//! In-memory application instance that consumes a genesis document
//!
//! `TestApp` stands in for the chain application during integration tests. It
//! owns a temporary sled database, decodes and validates every genesis section
//! at `init_chain`, enforces the supply and bonded pool invariants and records
//! the resulting validator set. It never produces blocks.

pub mod codec;
pub mod genesis_state;

pub use codec::{AppCodec, EncodingConfig, InterfaceRegistry};
pub use genesis_state::GenesisState;

use crate::config::GLOBAL_CONFIG;
use crate::consensus::PubKey;
use crate::error::{GenesisError, Result};
use crate::modules::auth::BaseAccount;
use crate::modules::{auth, bank, evm, inflation, staking};
use crate::types::{module_address, Coin, Coins, Int, POWER_REDUCTION};
use crate::utils::{deserialize, serialize, sha256_digest};
use log::{debug, info, Level};
use serde::{Deserialize, Serialize};
use sled::{Db, Transactional, Tree};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const GENESIS_TREE: &str = "genesis";
const VALIDATORS_TREE: &str = "validators";
const META_TREE: &str = "meta";

const CHAIN_ID_KEY: &str = "chain_id";
const INITIAL_HEIGHT_KEY: &str = "initial_height";
const APP_HASH_KEY: &str = "app_hash";

/// Invariant checks run every this many blocks.
pub const DEFAULT_INV_CHECK_PERIOD: u32 = 5;

/// Where the application sends its own log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppLogger {
    /// Drop everything.
    #[default]
    Nop,
    /// Forward to the `log` facade.
    Facade,
}

impl AppLogger {
    fn log(&self, level: Level, message: &str) {
        if *self == AppLogger::Facade {
            log::log!(target: "testnet_genesis::app", level, "{message}");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub home: PathBuf,
    pub inv_check_period: u32,
    pub skip_upgrade_heights: HashSet<i64>,
    pub load_latest: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            home: GLOBAL_CONFIG.get_node_home(),
            inv_check_period: DEFAULT_INV_CHECK_PERIOD,
            skip_upgrade_heights: HashSet::new(),
            load_latest: true,
        }
    }
}

/// Options applied to the base application after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseAppOption {
    ChainId(String),
}

#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct ValidatorUpdate {
    pub pub_key: PubKey,
    pub power: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitChainRequest {
    pub chain_id: String,
    pub initial_height: i64,
    pub validators: Vec<ValidatorUpdate>,
    pub app_state_bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitChainResponse {
    pub validators: Vec<ValidatorUpdate>,
    pub app_hash: Vec<u8>,
}

pub struct TestApp {
    db: Db,
    logger: AppLogger,
    chain_id: String,
    codec: AppCodec,
    options: AppOptions,
}

impl TestApp {
    pub fn new(
        logger: AppLogger,
        db: Db,
        encoding_config: EncodingConfig,
        options: AppOptions,
        base_app_options: Vec<BaseAppOption>,
    ) -> Result<TestApp> {
        let mut chain_id = String::new();
        for option in base_app_options {
            match option {
                BaseAppOption::ChainId(id) => chain_id = id,
            }
        }

        let app = TestApp {
            db,
            logger,
            chain_id,
            codec: encoding_config.codec,
            options,
        };

        if app.options.load_latest {
            let meta = app.open_tree(META_TREE)?;
            if let Some(stored) = meta.get(CHAIN_ID_KEY)? {
                let stored = String::from_utf8(stored.to_vec())
                    .map_err(|e| GenesisError::Database(format!("Invalid chain id format: {e}")))?;
                if stored != app.chain_id {
                    return Err(GenesisError::Database(format!(
                        "store belongs to chain {stored}, not {}",
                        app.chain_id
                    )));
                }
            }
        }
        app.logger
            .log(Level::Debug, &format!("application {} created", app.chain_id));
        Ok(app)
    }

    pub fn logger(&self) -> AppLogger {
        self.logger
    }

    pub fn app_codec(&self) -> &AppCodec {
        &self.codec
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn home(&self) -> &Path {
        &self.options.home
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    /// Every module's default genesis section.
    pub fn default_genesis_state(&self) -> Result<GenesisState> {
        GenesisState::new()
            .with_section(&self.codec, auth::MODULE_NAME, &auth::GenesisState::default())?
            .with_section(&self.codec, bank::MODULE_NAME, &bank::GenesisState::default())?
            .with_section(
                &self.codec,
                staking::MODULE_NAME,
                &staking::GenesisState::default(),
            )?
            .with_section(
                &self.codec,
                inflation::MODULE_NAME,
                &inflation::GenesisState::default_genesis()?,
            )?
            .with_section(&self.codec, evm::MODULE_NAME, &evm::GenesisState::default())
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.open_tree(META_TREE)?.contains_key(INITIAL_HEIGHT_KEY)?)
    }

    /// Validates the genesis document, stores it and returns the genesis validator set.
    pub fn init_chain(&self, req: InitChainRequest) -> Result<InitChainResponse> {
        if req.chain_id != self.chain_id {
            return Err(GenesisError::InvalidGenesis(format!(
                "invalid chain-id on InitChain; expected: {}, got: {}",
                self.chain_id, req.chain_id
            )));
        }
        if self.is_initialized()? {
            return Err(GenesisError::InvalidGenesis(format!(
                "chain {} is already initialized",
                self.chain_id
            )));
        }

        let genesis = GenesisState::from_app_state_bytes(&req.app_state_bytes)?;
        let defaults = self.default_genesis_state()?;

        let auth_genesis: auth::GenesisState =
            self.module_section(&genesis, &defaults, auth::MODULE_NAME)?;
        let bank_genesis: bank::GenesisState =
            self.module_section(&genesis, &defaults, bank::MODULE_NAME)?;
        let staking_genesis: staking::GenesisState =
            self.module_section(&genesis, &defaults, staking::MODULE_NAME)?;
        let inflation_genesis: inflation::GenesisState =
            self.module_section(&genesis, &defaults, inflation::MODULE_NAME)?;
        let evm_genesis: evm::GenesisState =
            self.module_section(&genesis, &defaults, evm::MODULE_NAME)?;

        for account in &auth_genesis.accounts {
            self.codec.unpack_any::<BaseAccount>(account)?;
        }
        auth_genesis.validate()?;
        bank_genesis.validate()?;
        for validator in &staking_genesis.validators {
            self.codec
                .interface_registry()
                .ensure_registered(&validator.consensus_pubkey)?;
        }
        staking_genesis.validate()?;
        check_bonded_pools(&staking_genesis, &bank_genesis)?;
        inflation_genesis.validate()?;
        evm_genesis.validate()?;

        let validators = genesis_validator_updates(&staking_genesis)?;
        if !req.validators.is_empty() {
            check_validators_match(&req.validators, &validators)?;
        }

        let app_hash = sha256_digest(&req.app_state_bytes);
        self.persist(&genesis, &validators, &req, &app_hash)?;

        self.logger.log(
            Level::Info,
            &format!(
                "initialized chain {} with {} validators",
                self.chain_id,
                validators.len()
            ),
        );
        info!(
            "InitChain {}: {} modules, {} validators, {} accounts",
            self.chain_id,
            genesis.len(),
            validators.len(),
            auth_genesis.accounts.len()
        );

        Ok(InitChainResponse {
            validators,
            app_hash,
        })
    }

    /// Genesis sections as stored by `init_chain`.
    pub fn exported_genesis(&self) -> Result<GenesisState> {
        let tree = self.open_tree(GENESIS_TREE)?;
        let mut genesis = GenesisState::new();
        for entry in tree.iter() {
            let (module, bytes) = entry?;
            let module = String::from_utf8(module.to_vec())
                .map_err(|e| GenesisError::Database(format!("Invalid module name: {e}")))?;
            genesis = genesis.with_raw_section(&module, bytes.to_vec());
        }
        Ok(genesis)
    }

    /// Validator set recorded at genesis, in the order it was returned.
    pub fn validator_updates(&self) -> Result<Vec<ValidatorUpdate>> {
        let tree = self.open_tree(VALIDATORS_TREE)?;
        tree.iter()
            .values()
            .map(|value| deserialize(&value?))
            .collect()
    }

    pub fn app_hash(&self) -> Result<Option<Vec<u8>>> {
        Ok(self
            .open_tree(META_TREE)?
            .get(APP_HASH_KEY)?
            .map(|hash| hash.to_vec()))
    }

    fn module_section<T: serde::de::DeserializeOwned>(
        &self,
        genesis: &GenesisState,
        defaults: &GenesisState,
        module: &str,
    ) -> Result<T> {
        let section = match genesis.section(&self.codec, module)? {
            Some(section) => section,
            None => {
                debug!("no {module} section in genesis, using module defaults");
                defaults.section(&self.codec, module)?.ok_or_else(|| {
                    GenesisError::InvalidGenesis(format!("no default genesis for {module}"))
                })?
            }
        };
        Ok(section)
    }

    fn persist(
        &self,
        genesis: &GenesisState,
        validators: &[ValidatorUpdate],
        req: &InitChainRequest,
        app_hash: &[u8],
    ) -> Result<()> {
        let encoded_validators = validators
            .iter()
            .map(serialize)
            .collect::<Result<Vec<_>>>()?;

        let genesis_tree = self.open_tree(GENESIS_TREE)?;
        let validators_tree = self.open_tree(VALIDATORS_TREE)?;
        let meta = self.open_tree(META_TREE)?;

        (&genesis_tree, &validators_tree, &meta)
            .transaction(|(genesis_tx, validators_tx, meta_tx)| {
                for (module, bytes) in genesis.iter() {
                    genesis_tx.insert(module, bytes)?;
                }
                for (index, update) in encoded_validators.iter().enumerate() {
                    let key = (index as u32).to_be_bytes();
                    validators_tx.insert(&key[..], update.as_slice())?;
                }
                meta_tx.insert(CHAIN_ID_KEY, self.chain_id.as_bytes())?;
                meta_tx.insert(APP_HASH_KEY, app_hash)?;
                meta_tx.insert(INITIAL_HEIGHT_KEY, &req.initial_height.to_be_bytes()[..])?;
                Ok(())
            })
            .map_err(|e: sled::transaction::TransactionError| {
                GenesisError::Database(format!("Failed to store genesis: {e}"))
            })?;

        Ok(())
    }

    fn open_tree(&self, name: &str) -> Result<Tree> {
        self.db
            .open_tree(name)
            .map_err(|e| GenesisError::Database(format!("Failed to open {name} tree: {e}")))
    }
}

/// Pool module accounts must hold exactly the tokens of the validators in them,
/// in the bond denomination and nothing else.
fn check_bonded_pools(
    staking_genesis: &staking::GenesisState,
    bank_genesis: &bank::GenesisState,
) -> Result<()> {
    let bond_denom = &staking_genesis.params.bond_denom;

    let bonded_coins = Coins::from(Coin::new(bond_denom, staking_genesis.bonded_tokens())?);
    let bonded_balance = bank_genesis.balance_of(&module_address(staking::BONDED_POOL_NAME));
    if bonded_balance != bonded_coins {
        return Err(GenesisError::InvalidGenesis(format!(
            "bonded pool balance is different from bonded coins: {bonded_balance} (balance) vs {bonded_coins} (bonded coins)"
        )));
    }

    let not_bonded_tokens = staking_genesis
        .validators
        .iter()
        .filter(|v| !v.is_bonded())
        .fold(Int::zero(), |total, v| &total + &v.tokens);
    let not_bonded_coins = Coins::from(Coin::new(bond_denom, not_bonded_tokens)?);
    let not_bonded_balance =
        bank_genesis.balance_of(&module_address(staking::NOT_BONDED_POOL_NAME));
    if not_bonded_balance != not_bonded_coins {
        return Err(GenesisError::InvalidGenesis(format!(
            "not bonded pool balance is different from not bonded coins: {not_bonded_balance} (balance) vs {not_bonded_coins} (not bonded coins)"
        )));
    }
    Ok(())
}

fn genesis_validator_updates(
    staking_genesis: &staking::GenesisState,
) -> Result<Vec<ValidatorUpdate>> {
    let mut updates = Vec::new();
    for validator in &staking_genesis.validators {
        let power = validator.consensus_power(&POWER_REDUCTION)?;
        if power > 0 {
            updates.push(ValidatorUpdate {
                pub_key: validator.consensus_pub_key()?,
                power,
            });
        }
    }
    Ok(updates)
}

fn check_validators_match(
    requested: &[ValidatorUpdate],
    computed: &[ValidatorUpdate],
) -> Result<()> {
    let mut requested = requested.to_vec();
    let mut computed = computed.to_vec();
    requested.sort_by(|a, b| a.pub_key.bytes().cmp(b.pub_key.bytes()));
    computed.sort_by(|a, b| a.pub_key.bytes().cmp(b.pub_key.bytes()));
    if requested != computed {
        return Err(GenesisError::InvalidGenesis(format!(
            "genesis validator set mismatch: {} requested, {} from staking genesis",
            requested.len(),
            computed.len()
        )));
    }
    Ok(())
}

/// Fresh application over a temporary in-memory store, with its own log
/// lines dropped.
pub fn create_test_app(chain_id: &str) -> Result<TestApp> {
    create_test_app_with_logger(chain_id, AppLogger::Nop)
}

pub fn create_test_app_with_logger(chain_id: &str, logger: AppLogger) -> Result<TestApp> {
    let db = sled::Config::new()
        .temporary(true)
        .open()
        .map_err(|e| GenesisError::Database(format!("Failed to open database: {e}")))?;
    let app = TestApp::new(
        logger,
        db,
        EncodingConfig::make(),
        AppOptions::default(),
        vec![BaseAppOption::ChainId(chain_id.to_string())],
    )?;
    info!("Created test application for chain {chain_id}");
    Ok(app)
}
