//! Genesis sections of the application modules
//!
//! Each submodule mirrors one module's genesis message: its params, its
//! defaults and the validation the module runs before accepting the section.

pub mod auth;
pub mod bank;
pub mod evm;
pub mod inflation;
pub mod staking;

use std::collections::HashMap;

/// A typed genesis section supplied by a test to override a module's default.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleGenesis {
    Auth(auth::GenesisState),
    Bank(bank::GenesisState),
    Staking(staking::GenesisState),
    Inflation(inflation::GenesisState),
    Evm(evm::GenesisState),
}

impl ModuleGenesis {
    /// Name of the carried genesis type, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            ModuleGenesis::Auth(_) => "auth::GenesisState",
            ModuleGenesis::Bank(_) => "bank::GenesisState",
            ModuleGenesis::Staking(_) => "staking::GenesisState",
            ModuleGenesis::Inflation(_) => "inflation::GenesisState",
            ModuleGenesis::Evm(_) => "evm::GenesisState",
        }
    }

    /// Name of the module this section belongs to.
    pub fn module_name(&self) -> &'static str {
        match self {
            ModuleGenesis::Auth(_) => auth::MODULE_NAME,
            ModuleGenesis::Bank(_) => bank::MODULE_NAME,
            ModuleGenesis::Staking(_) => staking::MODULE_NAME,
            ModuleGenesis::Inflation(_) => inflation::MODULE_NAME,
            ModuleGenesis::Evm(_) => evm::MODULE_NAME,
        }
    }
}

/// Module name to override. Entries for modules without a composer are ignored.
pub type CustomGenesisState = HashMap<String, ModuleGenesis>;
