use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

pub const DEFAULT_CHAIN_ID: &str = "evmos_9000-1";
const DEFAULT_NODE_HOME_DIR: &str = ".evmosd";

const CHAIN_ID_KEY: &str = "CHAIN_ID";
const NODE_HOME_KEY: &str = "NODE_HOME";

const CHAIN_ID_ENV: &str = "TESTNET_CHAIN_ID";
const NODE_HOME_ENV: &str = "TESTNET_NODE_HOME";

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let mut map = HashMap::new();

        let chain_id = env::var(CHAIN_ID_ENV).unwrap_or_else(|_| DEFAULT_CHAIN_ID.to_string());
        map.insert(String::from(CHAIN_ID_KEY), chain_id);

        let node_home = env::var(NODE_HOME_ENV).unwrap_or_else(|_| default_node_home());
        map.insert(String::from(NODE_HOME_KEY), node_home);

        Config {
            inner: RwLock::new(map),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.insert(String::from(key), value);
    }

    pub fn get_chain_id(&self) -> String {
        self.get(CHAIN_ID_KEY)
            .unwrap_or_else(|| DEFAULT_CHAIN_ID.to_string())
    }

    pub fn set_chain_id(&self, chain_id: String) {
        self.set(CHAIN_ID_KEY, chain_id);
    }

    /// Home directory handed to the application; nothing is written there.
    pub fn get_node_home(&self) -> PathBuf {
        PathBuf::from(self.get(NODE_HOME_KEY).unwrap_or_else(default_node_home))
    }

    pub fn set_node_home(&self, home: String) {
        self.set(NODE_HOME_KEY, home);
    }
}

// $HOME/.evmosd, falling back to the working directory when HOME is unset
fn default_node_home() -> String {
    let base = env::var("HOME")
        .map(PathBuf::from)
        .or_else(|_| env::current_dir())
        .unwrap_or_default();
    base.join(DEFAULT_NODE_HOME_DIR)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_override_defaults() {
        let config = Config::new();
        config.set_chain_id("evmos_9001-2".to_string());
        assert_eq!(config.get_chain_id(), "evmos_9001-2");

        config.set_node_home("/tmp/evmos-home".to_string());
        assert_eq!(config.get_node_home(), PathBuf::from("/tmp/evmos-home"));
    }

    #[test]
    fn test_node_home_is_populated() {
        let config = Config::new();
        assert!(!config.get_node_home().as_os_str().is_empty());
    }
}
