//! Integration network tests
//!
//! Builds complete networks from configuration and checks what the
//! application was initialised with.

use std::io::Write;
use tempfile::NamedTempFile;
use testnet_genesis::modules::{auth, evm, inflation, ModuleGenesis};
use testnet_genesis::{AccAddress, GenesisError, IntegrationNetwork, NetworkConfig, PrivValidator};

#[test]
fn test_network_from_toml_file() {
    let funded = AccAddress::random();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
chain_id = "evmos_9002-1"
amount_of_validators = 4
pre_funded_accounts = ["{funded}"]
initial_balance = "5000000000000000000000"
"#
    )
    .unwrap();

    let cfg = NetworkConfig::from_file(file.path()).unwrap();
    let network = IntegrationNetwork::new(cfg).unwrap();

    assert_eq!(network.chain_id(), "evmos_9002-1");
    assert_eq!(network.validators().size(), 4);
    assert_eq!(network.validators().total_voting_power(), 4);

    let auth_genesis: auth::GenesisState = network
        .genesis()
        .section(network.app().app_codec(), auth::MODULE_NAME)
        .unwrap()
        .unwrap();
    let accounts = auth_genesis.base_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].address, funded);
}

#[test]
fn test_missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = NetworkConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, GenesisError::Config(_)));
}

#[test]
fn test_signers_match_validator_set() {
    let network = IntegrationNetwork::new(NetworkConfig::default()).unwrap();
    assert_eq!(network.signers().len(), network.validators().size());
    for (address, signer) in network.signers() {
        let validator = network.validators().get_by_address(address).unwrap();
        assert_eq!(signer.pub_key().unwrap(), validator.pub_key);
        assert_eq!(signer.sign(b"vote").unwrap().len(), 64);
    }
}

#[test]
fn test_custom_inflation_override_is_used() {
    let custom = inflation::GenesisState::new(
        inflation::Params::default_params().unwrap(),
        2,
        inflation::WEEK_EPOCH_ID,
        52,
        3,
    );
    let cfg = NetworkConfig::default().with_custom_genesis(ModuleGenesis::Inflation(custom.clone()));
    let network = IntegrationNetwork::new(cfg).unwrap();

    let stored: inflation::GenesisState = network
        .app()
        .exported_genesis()
        .unwrap()
        .section(network.app().app_codec(), inflation::MODULE_NAME)
        .unwrap()
        .unwrap();
    assert_eq!(stored, custom);
}

#[test]
fn test_mismatched_override_fails_network_setup() {
    let mut cfg = NetworkConfig::default();
    cfg.custom_genesis_state.insert(
        evm::MODULE_NAME.to_string(),
        ModuleGenesis::Inflation(inflation::GenesisState::default_genesis().unwrap()),
    );

    match IntegrationNetwork::new(cfg) {
        Err(GenesisError::InvalidCustomGenesis { module, found }) => {
            assert_eq!(module, "evm");
            assert_eq!(found, "inflation::GenesisState");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("network setup should fail"),
    }
}
