// Entry point of the testnet-genesis binary: builds an in-memory network and
// prints what it was initialised with. Nothing is written to disk.
use clap::Parser;
use data_encoding::HEXUPPER;
use log::{error, LevelFilter};
use serde_json::json;
use std::process;
use testnet_genesis::testnet::create_validator_set_and_signers;
use testnet_genesis::testnet::network::INITIAL_HEIGHT;
use testnet_genesis::{Command, IntegrationNetwork, NetworkConfig, Opt};

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Genesis {
            config,
            validators,
            accounts,
            chain_id,
        } => {
            let mut cfg = match config {
                Some(path) => NetworkConfig::from_file(path)?,
                None => NetworkConfig::default(),
            };
            if let Some(count) = validators {
                cfg = cfg.with_amount_of_validators(count);
            }
            if let Some(count) = accounts {
                cfg = cfg.with_random_accounts(count);
            }
            if let Some(id) = chain_id {
                cfg = cfg.with_chain_id(&id);
            }

            let network = IntegrationNetwork::new(cfg)?;
            let response = network.init_response();
            let document = json!({
                "chain_id": network.chain_id(),
                "initial_height": INITIAL_HEIGHT.to_string(),
                "app_hash": HEXUPPER.encode(&response.app_hash),
                "validators": response.validators,
                "app_state": network.genesis().to_app_state()?,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Command::Validators { count } => {
            let (validators, _signers) = create_validator_set_and_signers(count)?;
            println!("{}", serde_json::to_string_pretty(&validators)?);
        }
    }
    Ok(())
}
