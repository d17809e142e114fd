use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "testnet-genesis")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "genesis",
        about = "Build and initialise a test network, then print its genesis document"
    )]
    Genesis {
        #[arg(long = "config", help = "TOML file describing the network")]
        config: Option<PathBuf>,
        #[arg(long = "validators", help = "Number of genesis validators")]
        validators: Option<usize>,
        #[arg(long = "accounts", help = "Number of random pre-funded accounts")]
        accounts: Option<usize>,
        #[arg(long = "chain-id", help = "Chain identifier, e.g. evmos_9000-1")]
        chain_id: Option<String>,
    },
    #[command(name = "validators", about = "Generate and print a validator set")]
    Validators {
        #[arg(long = "count", default_value_t = 1, help = "Number of validators")]
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genesis_flags() {
        let opt = Opt::try_parse_from([
            "testnet-genesis",
            "genesis",
            "--validators",
            "4",
            "--chain-id",
            "evmos_9001-1",
        ])
        .unwrap();
        match opt.command {
            Command::Genesis {
                config,
                validators,
                accounts,
                chain_id,
            } => {
                assert!(config.is_none());
                assert_eq!(validators, Some(4));
                assert!(accounts.is_none());
                assert_eq!(chain_id.as_deref(), Some("evmos_9001-1"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_validators_count_defaults_to_one() {
        let opt = Opt::try_parse_from(["testnet-genesis", "validators"]).unwrap();
        assert!(matches!(opt.command, Command::Validators { count: 1 }));
    }
}
