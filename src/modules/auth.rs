//! Auth module genesis: account records

use crate::error::{GenesisError, Result};
use crate::types::{AccAddress, Any, ProtoMessage};
use crate::utils::serialization::string_u64;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MODULE_NAME: &str = "auth";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(with = "string_u64")]
    pub max_memo_characters: u64,
    #[serde(with = "string_u64")]
    pub tx_sig_limit: u64,
    #[serde(with = "string_u64")]
    pub tx_size_cost_per_byte: u64,
    #[serde(with = "string_u64")]
    pub sig_verify_cost_ed25519: u64,
    #[serde(with = "string_u64")]
    pub sig_verify_cost_secp256k1: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_memo_characters: 256,
            tx_sig_limit: 7,
            tx_size_cost_per_byte: 10,
            sig_verify_cost_ed25519: 590,
            sig_verify_cost_secp256k1: 1000,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max memo characters", self.max_memo_characters),
            ("tx sig limit", self.tx_sig_limit),
            ("tx size cost per byte", self.tx_size_cost_per_byte),
            ("ed25519 verification cost", self.sig_verify_cost_ed25519),
            ("secp256k1 verification cost", self.sig_verify_cost_secp256k1),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(GenesisError::InvalidGenesis(format!(
                "invalid {name}: must be positive"
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: AccAddress,
    pub pub_key: Option<Any>,
    #[serde(with = "string_u64")]
    pub account_number: u64,
    #[serde(with = "string_u64")]
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(address: AccAddress, pub_key: Option<Any>, account_number: u64, sequence: u64) -> Self {
        Self {
            address,
            pub_key,
            account_number,
            sequence,
        }
    }
}

impl ProtoMessage for BaseAccount {
    const TYPE_URL: &'static str = "/cosmos.auth.v1beta1.BaseAccount";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    pub accounts: Vec<Any>,
}

impl GenesisState {
    /// Packs each account into an `Any` envelope.
    pub fn new(params: Params, accounts: &[BaseAccount]) -> Result<GenesisState> {
        let accounts = accounts
            .iter()
            .map(Any::new_with_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(GenesisState { params, accounts })
    }

    pub fn base_accounts(&self) -> Result<Vec<BaseAccount>> {
        self.accounts.iter().map(Any::unpack).collect()
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;

        let mut seen = HashSet::new();
        for account in self.base_accounts()? {
            if !seen.insert(account.address.clone()) {
                return Err(GenesisError::InvalidGenesis(format!(
                    "duplicate account found in genesis state; address: {}",
                    account.address
                )));
            }
        }
        Ok(())
    }
}
