//! Bech32 account and validator operator addresses

use crate::error::{GenesisError, Result};
use crate::utils::{address_hash, ADDRESS_LEN};
use bech32::{FromBase32, ToBase32, Variant};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const BECH32_PREFIX_ACC_ADDR: &str = "evmos";
pub const BECH32_PREFIX_VAL_ADDR: &str = "evmosvaloper";

fn encode_bech32(hrp: &str, bytes: &[u8]) -> Result<String> {
    bech32::encode(hrp, bytes.to_base32(), Variant::Bech32)
        .map_err(|e| GenesisError::InvalidAddress(format!("bech32 encoding failed: {e}")))
}

fn decode_bech32(expected_hrp: &str, address: &str) -> Result<Vec<u8>> {
    let (hrp, data, _variant) = bech32::decode(address)
        .map_err(|e| GenesisError::InvalidAddress(format!("{address}: {e}")))?;
    if hrp != expected_hrp {
        return Err(GenesisError::InvalidAddress(format!(
            "{address}: expected prefix {expected_hrp}, got {hrp}"
        )));
    }
    let bytes = Vec::<u8>::from_base32(&data)
        .map_err(|e| GenesisError::InvalidAddress(format!("{address}: {e}")))?;
    if bytes.is_empty() || bytes.len() > 255 {
        return Err(GenesisError::InvalidAddress(format!(
            "{address}: invalid address length {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

macro_rules! bech32_address {
    ($(#[$meta:meta])* $name:ident, $hrp:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Vec<u8>);

        impl $name {
            pub fn from_bytes(bytes: &[u8]) -> $name {
                $name(bytes.to_vec())
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_slice()
            }

            pub fn to_bech32(&self) -> Result<String> {
                encode_bech32($hrp, &self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let encoded = self.to_bech32().map_err(|_| fmt::Error)?;
                f.write_str(&encoded)
            }
        }

        impl FromStr for $name {
            type Err = GenesisError;

            fn from_str(s: &str) -> Result<Self> {
                decode_bech32($hrp, s).map($name)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let encoded = self.to_bech32().map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&encoded)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    };
}

bech32_address!(
    /// Account address, `evmos1...`
    AccAddress,
    BECH32_PREFIX_ACC_ADDR
);

bech32_address!(
    /// Validator operator address, `evmosvaloper1...`
    ValAddress,
    BECH32_PREFIX_VAL_ADDR
);

impl AccAddress {
    /// Fresh random 20-byte account address.
    pub fn random() -> AccAddress {
        AccAddress(crate::utils::random_bytes(ADDRESS_LEN))
    }
}

/// Address of the module account called `name`.
pub fn module_address(name: &str) -> AccAddress {
    AccAddress(address_hash(name.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acc_address_bech32_roundtrip() {
        let address = AccAddress::from_bytes(&[7u8; ADDRESS_LEN]);
        let encoded = address.to_string();
        assert!(encoded.starts_with("evmos1"));
        assert_eq!(encoded.parse::<AccAddress>().unwrap(), address);
    }

    #[test]
    fn test_prefix_mismatch_rejected() {
        let operator = ValAddress::from_bytes(&[1u8; ADDRESS_LEN]).to_string();
        assert!(operator.starts_with("evmosvaloper1"));
        assert!(operator.parse::<AccAddress>().is_err());
        assert!("not-an-address".parse::<AccAddress>().is_err());
    }

    #[test]
    fn test_module_address_is_deterministic() {
        let bonded = module_address("bonded_tokens_pool");
        assert_eq!(bonded, module_address("bonded_tokens_pool"));
        assert_ne!(bonded, module_address("not_bonded_tokens_pool"));
        assert_eq!(bonded.as_bytes().len(), ADDRESS_LEN);
    }

    #[test]
    fn test_random_addresses_differ() {
        assert_ne!(AccAddress::random(), AccAddress::random());
    }

    #[test]
    fn test_serde_uses_bech32() {
        let address = AccAddress::from_bytes(&[9u8; ADDRESS_LEN]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{address}\""));
        let parsed: AccAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, address);
    }
}
