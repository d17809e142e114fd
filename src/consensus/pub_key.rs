//! Consensus-engine public keys and addresses

use crate::error::{GenesisError, Result};
use crate::types::any::{base64_bytes, Ed25519PubKey, SdkPubKey, Secp256k1PubKey};
use crate::utils::{address_hash, ripemd160_digest, sha256_digest};
use data_encoding::HEXUPPER;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ED25519_PUB_KEY_SIZE: usize = 32;
pub const SECP256K1_PUB_KEY_SIZE: usize = 33;

/// Validator address: 20 bytes, printed as upper-case hex.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, bincode::Encode,
    bincode::Decode,
)]
pub struct Address(Vec<u8>);

impl Address {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&HEXUPPER.encode(&self.0))
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
#[serde(tag = "type", content = "value")]
pub enum PubKey {
    #[serde(rename = "tendermint/PubKeyEd25519")]
    Ed25519(#[serde(with = "base64_bytes")] Vec<u8>),
    #[serde(rename = "tendermint/PubKeySecp256k1")]
    Secp256k1(#[serde(with = "base64_bytes")] Vec<u8>),
    #[serde(rename = "cometbft/PubKeyBls12_381")]
    Bls12381(#[serde(with = "base64_bytes")] Vec<u8>),
}

impl PubKey {
    pub fn bytes(&self) -> &[u8] {
        match self {
            PubKey::Ed25519(key) | PubKey::Secp256k1(key) | PubKey::Bls12381(key) => key,
        }
    }

    pub fn key_type(&self) -> &'static str {
        match self {
            PubKey::Ed25519(_) => "ed25519",
            PubKey::Secp256k1(_) => "secp256k1",
            PubKey::Bls12381(_) => "bls12_381",
        }
    }

    pub fn address(&self) -> Address {
        match self {
            PubKey::Secp256k1(key) => Address(ripemd160_digest(&sha256_digest(key))),
            PubKey::Ed25519(key) | PubKey::Bls12381(key) => Address(address_hash(key)),
        }
    }

    /// Converts into the SDK key type carried by staking validators.
    pub fn to_sdk_pub_key(&self) -> Result<SdkPubKey> {
        match self {
            PubKey::Ed25519(key) => {
                expect_len(self, key, ED25519_PUB_KEY_SIZE)?;
                Ok(SdkPubKey::Ed25519(Ed25519PubKey { key: key.clone() }))
            }
            PubKey::Secp256k1(key) => {
                expect_len(self, key, SECP256K1_PUB_KEY_SIZE)?;
                Ok(SdkPubKey::Secp256k1(Secp256k1PubKey { key: key.clone() }))
            }
            PubKey::Bls12381(_) => Err(GenesisError::PubKeyConversion(format!(
                "cryptoproto: unsupported key type: {}",
                self.key_type()
            ))),
        }
    }

    pub fn from_sdk_pub_key(pk: &SdkPubKey) -> PubKey {
        match pk {
            SdkPubKey::Ed25519(pk) => PubKey::Ed25519(pk.key.clone()),
            SdkPubKey::Secp256k1(pk) => PubKey::Secp256k1(pk.key.clone()),
        }
    }
}

fn expect_len(pub_key: &PubKey, key: &[u8], expected: usize) -> Result<()> {
    if key.len() != expected {
        return Err(GenesisError::PubKeyConversion(format!(
            "invalid {} public key size: expected {expected}, got {}",
            pub_key.key_type(),
            key.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ed25519_address_is_truncated_sha256() {
        let pub_key = PubKey::Ed25519(vec![1u8; ED25519_PUB_KEY_SIZE]);
        let address = pub_key.address();
        assert_eq!(address.as_bytes(), &sha256_digest(&[1u8; 32])[..20]);
        assert_eq!(address.to_string(), HEXUPPER.encode(address.as_bytes()));
    }

    #[test]
    fn test_secp256k1_address_uses_ripemd() {
        let pub_key = PubKey::Secp256k1(vec![2u8; SECP256K1_PUB_KEY_SIZE]);
        assert_eq!(pub_key.address().as_bytes().len(), 20);
        assert_eq!(
            pub_key.address().as_bytes(),
            ripemd160_digest(&sha256_digest(&[2u8; 33])).as_slice()
        );
    }

    #[test]
    fn test_sdk_conversion() {
        let ed = PubKey::Ed25519(vec![3u8; ED25519_PUB_KEY_SIZE]);
        let sdk = ed.to_sdk_pub_key().unwrap();
        assert_eq!(PubKey::from_sdk_pub_key(&sdk), ed);
    }

    #[test]
    fn test_sdk_conversion_failures() {
        let bls = PubKey::Bls12381(vec![0u8; 48]);
        assert!(matches!(
            bls.to_sdk_pub_key(),
            Err(GenesisError::PubKeyConversion(_))
        ));

        let short = PubKey::Ed25519(vec![0u8; 31]);
        assert!(matches!(
            short.to_sdk_pub_key(),
            Err(GenesisError::PubKeyConversion(_))
        ));
    }

    #[test]
    fn test_json_layout() {
        let pub_key = PubKey::Ed25519(vec![0u8; ED25519_PUB_KEY_SIZE]);
        let json = serde_json::to_value(&pub_key).unwrap();
        assert_eq!(json["type"], "tendermint/PubKeyEd25519");
        assert!(json["value"].is_string());
    }
}
