//! Self-describing `Any` envelope and the SDK public key messages packed into it

use crate::error::{GenesisError, Result};
use data_encoding::BASE64;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message that can travel inside an [`Any`].
pub trait ProtoMessage: Serialize + DeserializeOwned {
    const TYPE_URL: &'static str;
}

/// JSON form of a packed message: the type URL under `@type`, the message fields inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Any {
    #[serde(rename = "@type")]
    pub type_url: String,
    #[serde(flatten)]
    pub value: Map<String, Value>,
}

impl Any {
    pub fn new_with_value<T: ProtoMessage>(message: &T) -> Result<Any> {
        match serde_json::to_value(message)? {
            Value::Object(value) => Ok(Any {
                type_url: T::TYPE_URL.to_string(),
                value,
            }),
            other => Err(GenesisError::Serialization(format!(
                "{} must encode to a JSON object, got {other}",
                T::TYPE_URL
            ))),
        }
    }

    pub fn unpack<T: ProtoMessage>(&self) -> Result<T> {
        if self.type_url != T::TYPE_URL {
            return Err(GenesisError::Serialization(format!(
                "cannot unpack {} into {}",
                self.type_url,
                T::TYPE_URL
            )));
        }
        Ok(serde_json::from_value(Value::Object(self.value.clone()))?)
    }
}

/// Byte strings inside SDK messages are base64 encoded.
pub mod base64_bytes {
    use data_encoding::BASE64;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BASE64.decode(raw.as_bytes()).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519PubKey {
    #[serde(with = "base64_bytes")]
    pub key: Vec<u8>,
}

impl ProtoMessage for Ed25519PubKey {
    const TYPE_URL: &'static str = "/cosmos.crypto.ed25519.PubKey";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secp256k1PubKey {
    #[serde(with = "base64_bytes")]
    pub key: Vec<u8>,
}

impl ProtoMessage for Secp256k1PubKey {
    const TYPE_URL: &'static str = "/cosmos.crypto.secp256k1.PubKey";
}

/// Public key types the SDK accepts as validator consensus keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkPubKey {
    Ed25519(Ed25519PubKey),
    Secp256k1(Secp256k1PubKey),
}

impl SdkPubKey {
    pub fn to_any(&self) -> Result<Any> {
        match self {
            SdkPubKey::Ed25519(pk) => Any::new_with_value(pk),
            SdkPubKey::Secp256k1(pk) => Any::new_with_value(pk),
        }
    }

    pub fn from_any(any: &Any) -> Result<SdkPubKey> {
        if any.type_url == Ed25519PubKey::TYPE_URL {
            any.unpack().map(SdkPubKey::Ed25519)
        } else if any.type_url == Secp256k1PubKey::TYPE_URL {
            any.unpack().map(SdkPubKey::Secp256k1)
        } else {
            Err(GenesisError::PubKeyConversion(format!(
                "unsupported public key type {}",
                any.type_url
            )))
        }
    }
}

/// Renders raw bytes the way packed messages carry them.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_json_layout() {
        let any = Any::new_with_value(&Ed25519PubKey { key: vec![1, 2, 3] }).unwrap();
        let json = serde_json::to_value(&any).unwrap();
        assert_eq!(json["@type"], "/cosmos.crypto.ed25519.PubKey");
        assert_eq!(json["key"], encode_base64(&[1, 2, 3]));
    }

    #[test]
    fn test_unpack_checks_type_url() {
        let any = Any::new_with_value(&Ed25519PubKey { key: vec![4; 32] }).unwrap();
        let unpacked: Ed25519PubKey = any.unpack().unwrap();
        assert_eq!(unpacked.key, vec![4; 32]);
        assert!(any.unpack::<Secp256k1PubKey>().is_err());
    }

    #[test]
    fn test_sdk_pub_key_from_any() {
        let pk = SdkPubKey::Secp256k1(Secp256k1PubKey { key: vec![2; 33] });
        let any = pk.to_any().unwrap();
        assert_eq!(SdkPubKey::from_any(&any).unwrap(), pk);

        let unknown = Any {
            type_url: "/cosmos.crypto.bls12_381.PubKey".to_string(),
            value: Map::new(),
        };
        assert!(matches!(
            SdkPubKey::from_any(&unknown),
            Err(GenesisError::PubKeyConversion(_))
        ));
    }
}
