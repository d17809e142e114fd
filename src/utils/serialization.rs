// Binary encoding for records kept in the application store
use crate::error::{GenesisError, Result};

/// Serialize data using bincode 2.0 with standard configuration
pub fn serialize<T: bincode::Encode>(data: &T) -> Result<Vec<u8>> {
    let config = bincode::config::standard();
    bincode::encode_to_vec(data, config)
        .map_err(|e| GenesisError::Serialization(format!("Serialization failed: {e}")))
}

/// Deserialize data using bincode 2.0 with standard configuration
pub fn deserialize<T: bincode::Decode<()>>(bytes: &[u8]) -> Result<T> {
    let config = bincode::config::standard();
    let (data, _) = bincode::decode_from_slice(bytes, config)
        .map_err(|e| GenesisError::Serialization(format!("Deserialization failed: {e}")))?;
    Ok(data)
}

/// Proto3 JSON renders 64-bit integers as strings.
pub mod string_u64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

pub mod string_i64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, bincode::Encode, bincode::Decode)]
    struct StoredRecord {
        id: u64,
        name: String,
        values: Vec<i32>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counters {
        #[serde(with = "string_u64")]
        sequence: u64,
        #[serde(with = "string_i64")]
        height: i64,
    }

    #[test]
    fn test_serialize_deserialize() {
        let original = StoredRecord {
            id: 42,
            name: "test".to_string(),
            values: vec![1, 2, 3, 4, 5],
        };

        let serialized = serialize(&original).expect("Serialization should work");
        let deserialized: StoredRecord =
            deserialize(&serialized).expect("Deserialization should work");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_deserialize_invalid_data() {
        let invalid_bytes = vec![0xFF, 0xFF, 0xFF, 0xFF];
        let result: Result<StoredRecord> = deserialize(&invalid_bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_integers_render_as_strings() {
        let json = serde_json::to_string(&Counters {
            sequence: 7,
            height: -1,
        })
        .unwrap();
        assert_eq!(json, r#"{"sequence":"7","height":"-1"}"#);

        let parsed: Counters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sequence, 7);
        assert!(serde_json::from_str::<Counters>(r#"{"sequence":"x","height":"0"}"#).is_err());
    }
}
