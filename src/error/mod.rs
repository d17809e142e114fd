//! Error handling for the testnet genesis builder
//!
//! Every fallible step of the setup pipeline returns [`GenesisError`]. Callers are
//! expected to abort the test setup on the first error.

use std::fmt;

/// Result type alias for genesis setup operations
pub type Result<T> = std::result::Result<T, GenesisError>;

/// Error types for genesis construction and application bootstrap
#[derive(Debug, Clone, PartialEq)]
pub enum GenesisError {
    /// Key generation, signing or digest failures
    Crypto(String),
    /// A consensus public key could not be converted into an SDK public key
    PubKeyConversion(String),
    /// A custom genesis override has the wrong type for the module it is registered under
    InvalidCustomGenesis { module: String, found: String },
    /// A genesis document violates an invariant checked at chain initialization
    InvalidGenesis(String),
    /// Malformed coin, denomination or amount
    InvalidCoin(String),
    /// Malformed decimal or integer literal
    InvalidNumber(String),
    /// Malformed bech32 or hex address
    InvalidAddress(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// In-memory store errors
    Database(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for GenesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenesisError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            GenesisError::PubKeyConversion(msg) => {
                write!(f, "Public key conversion error: {msg}")
            }
            GenesisError::InvalidCustomGenesis { module, found } => {
                write!(f, "invalid type {found} for {module} genesis state")
            }
            GenesisError::InvalidGenesis(msg) => write!(f, "Invalid genesis: {msg}"),
            GenesisError::InvalidCoin(msg) => write!(f, "Invalid coin: {msg}"),
            GenesisError::InvalidNumber(msg) => write!(f, "Invalid number: {msg}"),
            GenesisError::InvalidAddress(addr) => write!(f, "Invalid address: {addr}"),
            GenesisError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            GenesisError::Database(msg) => write!(f, "Database error: {msg}"),
            GenesisError::Config(msg) => write!(f, "Configuration error: {msg}"),
            GenesisError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for GenesisError {}

impl From<std::io::Error> for GenesisError {
    fn from(err: std::io::Error) -> Self {
        GenesisError::Io(err.to_string())
    }
}

impl From<sled::Error> for GenesisError {
    fn from(err: sled::Error) -> Self {
        GenesisError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for GenesisError {
    fn from(err: serde_json::Error) -> Self {
        GenesisError::Serialization(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for GenesisError {
    fn from(err: bincode::error::EncodeError) -> Self {
        GenesisError::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for GenesisError {
    fn from(err: bincode::error::DecodeError) -> Self {
        GenesisError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for GenesisError {
    fn from(err: toml::de::Error) -> Self {
        GenesisError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_genesis_error_message() {
        let err = GenesisError::InvalidCustomGenesis {
            module: "inflation".to_string(),
            found: "evm".to_string(),
        };
        assert_eq!(err.to_string(), "invalid type evm for inflation genesis state");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GenesisError = io.into();
        assert!(matches!(err, GenesisError::Io(_)));
    }
}
