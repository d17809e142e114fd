//! Consensus-side identities
//!
//! Validator public keys, the genesis validator set and the private signers
//! that stand in for validator nodes in tests.

pub mod priv_validator;
pub mod pub_key;
pub mod validator;

pub use priv_validator::{MockPV, PrivValidator, Signers};
pub use pub_key::{Address, PubKey};
pub use validator::{Validator, ValidatorSet};
