//! Chain primitives shared by every genesis section
//!
//! Amounts, coins, bech32 addresses and the `Any` envelope, encoded the way the
//! application's JSON codec expects them.

pub mod address;
pub mod any;
pub mod coin;
pub mod math;

pub use address::{module_address, AccAddress, ValAddress};
pub use any::{Any, Ed25519PubKey, ProtoMessage, SdkPubKey, Secp256k1PubKey};
pub use coin::{validate_denom, Coin, Coins};
pub use math::{tokens_from_consensus_power, Int, LegacyDec, POWER_REDUCTION};
