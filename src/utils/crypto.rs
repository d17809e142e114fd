use ring::digest::{Context, SHA256};
use ring::rand::SystemRandom;
use ring::signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519};
use ripemd::{Digest as RipemdDigest, Ripemd160};

use crate::error::{GenesisError, Result};

/// Length of every address derived from a public key or a module name.
pub const ADDRESS_LEN: usize = 20;

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

pub fn ripemd160_digest(data: &[u8]) -> Vec<u8> {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// First 20 bytes of the sha256 digest, the address scheme for ed25519 keys and module accounts.
pub fn address_hash(data: &[u8]) -> Vec<u8> {
    let mut digest = sha256_digest(data);
    digest.truncate(ADDRESS_LEN);
    digest
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    use rand::RngCore;

    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

pub fn new_ed25519_key_pair() -> Result<Vec<u8>> {
    let rng = SystemRandom::new();
    let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng)
        .map_err(|e| GenesisError::Crypto(format!("Failed to generate Ed25519 key pair: {e}")))?
        .as_ref()
        .to_vec();
    Ok(pkcs8)
}

fn ed25519_key_pair_from_pkcs8(pkcs8: &[u8]) -> Result<Ed25519KeyPair> {
    Ed25519KeyPair::from_pkcs8(pkcs8).map_err(|e| {
        GenesisError::Crypto(format!("Failed to create key pair from PKCS8: {e}"))
    })
}

pub fn ed25519_public_key(pkcs8: &[u8]) -> Result<Vec<u8>> {
    let key_pair = ed25519_key_pair_from_pkcs8(pkcs8)?;
    Ok(key_pair.public_key().as_ref().to_vec())
}

pub fn ed25519_sign(pkcs8: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let key_pair = ed25519_key_pair_from_pkcs8(pkcs8)?;
    Ok(key_pair.sign(message).as_ref().to_vec())
}

pub fn ed25519_verify(public_key: &[u8], signature: &[u8], message: &[u8]) -> bool {
    let peer_public_key = UnparsedPublicKey::new(&ED25519, public_key);
    peer_public_key.verify(message, signature).is_ok()
}
