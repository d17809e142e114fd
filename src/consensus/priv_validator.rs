//! Private signing handles for genesis validators

use crate::consensus::pub_key::PubKey;
use crate::error::Result;
use crate::utils::{ed25519_public_key, ed25519_sign, new_ed25519_key_pair};
use std::collections::HashMap;
use zeroize::ZeroizeOnDrop;

/// Signs consensus messages on behalf of a validator.
pub trait PrivValidator {
    fn pub_key(&self) -> Result<PubKey>;

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Signers keyed by validator address (upper-case hex).
pub type Signers = HashMap<String, Box<dyn PrivValidator>>;

/// In-memory ed25519 signer for tests. Key material is wiped on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct MockPV {
    pkcs8: Vec<u8>,
    #[zeroize(skip)]
    public_key: Vec<u8>,
}

impl MockPV {
    pub fn new() -> Result<MockPV> {
        let pkcs8 = new_ed25519_key_pair()?;
        let public_key = ed25519_public_key(&pkcs8)?;
        Ok(MockPV { pkcs8, public_key })
    }
}

impl PrivValidator for MockPV {
    fn pub_key(&self) -> Result<PubKey> {
        Ok(PubKey::Ed25519(self.public_key.clone()))
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        ed25519_sign(&self.pkcs8, message)
    }
}

impl std::fmt::Debug for MockPV {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPV")
            .field("pkcs8", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ed25519_verify;

    #[test]
    fn test_mock_pv_signatures_verify() {
        let pv = MockPV::new().unwrap();
        let pub_key = pv.pub_key().unwrap();
        let signature = pv.sign(b"proposal").unwrap();
        assert!(ed25519_verify(pub_key.bytes(), &signature, b"proposal"));
    }

    #[test]
    fn test_mock_pvs_are_distinct() {
        let a = MockPV::new().unwrap();
        let b = MockPV::new().unwrap();
        assert_ne!(a.pub_key().unwrap(), b.pub_key().unwrap());
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let pv = MockPV::new().unwrap();
        assert!(format!("{pv:?}").contains("[REDACTED]"));
    }
}
