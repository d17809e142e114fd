//! Consensus validators and the validator set handed to the application at genesis

use crate::consensus::pub_key::{Address, PubKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub address: Address,
    pub pub_key: PubKey,
    pub voting_power: i64,
    pub proposer_priority: i64,
}

impl Validator {
    pub fn new(pub_key: PubKey, voting_power: i64) -> Validator {
        Validator {
            address: pub_key.address(),
            pub_key,
            voting_power,
            proposer_priority: 0,
        }
    }
}

/// Validators ordered by voting power (descending), then address (ascending).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub validators: Vec<Validator>,
    total_voting_power: i64,
}

impl ValidatorSet {
    pub fn new(mut validators: Vec<Validator>) -> ValidatorSet {
        validators.sort_by(|a, b| {
            b.voting_power
                .cmp(&a.voting_power)
                .then_with(|| a.address.cmp(&b.address))
        });
        let total_voting_power = validators.iter().map(|v| v.voting_power).sum();
        ValidatorSet {
            validators,
            total_voting_power,
        }
    }

    pub fn total_voting_power(&self) -> i64 {
        self.total_voting_power
    }

    pub fn size(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Lookup by the upper-case hex address used as the signer key.
    pub fn get_by_address(&self, address: &str) -> Option<&Validator> {
        self.validators
            .iter()
            .find(|v| v.address.to_string() == address)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Validator> {
        self.validators.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(seed: u8, power: i64) -> Validator {
        Validator::new(PubKey::Ed25519(vec![seed; 32]), power)
    }

    #[test]
    fn test_empty_set() {
        let set = ValidatorSet::new(vec![]);
        assert!(set.is_empty());
        assert_eq!(set.total_voting_power(), 0);
        assert!(set.get_by_address("00").is_none());
    }

    #[test]
    fn test_ordering_and_total_power() {
        let set = ValidatorSet::new(vec![validator(1, 1), validator(2, 5), validator(3, 1)]);
        assert_eq!(set.total_voting_power(), 7);
        assert_eq!(set.validators[0].voting_power, 5);
        assert!(set.validators[1].address < set.validators[2].address);
    }

    #[test]
    fn test_lookup_by_address() {
        let v = validator(4, 1);
        let address = v.address.to_string();
        let set = ValidatorSet::new(vec![v]);
        assert_eq!(set.get_by_address(&address).unwrap().voting_power, 1);
        assert!(set.get_by_address("00").is_none());
    }
}
