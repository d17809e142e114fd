//! Coins and multi-denomination coin sets

use crate::error::{GenesisError, Result};
use crate::types::math::Int;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_DENOM_LEN: usize = 3;
const MAX_DENOM_LEN: usize = 128;

/// Checks a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<()> {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_allowed =
        chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));
    let len_ok = (MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&denom.len());

    if starts_with_letter && rest_allowed && len_ok {
        Ok(())
    } else {
        Err(GenesisError::InvalidCoin(format!("invalid denom: {denom}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Int,
}

impl Coin {
    pub fn new(denom: &str, amount: Int) -> Result<Coin> {
        let coin = Coin {
            denom: denom.to_string(),
            amount,
        };
        coin.validate()?;
        Ok(coin)
    }

    pub fn validate(&self) -> Result<()> {
        validate_denom(&self.denom)?;
        if self.amount.is_negative() {
            return Err(GenesisError::InvalidCoin(format!(
                "negative coin amount: {}",
                self.amount
            )));
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Coin set sorted by denomination with no zero amounts and no repeated denominations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Coins {
        Coins(Vec::new())
    }

    /// Drops zero amounts and sorts; repeated denominations are rejected.
    pub fn new(coins: Vec<Coin>) -> Result<Coins> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| !c.is_zero()).collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        for coin in &coins {
            coin.validate()?;
        }
        if let Some(pair) = coins.windows(2).find(|w| w[0].denom == w[1].denom) {
            return Err(GenesisError::InvalidCoin(format!(
                "duplicate denomination {}",
                pair[0].denom
            )));
        }
        Ok(Coins(coins))
    }

    /// Coordinate-wise sum over every denomination of both sets.
    pub fn add(&self, other: &Coins) -> Coins {
        let mut merged = Vec::with_capacity(self.0.len() + other.0.len());
        let (mut left, mut right) = (self.0.iter().peekable(), other.0.iter().peekable());

        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(a), Some(b)) if a.denom == b.denom => {
                    let coin = Coin {
                        denom: a.denom.clone(),
                        amount: &a.amount + &b.amount,
                    };
                    left.next();
                    right.next();
                    coin
                }
                (Some(a), Some(b)) if a.denom < b.denom => {
                    let coin = (*a).clone();
                    left.next();
                    coin
                }
                (Some(_), Some(b)) => {
                    let coin = (*b).clone();
                    right.next();
                    coin
                }
                (Some(a), None) => {
                    let coin = (*a).clone();
                    left.next();
                    coin
                }
                (None, Some(b)) => {
                    let coin = (*b).clone();
                    right.next();
                    coin
                }
                (None, None) => break,
            };
            if !next.is_zero() {
                merged.push(next);
            }
        }

        Coins(merged)
    }

    pub fn amount_of(&self, denom: &str) -> Int {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount.clone())
            .unwrap_or_default()
    }

    /// Sorted, unique, positive amounts with valid denominations.
    pub fn validate(&self) -> Result<()> {
        for coin in &self.0 {
            coin.validate()?;
            if coin.is_zero() {
                return Err(GenesisError::InvalidCoin(format!(
                    "zero amount for {}",
                    coin.denom
                )));
            }
        }
        if self.0.windows(2).any(|w| w[0].denom >= w[1].denom) {
            return Err(GenesisError::InvalidCoin(format!(
                "coins are not sorted or contain duplicates: {self}"
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        if coin.is_zero() {
            Coins::empty()
        } else {
            Coins(vec![coin])
        }
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", rendered.join(","))
    }
}
