//! Arbitrary precision integers and 18-decimal fixed point numbers
//!
//! Both types render as decimal strings in JSON, the way the chain's genesis
//! files carry them.

use crate::error::{GenesisError, Result};
use num_bigint::{BigInt, Sign};
use once_cell::sync::Lazy;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Integers wider than this are rejected when parsed.
pub const MAX_INT_BIT_LEN: u64 = 256;

/// Number of decimal places carried by [`LegacyDec`].
pub const DEC_PRECISION: u32 = 18;

/// 256 integer bits plus the bits needed for 18 decimal places.
pub const MAX_DEC_BIT_LEN: u64 = MAX_INT_BIT_LEN + 60;

static DEC_SCALE: Lazy<BigInt> = Lazy::new(|| BigInt::from(10u32).pow(DEC_PRECISION));

/// Tokens per unit of consensus power (10^18, one whole coin of an 18-decimal denom).
pub static POWER_REDUCTION: Lazy<Int> = Lazy::new(|| Int(BigInt::from(10u32).pow(18)));

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(BigInt);

impl Int {
    pub fn zero() -> Int {
        Int(BigInt::default())
    }

    pub fn one() -> Int {
        Int(BigInt::from(1u8))
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    /// Truncating division, used to turn token amounts into consensus power.
    pub fn quo(&self, divisor: &Int) -> Result<Int> {
        if divisor.is_zero() {
            return Err(GenesisError::InvalidNumber("division by zero".to_string()));
        }
        Ok(Int(&self.0 / &divisor.0))
    }

    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(&self.0).ok()
    }
}

impl From<u64> for Int {
    fn from(value: u64) -> Self {
        Int(BigInt::from(value))
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Int(BigInt::from(value))
    }
}

impl From<u128> for Int {
    fn from(value: u128) -> Self {
        Int(BigInt::from(value))
    }
}

impl Add for Int {
    type Output = Int;

    fn add(self, rhs: Int) -> Int {
        Int(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Int> for &'a Int {
    type Output = Int;

    fn add(self, rhs: &'a Int) -> Int {
        Int(&self.0 + &rhs.0)
    }
}

impl Sub for Int {
    type Output = Int;

    fn sub(self, rhs: Int) -> Int {
        Int(self.0 - rhs.0)
    }
}

impl Mul for Int {
    type Output = Int;

    fn mul(self, rhs: Int) -> Int {
        Int(self.0 * rhs.0)
    }
}

impl<'a> Mul<&'a Int> for &'a Int {
    type Output = Int;

    fn mul(self, rhs: &'a Int) -> Int {
        Int(&self.0 * &rhs.0)
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Int {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GenesisError::InvalidNumber(format!("invalid integer: {s}")));
        }
        let value = BigInt::from_str(s)
            .map_err(|e| GenesisError::InvalidNumber(format!("invalid integer {s}: {e}")))?;
        if value.bits() > MAX_INT_BIT_LEN {
            return Err(GenesisError::InvalidNumber(format!(
                "integer out of range: {s}"
            )));
        }
        Ok(Int(value))
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Converts a consensus power into a token amount.
pub fn tokens_from_consensus_power(power: i64, power_reduction: &Int) -> Int {
    &Int::from(power) * power_reduction
}

/// Fixed point decimal with 18 fractional digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegacyDec(BigInt);

impl LegacyDec {
    pub fn zero() -> LegacyDec {
        LegacyDec(BigInt::default())
    }

    pub fn one() -> LegacyDec {
        LegacyDec(DEC_SCALE.clone())
    }

    /// `integer * 10^-prec`, e.g. `new_with_prec(5, 1)` is 0.5.
    pub fn new_with_prec(integer: i64, prec: u32) -> Result<LegacyDec> {
        if prec > DEC_PRECISION {
            return Err(GenesisError::InvalidNumber(format!(
                "precision {prec} exceeds {DEC_PRECISION}"
            )));
        }
        let shift = BigInt::from(10u32).pow(DEC_PRECISION - prec);
        Ok(LegacyDec(BigInt::from(integer) * shift))
    }

    pub fn from_int(value: &Int) -> LegacyDec {
        LegacyDec(&value.0 * &*DEC_SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    /// Integer part, rounding toward zero.
    pub fn truncate_int(&self) -> Int {
        Int(&self.0 / &*DEC_SCALE)
    }
}

impl Add for LegacyDec {
    type Output = LegacyDec;

    fn add(self, rhs: LegacyDec) -> LegacyDec {
        LegacyDec(self.0 + rhs.0)
    }
}

impl fmt::Display for LegacyDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = DEC_PRECISION as usize;
        let mut digits = self.0.magnitude().to_string();
        if digits.len() <= precision {
            digits = format!("{digits:0>width$}", width = precision + 1);
        }
        let (integer, fraction) = digits.split_at(digits.len() - precision);
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{integer}.{fraction}")
    }
}

impl FromStr for LegacyDec {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GenesisError::InvalidNumber(format!("invalid decimal: {s}"));
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((integer, fraction)) => (integer, fraction),
            None => (unsigned, ""),
        };
        if integer.is_empty()
            || fraction.len() > DEC_PRECISION as usize
            || !integer.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let combined = format!(
            "{integer}{fraction:0<width$}",
            width = DEC_PRECISION as usize
        );
        let mut value = BigInt::from_str(&combined).map_err(|_| invalid())?;
        if negative {
            value = -value;
        }
        if value.bits() > MAX_DEC_BIT_LEN {
            return Err(GenesisError::InvalidNumber(format!(
                "decimal out of range: {s}"
            )));
        }
        Ok(LegacyDec(value))
    }
}

impl Serialize for LegacyDec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LegacyDec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_parse_and_display() {
        let value: Int = "100000000000000000000000".parse().unwrap();
        assert_eq!(value.to_string(), "100000000000000000000000");
        assert!("-5".parse::<Int>().unwrap().is_negative());
        assert!("".parse::<Int>().is_err());
        assert!("12a".parse::<Int>().is_err());
        assert!("+1".parse::<Int>().is_err());
    }

    #[test]
    fn test_int_rejects_more_than_256_bits() {
        let too_big = format!("1{}", "0".repeat(80));
        assert!(too_big.parse::<Int>().is_err());
    }

    #[test]
    fn test_int_json_is_a_string() {
        let json = serde_json::to_string(&Int::from(42u64)).unwrap();
        assert_eq!(json, "\"42\"");
        let parsed: Int = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(parsed, Int::from(42u64));
    }

    #[test]
    fn test_tokens_from_consensus_power() {
        let tokens = tokens_from_consensus_power(3, &POWER_REDUCTION);
        assert_eq!(tokens.to_string(), "3000000000000000000");
        assert_eq!(tokens.quo(&POWER_REDUCTION).unwrap().to_i64(), Some(3));
        assert!(tokens.quo(&Int::zero()).is_err());
    }

    #[test]
    fn test_dec_display() {
        assert_eq!(LegacyDec::one().to_string(), "1.000000000000000000");
        assert_eq!(LegacyDec::zero().to_string(), "0.000000000000000000");
        assert_eq!(
            LegacyDec::new_with_prec(5, 1).unwrap().to_string(),
            "0.500000000000000000"
        );
        assert_eq!(
            LegacyDec::new_with_prec(-25, 1).unwrap().to_string(),
            "-2.500000000000000000"
        );
        assert_eq!(
            LegacyDec::new_with_prec(300_000_000, 0).unwrap().to_string(),
            "300000000.000000000000000000"
        );
    }

    #[test]
    fn test_dec_parse() {
        let dec: LegacyDec = "0.533333334".parse().unwrap();
        assert_eq!(dec, LegacyDec::new_with_prec(533_333_334, 9).unwrap());
        assert_eq!("1".parse::<LegacyDec>().unwrap(), LegacyDec::one());
        assert!(".5".parse::<LegacyDec>().is_err());
        assert!("1.".parse::<LegacyDec>().is_err());
        assert!("-3.".parse::<LegacyDec>().is_err());
        assert!("0.1234567890123456789".parse::<LegacyDec>().is_err());
        assert!("abc".parse::<LegacyDec>().is_err());
    }

    #[test]
    fn test_dec_arithmetic() {
        let staking = LegacyDec::new_with_prec(533_333_334, 9).unwrap();
        let community = LegacyDec::new_with_prec(466_666_666, 9).unwrap();
        assert_eq!(staking + community, LegacyDec::one());
        assert_eq!(
            LegacyDec::from_int(&Int::from(7u64)).truncate_int(),
            Int::from(7u64)
        );
        assert!(LegacyDec::new_with_prec(1, 19).is_err());
    }
}
