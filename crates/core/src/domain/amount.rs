use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// Monetary amounts carry exactly three fractional digits.
pub const AMOUNT_SCALE: u32 = 3;

/// A monetary value with a fixed scale of three fractional digits.
///
/// Input is accepted as a decimal string (`"0.012"`) or a JSON number
/// (`0.012`); numbers are rendered to their decimal string before
/// validation, so both forms pass or fail identically. Values with a
/// fractional part of any length other than three are rejected. Integral
/// strings are accepted and canonicalized, so `"5"` serializes as `"5.000"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Validate and canonicalize a raw decimal string.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.split('.');
        let _integral = parts.next();
        if let Some(fraction) = parts.next() {
            if fraction.chars().count() != AMOUNT_SCALE as usize {
                return Err(DomainError::InvalidPrecision { value: raw.to_string() });
            }
        }

        let mut value = Decimal::from_str(raw)
            .map_err(|_| DomainError::InvalidAmount { value: raw.to_string() })?;
        value.rescale(AMOUNT_SCALE);
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        let mut total = iter.fold(Decimal::ZERO, |acc, amount| acc + amount.0);
        total.rescale(AMOUNT_SCALE);
        Self(total)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Text(value) => Amount::parse(&value),
            Raw::Number(value) => Amount::parse(&value.to_string()),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
