use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque, collection-scoped token identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenId(pub u128);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for TokenId {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

/// A single trait from a token's metadata document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// Lowest current listing price for a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPrice {
    /// Human-scale amount (base units divided by 10^decimals)
    pub amount: Decimal,
    /// Payment token symbol, e.g. "ETH" or "WETH"
    pub currency: String,
}

impl TokenPrice {
    /// Format price with its currency for display
    pub fn formatted(&self) -> String {
        format!("{} {}", self.amount, self.currency)
    }
}
