use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An EVM account or contract address (0x-prefixed, 20 hex bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let body = s
            .strip_prefix("0x")
            .ok_or_else(|| anyhow::anyhow!("Invalid address {}: missing 0x prefix", s))?;

        if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid address {}: expected 20 hex bytes", s);
        }

        // Normalized to lowercase; checksum casing is not significant for calls
        Ok(Self(format!("0x{}", body.to_ascii_lowercase())))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_casing() {
        let addr: Address = "0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D"
            .parse()
            .unwrap();
        assert_eq!(addr.as_str(), "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("bc4ca0eda7647a8ab7c2061c2e118a18a936f13d"
            .parse::<Address>()
            .is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz4ca0eda7647a8ab7c2061c2e118a18a936f13d"
            .parse::<Address>()
            .is_err());
    }
}
