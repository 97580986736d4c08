use serde::{Deserialize, Serialize};

use super::address::Address;

/// Identity of an NFT collection, fetched once per pipeline run and shared
/// read-only by every entry of that run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub symbol: String,
    pub contract: Address,
}
