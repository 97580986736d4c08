use async_trait::async_trait;

use crate::models::address::Address;
use crate::models::token::TokenId;

/// Read-only view of an ERC-721 contract with owner enumeration
#[async_trait]
pub trait NftContractReader: Send + Sync {
    /// Collection name
    async fn name(&self, contract: &Address) -> anyhow::Result<String>;

    /// Collection symbol
    async fn symbol(&self, contract: &Address) -> anyhow::Result<String>;

    /// Number of tokens the owner holds in the collection
    async fn balance_of(&self, contract: &Address, owner: &Address) -> anyhow::Result<u64>;

    /// Token id at the given position of the owner's enumeration
    async fn token_of_owner_by_index(
        &self,
        contract: &Address,
        owner: &Address,
        index: u64,
    ) -> anyhow::Result<TokenId>;

    /// Metadata location for a token
    async fn token_uri(&self, contract: &Address, token_id: TokenId) -> anyhow::Result<String>;
}
