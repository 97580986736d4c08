use async_trait::async_trait;

use crate::models::address::Address;
use crate::models::token::{TokenId, TokenPrice};

/// Marketplace price feed for individual tokens
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Lowest active listing price for a token.
    ///
    /// `Ok(None)` means the token is not currently for sale; `Err` means the
    /// lookup itself failed and the price is unknown.
    async fn fetch_price(
        &self,
        contract: &Address,
        token_id: TokenId,
    ) -> anyhow::Result<Option<TokenPrice>>;
}
