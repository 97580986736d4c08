use std::sync::Arc;

use super::collection::CollectionInfo;
use super::token::{Attribute, TokenId, TokenPrice};

/// A fully enriched token owned by the tracked wallet.
///
/// Created once metadata resolves; the price field is attached (or confirmed
/// absent) exactly once by the price stage and the entry is never mutated
/// after that.
#[derive(Debug, Clone)]
pub struct PortfolioEntry {
    pub token_id: TokenId,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub attributes: Option<Vec<Attribute>>,
    pub collection: Arc<CollectionInfo>,
    pub price: Option<TokenPrice>,
}

impl PortfolioEntry {
    /// Whether the token currently has an active listing
    pub fn is_listed(&self) -> bool {
        self.price.is_some()
    }
}
