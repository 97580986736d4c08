//! In-memory fakes for the pipeline's three external seams.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::address::Address;
use crate::models::collection::CollectionInfo;
use crate::models::token::{TokenId, TokenPrice};
use crate::traits::contract_reader::NftContractReader;
use crate::traits::document_fetcher::DocumentFetcher;
use crate::traits::price_provider::PriceProvider;

/// Address with the given low byte, e.g. `addr(0xaa)`
pub(crate) fn addr(low_byte: u8) -> Address {
    Address::from_str(&format!("0x{:040x}", low_byte)).unwrap()
}

pub(crate) fn collection_info() -> Arc<CollectionInfo> {
    Arc::new(CollectionInfo {
        name: "Test Apes".to_string(),
        symbol: "TAPE".to_string(),
        contract: addr(0x01),
    })
}

/// In-memory ERC-721 contract with per-call failure injection
#[derive(Default)]
pub(crate) struct FakeContract {
    pub collection_name: String,
    pub collection_symbol: String,
    pub owners: HashMap<Address, Vec<TokenId>>,
    pub uris: HashMap<TokenId, String>,
    pub failing_indices: Vec<u64>,
    pub fail_name: bool,
}

impl FakeContract {
    pub fn new(name: &str, symbol: &str) -> Self {
        Self {
            collection_name: name.to_string(),
            collection_symbol: symbol.to_string(),
            ..Default::default()
        }
    }

    pub fn with_owner(mut self, owner: Address, token_ids: Vec<TokenId>) -> Self {
        self.owners.insert(owner, token_ids);
        self
    }

    pub fn with_uri(mut self, token_id: TokenId, uri: &str) -> Self {
        self.uris.insert(token_id, uri.to_string());
        self
    }

    pub fn with_failing_index(mut self, index: u64) -> Self {
        self.failing_indices.push(index);
        self
    }
}

#[async_trait]
impl NftContractReader for FakeContract {
    async fn name(&self, _contract: &Address) -> Result<String> {
        if self.fail_name {
            return Err(anyhow!("rpc unavailable"));
        }
        Ok(self.collection_name.clone())
    }

    async fn symbol(&self, _contract: &Address) -> Result<String> {
        Ok(self.collection_symbol.clone())
    }

    async fn balance_of(&self, _contract: &Address, owner: &Address) -> Result<u64> {
        Ok(self.owners.get(owner).map(|ids| ids.len() as u64).unwrap_or(0))
    }

    async fn token_of_owner_by_index(
        &self,
        _contract: &Address,
        owner: &Address,
        index: u64,
    ) -> Result<TokenId> {
        if self.failing_indices.contains(&index) {
            return Err(anyhow!("execution reverted"));
        }
        self.owners
            .get(owner)
            .and_then(|ids| ids.get(index as usize))
            .copied()
            .ok_or_else(|| anyhow!("index {} out of range", index))
    }

    async fn token_uri(&self, _contract: &Address, token_id: TokenId) -> Result<String> {
        self.uris
            .get(&token_id)
            .cloned()
            .ok_or_else(|| anyhow!("no uri for token {}", token_id))
    }
}

/// In-memory document store; unknown URLs fail, stalled URLs never resolve
#[derive(Default)]
pub(crate) struct FakeDocs {
    pub docs: HashMap<String, serde_json::Value>,
    pub stalled: Vec<String>,
}

impl FakeDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(mut self, url: &str, doc: serde_json::Value) -> Self {
        self.docs.insert(url.to_string(), doc);
        self
    }

    pub fn with_stalled(mut self, url: &str) -> Self {
        self.stalled.push(url.to_string());
        self
    }
}

#[async_trait]
impl DocumentFetcher for FakeDocs {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        if self.stalled.iter().any(|stalled| stalled == url) {
            futures::future::pending::<()>().await;
            unreachable!();
        }
        self.docs
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("404 for {}", url))
    }
}

/// In-memory price feed with per-token failure injection
#[derive(Default)]
pub(crate) struct FakePrices {
    pub prices: HashMap<TokenId, TokenPrice>,
    pub failing: Vec<TokenId>,
}

impl FakePrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, token_id: TokenId, price: TokenPrice) -> Self {
        self.prices.insert(token_id, price);
        self
    }

    pub fn with_failing(mut self, token_id: TokenId) -> Self {
        self.failing.push(token_id);
        self
    }
}

#[async_trait]
impl PriceProvider for FakePrices {
    async fn fetch_price(
        &self,
        _contract: &Address,
        token_id: TokenId,
    ) -> Result<Option<TokenPrice>> {
        if self.failing.contains(&token_id) {
            return Err(anyhow!("marketplace returned status 500"));
        }
        Ok(self.prices.get(&token_id).cloned())
    }
}
