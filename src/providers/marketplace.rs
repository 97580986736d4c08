use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::models::address::Address;
use crate::models::token::{TokenId, TokenPrice};
use crate::traits::price_provider::PriceProvider;

/// One active sell listing as returned by the marketplace API
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    /// Price in the payment token's base units, as a decimal string
    #[serde(rename = "currentPrice")]
    pub current_price: String,
    #[serde(rename = "paymentToken")]
    pub payment_token: Option<PaymentToken>,
}

/// Payment-token metadata embedded in a listing
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentToken {
    pub symbol: Option<String>,
    pub decimals: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    #[serde(default)]
    listings: Vec<Listing>,
}

/// Marketplace-backed price provider, one listings query per token.
///
/// The API key is passed in at construction rather than read from ambient
/// process state, so tests can supply a fake or absent credential.
pub struct MarketplacePriceProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MarketplacePriceProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build marketplace HTTP client")?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

/// Pick the cheapest listing. The API does not guarantee ordering, so the
/// minimum is computed explicitly rather than read off the first element.
/// Listings missing price, decimals, or symbol are skipped.
pub fn lowest_listing(listings: &[Listing]) -> Option<TokenPrice> {
    listings
        .iter()
        .filter_map(|listing| {
            let token = listing.payment_token.as_ref()?;
            let decimals = token.decimals?;
            let symbol = token.symbol.clone()?;
            let base_units: i128 = listing.current_price.parse().ok()?;
            let amount = Decimal::try_from_i128_with_scale(base_units, decimals).ok()?;
            Some(TokenPrice {
                amount,
                currency: symbol,
            })
        })
        .min_by(|a, b| a.amount.cmp(&b.amount))
}

#[async_trait]
impl PriceProvider for MarketplacePriceProvider {
    async fn fetch_price(
        &self,
        contract: &Address,
        token_id: TokenId,
    ) -> Result<Option<TokenPrice>> {
        let url = format!("{}/listings", self.base_url);
        let params = [
            ("asset_contract_address", contract.as_str().to_string()),
            ("token_id", token_id.to_string()),
        ];

        let mut request = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("listings request failed for token {}", token_id))?;

        if !response.status().is_success() {
            bail!(
                "marketplace returned status {} for token {}",
                response.status(),
                token_id
            );
        }

        let body: ListingsResponse = response
            .json()
            .await
            .context("invalid listings response")?;

        if body.listings.is_empty() {
            debug!("no active listings for token {}", token_id);
            return Ok(None);
        }

        Ok(lowest_listing(&body.listings))
    }
}
