use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use futures::stream::{self, StreamExt};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::models::address::Address;
use crate::models::collection::CollectionInfo;
use crate::models::entry::PortfolioEntry;
use crate::models::portfolio::{EnrichmentFailure, FailureStage, Portfolio};
use crate::models::token::{TokenId, TokenPrice};
use crate::pipeline::metadata::MetadataEnricher;
use crate::pipeline::ownership::OwnershipResolver;
use crate::resolver::ContentAddressResolver;
use crate::traits::contract_reader::NftContractReader;
use crate::traits::document_fetcher::DocumentFetcher;
use crate::traits::price_provider::PriceProvider;

/// Orchestrates ownership discovery and the two enrichment fan-outs.
///
/// Staging: ownership (fatal on prerequisite failure), then a metadata
/// fan-out with a full join, then a price fan-out over the survivors. Price
/// results are attached by token id, never by position, since the metadata
/// stage may reorder or drop entries.
pub struct AggregationPipeline {
    ownership: OwnershipResolver,
    metadata: MetadataEnricher,
    prices: Arc<dyn PriceProvider>,
    config: PipelineConfig,
}

impl AggregationPipeline {
    pub fn new(
        reader: Arc<dyn NftContractReader>,
        fetcher: Arc<dyn DocumentFetcher>,
        prices: Arc<dyn PriceProvider>,
        config: PipelineConfig,
    ) -> Self {
        let resolver = ContentAddressResolver::new(config.gateway_base.clone());
        Self {
            ownership: OwnershipResolver::new(reader.clone()),
            metadata: MetadataEnricher::new(reader, fetcher, resolver),
            prices,
            config,
        }
    }

    /// Run one full aggregation for a wallet/contract pair.
    ///
    /// Cancelling the token drops all in-flight work and fails the run with
    /// a run-level error; nothing from a cancelled run is observable later.
    pub async fn run(
        &self,
        contract: &Address,
        owner: &Address,
        cancel: &CancellationToken,
    ) -> Result<Portfolio> {
        let owned = tokio::select! {
            _ = cancel.cancelled() => bail!("aggregation run cancelled"),
            owned = self.ownership.resolve(contract, owner) => owned?,
        };

        let mut failures = owned.failures;

        let (mut entries, metadata_failures) = self
            .enrich_metadata(contract, &owned.token_ids, owned.collection.clone(), cancel)
            .await?;
        failures.extend(metadata_failures);

        let (prices, price_failures) = self.fetch_prices(contract, &entries, cancel).await?;
        failures.extend(price_failures);
        for entry in &mut entries {
            if let Some(price) = prices.get(&entry.token_id) {
                entry.price = price.clone();
            }
        }

        info!(
            "aggregation complete: {} entries, {} failures",
            entries.len(),
            failures.len()
        );

        Ok(Portfolio::new(owned.collection, entries, failures))
    }

    /// Stage 2: bounded concurrent metadata fan-out with a full join.
    /// Partitions the owned-token list into surviving entries and per-token
    /// `Metadata` failures; a timed-out item counts as a failure.
    async fn enrich_metadata(
        &self,
        contract: &Address,
        token_ids: &[TokenId],
        collection: Arc<CollectionInfo>,
        cancel: &CancellationToken,
    ) -> Result<(Vec<PortfolioEntry>, Vec<EnrichmentFailure>)> {
        let deadline = self.config.request_timeout;
        let results = stream::iter(token_ids.iter().copied())
            .map(|token_id| {
                let collection = collection.clone();
                async move {
                    match timeout(deadline, self.metadata.enrich(contract, token_id, collection))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(EnrichmentFailure::new(
                            FailureStage::Metadata,
                            Some(token_id),
                            format!("metadata resolution timed out after {:?}", deadline),
                        )),
                    }
                }
            })
            .buffer_unordered(self.config.max_in_flight);

        let mut entries = Vec::new();
        let mut failures = Vec::new();
        tokio::pin!(results);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => bail!("aggregation run cancelled"),
                next = results.next() => match next {
                    Some(Ok(entry)) => entries.push(entry),
                    Some(Err(failure)) => {
                        warn!("metadata enrichment failed: {}", failure.cause);
                        failures.push(failure);
                    }
                    None => break,
                },
            }
        }

        Ok((entries, failures))
    }

    /// Stage 3: bounded concurrent price fan-out over surviving entries.
    /// A provider error degrades the entry to price-absent and records a
    /// `Price` failure; `Ok(None)` means not for sale and records nothing.
    async fn fetch_prices(
        &self,
        contract: &Address,
        entries: &[PortfolioEntry],
        cancel: &CancellationToken,
    ) -> Result<(HashMap<TokenId, Option<TokenPrice>>, Vec<EnrichmentFailure>)> {
        let deadline = self.config.request_timeout;
        let results = stream::iter(entries.iter().map(|entry| entry.token_id))
            .map(|token_id| async move {
                let outcome =
                    match timeout(deadline, self.prices.fetch_price(contract, token_id)).await {
                        Ok(result) => result,
                        Err(_) => Err(anyhow::anyhow!(
                            "price lookup timed out after {:?}",
                            deadline
                        )),
                    };
                (token_id, outcome)
            })
            .buffer_unordered(self.config.max_in_flight);

        let mut prices = HashMap::new();
        let mut failures = Vec::new();
        tokio::pin!(results);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => bail!("aggregation run cancelled"),
                next = results.next() => match next {
                    Some((token_id, Ok(price))) => {
                        prices.insert(token_id, price);
                    }
                    Some((token_id, Err(e))) => {
                        warn!("price lookup failed for token {}: {:#}", token_id, e);
                        failures.push(EnrichmentFailure::new(
                            FailureStage::Price,
                            Some(token_id),
                            format!("{:#}", e),
                        ));
                        prices.insert(token_id, None);
                    }
                    None => break,
                },
            }
        }

        Ok((prices, failures))
    }
}
