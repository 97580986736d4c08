use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::models::address::Address;
use crate::models::collection::CollectionInfo;
use crate::models::entry::PortfolioEntry;
use crate::models::portfolio::{EnrichmentFailure, FailureStage};
use crate::models::token::{Attribute, TokenId};
use crate::resolver::ContentAddressResolver;
use crate::traits::contract_reader::NftContractReader;
use crate::traits::document_fetcher::DocumentFetcher;

/// Raw metadata document shape. Every field is optional because the JSON is
/// only partially trusted; defaults are applied per field when absent.
#[derive(Debug, Deserialize)]
struct TokenDocument {
    name: Option<String>,
    description: Option<String>,
    image: Option<String>,
    attributes: Option<Vec<RawAttribute>>,
}

#[derive(Debug, Deserialize)]
struct RawAttribute {
    trait_type: Option<String>,
    value: Option<serde_json::Value>,
}

impl RawAttribute {
    fn into_attribute(self) -> Attribute {
        // Documents carry numbers as well as strings in trait values
        let value = match self.value {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Attribute {
            trait_type: self.trait_type.unwrap_or_default(),
            value,
        }
    }
}

/// Resolves per-token descriptive metadata into portfolio entries
pub struct MetadataEnricher {
    reader: Arc<dyn NftContractReader>,
    fetcher: Arc<dyn DocumentFetcher>,
    resolver: ContentAddressResolver,
}

impl MetadataEnricher {
    pub fn new(
        reader: Arc<dyn NftContractReader>,
        fetcher: Arc<dyn DocumentFetcher>,
        resolver: ContentAddressResolver,
    ) -> Self {
        Self {
            reader,
            fetcher,
            resolver,
        }
    }

    /// Enrich one token. A failure at any step (contract call, fetch, parse)
    /// becomes a `Metadata` stage failure for this token only; it never
    /// aborts enrichment of sibling tokens.
    pub async fn enrich(
        &self,
        contract: &Address,
        token_id: TokenId,
        collection: Arc<CollectionInfo>,
    ) -> Result<PortfolioEntry, EnrichmentFailure> {
        self.try_enrich(contract, token_id, collection)
            .await
            .map_err(|e| {
                EnrichmentFailure::new(FailureStage::Metadata, Some(token_id), format!("{:#}", e))
            })
    }

    async fn try_enrich(
        &self,
        contract: &Address,
        token_id: TokenId,
        collection: Arc<CollectionInfo>,
    ) -> anyhow::Result<PortfolioEntry> {
        let uri = self.reader.token_uri(contract, token_id).await?;
        let location = self.resolver.resolve(&uri);
        let raw = self.fetcher.fetch_json(&location).await?;
        let doc: TokenDocument = serde_json::from_value(raw)?;

        debug!("resolved metadata for token {}", token_id);

        // Images are frequently content-addressed independently of the
        // metadata document itself.
        let image_url = doc
            .image
            .map(|image| self.resolver.resolve(&image))
            .unwrap_or_default();

        Ok(PortfolioEntry {
            token_id,
            name: doc.name.unwrap_or_else(|| format!("#{}", token_id)),
            image_url,
            description: doc.description.unwrap_or_default(),
            attributes: doc
                .attributes
                .map(|attrs| attrs.into_iter().map(RawAttribute::into_attribute).collect()),
            collection,
            price: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{addr, collection_info, FakeContract, FakeDocs};
    use serde_json::json;

    fn enricher(reader: FakeContract, docs: FakeDocs) -> MetadataEnricher {
        MetadataEnricher::new(
            Arc::new(reader),
            Arc::new(docs),
            ContentAddressResolver::new("https://gw.test/ipfs"),
        )
    }

    #[tokio::test]
    async fn populates_entry_from_document() {
        let reader =
            FakeContract::new("Test Apes", "TAPE").with_uri(TokenId(1), "ipfs://meta/1.json");
        let docs = FakeDocs::new().with_doc(
            "https://gw.test/ipfs/meta/1.json",
            json!({
                "name": "Ape #1",
                "description": "A test ape",
                "image": "ipfs://img/1.png",
                "attributes": [
                    { "trait_type": "Fur", "value": "Gold" },
                    { "trait_type": "Generation", "value": 2 },
                ],
            }),
        );

        let entry = enricher(reader, docs)
            .enrich(&addr(0x01), TokenId(1), collection_info())
            .await
            .unwrap();

        assert_eq!(entry.name, "Ape #1");
        assert_eq!(entry.description, "A test ape");
        assert_eq!(entry.image_url, "https://gw.test/ipfs/img/1.png");
        let attrs = entry.attributes.unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].trait_type, "Fur");
        assert_eq!(attrs[0].value, "Gold");
        assert_eq!(attrs[1].value, "2");
        assert!(entry.price.is_none());
    }

    #[tokio::test]
    async fn applies_defaults_for_missing_fields() {
        let reader =
            FakeContract::new("Test Apes", "TAPE").with_uri(TokenId(7), "https://meta.test/7");
        let docs = FakeDocs::new().with_doc("https://meta.test/7", json!({}));

        let entry = enricher(reader, docs)
            .enrich(&addr(0x01), TokenId(7), collection_info())
            .await
            .unwrap();

        assert_eq!(entry.name, "#7");
        assert_eq!(entry.description, "");
        assert_eq!(entry.image_url, "");
        assert!(entry.attributes.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_becomes_metadata_stage_failure() {
        let reader =
            FakeContract::new("Test Apes", "TAPE").with_uri(TokenId(9), "https://meta.test/gone");
        let docs = FakeDocs::new();

        let failure = enricher(reader, docs)
            .enrich(&addr(0x01), TokenId(9), collection_info())
            .await
            .unwrap_err();

        assert_eq!(failure.stage, FailureStage::Metadata);
        assert_eq!(failure.token_id, Some(TokenId(9)));
    }

    #[tokio::test]
    async fn non_object_document_becomes_metadata_stage_failure() {
        let reader =
            FakeContract::new("Test Apes", "TAPE").with_uri(TokenId(2), "https://meta.test/2");
        let docs = FakeDocs::new().with_doc("https://meta.test/2", json!(["not", "an", "object"]));

        let failure = enricher(reader, docs)
            .enrich(&addr(0x01), TokenId(2), collection_info())
            .await
            .unwrap_err();

        assert_eq!(failure.stage, FailureStage::Metadata);
    }
}
