//! NFT Portfolio Aggregation Pipeline
//!
//! Discovers every token a wallet owns in an ERC-721 collection, then
//! enriches each token concurrently with descriptive metadata (resolved
//! through a content-addressed storage gateway) and a current marketplace
//! price. Per-item failures are isolated and reported; they never discard
//! the rest of the portfolio.

// Public modules - these are the API surface
pub mod config;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod resolver;
pub mod traits;
pub mod utils;
pub mod view;

// Re-export commonly used items for easier access
pub use config::PipelineConfig;
pub use models::{
    address::Address,
    collection::CollectionInfo,
    entry::PortfolioEntry,
    portfolio::{EnrichmentFailure, FailureStage, Portfolio},
    token::{Attribute, TokenId, TokenPrice},
};
pub use pipeline::{
    aggregation::AggregationPipeline,
    metadata::MetadataEnricher,
    ownership::{OwnedTokens, OwnershipResolver},
};
pub use providers::{
    http_fetcher::HttpDocumentFetcher, marketplace::MarketplacePriceProvider,
    rpc_reader::JsonRpcContractReader,
};
pub use resolver::ContentAddressResolver;
pub use traits::{
    contract_reader::NftContractReader, document_fetcher::DocumentFetcher,
    price_provider::PriceProvider,
};
pub use view::{PortfolioView, SortDirection, SortKey};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;
