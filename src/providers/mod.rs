//! Production implementations of the pipeline's external seams

pub mod http_fetcher;
pub mod marketplace;
pub mod rpc_reader;

// Re-export for convenience
pub use http_fetcher::HttpDocumentFetcher;
pub use marketplace::MarketplacePriceProvider;
pub use rpc_reader::JsonRpcContractReader;
