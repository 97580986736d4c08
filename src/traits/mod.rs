//! Core traits for the aggregation pipeline

pub mod contract_reader;
pub mod document_fetcher;
pub mod price_provider;

// Re-export for convenience
pub use contract_reader::NftContractReader;
pub use document_fetcher::DocumentFetcher;
pub use price_provider::PriceProvider;
