//! Data model for the aggregation pipeline

pub mod address;
pub mod collection;
pub mod entry;
pub mod portfolio;
pub mod token;

// Re-export for convenience
pub use address::Address;
pub use collection::CollectionInfo;
pub use entry::PortfolioEntry;
pub use portfolio::{EnrichmentFailure, FailureStage, Portfolio};
pub use token::{Attribute, TokenId, TokenPrice};
