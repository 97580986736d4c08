//! Aggregation pipeline: ownership discovery followed by two bounded
//! concurrent enrichment fan-outs.

pub mod aggregation;
pub mod metadata;
pub mod ownership;

// Re-export for convenience
pub use aggregation::AggregationPipeline;
pub use metadata::MetadataEnricher;
pub use ownership::{OwnedTokens, OwnershipResolver};

#[cfg(test)]
pub(crate) mod testing;
