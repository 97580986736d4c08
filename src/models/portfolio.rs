use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::collection::CollectionInfo;
use super::entry::PortfolioEntry;
use super::token::TokenId;

/// Pipeline stage at which a per-item failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Ownership,
    Metadata,
    Price,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Ownership => f.write_str("ownership"),
            FailureStage::Metadata => f.write_str("metadata"),
            FailureStage::Price => f.write_str("price"),
        }
    }
}

/// A recoverable per-item failure, surfaced to the caller as a diagnostic.
///
/// `token_id` is `None` when an ownership-index read fails before the id
/// could be resolved.
#[derive(Debug, Clone)]
pub struct EnrichmentFailure {
    pub token_id: Option<TokenId>,
    pub stage: FailureStage,
    pub cause: String,
}

impl EnrichmentFailure {
    pub fn new(stage: FailureStage, token_id: Option<TokenId>, cause: impl Into<String>) -> Self {
        Self {
            token_id,
            stage,
            cause: cause.into(),
        }
    }
}

/// Result of one aggregation run
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub collection: Arc<CollectionInfo>,
    pub entries: Vec<PortfolioEntry>,
    pub failures: Vec<EnrichmentFailure>,
    pub fetched_at: DateTime<Utc>,
}

impl Portfolio {
    /// Create a new portfolio snapshot
    pub fn new(
        collection: Arc<CollectionInfo>,
        entries: Vec<PortfolioEntry>,
        failures: Vec<EnrichmentFailure>,
    ) -> Self {
        Self {
            collection,
            entries,
            failures,
            fetched_at: Utc::now(),
        }
    }

    /// Get the entry for a specific token
    pub fn get(&self, token_id: TokenId) -> Option<&PortfolioEntry> {
        self.entries.iter().find(|entry| entry.token_id == token_id)
    }

    /// Check if the portfolio has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of enriched entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of items skipped or degraded during the run
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}
