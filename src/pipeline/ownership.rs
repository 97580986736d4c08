use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::address::Address;
use crate::models::collection::CollectionInfo;
use crate::models::portfolio::{EnrichmentFailure, FailureStage};
use crate::models::token::TokenId;
use crate::traits::contract_reader::NftContractReader;

/// Owned-token enumeration result for one wallet/contract pair
#[derive(Debug, Clone)]
pub struct OwnedTokens {
    pub collection: Arc<CollectionInfo>,
    pub token_ids: Vec<TokenId>,
    pub failures: Vec<EnrichmentFailure>,
}

/// Enumerates the tokens a wallet owns in a collection
pub struct OwnershipResolver {
    reader: Arc<dyn NftContractReader>,
}

impl OwnershipResolver {
    pub fn new(reader: Arc<dyn NftContractReader>) -> Self {
        Self { reader }
    }

    /// Resolve collection identity and the owner's token list.
    ///
    /// The name/symbol/balance reads are prerequisites: if any of them fails
    /// the whole run aborts. Individual enumeration reads are recoverable
    /// and recorded as `Ownership` failures with the index skipped.
    pub async fn resolve(&self, contract: &Address, owner: &Address) -> Result<OwnedTokens> {
        let name = self
            .reader
            .name(contract)
            .await
            .context("failed to read collection name")?;
        let symbol = self
            .reader
            .symbol(contract)
            .await
            .context("failed to read collection symbol")?;
        let balance = self
            .reader
            .balance_of(contract, owner)
            .await
            .context("failed to read owner balance")?;

        let collection = Arc::new(CollectionInfo {
            name,
            symbol,
            contract: contract.clone(),
        });

        info!(
            "{} ({}): {} owns {} token(s)",
            collection.name, collection.symbol, owner, balance
        );

        let mut token_ids = Vec::with_capacity(balance as usize);
        let mut seen = HashSet::new();
        let mut failures = Vec::new();

        // Enumeration order is the contract's; only positionally consistent
        // within this run.
        for index in 0..balance {
            match self
                .reader
                .token_of_owner_by_index(contract, owner, index)
                .await
            {
                Ok(token_id) => {
                    if seen.insert(token_id) {
                        token_ids.push(token_id);
                    } else {
                        warn!("duplicate token id {} at enumeration index {}", token_id, index);
                    }
                }
                Err(e) => {
                    warn!("enumeration failed at index {}: {:#}", index, e);
                    failures.push(EnrichmentFailure::new(
                        FailureStage::Ownership,
                        None,
                        format!("enumeration index {}: {:#}", index, e),
                    ));
                }
            }
        }

        Ok(OwnedTokens {
            collection,
            token_ids,
            failures,
        })
    }
}
