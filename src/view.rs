//! Read-only projections over a portfolio for presentation.

use std::cmp::Ordering;

use crate::models::entry::PortfolioEntry;
use crate::models::portfolio::Portfolio;
use crate::models::token::TokenId;

/// Sort key for portfolio views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Numeric token id (the default ordering)
    TokenId,
    /// Entry name, lexicographic
    Name,
    /// Collection name, lexicographic
    Collection,
    /// Listing price; unlisted entries always sort last
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Borrowing view over a portfolio's entries. Filtering and sorting derive
/// new views; the underlying entries are never mutated or reordered.
#[derive(Debug, Clone)]
pub struct PortfolioView<'a> {
    entries: Vec<&'a PortfolioEntry>,
}

impl<'a> PortfolioView<'a> {
    /// View over all entries in their aggregation order
    pub fn new(portfolio: &'a Portfolio) -> Self {
        Self {
            entries: portfolio.entries.iter().collect(),
        }
    }

    pub fn entries(&self) -> &[&'a PortfolioEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected-entry accessor for detail display
    pub fn get(&self, token_id: TokenId) -> Option<&'a PortfolioEntry> {
        self.entries
            .iter()
            .find(|entry| entry.token_id == token_id)
            .copied()
    }

    /// Case-insensitive substring filter over name and description
    pub fn filter(&self, query: &str) -> PortfolioView<'a> {
        let needle = query.to_lowercase();
        let entries = self
            .entries
            .iter()
            .copied()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&needle)
                    || entry.description.to_lowercase().contains(&needle)
            })
            .collect();
        PortfolioView { entries }
    }

    /// Sorted copy of the view. Sorts are stable, so entries with equal keys
    /// keep their relative order. For the price key, entries without a price
    /// sort after every priced entry regardless of direction.
    pub fn sort_by(&self, key: SortKey, direction: SortDirection) -> PortfolioView<'a> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            let ordering = match key {
                SortKey::TokenId => a.token_id.cmp(&b.token_id),
                SortKey::Name => a.name.cmp(&b.name),
                SortKey::Collection => a.collection.name.cmp(&b.collection.name),
                SortKey::Price => {
                    return match (&a.price, &b.price) {
                        (Some(_), None) => Ordering::Less,
                        (None, Some(_)) => Ordering::Greater,
                        (None, None) => Ordering::Equal,
                        (Some(pa), Some(pb)) => apply(pa.amount.cmp(&pb.amount), direction),
                    };
                }
            };
            apply(ordering, direction)
        });
        PortfolioView { entries }
    }
}

fn apply(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
