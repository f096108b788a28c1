//! Product Search
//!
//! Substring search over a [`Catalog`]. Queries are trimmed and lowercased before matching; a
//! product matches when the query appears in its name, description, category or any of its tags.
//! Results keep catalog order rather than being ranked.
//!
//! A query that is too short after normalization is not a search at all: it yields
//! [`SearchOutcome::Inactive`], which is distinct from a search that ran and found nothing
//! ([`SearchOutcome::Empty`]).

use crate::{
    catalog::Catalog,
    products::{Product, ProductId},
};

pub mod debounce;

/// Default minimum number of characters a normalized query needs to run.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Result of running a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// The query was too short; no search is active and results were cleared.
    Inactive,

    /// The search ran and nothing matched.
    Empty,

    /// Matching products, in catalog order.
    Matched(Vec<&'a Product<'a>>),
}

impl<'a> SearchOutcome<'a> {
    /// Matching products, empty unless the outcome is [`SearchOutcome::Matched`].
    pub fn products(&self) -> &[&'a Product<'a>] {
        match self {
            SearchOutcome::Matched(products) => products,
            SearchOutcome::Inactive | SearchOutcome::Empty => &[],
        }
    }

    /// Whether a search actually ran.
    pub fn is_active(&self) -> bool {
        !matches!(self, SearchOutcome::Inactive)
    }
}

/// The last executed query and the ids it matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: Option<String>,
    results: Vec<ProductId>,
}

impl SearchState {
    /// The normalized query of the active search, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Ids matched by the active search, in catalog order.
    pub fn results(&self) -> &[ProductId] {
        &self.results
    }

    /// Whether a search is active.
    pub fn is_active(&self) -> bool {
        self.query.is_some()
    }

    /// Forget the active search.
    pub fn clear(&mut self) {
        self.query = None;
        self.results.clear();
    }

    /// Record the outcome of running `query`.
    pub fn record(&mut self, query: &str, outcome: &SearchOutcome<'_>) {
        match outcome {
            SearchOutcome::Inactive => self.clear(),
            SearchOutcome::Empty | SearchOutcome::Matched(_) => {
                self.query = Some(query.to_string());
                self.results = outcome.products().iter().map(|product| product.id).collect();
            }
        }
    }
}

/// Trim and lowercase a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether a normalized query is long enough to run.
pub fn is_searchable(normalized: &str, min_len: usize) -> bool {
    normalized.chars().count() >= min_len
}

/// Iterate over the products matching a normalized query, in catalog order.
pub fn matching<'c, 'a>(
    catalog: &'c Catalog<'a>,
    normalized: &str,
) -> impl Iterator<Item = &'c Product<'a>> {
    catalog
        .iter()
        .filter(move |product| product.matches(normalized))
}

/// Run an already normalized query against the catalog.
pub fn execute<'a>(
    catalog: &'a Catalog<'a>,
    normalized: &str,
    min_len: usize,
) -> SearchOutcome<'a> {
    if !is_searchable(normalized, min_len) {
        return SearchOutcome::Inactive;
    }

    let results: Vec<&'a Product<'a>> = matching(catalog, normalized).collect();

    if results.is_empty() {
        SearchOutcome::Empty
    } else {
        SearchOutcome::Matched(results)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn search<'a>(catalog: &'a Catalog<'a>, raw: &str) -> SearchOutcome<'a> {
        execute(catalog, &normalize_query(raw), DEFAULT_MIN_QUERY_LEN)
    }

    fn names<'a>(outcome: &SearchOutcome<'a>) -> Vec<&'a str> {
        outcome
            .products()
            .iter()
            .map(|&product| product.name.as_str())
            .collect()
    }

    #[test]
    fn short_queries_are_inactive() -> TestResult {
        let catalog = Catalog::seed()?;

        assert_eq!(search(&catalog, ""), SearchOutcome::Inactive);
        assert_eq!(search(&catalog, "a"), SearchOutcome::Inactive);
        assert_eq!(search(&catalog, "  m  "), SearchOutcome::Inactive);

        Ok(())
    }

    #[test]
    fn no_match_is_empty_not_inactive() -> TestResult {
        let catalog = Catalog::seed()?;

        let outcome = search(&catalog, "zz-no-match");

        assert_eq!(outcome, SearchOutcome::Empty);
        assert!(outcome.is_active());

        Ok(())
    }

    #[test]
    fn matches_across_fields_in_catalog_order() -> TestResult {
        let catalog = Catalog::seed()?;

        // "tropical" appears in the pineapple tags and the lemon + guava description.
        let outcome = search(&catalog, "  TROPICAL ");

        assert_eq!(names(&outcome), ["Pineapple Juice", "Lemon + Guava Mix"]);

        Ok(())
    }

    #[test]
    fn matches_category() -> TestResult {
        let catalog = Catalog::seed()?;

        let outcome = search(&catalog, "mixed");

        assert_eq!(
            names(&outcome),
            ["Lemon + Guava Mix", "Mango + Milk Mix", "Berry Mix"]
        );

        Ok(())
    }

    #[test]
    fn min_len_counts_characters_not_bytes() -> TestResult {
        let catalog = Catalog::seed()?;

        assert_eq!(search(&catalog, "é"), SearchOutcome::Inactive);

        Ok(())
    }

    #[test]
    fn state_records_and_clears() -> TestResult {
        let catalog = Catalog::seed()?;
        let mut state = SearchState::default();

        let outcome = search(&catalog, "coffee");
        state.record("coffee", &outcome);

        assert_eq!(state.query(), Some("coffee"));
        assert_eq!(state.results(), [ProductId::new(2)]);

        state.record("c", &SearchOutcome::Inactive);

        assert!(!state.is_active());
        assert!(state.results().is_empty());

        Ok(())
    }
}
