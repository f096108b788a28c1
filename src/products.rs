//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::tags::StringTagCollection;

/// Product identifier, as rendered into the storefront markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a new product identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Product description
    pub description: String,

    /// Optional category, e.g. "citrus"
    pub category: Option<String>,

    /// Product tags
    pub tags: StringTagCollection,

    /// Optional serving size, e.g. "250ml"
    pub size: Option<String>,
}

impl<'a> Product<'a> {
    /// Create a product with no category, tags or size.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money<'a, Currency>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            category: None,
            tags: StringTagCollection::empty(),
            size: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: StringTagCollection) -> Self {
        self.tags = tags;
        self
    }

    /// Set the serving size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Check whether a normalized (trimmed, lowercase) query matches any of the product's text fields.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self
                .category
                .as_deref()
                .is_some_and(|category| category.to_lowercase().contains(query))
            || self.tags.any_contains(query)
    }
}
