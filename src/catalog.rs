//! Catalog
//!
//! The static, read-only product table a session looks products up in. A catalog is filled once
//! when the storefront starts and only read afterwards; products keep their insertion order, which
//! is also the order search results are returned in.

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{BDT, Currency},
};
use thiserror::Error;

use crate::{
    products::{Product, ProductId},
    tags::StringTagCollection,
};

/// Errors related to catalog construction or lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No product exists with the given id.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// A product with the given id was already inserted.
    #[error("Product {0} already exists in the catalog")]
    DuplicateId(ProductId),

    /// Product ids must be positive.
    #[error("Product ids must be positive, got {0}")]
    InvalidId(ProductId),

    /// A product's currency differs from the catalog currency (product id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// A product's price is negative.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a new, empty catalog priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if any product fails validation, see [`Catalog::insert`].
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Append a product to the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidId`]: The product id is zero.
    /// - [`CatalogError::DuplicateId`]: A product with this id already exists.
    /// - [`CatalogError::CurrencyMismatch`]: The product is priced in another currency.
    /// - [`CatalogError::NegativePrice`]: The unit price is below zero.
    pub fn insert(&mut self, product: Product<'a>) -> Result<&mut Self, CatalogError> {
        let id = product.id;

        if id.get() == 0 {
            return Err(CatalogError::InvalidId(id));
        }

        if self.index.contains_key(&id) {
            return Err(CatalogError::DuplicateId(id));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if product.price.to_minor_units() < 0 {
            return Err(CatalogError::NegativePrice(id));
        }

        self.index.insert(id, self.products.len());
        self.products.push(product);

        Ok(self)
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id.
    pub fn lookup(&self, id: ProductId) -> Result<&Product<'a>, CatalogError> {
        self.get(id).ok_or(CatalogError::NotFound(id))
    }

    /// Get a product by id, if present.
    pub fn get(&self, id: ProductId) -> Option<&Product<'a>> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// Check whether a product id is in the catalog.
    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate over the products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Catalog<'static> {
    /// The storefront's built-in juice menu, priced in Bangladeshi taka.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the table is validated like any other catalog.
    pub fn seed() -> Result<Self, CatalogError> {
        let juice = |id: u32, name: &str, taka: i64, description: &str, category: &str| {
            Product::new(
                ProductId::new(id),
                name,
                Money::from_minor(taka * 100, BDT),
                description,
            )
            .with_category(category)
            .with_size("250ml")
        };

        Catalog::with_products(
            [
                juice(
                    1,
                    "Pineapple Juice",
                    60,
                    "Fresh pineapple juice with tropical sweetness",
                    "citrus",
                )
                .with_tags(StringTagCollection::from_strs(&["tropical"])),
                juice(
                    2,
                    "Gold Coffee",
                    90,
                    "Premium coffee blend with rich golden flavor",
                    "coffee",
                ),
                juice(
                    3,
                    "Watermelon Juice",
                    60,
                    "Refreshing watermelon juice, perfect for summer",
                    "fruit",
                ),
                juice(
                    4,
                    "Lemon + Guava Mix",
                    50,
                    "Zesty lemon mixed with tropical guava",
                    "mixed",
                ),
                juice(
                    5,
                    "Mango + Milk Mix",
                    70,
                    "Creamy mango milkshake with natural sweetness",
                    "mixed",
                ),
                juice(
                    6,
                    "Berry Mix",
                    65,
                    "Antioxidant-rich blend of mixed berries",
                    "berry",
                )
                .with_tags(StringTagCollection::from_strs(&["antioxidant"])),
            ],
            BDT,
        )
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn orchard<'a>() -> [Product<'a>; 2] {
        [
            Product::new(ProductId::new(1), "Orange", Money::from_minor(499, USD), "Juicy"),
            Product::new(ProductId::new(2), "Apple", Money::from_minor(449, USD), "Crisp"),
        ]
    }

    #[test]
    fn lookup_returns_inserted_product() -> TestResult {
        let catalog = Catalog::with_products(orchard(), USD)?;
        let apple = catalog.lookup(ProductId::new(2))?;

        assert_eq!(apple.name, "Apple");
        assert_eq!(apple.price.to_minor_units(), 449);

        Ok(())
    }

    #[test]
    fn lookup_missing_returns_not_found() -> TestResult {
        let catalog = Catalog::with_products(orchard(), USD)?;

        assert_eq!(
            catalog.lookup(ProductId::new(99)).err(),
            Some(CatalogError::NotFound(ProductId::new(99)))
        );

        Ok(())
    }

    #[test]
    fn iter_preserves_insertion_order() -> TestResult {
        let catalog = Catalog::with_products(orchard(), USD)?;
        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["Orange", "Apple"]);

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut products = orchard().to_vec();
        products.push(Product::new(
            ProductId::new(1),
            "Blood Orange",
            Money::from_minor(599, USD),
            "Deep red",
        ));

        let result = Catalog::with_products(products, USD);

        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.get() == 1));
    }

    #[test]
    fn insert_rejects_zero_id() {
        let mut catalog = Catalog::new(USD);
        let result = catalog.insert(Product::new(
            ProductId::new(0),
            "Nothing",
            Money::from_minor(1, USD),
            "",
        ));

        assert!(matches!(result, Err(CatalogError::InvalidId(_))));
    }

    #[test]
    fn insert_rejects_currency_mismatch() {
        let mut catalog = Catalog::new(GBP);
        let result = catalog.insert(Product::new(
            ProductId::new(1),
            "Orange",
            Money::from_minor(499, USD),
            "",
        ));

        match result {
            Err(CatalogError::CurrencyMismatch(id, product_currency, catalog_currency)) => {
                assert_eq!(id.get(), 1);
                assert_eq!(product_currency, USD.iso_alpha_code);
                assert_eq!(catalog_currency, GBP.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn insert_rejects_negative_price() {
        let mut catalog = Catalog::new(USD);
        let result = catalog.insert(Product::new(
            ProductId::new(3),
            "Refund",
            Money::from_minor(-1, USD),
            "",
        ));

        assert!(matches!(result, Err(CatalogError::NegativePrice(_))));
    }

    #[test]
    fn seed_contains_the_juice_menu() -> TestResult {
        let catalog = Catalog::seed()?;

        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.currency(), BDT);

        let coffee = catalog.lookup(ProductId::new(2))?;

        assert_eq!(coffee.name, "Gold Coffee");
        assert_eq!(coffee.price.to_minor_units(), 9000);
        assert_eq!(coffee.category.as_deref(), Some("coffee"));
        assert_eq!(coffee.size.as_deref(), Some("250ml"));

        Ok(())
    }
}
