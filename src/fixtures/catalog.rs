//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{BDT, Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductId},
    tags::StringTagCollection,
};

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Catalog currency code (e.g., "USD")
    pub currency: String,

    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product price (e.g., "4.99 USD")
    pub price: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product category
    #[serde(default)]
    pub category: Option<String>,

    /// Product tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Serving size
    #[serde(default)]
    pub size: Option<String>,
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let tag_refs: Vec<&str> = fixture.tags.iter().map(String::as_str).collect();

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            price: Money::from_minor(minor_units, currency),
            description: fixture.description,
            category: fixture.category,
            tags: StringTagCollection::from_strs(&tag_refs),
            size: fixture.size,
        })
    }
}

/// Look up a supported currency by its ISO code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes other than GBP, USD, EUR and BDT.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "BDT" => Ok(BDT),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "4.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unparseable_amount() {
        let result = parse_price("two USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_supported_currencies() -> Result<(), FixtureError> {
        let (usd_minor, usd) = parse_price("4.99 USD")?;
        let (bdt_minor, bdt) = parse_price("60 BDT")?;

        assert_eq!(usd_minor, 499);
        assert_eq!(usd, USD);
        assert_eq!(bdt_minor, 6000);
        assert_eq!(bdt, BDT);

        Ok(())
    }

    #[test]
    fn product_fixture_converts_to_product() -> Result<(), FixtureError> {
        let fixture = ProductFixture {
            id: 7,
            name: "Kiwi Cooler".to_string(),
            price: "3.25 GBP".to_string(),
            description: "Tart and green".to_string(),
            category: Some("fruit".to_string()),
            tags: vec!["Green".to_string()],
            size: None,
        };

        let product = Product::try_from(fixture)?;

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price, Money::from_minor(325, GBP));
        assert!(product.tags.contains("green"));

        Ok(())
    }
}
