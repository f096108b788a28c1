//! Line Items

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{TotalPriceError, line_total},
    products::{Product, ProductId},
};

/// One product and its quantity within a cart.
///
/// The unit price and name are copied from the catalog when the line is created.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    product: ProductId,
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Creates a new line for `product` with the given quantity.
    pub fn new(product: &Product<'a>, quantity: u32) -> Self {
        Self {
            product: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Returns the product of the line
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Returns the product name as it was when the line was created
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price snapshot
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Returns `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        line_total(&self.unit_price, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_snapshots_product_fields() {
        let product = Product::new(ProductId::new(1), "Orange", Money::from_minor(499, USD), "");
        let line = LineItem::new(&product, 2);

        assert_eq!(line.product(), ProductId::new(1));
        assert_eq!(line.name(), "Orange");
        assert_eq!(line.unit_price(), &Money::from_minor(499, USD));
        assert_eq!(line.quantity(), 2);
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() -> TestResult {
        let product = Product::new(ProductId::new(1), "Orange", Money::from_minor(499, USD), "");
        let line = LineItem::new(&product, 3);

        assert_eq!(line.line_total()?, Money::from_minor(1497, USD));

        Ok(())
    }
}
