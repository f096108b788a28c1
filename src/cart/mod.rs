//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{TotalPriceError, total_price},
    products::{Product, ProductId},
};

pub mod line_item;

pub use line_item::LineItem;

/// Smallest quantity a single add can contribute.
pub const MIN_QUANTITY: u32 = 1;

/// Default upper bound for a single add, matching the storefront's quantity selector.
pub const DEFAULT_MAX_QUANTITY: u32 = 10;

/// Errors related to cart mutation or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product id, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// The running quantity of a line no longer fits.
    #[error("Quantity for product {0} overflowed")]
    QuantityOverflow(ProductId),

    /// Wrapped total price error.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Whether an add created a new line or grew an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added {
        /// Quantity of the new line
        quantity: u32,
    },

    /// An existing line's quantity was increased.
    Updated {
        /// Quantity of the line after the update
        quantity: u32,
    },
}

impl CartChange {
    /// Quantity of the affected line after the change.
    pub fn quantity(self) -> u32 {
        match self {
            CartChange::Added { quantity } | CartChange::Updated { quantity } => quantity,
        }
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals<'a> {
    /// Sum of all line quantities
    pub item_count: u64,

    /// Sum of all line totals
    pub grand_total: Money<'a, Currency>,
}

/// Clamp a requested quantity into `[MIN_QUANTITY, max]`.
///
/// Out-of-range requests are clamped rather than rejected, the same way the quantity selector
/// snaps typed values back into range.
pub fn clamp_quantity(requested: i64, max: u32) -> u32 {
    let max = max.max(MIN_QUANTITY);

    u32::try_from(requested.clamp(i64::from(MIN_QUANTITY), i64::from(max))).unwrap_or(max)
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` of `product`, growing the existing line if there is one.
    ///
    /// `quantity` is expected to be clamped already. Repeat adds are summed without re-clamping.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: The product is not priced in the cart currency.
    /// - [`CartError::QuantityOverflow`]: The running quantity does not fit in a `u32`.
    pub fn add(&mut self, product: &Product<'a>, quantity: u32) -> Result<CartChange, CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.line_mut(product.id) {
            let updated = line
                .quantity()
                .checked_add(quantity)
                .ok_or(CartError::QuantityOverflow(product.id))?;

            line.set_quantity(updated);

            return Ok(CartChange::Updated { quantity: updated });
        }

        self.items.push(LineItem::new(product, quantity));

        Ok(CartChange::Added { quantity })
    }

    /// Remove the line for `product`, returning it if it was present.
    pub fn remove(&mut self, product: ProductId) -> Option<LineItem<'a>> {
        let position = self
            .items
            .iter()
            .position(|line| line.product() == product)?;

        Some(self.items.remove(position))
    }

    /// Remove every line, returning them in cart order.
    pub fn clear(&mut self) -> Vec<LineItem<'a>> {
        std::mem::take(&mut self.items)
    }

    /// Get the line for a product.
    pub fn get(&self, product: ProductId) -> Option<&LineItem<'a>> {
        self.items.iter().find(|line| line.product() == product)
    }

    fn line_mut(&mut self, product: ProductId) -> Option<&mut LineItem<'a>> {
        self.items.iter_mut().find(|line| line.product() == product)
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the total overflows.
    pub fn grand_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(
            self.items
                .iter()
                .map(|line| (line.unit_price(), line.quantity())),
            self.currency,
        )
    }

    /// Item count and grand total, computed from the current lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::TotalPrice` if the grand total overflows.
    pub fn totals(&self) -> Result<Totals<'a>, CartError> {
        Ok(Totals {
            item_count: self.item_count(),
            grand_total: self.grand_total()?,
        })
    }

    /// Iterate over the lines in first-add order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
