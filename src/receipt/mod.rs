//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    pricing::TotalPriceError,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating a line or cart total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Error calculating cart totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One priced line of a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Product name
    pub name: String,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Quantity
    pub quantity: u32,

    /// `unit_price × quantity`
    pub line_total: Money<'a, Currency>,
}

/// A priced snapshot of a cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 10]>,
    item_count: u64,
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Snapshot a cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line or the cart total overflows.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, ReceiptError> {
        let lines = cart
            .iter()
            .map(|line| -> Result<ReceiptLine<'a>, TotalPriceError> {
                Ok(ReceiptLine {
                    name: line.name().to_string(),
                    unit_price: *line.unit_price(),
                    quantity: line.quantity(),
                    line_total: line.line_total()?,
                })
            })
            .collect::<Result<SmallVec<[ReceiptLine<'a>; 10]>, _>>()?;

        let totals = cart.totals()?;

        Ok(Receipt {
            lines,
            item_count: totals.item_count,
            total: totals.grand_total,
        })
    }

    /// Receipt lines in cart order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Grand total.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Write the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.lines.is_empty() {
            return writeln!(out, "\n Your cart is empty\n").map_err(|_err| ReceiptError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Unit Price", "Qty", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                format!("{}", line.unit_price),
                line.quantity.to_string(),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Items: {}", self.item_count).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " \x1b[1mTotal: {}\x1b[0m\n", self.total)
            .map_err(|_err| ReceiptError::IO)
    }
}
