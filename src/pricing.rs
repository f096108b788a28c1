//! Prices

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while calculating line or cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalPriceError {
    /// The total does not fit in the minor-unit representation.
    #[error("total price overflowed")]
    Overflow,

    /// A line is priced in another currency than the total (line currency, total currency).
    #[error("line has currency {0}, but total has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Calculates `unit_price × quantity`.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit in minor units.
pub fn line_total<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let minor_units = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor_units, unit_price.currency()))
}

/// Calculates the sum of `(unit price, quantity)` pairs.
///
/// An empty list totals zero in `currency`.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: The sum does not fit in minor units.
/// - [`TotalPriceError::CurrencyMismatch`]: A price is not in `currency`.
pub fn total_price<'a, 'p>(
    lines: impl IntoIterator<Item = (&'p Money<'a, Currency>, u32)>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError>
where
    'a: 'p,
{
    let minor_units = lines
        .into_iter()
        .try_fold(0i64, |acc, (unit_price, quantity)| {
            if unit_price.currency() != currency {
                return Err(TotalPriceError::CurrencyMismatch(
                    unit_price.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            let line = line_total(unit_price, quantity)?.to_minor_units();

            acc.checked_add(line).ok_or(TotalPriceError::Overflow)
        })?;

    Ok(Money::from_minor(minor_units, currency))
}
