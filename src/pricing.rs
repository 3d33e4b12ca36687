//! Pricing
//!
//! Exact money arithmetic on minor units. Nothing here touches floating point.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while parsing or combining prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The amount text could not be parsed as a decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The amount is below zero.
    #[error("amount must not be negative: {0}")]
    NegativeAmount(String),

    /// A multiplication or sum does not fit in minor units.
    #[error("amount overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Parse a decimal amount (e.g. `"199.99"`) into money of the given currency.
///
/// The amount is rounded to the currency's minor unit.
///
/// # Errors
///
/// - [`PricingError::InvalidAmount`]: the text is not a decimal number.
/// - [`PricingError::NegativeAmount`]: the amount is below zero.
/// - [`PricingError::Overflow`]: the amount does not fit in minor units.
pub fn parse_amount(
    text: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let trimmed = text.trim();
    let amount = trimmed
        .trim_start_matches(currency.symbol)
        .parse::<Decimal>()
        .map_err(|_err| PricingError::InvalidAmount(trimmed.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::NegativeAmount(trimmed.to_string()));
    }

    let scale = Decimal::from(10_i64.pow(currency.exponent));
    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total(
    unit_price: Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor_units = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor_units, unit_price.currency()))
}

/// Sum of the given amounts, starting from zero in `currency`.
///
/// # Errors
///
/// Returns [`PricingError::Money`] if any amount is in a different currency.
pub fn total_price(
    amounts: impl IntoIterator<Item = Money<'static, Currency>>,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let zero = Money::from_minor(0, currency);
    let total = amounts
        .into_iter()
        .try_fold(zero, |acc, amount| acc.add(amount))?;

    Ok(total)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_amount_rounds_to_minor_units() -> TestResult {
        assert_eq!(parse_amount("199.99", USD)?, Money::from_minor(19999, USD));
        assert_eq!(parse_amount(" 10 ", USD)?, Money::from_minor(1000, USD));
        assert_eq!(parse_amount("0.125", USD)?, Money::from_minor(12, USD));

        Ok(())
    }

    #[test]
    fn parse_amount_accepts_currency_symbol() -> TestResult {
        assert_eq!(parse_amount("$29.99", USD)?, Money::from_minor(2999, USD));

        Ok(())
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        let result = parse_amount("twelve", USD);

        assert!(matches!(
            result,
            Err(PricingError::InvalidAmount(text)) if text == "twelve"
        ));
    }

    #[test]
    fn parse_amount_rejects_negative() {
        let result = parse_amount("-1.00", USD);

        assert!(matches!(result, Err(PricingError::NegativeAmount(_))));
    }

    #[test]
    fn line_total_multiplies_exactly() -> TestResult {
        let total = line_total(Money::from_minor(19999, USD), 2)?;

        assert_eq!(total, Money::from_minor(39998, USD));

        Ok(())
    }

    #[test]
    fn line_total_reports_overflow() {
        let result = line_total(Money::from_minor(i64::MAX, USD), 2);

        assert_eq!(result, Err(PricingError::Overflow));
    }

    #[test]
    fn total_price_of_nothing_is_zero() -> TestResult {
        let total = total_price([], GBP)?;

        assert_eq!(total, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn total_price_sums_amounts() -> TestResult {
        let amounts = [
            Money::from_minor(39998, USD),
            Money::from_minor(24999, USD),
        ];

        assert_eq!(total_price(amounts, USD)?, Money::from_minor(64997, USD));

        Ok(())
    }

    #[test]
    fn total_price_rejects_mixed_currencies() {
        let amounts = [Money::from_minor(100, USD), Money::from_minor(100, GBP)];

        assert!(matches!(
            total_price(amounts, USD),
            Err(PricingError::Money(_))
        ));
    }
}
