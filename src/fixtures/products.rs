//! Product Fixtures

use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, pricing::parse_amount};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Name of the category the product is filed under
    pub category: String,

    /// Product price (e.g., "199.99 USD")
    pub price: String,
}

/// Parse price string (e.g., "199.99 USD") into money.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let Some((amount, currency_code)) = s.trim().split_once(char::is_whitespace) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = parse_currency(currency_code.trim())?;

    parse_amount(amount, currency)
        .map_err(|err| FixtureError::InvalidPrice(format!("{s}: {err}")))
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes the store does not trade in.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "INR" => Ok(INR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
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
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(
            result,
            Err(FixtureError::UnknownCurrency(code)) if code == "ABC"
        ));
    }

    #[test]
    fn parse_price_rejects_negative_amount() {
        let result = parse_price("-5.00 USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_accepts_known_currencies() -> Result<(), FixtureError> {
        assert_eq!(parse_price("199.99 USD")?, Money::from_minor(19999, USD));
        assert_eq!(parse_price("2.50 EUR")?, Money::from_minor(250, EUR));
        assert_eq!(parse_price("1 GBP")?, Money::from_minor(100, GBP));
        assert_eq!(parse_price("499 INR")?, Money::from_minor(49900, INR));

        Ok(())
    }
}
