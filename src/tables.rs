//! Tables
//!
//! Console rendering for the catalog, carts and payments.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    catalog::Catalog,
    payments::Payment,
    pricing::PricingError,
};

/// Errors that can occur while rendering a table.
#[derive(Debug, Error)]
pub enum TablesError {
    /// Error pricing a cart line or total.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Error totalling a cart.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error
    #[error("failed to write table: {0}")]
    Io(#[from] io::Error),
}

/// Write every catalog product, in id order.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_catalog(mut out: impl io::Write, catalog: &Catalog) -> Result<(), TablesError> {
    if catalog.is_empty() {
        writeln!(out, "No products available.")?;

        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Category", "Price"]);

    for product in catalog.products() {
        let category = catalog
            .category(product.category_id)
            .map_or_else(|| "-".to_string(), |category| category.name.clone());

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            category,
            product.price.to_string(),
        ]);
    }

    write_table(&mut out, builder, 3..4)
}

/// Write every category with the number of products filed under it.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_categories(mut out: impl io::Write, catalog: &Catalog) -> Result<(), TablesError> {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Products"]);

    for category in catalog.categories() {
        let products = catalog.products_in_category(category.id).count();

        builder.push_record([
            category.id.to_string(),
            category.name.clone(),
            products.to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..3)
}

/// Write a cart's lines followed by its total.
///
/// # Errors
///
/// Returns an error if a line cannot be priced or the output cannot be
/// written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), TablesError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Item", "Qty", "Price", "Subtotal"]);

    for item in cart.iter() {
        let product = item.product();

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            item.quantity().to_string(),
            product.price.to_string(),
            item.subtotal()?.to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..5)?;

    writeln!(out, "Total: {}", cart.total()?)?;

    Ok(())
}

/// Write a payment summary.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_payment(mut out: impl io::Write, payment: &Payment) -> Result<(), TablesError> {
    let rows = [
        ("Amount", payment.amount().to_string()),
        ("Method", payment.method().to_string()),
        ("Status", payment.status().to_string()),
        ("Paid at", payment.created_at().to_string()),
    ];

    let mut builder = Builder::default();

    for (label, value) in rows {
        builder.push_record([label.to_string(), value]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: std::ops::Range<usize>,
) -> Result<(), TablesError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        catalog::{NewProduct, Product},
        payments::PaymentMethod,
    };

    use super::*;

    fn catalog() -> TestResult<(Catalog, Arc<Product>)> {
        let mut catalog = Catalog::new(USD);
        let boots = catalog.add_category("Boots");
        catalog.add_category("Caps");

        let product = catalog.add_product(NewProduct::new(
            "Leather Boots",
            boots,
            Money::from_minor(19999, USD),
        ))?;

        Ok((catalog, product))
    }

    #[test]
    fn catalog_table_lists_products() -> TestResult {
        let (catalog, _) = catalog()?;
        let mut out = Vec::new();

        write_catalog(&mut out, &catalog)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Leather Boots"), "{rendered}");
        assert!(rendered.contains("Boots"));
        assert!(rendered.contains("$199.99"));

        Ok(())
    }

    #[test]
    fn empty_catalog_prints_notice() -> TestResult {
        let mut out = Vec::new();

        write_catalog(&mut out, &Catalog::new(USD))?;

        assert_eq!(String::from_utf8(out)?, "No products available.\n");

        Ok(())
    }

    #[test]
    fn categories_table_counts_products() -> TestResult {
        let (catalog, _) = catalog()?;
        let mut out = Vec::new();

        write_categories(&mut out, &catalog)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Boots"), "{rendered}");
        assert!(rendered.contains("Caps"));
        assert!(rendered.contains("Products"));

        Ok(())
    }

    #[test]
    fn cart_table_shows_subtotals_and_total() -> TestResult {
        let (_, product) = catalog()?;
        let mut cart = Cart::new(USD);
        cart.add_item(product, 2)?;

        let mut out = Vec::new();
        write_cart(&mut out, &cart)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Leather Boots"), "{rendered}");
        assert!(rendered.contains("$399.98"));
        assert!(rendered.trim_end().ends_with("Total: $399.98"));

        Ok(())
    }

    #[test]
    fn empty_cart_prints_notice() -> TestResult {
        let mut out = Vec::new();

        write_cart(&mut out, &Cart::new(USD))?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn payment_table_shows_method_and_status() -> TestResult {
        let mut payment = Payment::new(Money::from_minor(2999, USD), PaymentMethod::NetBanking);
        payment.process();

        let mut out = Vec::new();
        write_payment(&mut out, &payment)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Net Banking"), "{rendered}");
        assert!(rendered.contains("completed"));
        assert!(rendered.contains("$29.99"));

        Ok(())
    }
}
