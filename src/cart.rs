//! Cart

use std::{collections::BTreeMap, sync::Arc};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::{Product, ProductId},
    pricing::{PricingError, line_total, total_price},
};

/// Errors related to cart mutation or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities added to a cart must be at least one.
    #[error("quantity must be greater than 0, got {0}")]
    NonPositiveQuantity(i64),

    /// Quantities set on a cart line must not be negative.
    #[error("quantity must not be negative, got {0}")]
    NegativeQuantity(i64),

    /// The resulting quantity does not fit in a cart line.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),

    /// The product has no line in this cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// Wrapped price arithmetic error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A cart line: a product and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    product: Arc<Product>,
    quantity: u32,
}

impl CartItem {
    /// The product as it was when first added to the cart.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the subtotal does not fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        line_total(self.product.price, self.quantity)
    }
}

/// A shopping cart, one line per product.
#[derive(Debug, Clone)]
pub struct Cart {
    items: BTreeMap<ProductId, CartItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: BTreeMap::new(),
            currency,
        }
    }

    /// Add `quantity` of `product`.
    ///
    /// If the product already has a line its quantity is increased; the line
    /// keeps the product record it was created with.
    ///
    /// # Errors
    ///
    /// - [`CartError::NonPositiveQuantity`]: `quantity` is zero or negative.
    /// - [`CartError::QuantityTooLarge`]: the new line quantity overflows.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn add_item(&mut self, product: Arc<Product>, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::NonPositiveQuantity(quantity));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let added =
            u32::try_from(quantity).map_err(|_err| CartError::QuantityTooLarge(quantity))?;

        if let Some(item) = self.items.get_mut(&product.id) {
            item.quantity = item
                .quantity
                .checked_add(added)
                .ok_or(CartError::QuantityTooLarge(quantity))?;

            return Ok(());
        }

        self.items.insert(
            product.id,
            CartItem {
                product,
                quantity: added,
            },
        );

        Ok(())
    }

    /// Remove the line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if there is no such line.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<CartItem, CartError> {
        self.items
            .remove(&product_id)
            .ok_or(CartError::ItemNotFound(product_id))
    }

    /// Set the quantity of an existing line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::ItemNotFound`]: there is no such line.
    /// - [`CartError::NegativeQuantity`]: `quantity` is below zero.
    /// - [`CartError::QuantityTooLarge`]: `quantity` does not fit in a line.
    pub fn update_item(&mut self, product_id: ProductId, quantity: i64) -> Result<(), CartError> {
        if !self.items.contains_key(&product_id) {
            return Err(CartError::ItemNotFound(product_id));
        }

        if quantity < 0 {
            return Err(CartError::NegativeQuantity(quantity));
        }

        if quantity == 0 {
            self.items.remove(&product_id);

            return Ok(());
        }

        let quantity =
            u32::try_from(quantity).map_err(|_err| CartError::QuantityTooLarge(quantity))?;

        if let Some(item) = self.items.get_mut(&product_id) {
            item.quantity = quantity;
        }

        Ok(())
    }

    /// Sum of every line's subtotal. Zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Pricing`] if a subtotal or the sum overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        let subtotals = self
            .items
            .values()
            .map(CartItem::subtotal)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(total_price(subtotals, self.currency)?)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get_item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.get(&product_id)
    }

    /// Iterate over the lines in product id order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
