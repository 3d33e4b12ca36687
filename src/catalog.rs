//! Catalog
//!
//! Categories and products, keyed by sequential ids that are never reused.

use std::{collections::BTreeMap, fmt, sync::Arc};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised by catalog mutations.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No product has this id.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// No category has this id.
    #[error("category {0} not found")]
    CategoryNotFound(CategoryId),

    /// A product was given a category that does not exist.
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),

    /// The category still has products (category id, product count).
    #[error("category {0} still has {1} product(s)")]
    CategoryInUse(CategoryId, usize),

    /// Prices must not be negative.
    #[error("price must not be negative, got {0}")]
    NegativePrice(String),

    /// A price is in a different currency to the catalog (price currency, catalog currency).
    #[error("price has currency {0}, but the catalog uses {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Category id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u64);

/// Product id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(u64);

macro_rules! id_conversions {
    ($id:ty) => {
        impl $id {
            /// Wrap a raw id.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// The raw id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $id {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_conversions!(CategoryId);
id_conversions!(ProductId);

/// Category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category id
    pub id: CategoryId,

    /// Category name
    pub name: String,
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// The category this product belongs to
    pub category_id: CategoryId,

    /// Unit price
    pub price: Money<'static, Currency>,
}

/// The fields of a product, used both to create one and to replace one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name
    pub name: String,

    /// Category to file the product under
    pub category_id: CategoryId,

    /// Unit price
    pub price: Money<'static, Currency>,
}

impl NewProduct {
    /// Create new product details.
    pub fn new(
        name: impl Into<String>,
        category_id: CategoryId,
        price: Money<'static, Currency>,
    ) -> Self {
        Self {
            name: name.into(),
            category_id,
            price,
        }
    }
}

/// The store catalog.
///
/// Products are handed out as `Arc<Product>` so cart lines can hold on to the
/// record they were created from after the catalog entry changes or goes away.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: &'static Currency,
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Arc<Product>>,
    next_category_id: u64,
    next_product_id: u64,
}

impl Catalog {
    /// Create an empty catalog priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            categories: BTreeMap::new(),
            products: BTreeMap::new(),
            next_category_id: 1,
            next_product_id: 1,
        }
    }

    /// The currency every price in the catalog is in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Add a category under the next free id.
    pub fn add_category(&mut self, name: impl Into<String>) -> CategoryId {
        let id = CategoryId(self.next_category_id);
        self.next_category_id += 1;

        self.categories.insert(
            id,
            Category {
                id,
                name: name.into(),
            },
        );

        id
    }

    /// Remove a category that no product references.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::CategoryNotFound`]: no such category.
    /// - [`CatalogError::CategoryInUse`]: products still reference it.
    pub fn remove_category(&mut self, id: CategoryId) -> Result<Category, CatalogError> {
        if !self.categories.contains_key(&id) {
            return Err(CatalogError::CategoryNotFound(id));
        }

        let in_use = self.products_in_category(id).count();

        if in_use > 0 {
            return Err(CatalogError::CategoryInUse(id, in_use));
        }

        self.categories
            .remove(&id)
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// Add a product under the next free id.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the category is unknown or the price is
    /// negative or in the wrong currency.
    pub fn add_product(&mut self, details: NewProduct) -> Result<Arc<Product>, CatalogError> {
        self.validate(&details)?;

        let id = ProductId(self.next_product_id);
        self.next_product_id += 1;

        let product = Arc::new(Product {
            id,
            name: details.name,
            category_id: details.category_id,
            price: details.price,
        });

        self.products.insert(id, Arc::clone(&product));

        Ok(product)
    }

    /// Replace every field of an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if there is no such product,
    /// or the same errors as [`Catalog::add_product`] for invalid details.
    pub fn update_product(
        &mut self,
        id: ProductId,
        details: NewProduct,
    ) -> Result<Arc<Product>, CatalogError> {
        if !self.products.contains_key(&id) {
            return Err(CatalogError::ProductNotFound(id));
        }

        self.validate(&details)?;

        let product = Arc::new(Product {
            id,
            name: details.name,
            category_id: details.category_id,
            price: details.price,
        });

        self.products.insert(id, Arc::clone(&product));

        Ok(product)
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if there is no such product.
    pub fn remove_product(&mut self, id: ProductId) -> Result<Arc<Product>, CatalogError> {
        self.products
            .remove(&id)
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Look up a product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.get(&id)
    }

    /// Look up a category.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    /// Products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values().map(|product| &**product)
    }

    /// Categories in id order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Products filed under the given category.
    pub fn products_in_category(&self, id: CategoryId) -> impl Iterator<Item = &Product> {
        self.products()
            .filter(move |product| product.category_id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn validate(&self, details: &NewProduct) -> Result<(), CatalogError> {
        if !self.categories.contains_key(&details.category_id) {
            return Err(CatalogError::UnknownCategory(details.category_id));
        }

        let price_currency = details.price.currency();

        if price_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                price_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if details.price.to_minor_units() < 0 {
            return Err(CatalogError::NegativePrice(details.price.to_string()));
        }

        Ok(())
    }
}
