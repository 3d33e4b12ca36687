//! Fixtures
//!
//! Seed data for a marketplace: the store currency, users, categories and
//! products, read from YAML.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, NewProduct},
    fixtures::products::{ProductFixture, parse_currency, parse_price},
    shop::{ShopError, ShoppingApp},
    users::{User, UserType},
};

pub mod products;

/// The seed data shipped with the crate.
pub const DEFAULT_FIXTURE: &str = include_str!("../../fixtures/default.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the store and a product
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// A product names a category that is not listed
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The same category name is listed twice
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// User registration error
    #[error("Failed to register user: {0}")]
    User(#[from] ShopError),
}

/// User Fixture
#[derive(Debug, Deserialize)]
pub struct UserFixture {
    /// Plain-text password
    pub password: String,

    /// `user`/`regular` or `admin`
    pub role: UserType,
}

/// Fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    /// ISO code of the store currency
    pub currency: String,

    /// Map of username -> user fixture
    #[serde(default)]
    pub users: FxHashMap<String, UserFixture>,

    /// Category names, in id order
    #[serde(default)]
    pub categories: Vec<String>,

    /// Products, in id order
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

impl Fixture {
    /// Parse the seed data shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded YAML is malformed.
    pub fn embedded() -> Result<Self, FixtureError> {
        Self::parse(DEFAULT_FIXTURE)
    }

    /// Parse fixture YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed.
    pub fn parse(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a fixture YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents)
    }

    /// Build the catalog described by this fixture.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown currencies, malformed prices, or products
    /// that reference unlisted categories.
    pub fn catalog(&self) -> Result<Catalog, FixtureError> {
        let currency = parse_currency(&self.currency)?;
        let mut catalog = Catalog::new(currency);
        let mut category_ids = FxHashMap::default();

        for name in &self.categories {
            if category_ids.contains_key(name.as_str()) {
                return Err(FixtureError::DuplicateCategory(name.clone()));
            }

            category_ids.insert(name.as_str(), catalog.add_category(name.as_str()));
        }

        for product in &self.products {
            let price = parse_price(&product.price)?;

            if price.currency() != currency {
                return Err(FixtureError::CurrencyMismatch(
                    currency.iso_alpha_code.to_string(),
                    price.currency().iso_alpha_code.to_string(),
                ));
            }

            let category_id = category_ids
                .get(product.category.as_str())
                .copied()
                .ok_or_else(|| FixtureError::CategoryNotFound(product.category.clone()))?;

            catalog.add_product(NewProduct::new(product.name.as_str(), category_id, price))?;
        }

        Ok(catalog)
    }

    /// Build a marketplace with this fixture's catalog and users.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be built.
    pub fn into_app(self) -> Result<ShoppingApp, FixtureError> {
        let mut app = ShoppingApp::new(self.catalog()?);

        for (username, user) in self.users {
            app.insert_user(User::new(username, user.password, user.role))?;
        }

        Ok(app)
    }
}
