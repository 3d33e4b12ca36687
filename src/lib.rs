//! Bazaar
//!
//! Bazaar is an in-memory demo marketplace: users and sessions, a product catalog, per-session
//! shopping carts and simulated checkout, driven through the [`ShoppingApp`](shop::ShoppingApp)
//! façade.

pub mod cart;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod fixtures;
pub mod observability;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod shop;
pub mod tables;
pub mod users;
