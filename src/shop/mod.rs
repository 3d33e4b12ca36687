//! Shop
//!
//! The façade callers drive: sessions, privilege checks, cart and catalog
//! mutation, and checkout.

pub mod errors;
pub mod service;
pub mod sessions;

pub use errors::{ErrorKind, ShopError};
pub use service::ShoppingApp;
pub use sessions::Session;
