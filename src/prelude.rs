//! Bazaar prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    catalog::{Catalog, CatalogError, Category, CategoryId, NewProduct, Product, ProductId},
    fixtures::{Fixture, FixtureError},
    payments::{Payment, PaymentMethod, PaymentStatus},
    pricing::{PricingError, parse_amount},
    shop::{ErrorKind, Session, ShopError, ShoppingApp},
    users::{Password, SessionToken, User, UserType},
};
