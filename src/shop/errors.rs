//! Shop errors.

use thiserror::Error;

use crate::{cart::CartError, catalog::CatalogError, pricing::PricingError, users::UserType};

/// The broad class of a [`ShopError`]. Every rejection falls into exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No active session.
    Unauthenticated,

    /// The session's role may not perform the operation.
    Unauthorized,

    /// A quantity, price or id was unacceptable.
    InvalidArgument,

    /// A referenced id does not exist.
    NotFound,

    /// The operation would break a relationship (e.g. a category still in use).
    Conflict,

    /// Checkout was attempted on an empty cart.
    EmptyCart,
}

/// Errors returned by [`ShoppingApp`](crate::shop::ShoppingApp) operations.
#[derive(Debug, Error, PartialEq)]
pub enum ShopError {
    /// The session token is unknown or has been logged out.
    #[error("please log in first")]
    Unauthenticated,

    /// The username/password pair did not match a user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The session's role does not match the operation.
    #[error("this operation requires the {required} role")]
    Unauthorized {
        /// The role the operation needs.
        required: UserType,
    },

    /// A user with this name already exists.
    #[error("username {0} is already taken")]
    UsernameTaken(String),

    /// Checkout needs at least one cart line.
    #[error("cart is empty")]
    EmptyCart,

    /// Cart mutation error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Catalog mutation error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Price parsing or arithmetic error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl ShopError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated | Self::InvalidCredentials => ErrorKind::Unauthenticated,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::UsernameTaken(_) => ErrorKind::Conflict,
            Self::EmptyCart => ErrorKind::EmptyCart,
            Self::Cart(CartError::ItemNotFound(_)) => ErrorKind::NotFound,
            Self::Cart(
                CartError::NonPositiveQuantity(_)
                | CartError::NegativeQuantity(_)
                | CartError::QuantityTooLarge(_)
                | CartError::CurrencyMismatch(..)
                | CartError::Pricing(_),
            )
            | Self::Pricing(_) => ErrorKind::InvalidArgument,
            Self::Catalog(error) => match error {
                CatalogError::ProductNotFound(_) | CatalogError::CategoryNotFound(_) => {
                    ErrorKind::NotFound
                }
                CatalogError::CategoryInUse(..) => ErrorKind::Conflict,
                CatalogError::UnknownCategory(_)
                | CatalogError::NegativePrice(_)
                | CatalogError::CurrencyMismatch(..) => ErrorKind::InvalidArgument,
            },
        }
    }
}
