//! Sessions

use rusty_money::iso::Currency;

use crate::{cart::Cart, users::UserType};

/// One authenticated session and the cart it owns.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    user_type: UserType,
    cart: Cart,
}

impl Session {
    pub(crate) fn new(username: &str, user_type: UserType, currency: &'static Currency) -> Self {
        Self {
            username: username.to_string(),
            user_type,
            cart: Cart::new(currency),
        }
    }

    /// The logged-in user's name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The logged-in user's role.
    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub(crate) fn cart(&self) -> &Cart {
        &self.cart
    }

    pub(crate) fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}
