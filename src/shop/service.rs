//! Shopping app service.

use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};

use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogError, CategoryId, NewProduct, ProductId},
    payments::{Payment, PaymentMethod},
    shop::{errors::ShopError, sessions::Session},
    users::{SessionToken, User, UserType},
};

/// The marketplace.
///
/// Owns the users, the catalog, every live session with its cart, and the
/// payments taken at checkout. Each call names the session it acts for.
#[derive(Debug)]
pub struct ShoppingApp {
    users: FxHashMap<String, User>,
    catalog: Catalog,
    sessions: FxHashMap<SessionToken, Session>,
    payments: Vec<Payment>,
}

impl ShoppingApp {
    /// Create a marketplace with no users around the given catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            users: FxHashMap::default(),
            catalog,
            sessions: FxHashMap::default(),
            payments: Vec::new(),
        }
    }

    /// Register a new, logged-out shopper. Open to anyone.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::UsernameTaken`] if the name is already registered.
    #[instrument(skip(self, password))]
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), ShopError> {
        self.insert_user(User::new(username, password, UserType::Regular))
    }

    /// Create a user of any role on behalf of an admin.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not an admin, or
    /// the name is already registered.
    #[instrument(skip(self, password))]
    pub fn create_user(
        &mut self,
        token: SessionToken,
        username: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<(), ShopError> {
        self.authorize(token, UserType::Admin)?;

        self.insert_user(User::new(username, password, user_type))
    }

    /// Add a seeded user without a session check.
    pub(crate) fn insert_user(&mut self, user: User) -> Result<(), ShopError> {
        if self.users.contains_key(user.username()) {
            debug!(username = user.username(), "username already taken");

            return Err(ShopError::UsernameTaken(user.username().to_string()));
        }

        info!(username = user.username(), user_type = %user.user_type(), "registered user");

        self.users.insert(user.username().to_string(), user);

        Ok(())
    }

    /// Log a user in and open a session for them.
    ///
    /// A user has at most one session: logging in again ends the previous one
    /// and discards its cart.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::InvalidCredentials`] if the user is unknown or the
    /// password is wrong. Existing sessions are untouched in that case.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, username: &str, password: &str) -> Result<SessionToken, ShopError> {
        let Some(user) = self.users.get_mut(username) else {
            debug!("unknown username");

            return Err(ShopError::InvalidCredentials);
        };

        let previous = user.session();

        let Some(token) = user.login(password) else {
            debug!("wrong password");

            return Err(ShopError::InvalidCredentials);
        };

        if let Some(previous) = previous {
            self.sessions.remove(&previous);
        }

        self.sessions.insert(
            token,
            Session::new(username, user.user_type(), self.catalog.currency()),
        );

        info!(session = %token, user_type = %user.user_type(), "logged in");

        Ok(token)
    }

    /// End a session. Unknown or already-ended tokens are ignored.
    #[instrument(skip(self))]
    pub fn logout(&mut self, token: SessionToken) {
        let Some(session) = self.sessions.remove(&token) else {
            return;
        };

        if let Some(user) = self.users.get_mut(session.username()) {
            user.logout();
        }

        info!(username = session.username(), "logged out");
    }

    /// Look up a live session.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Unauthenticated`] if the token has no session.
    pub fn session(&self, token: SessionToken) -> Result<&Session, ShopError> {
        self.sessions.get(&token).ok_or(ShopError::Unauthenticated)
    }

    /// Look up a user by name.
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// The catalog, for browsing.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Payments taken so far, oldest first.
    #[must_use]
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// The shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Unauthenticated`] without a session, or
    /// [`ShopError::Unauthorized`] for an admin session.
    pub fn cart(&self, token: SessionToken) -> Result<&Cart, ShopError> {
        self.authorize(token, UserType::Regular).map(Session::cart)
    }

    /// Add `quantity` of a catalog product to the shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not a shopper, the
    /// product does not exist, or the quantity is not positive.
    #[instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        token: SessionToken,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), ShopError> {
        self.authorize(token, UserType::Regular)?;

        let product = self
            .catalog
            .product(product_id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(product_id))?;

        self.cart_mut(token)?.add_item(product, quantity)?;

        info!("added to cart");

        Ok(())
    }

    /// Remove a product's line from the shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not a shopper, or
    /// the product is not in the cart.
    #[instrument(skip(self))]
    pub fn remove_from_cart(
        &mut self,
        token: SessionToken,
        product_id: ProductId,
    ) -> Result<(), ShopError> {
        self.cart_mut(token)?.remove_item(product_id)?;

        info!("removed from cart");

        Ok(())
    }

    /// Set the quantity of a line in the shopper's cart. Zero removes it.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not a shopper, the
    /// product is not in the cart, or the quantity is negative.
    #[instrument(skip(self))]
    pub fn update_cart_item(
        &mut self,
        token: SessionToken,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), ShopError> {
        self.cart_mut(token)?.update_item(product_id, quantity)?;

        info!("updated cart line");

        Ok(())
    }

    /// Pay for the shopper's cart and empty it.
    ///
    /// The total is taken before the cart is cleared. The returned payment is
    /// completed and also kept in [`ShoppingApp::payments`].
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::EmptyCart`] for an empty cart (no payment is
    /// created), or a session error as for the other shopper operations.
    #[instrument(skip(self))]
    pub fn checkout(
        &mut self,
        token: SessionToken,
        method: PaymentMethod,
    ) -> Result<Payment, ShopError> {
        let cart = self.cart_mut(token)?;

        if cart.is_empty() {
            debug!("checkout with empty cart");

            return Err(ShopError::EmptyCart);
        }

        let mut payment = Payment::new(cart.total()?, method);
        payment.process();
        cart.clear();

        info!(amount = %payment.amount(), "checked out");

        self.payments.push(payment.clone());

        Ok(payment)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not an admin, or the
    /// details are invalid.
    #[instrument(skip(self))]
    pub fn add_product(
        &mut self,
        token: SessionToken,
        details: NewProduct,
    ) -> Result<ProductId, ShopError> {
        self.authorize(token, UserType::Admin)?;

        let product = self.catalog.add_product(details)?;

        info!(product_id = %product.id, "added product");

        Ok(product.id)
    }

    /// Replace a catalog product.
    ///
    /// Carts that already hold the product keep the old record.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not an admin, the
    /// product does not exist, or the details are invalid.
    #[instrument(skip(self))]
    pub fn update_product(
        &mut self,
        token: SessionToken,
        product_id: ProductId,
        details: NewProduct,
    ) -> Result<(), ShopError> {
        self.authorize(token, UserType::Admin)?;

        self.catalog.update_product(product_id, details)?;

        info!("updated product");

        Ok(())
    }

    /// Remove a product from the catalog.
    ///
    /// Carts that already hold the product keep their line.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not an admin, or the
    /// product does not exist.
    #[instrument(skip(self))]
    pub fn remove_product(
        &mut self,
        token: SessionToken,
        product_id: ProductId,
    ) -> Result<(), ShopError> {
        self.authorize(token, UserType::Admin)?;

        self.catalog.remove_product(product_id)?;

        info!("removed product");

        Ok(())
    }

    /// Add a category to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not an admin.
    #[instrument(skip(self))]
    pub fn add_category(
        &mut self,
        token: SessionToken,
        name: &str,
    ) -> Result<CategoryId, ShopError> {
        self.authorize(token, UserType::Admin)?;

        let category_id = self.catalog.add_category(name);

        info!(%category_id, "added category");

        Ok(category_id)
    }

    /// Remove a category no product uses.
    ///
    /// # Errors
    ///
    /// Returns a [`ShopError`] if the session is missing or not an admin, the
    /// category does not exist, or products still reference it.
    #[instrument(skip(self))]
    pub fn remove_category(
        &mut self,
        token: SessionToken,
        category_id: CategoryId,
    ) -> Result<(), ShopError> {
        self.authorize(token, UserType::Admin)?;

        self.catalog.remove_category(category_id)?;

        info!("removed category");

        Ok(())
    }

    fn authorize(&self, token: SessionToken, required: UserType) -> Result<&Session, ShopError> {
        let session = self.session(token)?;

        if session.user_type() != required {
            debug!(%required, actual = %session.user_type(), "role check failed");

            return Err(ShopError::Unauthorized { required });
        }

        Ok(session)
    }

    fn cart_mut(&mut self, token: SessionToken) -> Result<&mut Cart, ShopError> {
        self.authorize(token, UserType::Regular)?;

        self.sessions
            .get_mut(&token)
            .map(Session::cart_mut)
            .ok_or(ShopError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::shop::errors::ErrorKind;

    use super::*;

    fn app() -> TestResult<(ShoppingApp, ProductId)> {
        let mut catalog = Catalog::new(USD);
        let boots = catalog.add_category("Boots");
        let product = catalog.add_product(NewProduct::new(
            "Leather Boots",
            boots,
            Money::from_minor(19999, USD),
        ))?;

        let mut app = ShoppingApp::new(catalog);
        app.register("user1", "pass123")?;
        app.insert_user(User::new("admin", "admin123", UserType::Admin))?;

        Ok((app, product.id))
    }

    #[test]
    fn login_opens_session_and_marks_user_authenticated() -> TestResult {
        let (mut app, _) = app()?;

        let token = app.login("user1", "pass123")?;

        assert_eq!(app.session(token)?.username(), "user1");
        assert_eq!(
            app.user("user1").and_then(User::session),
            Some(token),
            "user should hold the session token"
        );

        Ok(())
    }

    #[test]
    fn login_rejects_unknown_user_and_bad_password() -> TestResult {
        let (mut app, _) = app()?;

        assert_eq!(
            app.login("nobody", "pass123"),
            Err(ShopError::InvalidCredentials)
        );
        assert_eq!(
            app.login("user1", "wrong"),
            Err(ShopError::InvalidCredentials)
        );
        assert!(!app.user("user1").is_some_and(User::is_authenticated));

        Ok(())
    }

    #[test]
    fn failed_login_keeps_existing_session() -> TestResult {
        let (mut app, _) = app()?;
        let token = app.login("user1", "pass123")?;

        assert!(app.login("user1", "wrong").is_err());
        assert!(app.session(token).is_ok());

        Ok(())
    }

    #[test]
    fn second_login_replaces_first_session() -> TestResult {
        let (mut app, product_id) = app()?;
        let first = app.login("user1", "pass123")?;
        app.add_to_cart(first, product_id, 1)?;

        let second = app.login("user1", "pass123")?;

        assert_eq!(app.session(first).err(), Some(ShopError::Unauthenticated));
        assert!(app.cart(second)?.is_empty());

        Ok(())
    }

    #[test]
    fn logout_ends_session_and_is_idempotent() -> TestResult {
        let (mut app, _) = app()?;
        let token = app.login("user1", "pass123")?;

        app.logout(token);
        app.logout(token);

        assert_eq!(app.cart(token).err(), Some(ShopError::Unauthenticated));
        assert!(!app.user("user1").is_some_and(User::is_authenticated));

        Ok(())
    }

    #[test]
    fn register_rejects_taken_username() -> TestResult {
        let (mut app, _) = app()?;

        let admin = app.login("admin", "admin123")?;

        let result = app.register("user1", "other");
        let created = app.create_user(admin, "user1", "other", UserType::Admin);

        assert_eq!(result, Err(ShopError::UsernameTaken("user1".to_string())));
        assert_eq!(created, Err(ShopError::UsernameTaken("user1".to_string())));
        assert_eq!(
            app.user("user1").map(User::user_type),
            Some(UserType::Regular)
        );

        Ok(())
    }

    #[test]
    fn open_registration_creates_shoppers_only() -> TestResult {
        let (mut app, product_id) = app()?;

        app.register("mallory", "secret")?;
        let token = app.login("mallory", "secret")?;

        assert_eq!(
            app.user("mallory").map(User::user_type),
            Some(UserType::Regular)
        );
        assert_eq!(
            app.remove_product(token, product_id),
            Err(ShopError::Unauthorized {
                required: UserType::Admin
            })
        );
        assert!(app.catalog().product(product_id).is_some());

        Ok(())
    }

    #[test]
    fn only_admins_create_users() -> TestResult {
        let (mut app, _) = app()?;
        let shopper = app.login("user1", "pass123")?;
        let admin = app.login("admin", "admin123")?;

        let by_shopper = app.create_user(shopper, "eve", "secret", UserType::Admin);

        assert_eq!(
            by_shopper.map_err(|error| error.kind()),
            Err(ErrorKind::Unauthorized)
        );
        assert!(app.user("eve").is_none());

        app.create_user(admin, "clerk", "secret", UserType::Admin)?;
        let clerk = app.login("clerk", "secret")?;

        assert_eq!(app.session(clerk)?.user_type(), UserType::Admin);

        Ok(())
    }

    #[test]
    fn admin_has_no_cart() -> TestResult {
        let (mut app, product_id) = app()?;
        let admin = app.login("admin", "admin123")?;

        let cart = app.cart(admin).map(Cart::len);
        let add = app.add_to_cart(admin, product_id, 1);

        assert_eq!(
            cart.map_err(|error| error.kind()),
            Err(ErrorKind::Unauthorized)
        );
        assert_eq!(
            add.map_err(|error| error.kind()),
            Err(ErrorKind::Unauthorized)
        );

        Ok(())
    }

    #[test]
    fn add_to_cart_unknown_product_is_not_found() -> TestResult {
        let (mut app, _) = app()?;
        let token = app.login("user1", "pass123")?;

        let result = app.add_to_cart(token, ProductId::new(99), 1);

        assert_eq!(
            result,
            Err(ShopError::Catalog(CatalogError::ProductNotFound(
                ProductId::new(99)
            )))
        );

        Ok(())
    }

    #[test]
    fn checkout_records_completed_payment() -> TestResult {
        let (mut app, product_id) = app()?;
        let token = app.login("user1", "pass123")?;
        app.add_to_cart(token, product_id, 2)?;

        let payment = app.checkout(token, PaymentMethod::CreditCard)?;

        assert!(payment.is_completed());
        assert_eq!(payment.amount(), Money::from_minor(39998, USD));
        assert_eq!(app.payments(), [payment]);
        assert!(app.cart(token)?.is_empty());

        Ok(())
    }

    #[test]
    fn checkout_empty_cart_creates_no_payment() -> TestResult {
        let (mut app, _) = app()?;
        let token = app.login("user1", "pass123")?;

        let result = app.checkout(token, PaymentMethod::Upi);

        assert_eq!(result, Err(ShopError::EmptyCart));
        assert!(app.payments().is_empty());

        Ok(())
    }
}
