//! Interactive shell
//!
//! A numbered text menu over a [`ShoppingApp`]. Input and output are generic
//! so the whole conversation can be scripted.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{CategoryId, NewProduct, ProductId},
    payments::PaymentMethod,
    pricing::{PricingError, parse_amount},
    shop::{ShopError, ShoppingApp},
    tables::{TablesError, write_cart, write_catalog, write_categories, write_payment},
    users::{SessionToken, UserType},
};

const BANNER_WIDTH: usize = 50;

/// Errors raised while running the shell.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input stream ended.
    #[error("end of input")]
    EndOfInput,

    /// A prompt expected a number.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// A menu choice that does not exist.
    #[error("invalid choice: {0:?}")]
    InvalidChoice(String),

    /// A price could not be parsed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The marketplace rejected the operation.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// Table rendering error.
    #[error(transparent)]
    Tables(#[from] TablesError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Whether the shell reports this error and returns to the menu.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber(_) | Self::InvalidChoice(_) | Self::Pricing(_) | Self::Shop(_)
        )
    }
}

/// The interactive shell.
#[derive(Debug)]
pub struct Shell<R, W> {
    app: ShoppingApp,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell over a marketplace.
    pub fn new(app: ShoppingApp, input: R, output: W) -> Self {
        Self { app, input, output }
    }

    /// Run the main menu until the user exits or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output cannot be written or the input
    /// cannot be read. Rejected operations are reported and the menu loops.
    pub fn run(&mut self) -> Result<(), CliError> {
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(
            self.output,
            "{banner}\nWelcome to the Demo Marketplace!\n{banner}"
        )?;

        match self.main_menu() {
            Ok(()) | Err(CliError::EndOfInput) => {
                writeln!(self.output, "Goodbye!")?;

                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn main_menu(&mut self) -> Result<(), CliError> {
        loop {
            writeln!(self.output, "\n1. Login\n2. Register\n3. Exit")?;

            let result = match self.prompt("Enter your choice: ")?.as_str() {
                "1" => self.login(),
                "2" => self.register(),
                "3" => return Ok(()),
                other => Err(CliError::InvalidChoice(other.to_string())),
            };

            self.recover(result)?;
        }
    }

    fn login(&mut self) -> Result<(), CliError> {
        let username = self.prompt("Username: ")?;
        let password = self.prompt("Password: ")?;

        let token = self.app.login(&username, &password)?;
        writeln!(self.output, "Login successful!")?;

        match self.app.session(token)?.user_type() {
            UserType::Admin => self.admin_menu(token),
            UserType::Regular => self.user_menu(token),
        }
    }

    fn register(&mut self) -> Result<(), CliError> {
        let username = self.prompt("Username: ")?;
        let password = self.prompt("Password: ")?;

        self.app.register(&username, &password)?;
        writeln!(self.output, "Registered {username}. You can now log in.")?;

        Ok(())
    }

    fn add_user(&mut self, token: SessionToken) -> Result<(), CliError> {
        let username = self.prompt("Username: ")?;
        let password = self.prompt("Password: ")?;

        let role = self.prompt("Role (1. Regular, 2. Admin): ")?;
        let user_type = match role.as_str() {
            "1" => UserType::Regular,
            "2" => UserType::Admin,
            _ => return Err(CliError::InvalidChoice(role)),
        };

        self.app.create_user(token, &username, &password, user_type)?;
        writeln!(self.output, "Created {user_type} user {username}.")?;

        Ok(())
    }

    fn admin_menu(&mut self, token: SessionToken) -> Result<(), CliError> {
        loop {
            writeln!(
                self.output,
                "\nAdmin Menu:\n1. View Catalog\n2. Add Product\n3. Update Product\n\
                 4. Remove Product\n5. View Categories\n6. Add Category\n\
                 7. Remove Category\n8. Add User\n9. Logout"
            )?;

            let result = match self.prompt("Enter your choice: ")?.as_str() {
                "1" => self.view_catalog(),
                "2" => self.add_product(token),
                "3" => self.update_product(token),
                "4" => self.remove_product(token),
                "5" => self.view_categories(),
                "6" => self.add_category(token),
                "7" => self.remove_category(token),
                "8" => self.add_user(token),
                "9" => return self.logout(token),
                other => Err(CliError::InvalidChoice(other.to_string())),
            };

            self.recover(result)?;
        }
    }

    fn user_menu(&mut self, token: SessionToken) -> Result<(), CliError> {
        loop {
            writeln!(
                self.output,
                "\nUser Menu:\n1. View Products\n2. Add to Cart\n3. Remove from Cart\n\
                 4. Update Quantity\n5. View Cart\n6. Checkout\n7. Logout"
            )?;

            let result = match self.prompt("Enter your choice: ")?.as_str() {
                "1" => self.view_catalog(),
                "2" => self.add_to_cart(token),
                "3" => self.remove_from_cart(token),
                "4" => self.update_cart_item(token),
                "5" => self.view_cart(token),
                "6" => self.checkout(token),
                "7" => return self.logout(token),
                other => Err(CliError::InvalidChoice(other.to_string())),
            };

            self.recover(result)?;
        }
    }

    fn logout(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.app.logout(token);
        writeln!(self.output, "Logged out successfully!")?;

        Ok(())
    }

    fn view_catalog(&mut self) -> Result<(), CliError> {
        Ok(write_catalog(&mut self.output, self.app.catalog())?)
    }

    fn view_categories(&mut self) -> Result<(), CliError> {
        Ok(write_categories(&mut self.output, self.app.catalog())?)
    }

    fn view_cart(&mut self, token: SessionToken) -> Result<(), CliError> {
        let cart = self.app.cart(token)?;

        Ok(write_cart(&mut self.output, cart)?)
    }

    fn product_details(&mut self) -> Result<NewProduct, CliError> {
        let name = self.prompt("Enter product name: ")?;
        self.view_categories()?;
        let category_id = CategoryId::new(self.prompt_number("Enter category ID: ")?);
        let price = self.prompt("Enter price: ")?;
        let price = parse_amount(&price, self.app.catalog().currency())?;

        Ok(NewProduct::new(name, category_id, price))
    }

    fn add_product(&mut self, token: SessionToken) -> Result<(), CliError> {
        let details = self.product_details()?;
        let product_id = self.app.add_product(token, details)?;

        writeln!(self.output, "Product added with ID {product_id}.")?;

        Ok(())
    }

    fn update_product(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.view_catalog()?;
        let product_id = ProductId::new(self.prompt_number("Enter product ID to update: ")?);
        let details = self.product_details()?;

        self.app.update_product(token, product_id, details)?;
        writeln!(self.output, "Product {product_id} updated.")?;

        Ok(())
    }

    fn remove_product(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.view_catalog()?;
        let product_id = ProductId::new(self.prompt_number("Enter product ID to remove: ")?);

        self.app.remove_product(token, product_id)?;
        writeln!(self.output, "Product {product_id} removed.")?;

        Ok(())
    }

    fn add_category(&mut self, token: SessionToken) -> Result<(), CliError> {
        let name = self.prompt("Enter category name: ")?;
        let category_id = self.app.add_category(token, &name)?;

        writeln!(self.output, "Category added with ID {category_id}.")?;

        Ok(())
    }

    fn remove_category(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.view_categories()?;
        let category_id = CategoryId::new(self.prompt_number("Enter category ID to remove: ")?);

        self.app.remove_category(token, category_id)?;
        writeln!(self.output, "Category {category_id} removed.")?;

        Ok(())
    }

    fn add_to_cart(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.view_catalog()?;
        let product_id = ProductId::new(self.prompt_number("Enter product ID: ")?);
        let quantity = self.prompt_number("Enter quantity: ")?;

        self.app.add_to_cart(token, product_id, quantity)?;
        writeln!(self.output, "Added to cart.")?;

        Ok(())
    }

    fn remove_from_cart(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.view_cart(token)?;
        let product_id = ProductId::new(self.prompt_number("Enter product ID to remove: ")?);

        self.app.remove_from_cart(token, product_id)?;
        writeln!(self.output, "Removed from cart.")?;

        Ok(())
    }

    fn update_cart_item(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.view_cart(token)?;
        let product_id = ProductId::new(self.prompt_number("Enter product ID to update: ")?);
        let quantity = self.prompt_number("Enter new quantity (0 removes): ")?;

        self.app.update_cart_item(token, product_id, quantity)?;
        writeln!(self.output, "Cart updated.")?;

        Ok(())
    }

    fn checkout(&mut self, token: SessionToken) -> Result<(), CliError> {
        self.view_cart(token)?;

        writeln!(self.output, "\nAvailable Payment Methods:")?;
        for (idx, method) in PaymentMethod::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {method}", idx + 1)?;
        }

        let choice: usize = self.prompt_number("Select payment method: ")?;
        let method = choice
            .checked_sub(1)
            .and_then(|idx| PaymentMethod::ALL.get(idx))
            .copied()
            .ok_or_else(|| CliError::InvalidChoice(choice.to_string()))?;

        let payment = self.app.checkout(token, method)?;

        writeln!(self.output, "Payment successful!")?;
        write_payment(&mut self.output, &payment)?;

        Ok(())
    }

    fn recover(&mut self, result: Result<(), CliError>) -> Result<(), CliError> {
        match result {
            Err(err) if err.is_recoverable() => {
                debug!(error = %err, "operation rejected");
                writeln!(self.output, "Error: {err}")?;

                Ok(())
            }
            other => other,
        }
    }

    fn prompt(&mut self, label: &str) -> Result<String, CliError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::EndOfInput);
        }

        Ok(line.trim().to_string())
    }

    fn prompt_number<T: FromStr>(&mut self, label: &str) -> Result<T, CliError> {
        let text = self.prompt(label)?;

        text.parse().map_err(|_err| CliError::InvalidNumber(text))
    }
}
