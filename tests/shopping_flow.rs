//! Integration tests for a shopper's journey through the demo store.
//!
//! The bundled seed data has:
//!
//! 1. Leather Boots - $199.99
//! 2. Winter Coat - $249.99
//! 3. Denim Jacket - $99.99
//! 4. Sports Cap - $29.99
//!
//! Two boots and one coat cost 2 x $199.99 + $249.99 = $649.97.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use bazaar::prelude::*;

fn store() -> TestResult<ShoppingApp> {
    Ok(Fixture::embedded()?.into_app()?)
}

#[test]
fn cart_total_matches_worked_example() -> TestResult {
    let mut app = store()?;
    let token = app.login("user1", "pass123")?;

    app.add_to_cart(token, ProductId::new(1), 2)?;
    app.add_to_cart(token, ProductId::new(2), 1)?;

    assert_eq!(app.cart(token)?.total()?, Money::from_minor(64997, USD));

    Ok(())
}

#[test]
fn repeated_adds_merge_into_one_line() -> TestResult {
    let mut app = store()?;
    let token = app.login("user1", "pass123")?;

    app.add_to_cart(token, ProductId::new(4), 1)?;
    app.add_to_cart(token, ProductId::new(4), 3)?;

    let cart = app.cart(token)?;

    assert_eq!(cart.len(), 1);
    assert_eq!(
        cart.get_item(ProductId::new(4)).map(CartItem::quantity),
        Some(4)
    );
    assert_eq!(cart.total()?, Money::from_minor(11996, USD));

    Ok(())
}

#[test]
fn total_tracks_every_mutation() -> TestResult {
    let mut app = store()?;
    let token = app.login("user1", "pass123")?;

    let steps: [(u64, i64); 6] = [(1, 1), (3, 2), (1, 1), (4, 5), (2, 1), (3, 1)];
    let mut expected = 0_i64;

    for (product_id, quantity) in steps {
        let product_id = ProductId::new(product_id);
        let price = app
            .catalog()
            .product(product_id)
            .map(|product| product.price.to_minor_units())
            .ok_or("missing seed product")?;

        app.add_to_cart(token, product_id, quantity)?;
        expected += price * quantity;

        assert_eq!(
            app.cart(token)?.total()?,
            Money::from_minor(expected, USD),
            "total after adding {quantity} of product {product_id}"
        );
    }

    app.update_cart_item(token, ProductId::new(4), 1)?;
    expected -= 4 * 2999;
    assert_eq!(app.cart(token)?.total()?, Money::from_minor(expected, USD));

    app.remove_from_cart(token, ProductId::new(3))?;
    expected -= 3 * 9999;
    assert_eq!(app.cart(token)?.total()?, Money::from_minor(expected, USD));

    app.update_cart_item(token, ProductId::new(1), 0)?;
    expected -= 2 * 19999;
    assert_eq!(app.cart(token)?.total()?, Money::from_minor(expected, USD));
    assert!(app.cart(token)?.get_item(ProductId::new(1)).is_none());

    Ok(())
}

#[test]
fn rejected_mutations_leave_cart_unchanged() -> TestResult {
    let mut app = store()?;
    let token = app.login("user1", "pass123")?;
    app.add_to_cart(token, ProductId::new(2), 1)?;

    let before = app.cart(token)?.total()?;

    let results = [
        app.add_to_cart(token, ProductId::new(2), 0),
        app.add_to_cart(token, ProductId::new(2), -3),
        app.add_to_cart(token, ProductId::new(99), 1),
        app.update_cart_item(token, ProductId::new(2), -1),
        app.update_cart_item(token, ProductId::new(3), 2),
        app.remove_from_cart(token, ProductId::new(3)),
    ];

    let kinds: Vec<Option<ErrorKind>> = results
        .iter()
        .map(|result| result.as_ref().err().map(ShopError::kind))
        .collect();

    assert_eq!(
        kinds,
        [
            Some(ErrorKind::InvalidArgument),
            Some(ErrorKind::InvalidArgument),
            Some(ErrorKind::NotFound),
            Some(ErrorKind::InvalidArgument),
            Some(ErrorKind::NotFound),
            Some(ErrorKind::NotFound),
        ]
    );
    assert_eq!(app.cart(token)?.total()?, before);
    assert_eq!(app.cart(token)?.len(), 1);

    Ok(())
}

#[test]
fn checkout_charges_total_and_empties_cart() -> TestResult {
    let mut app = store()?;
    let token = app.login("user1", "pass123")?;

    app.add_to_cart(token, ProductId::new(1), 2)?;
    app.add_to_cart(token, ProductId::new(2), 1)?;

    let payment = app.checkout(token, PaymentMethod::PayPal)?;

    assert_eq!(payment.amount(), Money::from_minor(64997, USD));
    assert_eq!(payment.method(), PaymentMethod::PayPal);
    assert_eq!(payment.status(), PaymentStatus::Completed);
    assert!(app.cart(token)?.is_empty());

    let second = app.checkout(token, PaymentMethod::PayPal);

    assert_eq!(second.map_err(|err| err.kind()), Err(ErrorKind::EmptyCart));
    assert_eq!(app.payments().len(), 1);

    Ok(())
}

#[test]
fn shopper_operations_need_a_session() -> TestResult {
    let mut app = store()?;
    let token = app.login("user1", "pass123")?;
    app.logout(token);

    assert_eq!(
        app.add_to_cart(token, ProductId::new(1), 1)
            .map_err(|err| err.kind()),
        Err(ErrorKind::Unauthenticated)
    );
    assert_eq!(
        app.checkout(token, PaymentMethod::Upi)
            .map_err(|err| err.kind()),
        Err(ErrorKind::Unauthenticated)
    );
    assert_eq!(
        app.login("user1", "nope").map_err(|err| err.kind()),
        Err(ErrorKind::Unauthenticated)
    );

    Ok(())
}
