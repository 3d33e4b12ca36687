//! Payments
//!
//! A simulated payment: it is created pending and processing always completes it.

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

/// How the shopper chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Credit card
    CreditCard,

    /// Debit card
    DebitCard,

    /// Unified Payments Interface
    Upi,

    /// Net banking
    NetBanking,

    /// `PayPal`
    PayPal,
}

impl PaymentMethod {
    /// Every payment method, in menu order.
    pub const ALL: [PaymentMethod; 5] = [
        Self::CreditCard,
        Self::DebitCard,
        Self::Upi,
        Self::NetBanking,
        Self::PayPal,
    ];

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Upi => "UPI",
            Self::NetBanking => "Net Banking",
            Self::PayPal => "PayPal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Created, not yet processed.
    Pending,

    /// Processed. Final.
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// A payment for a checked out cart.
///
/// Records only the amount and method; it does not know which items were bought or by whom.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    amount: Money<'static, Currency>,
    method: PaymentMethod,
    created_at: Timestamp,
    status: PaymentStatus,
}

impl Payment {
    /// Create a pending payment stamped with the current time.
    #[must_use]
    pub fn new(amount: Money<'static, Currency>, method: PaymentMethod) -> Self {
        Self {
            amount,
            method,
            created_at: Timestamp::now(),
            status: PaymentStatus::Pending,
        }
    }

    /// Process the payment. There is no gateway, so this always completes it.
    pub fn process(&mut self) -> PaymentStatus {
        self.status = PaymentStatus::Completed;

        self.status
    }

    /// Amount charged
    #[must_use]
    pub fn amount(&self) -> Money<'static, Currency> {
        self.amount
    }

    /// Payment method
    #[must_use]
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// When the payment was created
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Whether the payment has been processed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
