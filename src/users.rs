//! Users
//!
//! Credentials, roles and the session token a user holds while logged in.
//!
//! Passwords are stored and compared as plain text. That is fine for a demo
//! marketplace and unsuitable for anything real.

use std::fmt;

use serde::Deserialize;
use uuid::Uuid;

/// The role of a user. Fixed when the user is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A shopper: may browse, fill a cart and check out.
    #[serde(alias = "user")]
    Regular,

    /// A store administrator: may manage the catalog.
    Admin,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => f.write_str("regular"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// A plain-text password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wrap a password.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Check a login attempt against this password.
    #[must_use]
    pub fn matches(&self, attempt: &str) -> bool {
        self.0 == attempt
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifies one authenticated session. A random 128-bit UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.simple(), f)
    }
}

/// A marketplace user.
///
/// Holds a session token exactly while authenticated.
#[derive(Debug, Clone)]
pub struct User {
    username: String,
    password: Password,
    role: UserType,
    session: Option<SessionToken>,
}

impl User {
    /// Create a logged-out user.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<Password>,
        user_type: UserType,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: user_type,
            session: None,
        }
    }

    /// Log in with `password`.
    ///
    /// On success a new session token replaces any previous one and is
    /// returned. On failure nothing changes.
    pub fn login(&mut self, password: &str) -> Option<SessionToken> {
        if !self.password.matches(password) {
            return None;
        }

        let token = SessionToken::generate();
        self.session = Some(token);

        Some(token)
    }

    /// Drop the session token. Idempotent.
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Whether the user currently holds a session token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserType::Admin
    }

    /// Username
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Role
    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.role
    }

    /// The current session token, if logged in.
    #[must_use]
    pub fn session(&self) -> Option<SessionToken> {
        self.session
    }
}
