//! Login Session

use std::fmt;

use zeroize::Zeroize;

use crate::ids::OpaqueId;

/// Marker for customer identifiers.
pub struct Customer;

/// Customer id issued by the auth service.
pub type UserId = OpaqueId<Customer>;

/// Bearer token issued by the auth service at login.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Credentials of one logged-in customer.
///
/// Created at login and dropped at logout; every service call takes the
/// session explicitly instead of reading ambient storage. An absent session
/// means "not logged in".
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub token: BearerToken,
}

impl Session {
    pub fn new(user_id: UserId, token: BearerToken) -> Self {
        Self { user_id, token }
    }
}
