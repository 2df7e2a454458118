//! Access token types.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// A short-lived OAuth bearer token and the instant it stops being valid.
///
/// The token value is masked in `Debug` output.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use zoho_inventory::auth::AccessToken;
///
/// let token = AccessToken::new("1000.abc", Utc::now() + Duration::seconds(10));
/// assert!(!token.is_expired());
/// assert!(!format!("{token:?}").contains("1000.abc"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token that expires at `expires_at`.
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` once `now` has reached the expiry instant.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"*****")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body of the Zoho token endpoint response.
///
/// Zoho answers a bad refresh token with HTTP 200 and an `error` field, so
/// every field is optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccessTokenResponse {
    /// The new bearer token.
    pub access_token: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: Option<i64>,
    /// The API domain the token is valid for.
    pub api_domain: Option<String>,
    /// Usually `"Bearer"`.
    pub token_type: Option<String>,
    /// Error code when the refresh was rejected, e.g. `"invalid_code"`.
    pub error: Option<String>,
}

impl AccessTokenResponse {
    /// Converts the response into an [`AccessToken`] issued at `issued_at`.
    ///
    /// Returns `None` when the response has no access token.
    #[must_use]
    pub fn into_token(self, issued_at: DateTime<Utc>) -> Option<AccessToken> {
        let expires_in = self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        self.access_token
            .filter(|value| !value.is_empty())
            .map(|value| AccessToken::new(value, issued_at + Duration::seconds(expires_in)))
    }
}

// Verify token types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
    assert_send_sync::<AccessTokenResponse>();
};
