//! Validated newtype wrappers for credentials and account identifiers.
//!
//! Secrets mask their value in `Debug` output so they never reach logs.

use crate::error::ConfigError;
use std::fmt;

/// A validated Zoho OAuth client id.
///
/// # Example
///
/// ```rust
/// use zoho_inventory::ClientId;
///
/// let id = ClientId::new("1000.ABC").unwrap();
/// assert_eq!(id.as_ref(), "1000.ABC");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Zoho OAuth client secret.
///
/// The `Debug` implementation prints `ClientSecret(*****)`.
///
/// ```rust
/// use zoho_inventory::ClientSecret;
///
/// let secret = ClientSecret::new("shh").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated Zoho OAuth refresh token.
///
/// The refresh token doubles as the credential identity: clients built from
/// the same refresh token share one rate limit bucket.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Creates a new validated refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRefreshToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyRefreshToken);
        }
        Ok(Self(token))
    }

    /// Returns a short, log-safe fingerprint of the token.
    #[must_use]
    pub fn masked(&self) -> String {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{tail}")
    }
}

impl AsRef<str> for RefreshToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(*****)")
    }
}

/// A validated Zoho organization id, sent as `organization_id` on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Creates a new validated organization id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOrganizationId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyOrganizationId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for OrganizationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// OAuth client credentials: client id, client secret and refresh token.
///
/// Immutable once built. Use [`Credentials::new`] with raw strings to get
/// fail-fast validation of all three values at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    client_id: ClientId,
    client_secret: ClientSecret,
    refresh_token: RefreshToken,
}

impl Credentials {
    /// Validates and bundles the three OAuth credentials.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of the first empty value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zoho_inventory::{ConfigError, Credentials};
    ///
    /// let err = Credentials::new("id", "", "refresh").unwrap_err();
    /// assert_eq!(err, ConfigError::EmptyClientSecret);
    /// ```
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(
            ClientId::new(client_id)?,
            ClientSecret::new(client_secret)?,
            RefreshToken::new(refresh_token)?,
        ))
    }

    /// Bundles already validated credentials.
    #[must_use]
    pub const fn from_parts(
        client_id: ClientId,
        client_secret: ClientSecret,
        refresh_token: RefreshToken,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            refresh_token,
        }
    }

    /// Returns the client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the refresh token.
    #[must_use]
    pub const fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }
}
