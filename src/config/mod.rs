//! Configuration types for the Zoho Inventory client.
//!
//! # Overview
//!
//! - [`ZohoConfig`]: credentials, organization, endpoints and rate limit settings
//! - [`ZohoConfigBuilder`]: builder for [`ZohoConfig`]
//! - [`Credentials`], [`ClientId`], [`ClientSecret`], [`RefreshToken`]: validated OAuth credentials
//! - [`OrganizationId`]: the Zoho organization every request is scoped to
//! - [`DataCenter`]: the regional Zoho hosts
//!
//! # Example
//!
//! ```rust
//! use zoho_inventory::{ClientId, ClientSecret, RefreshToken, ZohoConfig};
//!
//! let config = ZohoConfig::builder()
//!     .client_id(ClientId::new("1000.CLIENT").unwrap())
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .refresh_token(RefreshToken::new("1000.refresh").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base_url(), "https://inventory.zoho.com");
//! ```

mod data_center;
mod newtypes;

pub use data_center::DataCenter;
pub use newtypes::{ClientId, ClientSecret, Credentials, OrganizationId, RefreshToken};

use std::env;

use crate::error::ConfigError;
use crate::limiter::{RateLimitConfig, RateLimitOptions};

/// Environment variable holding the OAuth client id.
pub const ENV_CLIENT_ID: &str = "ZOHO_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "ZOHO_CLIENT_SECRET";
/// Environment variable holding the OAuth refresh token.
pub const ENV_REFRESH_TOKEN: &str = "ZOHO_REFRESH_TOKEN";
/// Environment variable holding the organization id.
pub const ENV_ORGANIZATION_ID: &str = "ZOHO_ORGANIZATION_ID";

/// Configuration for a Zoho Inventory client.
///
/// `ZohoConfig` is `Clone`, `Send` and `Sync`. Build it once at startup and
/// pass it to every client.
#[derive(Clone, Debug)]
pub struct ZohoConfig {
    credentials: Credentials,
    organization_id: Option<OrganizationId>,
    data_center: DataCenter,
    api_base_url: String,
    token_url: String,
    rate_limit: RateLimitConfig,
    user_agent_prefix: Option<String>,
}

impl ZohoConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ZohoConfigBuilder {
        ZohoConfigBuilder::new()
    }

    /// Builds a configuration from `ZOHO_CLIENT_ID`, `ZOHO_CLIENT_SECRET`,
    /// `ZOHO_REFRESH_TOKEN` and the optional `ZOHO_ORGANIZATION_ID`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] for an unset credential
    /// variable, or the validation error of an empty one.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(ZohoConfigBuilder::new())
    }

    /// Like [`from_env`](Self::from_env), starting from a partially built
    /// builder (for example with a data center or rate limit override).
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_env_with(builder: ZohoConfigBuilder) -> Result<Self, ConfigError> {
        let read = |name: &'static str, field: &'static str| {
            env::var(name).map_err(|_| ConfigError::MissingRequiredField { field })
        };

        let mut builder = builder
            .client_id(ClientId::new(read(ENV_CLIENT_ID, "client_id")?)?)
            .client_secret(ClientSecret::new(read(ENV_CLIENT_SECRET, "client_secret")?)?)
            .refresh_token(RefreshToken::new(read(ENV_REFRESH_TOKEN, "refresh_token")?)?);

        if let Ok(organization_id) = env::var(ENV_ORGANIZATION_ID) {
            builder = builder.organization_id(OrganizationId::new(organization_id)?);
        }
        builder.build()
    }

    /// Returns the OAuth credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the organization id, if configured.
    #[must_use]
    pub const fn organization_id(&self) -> Option<&OrganizationId> {
        self.organization_id.as_ref()
    }

    /// Returns the data center.
    #[must_use]
    pub const fn data_center(&self) -> DataCenter {
        self.data_center
    }

    /// Returns the Inventory API host, without the versioned API root.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the OAuth token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the rate limit settings for this credential identity.
    #[must_use]
    pub const fn rate_limit(&self) -> &RateLimitConfig {
        &self.rate_limit
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ZohoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ZohoConfig>();
};

/// Builder for [`ZohoConfig`].
///
/// Required: `client_id`, `client_secret`, `refresh_token` (or `credentials`).
///
/// # Defaults
///
/// - `data_center`: [`DataCenter::Us`]
/// - `api_base_url` / `token_url`: derived from the data center
/// - `rate_limit`: [`RateLimitConfig::default`]
/// - `organization_id`, `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ZohoConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    refresh_token: Option<RefreshToken>,
    organization_id: Option<OrganizationId>,
    data_center: Option<DataCenter>,
    api_base_url: Option<String>,
    token_url: Option<String>,
    rate_limit: Option<RateLimitOptions>,
    user_agent_prefix: Option<String>,
}

impl ZohoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth client id (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the OAuth client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the OAuth refresh token (required).
    #[must_use]
    pub fn refresh_token(mut self, token: RefreshToken) -> Self {
        self.refresh_token = Some(token);
        self
    }

    /// Sets all three credentials at once.
    #[must_use]
    pub fn credentials(self, credentials: Credentials) -> Self {
        self.client_id(credentials.client_id().clone())
            .client_secret(credentials.client_secret().clone())
            .refresh_token(credentials.refresh_token().clone())
    }

    /// Sets the organization id.
    #[must_use]
    pub fn organization_id(mut self, id: OrganizationId) -> Self {
        self.organization_id = Some(id);
        self
    }

    /// Sets the data center.
    #[must_use]
    pub const fn data_center(mut self, data_center: DataCenter) -> Self {
        self.data_center = Some(data_center);
        self
    }

    /// Overrides the Inventory API host (e.g. a proxy or a mock server).
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Overrides the OAuth token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Overrides the rate limit defaults.
    #[must_use]
    pub const fn rate_limit(mut self, options: RateLimitOptions) -> Self {
        self.rate_limit = Some(options);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ZohoConfig`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if a credential is not set
    /// - [`ConfigError::InvalidBaseUrl`] if a URL override is not http(s)
    /// - [`ConfigError::InvalidRateLimit`] if the rate limit override has a zero value
    pub fn build(self) -> Result<ZohoConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let refresh_token = self
            .refresh_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "refresh_token",
            })?;

        let data_center = self.data_center.unwrap_or_default();
        let api_base_url = validate_url(
            self.api_base_url
                .unwrap_or_else(|| data_center.inventory_base_url()),
        )?;
        let token_url = validate_url(self.token_url.unwrap_or_else(|| data_center.token_url()))?;
        let rate_limit = self.rate_limit.unwrap_or_default().resolve()?;

        Ok(ZohoConfig {
            credentials: Credentials::from_parts(client_id, client_secret, refresh_token),
            organization_id: self.organization_id,
            data_center,
            api_base_url,
            token_url,
            rate_limit,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn validate_url(url: String) -> Result<String, ConfigError> {
    let trimmed = url.trim_end_matches('/');
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(scheme, rest)| matches!(scheme, "http" | "https") && !rest.is_empty());
    if has_host {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl { url })
    }
}
