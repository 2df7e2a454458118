//! Lazily refreshed OAuth access tokens.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::auth::token::{AccessToken, AccessTokenResponse};
use crate::clients::http_client::Transport;
use crate::clients::{AuthError, AuthMode, HttpError, HttpMethod, HttpRequest};
use crate::config::Credentials;

const REFRESH_GRANT_TYPE: &str = "refresh_token";

/// Owns one client's credentials and its cached access token.
///
/// [`valid_token`](Self::valid_token) returns the cached token while it is
/// unexpired and refreshes it otherwise. The cache lock is held across the
/// refresh, so concurrent callers on one manager trigger a single refresh
/// call and then share its result.
///
/// The refresh call goes straight to the token endpoint: it carries no
/// `Authorization` header and does not pass through the rate limiter.
///
/// Each client owns its own manager. Two clients built from the same
/// credentials keep separate caches.
#[derive(Debug)]
pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    transport: Transport,
    cached: Mutex<Option<AccessToken>>,
}

// Verify TokenManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenManager>();
};

impl TokenManager {
    pub(crate) fn new(credentials: Credentials, token_url: String, transport: Transport) -> Self {
        Self {
            credentials,
            token_url,
            transport,
            cached: Mutex::new(None),
        }
    }

    /// Returns an unexpired access token, refreshing it if needed.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Auth`] if Zoho rejects the refresh token or credentials
    /// - [`HttpError::Transport`] if the token endpoint is unreachable
    /// - [`HttpError::Decode`] if the token response is not JSON
    pub async fn valid_token(&self) -> Result<AccessToken, HttpError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| !token.is_expired()) {
            return Ok(token.clone());
        }

        let token = self.refresh().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Replaces the cached token.
    ///
    /// Useful to resume with a token obtained elsewhere.
    pub async fn set_token(&self, token: AccessToken) {
        *self.cached.lock().await = Some(token);
    }

    /// Returns the cached token without refreshing, expired or not.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.cached.lock().await.clone()
    }

    /// Drops the cached token so the next call refreshes.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn refresh(&self) -> Result<AccessToken, HttpError> {
        tracing::debug!(
            refresh_token = %self.credentials.refresh_token().masked(),
            "Refreshing Zoho access token"
        );

        let client_id: &str = self.credentials.client_id().as_ref();
        let client_secret: &str = self.credentials.client_secret().as_ref();
        let refresh_token: &str = self.credentials.refresh_token().as_ref();
        let request = HttpRequest::builder(HttpMethod::Post, &self.token_url)
            .query_param("client_id", client_id)
            .query_param("client_secret", client_secret)
            .query_param("refresh_token", refresh_token)
            .query_param("grant_type", REFRESH_GRANT_TYPE)
            .auth_mode(AuthMode::None)
            .build()?;

        let body = self
            .transport
            .send(&self.token_url, &request, None)
            .await
            .map_err(|error| match error {
                HttpError::Api(api) => HttpError::Auth(AuthError {
                    code: api.code,
                    message: api.message,
                }),
                other => other,
            })?;

        let response: AccessTokenResponse =
            serde_json::from_value(body).map_err(|e| HttpError::Decode {
                status: 200,
                message: e.to_string(),
            })?;

        if let Some(error) = response.error.clone() {
            tracing::warn!(error = %error, "Zoho rejected the token refresh");
            return Err(AuthError {
                code: 401,
                message: error,
            }
            .into());
        }

        response.into_token(Utc::now()).ok_or_else(|| {
            AuthError {
                code: 401,
                message: "Token response did not contain an access token".to_string(),
            }
            .into()
        })
    }
}
