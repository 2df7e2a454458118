//! Configuration error types for the Zoho Inventory client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! client can never be built from incomplete credentials.
//!
//! # Example
//!
//! ```rust
//! use zoho_inventory::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client id cannot be empty.
    #[error("Client id cannot be empty. Please provide a valid Zoho OAuth client id.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide a valid Zoho OAuth client secret.")]
    EmptyClientSecret,

    /// Refresh token cannot be empty.
    #[error("Refresh token cannot be empty. Please provide a valid Zoho OAuth refresh token.")]
    EmptyRefreshToken,

    /// Organization id cannot be empty.
    #[error("Organization id cannot be empty.")]
    EmptyOrganizationId,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute http(s) URL.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The data center name is not recognized.
    #[error("Unknown data center '{value}'. Expected one of: us, eu, in, au, jp, ca.")]
    InvalidDataCenter {
        /// The unrecognized value.
        value: String,
    },

    /// A rate limit setting is out of range.
    #[error("Invalid rate limit setting: {reason}")]
    InvalidRateLimit {
        /// Why the setting was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_client_id_error_message() {
        let message = ConfigError::EmptyClientId.to_string();
        assert!(message.contains("Client id cannot be empty"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "refresh_token",
        };
        let message = error.to_string();
        assert!(message.contains("refresh_token"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_base_url_includes_url() {
        let error = ConfigError::InvalidBaseUrl {
            url: "ftp://nope".to_string(),
        };
        assert!(error.to_string().contains("ftp://nope"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyRefreshToken;
        let _: &dyn std::error::Error = &error;
    }
}
