//! Zoho data center definitions.
//!
//! Zoho hosts each account in one regional data center. The data center
//! decides both the OAuth accounts host and the Inventory API host.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Regional Zoho data center.
///
/// # Example
///
/// ```rust
/// use zoho_inventory::DataCenter;
///
/// let dc: DataCenter = "eu".parse().unwrap();
/// assert_eq!(dc.inventory_base_url(), "https://inventory.zoho.eu");
/// assert_eq!(dc.token_url(), "https://accounts.zoho.eu/oauth/v2/token");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataCenter {
    /// United States (`zoho.com`).
    #[default]
    Us,
    /// Europe (`zoho.eu`).
    Eu,
    /// India (`zoho.in`).
    In,
    /// Australia (`zoho.com.au`).
    Au,
    /// Japan (`zoho.jp`).
    Jp,
    /// Canada (`zohocloud.ca`).
    Ca,
}

impl DataCenter {
    const fn domain(self) -> &'static str {
        match self {
            Self::Us => "com",
            Self::Eu => "eu",
            Self::In => "in",
            Self::Au => "com.au",
            Self::Jp => "jp",
            Self::Ca => "ca",
        }
    }

    /// Returns the OAuth token endpoint for this data center.
    #[must_use]
    pub fn token_url(self) -> String {
        match self {
            Self::Ca => "https://accounts.zohocloud.ca/oauth/v2/token".to_string(),
            dc => format!("https://accounts.zoho.{}/oauth/v2/token", dc.domain()),
        }
    }

    /// Returns the Inventory API host (without the versioned API root).
    #[must_use]
    pub fn inventory_base_url(self) -> String {
        match self {
            Self::Ca => "https://inventory.zohocloud.ca".to_string(),
            dc => format!("https://inventory.zoho.{}", dc.domain()),
        }
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::In => "in",
            Self::Au => "au",
            Self::Jp => "jp",
            Self::Ca => "ca",
        };
        f.write_str(name)
    }
}

impl FromStr for DataCenter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" | "com" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            "in" => Ok(Self::In),
            "au" | "com.au" => Ok(Self::Au),
            "jp" => Ok(Self::Jp),
            "ca" => Ok(Self::Ca),
            other => Err(ConfigError::InvalidDataCenter {
                value: other.to_string(),
            }),
        }
    }
}
