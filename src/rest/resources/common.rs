//! Types shared by several Zoho resources.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Percent-encodes a caller-supplied id for use as a single path segment.
pub(crate) fn encode_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// A postal address as Zoho stores it on contacts and purchase orders.
///
/// All fields are optional to support partial address data.
///
/// # Example
///
/// ```rust
/// use zoho_inventory::rest::resources::Address;
///
/// let address = Address {
///     address: Some("Maslak Mah. 1".to_string()),
///     city: Some("Istanbul".to_string()),
///     country: Some("Turkey".to_string()),
///     ..Default::default()
/// };
/// assert!(serde_json::to_value(&address).unwrap().get("zip").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Address {
    /// Person the address is to the attention of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention: Option<String>,

    /// First address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Second address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    /// Country name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Fax number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
