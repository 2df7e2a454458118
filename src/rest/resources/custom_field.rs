//! Zoho custom fields.
//!
//! Zoho writes custom fields by label (`{"label": "Receive Status", ...}`)
//! and reads them back from `custom_field_hash` by API name
//! (`cf_receive_status`). The fields this crate works with are listed in a
//! static table; any other entry of the hash is kept as passthrough.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A custom field the crate reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KnownCustomField {
    /// Fulfillment center the purchase order ships to.
    FulfillmentCenterId,
    /// Carrier tracking number of a shipped purchase order.
    ShipmentTrackingNumber,
    /// Vendor-side receive status, e.g. `shipped`.
    ReceiveStatus,
}

/// Label and API name of every [`KnownCustomField`].
const CUSTOM_FIELDS: [(KnownCustomField, &str, &str); 3] = [
    (
        KnownCustomField::FulfillmentCenterId,
        "Fulfillment Center Id",
        "cf_fulfillment_center_id",
    ),
    (
        KnownCustomField::ShipmentTrackingNumber,
        "Shipment Tracking Number",
        "cf_shipment_tracking_number",
    ),
    (
        KnownCustomField::ReceiveStatus,
        "Receive Status",
        "cf_receive_status",
    ),
];

/// Value written to [`KnownCustomField::ReceiveStatus`] once an order ships.
pub const RECEIVE_STATUS_SHIPPED: &str = "shipped";

impl KnownCustomField {
    /// All known fields.
    pub const ALL: [Self; 3] = [
        Self::FulfillmentCenterId,
        Self::ShipmentTrackingNumber,
        Self::ReceiveStatus,
    ];

    // Table rows follow declaration order.
    const fn entry(self) -> (Self, &'static str, &'static str) {
        CUSTOM_FIELDS[self as usize]
    }

    /// The label Zoho expects when writing the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.entry().1
    }

    /// The key under which Zoho returns the field in `custom_field_hash`.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        self.entry().2
    }

    /// Looks a field up by its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        CUSTOM_FIELDS
            .into_iter()
            .find(|(_, known, _)| *known == label)
            .map(|(field, _, _)| field)
    }

    /// Looks a field up by its API name.
    #[must_use]
    pub fn from_api_name(api_name: &str) -> Option<Self> {
        CUSTOM_FIELDS
            .into_iter()
            .find(|(_, _, known)| *known == api_name)
            .map(|(field, _, _)| field)
    }
}

/// A custom field entry in a create or update body.
///
/// ```rust
/// use zoho_inventory::rest::resources::{CustomField, KnownCustomField};
///
/// let field = CustomField::known(KnownCustomField::FulfillmentCenterId, "FC1");
/// assert_eq!(
///     serde_json::to_value(&field).unwrap(),
///     serde_json::json!({"label": "Fulfillment Center Id", "value": "FC1"})
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomField {
    /// The field label as configured in Zoho.
    pub label: String,
    /// The field value.
    pub value: String,
}

impl CustomField {
    /// Creates an entry for a known field.
    #[must_use]
    pub fn known(field: KnownCustomField, value: impl Into<String>) -> Self {
        Self {
            label: field.label().to_string(),
            value: value.into(),
        }
    }

    /// Creates an entry for a field outside the known table.
    #[must_use]
    pub fn other(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The `custom_field_hash` of a Zoho record.
///
/// Known fields are read through [`get`](Self::get); every other entry is
/// available unchanged from [`passthrough`](Self::passthrough).
///
/// ```rust
/// use serde_json::json;
/// use zoho_inventory::rest::resources::{CustomFieldHash, KnownCustomField};
///
/// let hash: CustomFieldHash = serde_json::from_value(json!({
///     "cf_fulfillment_center_id": "FC1",
///     "cf_warehouse_note": "fragile"
/// }))
/// .unwrap();
///
/// assert_eq!(hash.get(KnownCustomField::FulfillmentCenterId), Some("FC1"));
/// assert_eq!(hash.passthrough().count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct CustomFieldHash(BTreeMap<String, Value>);

impl CustomFieldHash {
    /// Returns the string value of a known field.
    ///
    /// Numbers are not coerced; Zoho returns text fields as strings.
    #[must_use]
    pub fn get(&self, field: KnownCustomField) -> Option<&str> {
        self.0.get(field.api_name()).and_then(Value::as_str)
    }

    /// Sets a known field.
    pub fn set(&mut self, field: KnownCustomField, value: impl Into<String>) {
        self.0
            .insert(field.api_name().to_string(), Value::String(value.into()));
    }

    /// Returns the raw value stored under an API name.
    #[must_use]
    pub fn raw(&self, api_name: &str) -> Option<&Value> {
        self.0.get(api_name)
    }

    /// Iterates over entries that are not in the known table.
    pub fn passthrough(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(key, _)| KnownCustomField::from_api_name(key).is_none())
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Returns `true` if the hash has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
