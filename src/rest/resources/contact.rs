//! Contact resource and the vendor view of it.
//!
//! Zoho stores vendors as contacts. [`Contact`] is the record as Zoho sends
//! it; [`Vendor`] is the marketplace shape callers usually work with. The
//! two convert into each other with `From`.
//!
//! # Example
//!
//! ```rust,ignore
//! use zoho_inventory::rest::resources::{Contact, Vendor, VendorRole, RoleUser};
//!
//! let vendor = Vendor {
//!     name: "Acme Supplies".to_string(),
//!     company_name: "Acme Supplies Ltd".to_string(),
//!     users: vec![RoleUser {
//!         email: Some("owner@acme.test".to_string()),
//!         roles: vec![VendorRole::Owner],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let created = Contact::create(&client, &Contact::from(&vendor)).await?;
//! let vendor = Vendor::from(created);
//! println!("{:?}", vendor.id);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::{ResourceError, ResourceResponse, ValidationError};

use super::common::{encode_segment, Address};

const PATH: &str = "contacts";
const ENVELOPE: &str = "contact";

/// Role of a vendor user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorRole {
    /// Owns the vendor account.
    Owner,
    /// Handles bills and payments.
    Accounting,
    /// Manages the catalog.
    Products,
    /// Handles purchase orders.
    Orders,
}

/// A person attached to a contact, with their roles.
///
/// Zoho calls these contact persons; vendors call them users.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RoleUser {
    /// Zoho id of the contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person_id: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Roles held by the person.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<VendorRole>,
}

/// A Zoho contact record.
///
/// Fields not modelled here are kept in [`other`](Self::other) and sent back
/// unchanged on update.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Contact {
    /// Zoho id of the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,

    /// Display name.
    pub contact_name: String,

    /// Company name.
    #[serde(default)]
    pub company_name: String,

    /// `vendor` or `customer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,

    /// People attached to the contact.
    #[serde(default)]
    pub contact_persons: Vec<RoleUser>,

    /// Billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,

    /// Every other field Zoho returned.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A vendor as the marketplace describes it.
///
/// Serializes in camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Zoho contact id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Vendor name.
    pub name: String,

    /// Vendor users with their roles.
    #[serde(default)]
    pub users: Vec<RoleUser>,

    /// Billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,

    /// Company name.
    #[serde(default)]
    pub company_name: String,

    /// Free-form bank details. Not stored on the Zoho contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_information: Option<String>,

    /// Parent vendor id. Not stored on the Zoho contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl From<Contact> for Vendor {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.contact_id,
            name: contact.contact_name,
            users: contact.contact_persons,
            billing: contact.billing_address,
            company_name: contact.company_name,
            bank_information: None,
            parent_id: None,
        }
    }
}

impl From<&Vendor> for Contact {
    fn from(vendor: &Vendor) -> Self {
        Self {
            contact_id: vendor.id.clone(),
            contact_name: vendor.name.clone(),
            company_name: vendor.company_name.clone(),
            contact_type: None,
            contact_persons: vendor.users.clone(),
            billing_address: vendor.billing.clone(),
            other: Map::new(),
        }
    }
}

impl From<Vendor> for Contact {
    fn from(vendor: Vendor) -> Self {
        Self::from(&vendor)
    }
}

impl Contact {
    /// Resource name used in errors.
    pub const NAME: &'static str = "Contact";

    /// Fetches a contact.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] (404) if `id` is empty
    /// - [`ResourceError::UnexpectedResponse`] ("Contact not found") if the
    ///   body has no `contact`
    /// - a wrapped request error otherwise
    pub async fn find(client: &RestClient, id: &str) -> Result<Self, ResourceError> {
        require_contact_id(id)?;
        let path = format!("{PATH}/{}", encode_segment(id));
        let body = client.get(&path, None).await?;
        unwrap_contact(body, "Contact not found")
    }

    /// Creates a contact.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] ("Contact not created")
    /// if the body has no `contact`, or a wrapped request error.
    pub async fn create(client: &RestClient, contact: &Self) -> Result<Self, ResourceError> {
        let body = client.post(PATH, Some(contact.to_body()?), None).await?;
        unwrap_contact(body, "Contact not created")
    }

    /// Updates a contact.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] (404) if `id` is empty
    /// - [`ResourceError::UnexpectedResponse`] ("Contact not updated") if the
    ///   body has no `contact`
    /// - a wrapped request error otherwise
    pub async fn update(
        client: &RestClient,
        id: &str,
        contact: &Self,
    ) -> Result<Self, ResourceError> {
        require_contact_id(id)?;
        let path = format!("{PATH}/{}", encode_segment(id));
        let body = client.put(&path, contact.to_body()?, None).await?;
        unwrap_contact(body, "Contact not updated")
    }

    fn to_body(&self) -> Result<Value, ResourceError> {
        serde_json::to_value(self).map_err(|e| ResourceError::UnexpectedResponse {
            resource: Self::NAME,
            message: format!("failed to serialize contact: {e}"),
        })
    }
}

fn require_contact_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::not_found("Contact id is required"));
    }
    Ok(())
}

fn unwrap_contact(body: Value, missing: &str) -> Result<Contact, ResourceError> {
    if body.get(ENVELOPE).map_or(true, Value::is_null) {
        return Err(ResourceError::UnexpectedResponse {
            resource: Contact::NAME,
            message: missing.to_string(),
        });
    }
    let contact: ResourceResponse<Contact> =
        ResourceResponse::from_body(body, ENVELOPE, Contact::NAME)?;
    Ok(contact.into_inner())
}
