//! Zoho Inventory resource implementations.
//!
//! Each resource exposes its operations as associated async functions that
//! take a [`RestClient`](crate::clients::RestClient).
//!
//! # Purchase Orders
//!
//! ```rust,ignore
//! use zoho_inventory::rest::resources::{NewLineItem, PurchaseOrder};
//!
//! let order = PurchaseOrder::create(
//!     &client,
//!     "460000000026049",
//!     "FC1",
//!     &[NewLineItem { id: "460000000017088".to_string(), quantity: 2.0, ..Default::default() }],
//! )
//! .await?;
//!
//! PurchaseOrder::set_tracking_number(&client, "460000000039131", "460000000026049", "1Z999", "UPS").await?;
//! ```
//!
//! # Contacts
//!
//! ```rust,ignore
//! use zoho_inventory::rest::resources::{Contact, Vendor};
//!
//! let vendor = Vendor::from(Contact::find(&client, "460000000026049").await?);
//! ```

mod common;
mod contact;
mod custom_field;
mod purchase_order;

pub use common::Address;
pub use contact::{Contact, RoleUser, Vendor, VendorRole};
pub use custom_field::{CustomField, CustomFieldHash, KnownCustomField, RECEIVE_STATUS_SHIPPED};
pub use purchase_order::{
    normalize_status, FindParams, LineItem, NewComment, NewLineItem, NewPurchaseReceive,
    PurchaseOrder, PurchaseOrderComment, PurchaseOrderListParams, PurchaseOrderUpdate,
    PurchaseReceiveSummary, ReceiveLineItem, RESERVED_STATUS,
};
