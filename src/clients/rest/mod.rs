//! REST client for the Zoho Inventory API.
//!
//! [`RestClient`] sits on top of the [`HttpClient`](crate::clients::HttpClient)
//! core and offers `request()`, `get()`, `post()`, `put()` and `delete()`.
//!
//! # Path handling
//!
//! - Paths are relative to `<host>/api/v1/`: `purchaseorders` becomes
//!   `https://inventory.zoho.com/api/v1/purchaseorders`
//! - Leading and trailing slashes are stripped
//! - `organization_id` is added to the query when the configuration has one
//!
//! # Example
//!
//! ```rust,ignore
//! use zoho_inventory::clients::QueryParams;
//!
//! let query: QueryParams = [("vendor_id", "460000000026049")].into_iter().collect();
//! let body = client.get("purchaseorders", Some(query)).await?;
//! println!("{}", body["purchaseorders"]);
//! ```

mod client;
mod errors;

pub use client::{RestClient, API_ROOT, ORGANIZATION_PARAM};
pub use errors::RestError;
