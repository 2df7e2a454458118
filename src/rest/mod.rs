//! Zoho Inventory resources.
//!
//! This module turns raw Zoho responses into typed records:
//!
//! - **[`ResourceResponse<T>`]**: a Deref-based wrapper carrying the data
//!   unwrapped from Zoho's envelope, plus pagination and message
//! - **[`ResourceError`]**: resource failures on top of the request core
//! - **[`resources`]**: purchase orders and contacts
//!
//! # Example
//!
//! ```rust,ignore
//! use zoho_inventory::rest::resources::{PurchaseOrder, PurchaseOrderListParams};
//!
//! let response = PurchaseOrder::list(&client, &PurchaseOrderListParams::default()).await?;
//! for order in response.iter() {
//!     println!("{:?}", order.purchaseorder_number);
//! }
//! if response.has_more_page() {
//!     // fetch the next page
//! }
//! ```

mod errors;
mod response;

pub mod resources;

// Public exports
pub use errors::{ResourceError, ValidationError};
pub use response::{PageContext, ResourceResponse};
