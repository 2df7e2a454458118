//! Purchase order resource.
//!
//! This module provides the [`PurchaseOrder`] resource for Zoho Inventory
//! purchase orders, scoped to one vendor or fulfillment center.
//!
//! # Operations
//!
//! - [`PurchaseOrder::list`] - list orders with filters
//! - [`PurchaseOrder::find`] - fetch one order, checking who it belongs to
//! - [`PurchaseOrder::comments`] - fetch an order's comments
//! - [`PurchaseOrder::create`] - create an order for a vendor and fulfillment center
//! - [`PurchaseOrder::update`] - update an order owned by a vendor
//! - [`PurchaseOrder::add_comment`] - add a comment with an expected delivery date
//! - [`PurchaseOrder::set_tracking_number`] - mark an order shipped
//! - [`PurchaseOrder::set_status`] - change the order status
//! - [`PurchaseOrder::create_receive`] - record a receive against an order
//! - [`PurchaseOrder::validate`] - check an order exists and belongs to the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use zoho_inventory::rest::resources::{FindParams, PurchaseOrder, PurchaseOrderListParams};
//!
//! let params = PurchaseOrderListParams {
//!     vendor_id: Some("460000000026049".to_string()),
//!     per_page: Some(50),
//!     ..Default::default()
//! };
//! let orders = PurchaseOrder::list(&client, &params).await?;
//! for order in orders.iter() {
//!     println!("{:?} {}", order.purchaseorder_number, order.normalized_status().unwrap_or(""));
//! }
//!
//! let order = PurchaseOrder::find(
//!     &client,
//!     "460000000039131",
//!     &FindParams { include_comments: true, ..Default::default() },
//! )
//! .await?;
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{QueryParams, RestClient};
use crate::rest::response::response_message;
use crate::rest::{ResourceError, ResourceResponse, ValidationError};

use super::common::{encode_segment, Address};
use super::custom_field::{CustomField, CustomFieldHash, KnownCustomField, RECEIVE_STATUS_SHIPPED};

const PATH: &str = "purchaseorders";
const RECEIVES_PATH: &str = "purchasereceives";

/// Status every pre-issue state collapses to.
pub const RESERVED_STATUS: &str = "reserved";

/// Collapses Zoho's pre-issue statuses into [`RESERVED_STATUS`].
///
/// `draft`, `pending_approval`, `to approve` and `approved` become
/// `reserved`; every other status passes through unchanged.
///
/// ```rust
/// use zoho_inventory::rest::resources::normalize_status;
///
/// assert_eq!(normalize_status("draft"), "reserved");
/// assert_eq!(normalize_status("to approve"), "reserved");
/// assert_eq!(normalize_status("issued"), "issued");
/// ```
#[must_use]
pub fn normalize_status(status: &str) -> &str {
    match status {
        "draft" | "pending_approval" | "to approve" | "approved" => RESERVED_STATUS,
        other => other,
    }
}

/// A Zoho Inventory purchase order.
///
/// Fields Zoho omits from list responses (line items, comments, addresses)
/// are optional or default to empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PurchaseOrder {
    /// Zoho id of the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchaseorder_id: Option<String>,

    /// Human-facing order number, e.g. `PO-00001`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchaseorder_number: Option<String>,

    /// Id of the vendor contact the order is placed with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,

    /// Vendor display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Vendor company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Raw Zoho status, e.g. `draft`, `issued`, `billed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Order status independent of billing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,

    /// Billing status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billed_status: Option<String>,

    /// Receive status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_status: Option<String>,

    /// External reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    /// Order date (`yyyy-mm-dd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Expected delivery date (`yyyy-mm-dd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,

    /// Delivery date promised by the vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<String>,

    /// Currency code, e.g. `USD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    /// Sum before taxes and adjustments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_total: Option<f64>,

    /// Tax amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_total: Option<f64>,

    /// Grand total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_via: Option<String>,

    /// Vendor-facing notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Terms and conditions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,

    /// Whether the order ships directly to a customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_drop_shipment: Option<bool>,

    /// Sales order the purchase order was raised for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salesorder_id: Option<String>,

    /// Custom field values keyed by API name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_hash: Option<CustomFieldHash>,

    /// Ordered items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,

    /// Where the goods are delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Address>,

    /// Comments, when requested with [`FindParams::include_comments`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<PurchaseOrderComment>>,

    /// Receives recorded against the order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purchasereceives: Vec<PurchaseReceiveSummary>,

    /// Bills raised for the order, as returned by Zoho.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bills: Vec<Value>,

    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    /// Last modification timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,
}

/// An ordered item as Zoho returns it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LineItem {
    /// Id of the line within the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<String>,

    /// Id of the inventory item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,

    /// Stock keeping unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Item name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Line description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,

    /// Ordered quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    /// Quantity received so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_received: Option<f64>,

    /// Quantity cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_cancelled: Option<f64>,

    /// Line total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_total: Option<f64>,

    /// Unit, e.g. `pcs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Tax applied to the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Sales order line this line fulfills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salesorder_item_id: Option<String>,

    /// Item custom fields keyed by API name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_custom_field_hash: Option<CustomFieldHash>,
}

/// An item to order, in the caller's shape.
///
/// Serializes to Zoho's field names (`id` becomes `item_id`,
/// `salesorder_item_id` and `tax_id` are kept).
///
/// ```rust
/// use zoho_inventory::rest::resources::NewLineItem;
///
/// let item = NewLineItem {
///     id: "460000000017088".to_string(),
///     quantity: 2.0,
///     rate: Some(12.5),
///     ..Default::default()
/// };
/// let value = serde_json::to_value(&item).unwrap();
/// assert_eq!(value["item_id"], "460000000017088");
/// assert!(value.get("id").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NewLineItem {
    /// Id of the inventory item.
    #[serde(rename = "item_id")]
    pub id: String,

    /// Item name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Quantity to order.
    pub quantity: f64,

    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,

    /// Line description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tax to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Sales order line this line fulfills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salesorder_item_id: Option<String>,
}

/// A comment in an order's history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PurchaseOrderComment {
    /// Comment id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,

    /// Order the comment belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchaseorder_id: Option<String>,

    /// `system` or `internal`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<String>,

    /// Comment text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Date (`yyyy-mm-dd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Relative date, e.g. `2 days ago`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_description: Option<String>,

    /// Time of day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Operation that produced the comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,

    /// Transaction type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
}

/// A receive listed on an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PurchaseReceiveSummary {
    /// Receive id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_id: Option<String>,

    /// Receive number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_number: Option<String>,

    /// Receive date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Filters for [`PurchaseOrder::list`].
///
/// Unset filters are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderListParams {
    /// Only orders placed with this vendor.
    pub vendor_id: Option<String>,
    /// Only orders for this fulfillment center.
    pub fulfillment_center_id: Option<String>,
    /// Exact order number.
    pub purchaseorder_number: Option<String>,
    /// Page to fetch, starting at 1.
    pub page: Option<u32>,
    /// Records per page (Zoho maximum 200).
    pub per_page: Option<u32>,
    /// `draft`, `issued`, `received`, `cancelled`, `billed` or `closed`.
    pub status: Option<String>,
    /// Receive status filter.
    pub receive_status: Option<String>,
}

impl PurchaseOrderListParams {
    /// Converts the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set("vendor_id", self.vendor_id.clone());
        query.set("fulfillment_center_id", self.fulfillment_center_id.clone());
        query.set("purchaseorder_number", self.purchaseorder_number.clone());
        query.set("page", self.page.map(|page| page.to_string()));
        query.set("per_page", self.per_page.map(|per_page| per_page.to_string()));
        query.set("status", self.status.clone());
        query.set("receive_status", self.receive_status.clone());
        query
    }
}

/// Options for [`PurchaseOrder::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindParams {
    /// Fail unless the order belongs to this vendor.
    pub vendor_id: Option<String>,
    /// Fail unless the order is for this fulfillment center.
    pub fulfillment_center_id: Option<String>,
    /// Attach the order's comments.
    pub include_comments: bool,
}

/// Changes for [`PurchaseOrder::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseOrderUpdate {
    /// Replacement line items.
    pub line_items: Option<Vec<NewLineItem>>,
    /// New carrier.
    pub ship_via: Option<String>,
    /// Moves the order to another fulfillment center.
    pub fulfillment_center_id: Option<String>,
    /// Further custom fields to write.
    pub custom_fields: Vec<CustomField>,
}

/// A comment to add with [`PurchaseOrder::add_comment`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NewComment {
    /// Comment text.
    pub description: String,
    /// Delivery date the vendor expects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<NaiveDate>,
}

/// A receive to record with [`PurchaseOrder::create_receive`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPurchaseReceive {
    /// Date the goods arrived.
    pub date: NaiveDate,
    /// Received quantities.
    pub line_items: Vec<ReceiveLineItem>,
    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A received quantity for one order line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiveLineItem {
    /// The order line.
    pub line_item_id: String,
    /// Quantity received.
    pub quantity: f64,
}

/// Body of a create or update request.
#[derive(Debug, Serialize)]
struct OrderBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_items: Option<&'a [NewLineItem]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ship_via: Option<&'a str>,
    custom_fields: Vec<CustomField>,
}

impl<'a> OrderBody<'a> {
    fn new(
        vendor_id: Option<&'a str>,
        line_items: Option<&'a [NewLineItem]>,
        fulfillment_center_id: Option<&str>,
        mut custom_fields: Vec<CustomField>,
    ) -> Self {
        if let Some(id) = fulfillment_center_id.filter(|id| !id.is_empty()) {
            custom_fields.push(CustomField::known(KnownCustomField::FulfillmentCenterId, id));
        }
        Self {
            vendor_id,
            line_items: line_items.filter(|items| !items.is_empty()),
            ship_via: None,
            custom_fields,
        }
    }

    fn into_value(self) -> Result<Value, ResourceError> {
        serde_json::to_value(self).map_err(|e| ResourceError::UnexpectedResponse {
            resource: PurchaseOrder::NAME,
            message: format!("failed to serialize request body: {e}"),
        })
    }
}

fn require_order_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::not_found("Order id is required"));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

impl PurchaseOrder {
    /// Resource name used in errors.
    pub const NAME: &'static str = "PurchaseOrder";

    /// Returns the status with pre-issue states collapsed to `reserved`.
    #[must_use]
    pub fn normalized_status(&self) -> Option<&str> {
        self.status.as_deref().map(normalize_status)
    }

    /// Returns the fulfillment center recorded in the custom fields.
    #[must_use]
    pub fn fulfillment_center_id(&self) -> Option<&str> {
        self.custom_field(KnownCustomField::FulfillmentCenterId)
    }

    /// Returns the shipment tracking number recorded in the custom fields.
    #[must_use]
    pub fn shipment_tracking_number(&self) -> Option<&str> {
        self.custom_field(KnownCustomField::ShipmentTrackingNumber)
    }

    /// Returns a known custom field.
    #[must_use]
    pub fn custom_field(&self, field: KnownCustomField) -> Option<&str> {
        self.custom_field_hash
            .as_ref()
            .and_then(|hash| hash.get(field))
    }

    /// Checks that the order belongs to the given vendor and fulfillment center.
    ///
    /// Empty or missing expectations are not checked.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] with code 404 on a mismatch.
    pub fn check_ownership(
        &self,
        vendor_id: Option<&str>,
        fulfillment_center_id: Option<&str>,
    ) -> Result<(), ValidationError> {
        if let Some(vendor_id) = non_empty(vendor_id) {
            if self.vendor_id.as_deref() != Some(vendor_id) {
                return Err(ValidationError::not_found(
                    "This order is not related to this vendor",
                ));
            }
        }
        if let Some(fulfillment_center_id) = non_empty(fulfillment_center_id) {
            if self.fulfillment_center_id() != Some(fulfillment_center_id) {
                return Err(ValidationError::not_found(
                    "This order is not related to this fulfillment center",
                ));
            }
        }
        Ok(())
    }

    /// Lists purchase orders.
    ///
    /// Sends a GET request to `/api/v1/purchaseorders`. A
    /// `fulfillment_center_id` filter is also sent as
    /// `cf_fulfillment_center_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the body has no
    /// `purchaseorders` list, or a wrapped request error.
    pub async fn list(
        client: &RestClient,
        params: &PurchaseOrderListParams,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let body = client.get(PATH, Some(params.to_query())).await?;
        ResourceResponse::from_body(body, "purchaseorders", Self::NAME)
    }

    /// Fetches one purchase order.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] (404) if `id` is empty or the order
    ///   belongs to another vendor or fulfillment center
    /// - [`ResourceError::UnexpectedResponse`] if the body has no `purchaseorder`
    /// - a wrapped request error otherwise
    pub async fn find(
        client: &RestClient,
        id: &str,
        params: &FindParams,
    ) -> Result<Self, ResourceError> {
        require_order_id(id)?;

        let mut query = QueryParams::new();
        query.set("vendor_id", non_empty(params.vendor_id.as_deref()));
        query.set(
            "fulfillment_center_id",
            non_empty(params.fulfillment_center_id.as_deref()),
        );

        let path = format!("{PATH}/{}", encode_segment(id));
        let body = client.get(&path, Some(query)).await?;
        let mut order =
            ResourceResponse::<Self>::from_body(body, "purchaseorder", Self::NAME)?.into_inner();

        order.check_ownership(
            params.vendor_id.as_deref(),
            params.fulfillment_center_id.as_deref(),
        )?;

        if params.include_comments {
            order.comments = Some(Self::comments(client, id).await?);
        }
        Ok(order)
    }

    /// Fetches the comments of an order.
    ///
    /// A body without `comments` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `id` is empty, or a wrapped
    /// request error.
    pub async fn comments(
        client: &RestClient,
        id: &str,
    ) -> Result<Vec<PurchaseOrderComment>, ResourceError> {
        require_order_id(id)?;

        let path = format!("{PATH}/{}/comments", encode_segment(id));
        let body = client.get(&path, None).await?;
        match body.get("comments") {
            Some(comments) if !comments.is_null() => serde_json::from_value(comments.clone())
                .map_err(|e| ResourceError::UnexpectedResponse {
                    resource: Self::NAME,
                    message: format!("failed to deserialize 'comments': {e}"),
                }),
            _ => Ok(Vec::new()),
        }
    }

    /// Creates a purchase order for a vendor and fulfillment center.
    ///
    /// The fulfillment center is written as the "Fulfillment Center Id"
    /// custom field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] (400) if `vendor_id` is empty,
    /// [`ResourceError::UnexpectedResponse`] if the body has no
    /// `purchaseorder`, or a wrapped request error.
    pub async fn create(
        client: &RestClient,
        vendor_id: &str,
        fulfillment_center_id: &str,
        line_items: &[NewLineItem],
    ) -> Result<Self, ResourceError> {
        if vendor_id.trim().is_empty() {
            return Err(ValidationError::bad_request("Vendor id is required").into());
        }

        let body = OrderBody::new(
            Some(vendor_id),
            Some(line_items),
            Some(fulfillment_center_id),
            Vec::new(),
        )
        .into_value()?;

        let response = client.post(PATH, Some(body), None).await?;
        let order: ResourceResponse<Self> =
            ResourceResponse::from_body(response, "purchaseorder", Self::NAME)?;
        Ok(order.into_inner())
    }

    /// Updates an order after checking it belongs to `vendor_id`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate); a wrapped request error otherwise.
    pub async fn update(
        client: &RestClient,
        id: &str,
        vendor_id: &str,
        update: &PurchaseOrderUpdate,
    ) -> Result<Self, ResourceError> {
        Self::validate(client, id, Some(vendor_id), None).await?;

        let mut body = OrderBody::new(
            None,
            update.line_items.as_deref(),
            update.fulfillment_center_id.as_deref(),
            update.custom_fields.clone(),
        );
        body.ship_via = update.ship_via.as_deref();

        let response = client
            .put(
                &format!("{PATH}/{}", encode_segment(id)),
                body.into_value()?,
                None,
            )
            .await?;
        let order: ResourceResponse<Self> =
            ResourceResponse::from_body(response, "purchaseorder", Self::NAME)?;
        Ok(order.into_inner())
    }

    /// Adds a comment to an order owned by `vendor_id`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate); a wrapped request error otherwise.
    pub async fn add_comment(
        client: &RestClient,
        id: &str,
        vendor_id: &str,
        comment: &NewComment,
    ) -> Result<PurchaseOrderComment, ResourceError> {
        Self::validate(client, id, Some(vendor_id), None).await?;

        let body = serde_json::to_value(comment).map_err(|e| ResourceError::UnexpectedResponse {
            resource: Self::NAME,
            message: format!("failed to serialize comment: {e}"),
        })?;
        let response = client
            .post(
                &format!("{PATH}/{}/comments", encode_segment(id)),
                Some(body),
                None,
            )
            .await?;
        let comment: ResourceResponse<PurchaseOrderComment> =
            ResourceResponse::from_body(response, "comment", Self::NAME)?;
        Ok(comment.into_inner())
    }

    /// Marks an order owned by `vendor_id` as shipped.
    ///
    /// Writes the "Shipment Tracking Number" custom field, sets
    /// "Receive Status" to `shipped` and updates the carrier.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate); a wrapped request error otherwise.
    pub async fn set_tracking_number(
        client: &RestClient,
        id: &str,
        vendor_id: &str,
        tracking_number: &str,
        ship_via: &str,
    ) -> Result<Self, ResourceError> {
        Self::validate(client, id, Some(vendor_id), None).await?;

        let mut body = OrderBody::new(
            None,
            None,
            None,
            vec![
                CustomField::known(KnownCustomField::ShipmentTrackingNumber, tracking_number),
                CustomField::known(KnownCustomField::ReceiveStatus, RECEIVE_STATUS_SHIPPED),
            ],
        );
        body.ship_via = Some(ship_via);

        let response = client
            .put(
                &format!("{PATH}/{}", encode_segment(id)),
                body.into_value()?,
                None,
            )
            .await?;
        let order: ResourceResponse<Self> =
            ResourceResponse::from_body(response, "purchaseorder", Self::NAME)?;
        Ok(order.into_inner())
    }

    /// Changes the status of an order owned by `vendor_id`.
    ///
    /// Sends a POST request to `/api/v1/purchaseorders/{id}/status/{status}`
    /// and returns Zoho's message.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] (400) if `status` is empty; see
    /// [`validate`](Self::validate) for the rest.
    pub async fn set_status(
        client: &RestClient,
        id: &str,
        vendor_id: &str,
        status: &str,
    ) -> Result<String, ResourceError> {
        if status.trim().is_empty() {
            return Err(ValidationError::bad_request("Status is required").into());
        }
        Self::validate(client, id, Some(vendor_id), None).await?;

        let path = format!(
            "{PATH}/{}/status/{}",
            encode_segment(id),
            encode_segment(status)
        );
        let response = client.post(&path, None, None).await?;
        Ok(response_message(&response))
    }

    /// Records a receive against an order for `fulfillment_center_id`.
    ///
    /// Sends a POST request to `/api/v1/purchasereceives?purchaseorder_id={id}`
    /// and returns Zoho's message.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate); a wrapped request error otherwise.
    pub async fn create_receive(
        client: &RestClient,
        id: &str,
        fulfillment_center_id: &str,
        receive: &NewPurchaseReceive,
    ) -> Result<String, ResourceError> {
        Self::validate(client, id, None, Some(fulfillment_center_id)).await?;

        let body = serde_json::to_value(receive).map_err(|e| ResourceError::UnexpectedResponse {
            resource: Self::NAME,
            message: format!("failed to serialize receive: {e}"),
        })?;
        let query: QueryParams = [("purchaseorder_id", id)].into_iter().collect();
        let response = client.post(RECEIVES_PATH, Some(body), Some(query)).await?;
        Ok(response_message(&response))
    }

    /// Checks that an order exists and belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] (404) if `id` is empty or the
    /// order belongs to another vendor or fulfillment center, or the error of
    /// fetching the order.
    pub async fn validate(
        client: &RestClient,
        id: &str,
        vendor_id: Option<&str>,
        fulfillment_center_id: Option<&str>,
    ) -> Result<Self, ResourceError> {
        let params = FindParams {
            vendor_id: vendor_id.map(ToString::to_string),
            fulfillment_center_id: fulfillment_center_id.map(ToString::to_string),
            include_comments: false,
        };
        Self::find(client, id, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_with(vendor_id: &str, fulfillment_center_id: Option<&str>) -> PurchaseOrder {
        let mut hash = CustomFieldHash::default();
        if let Some(id) = fulfillment_center_id {
            hash.set(KnownCustomField::FulfillmentCenterId, id);
        }
        PurchaseOrder {
            vendor_id: Some(vendor_id.to_string()),
            custom_field_hash: Some(hash),
            ..Default::default()
        }
    }

    #[test]
    fn test_pre_issue_statuses_collapse_to_reserved() {
        for status in ["draft", "pending_approval", "to approve", "approved"] {
            assert_eq!(normalize_status(status), "reserved");
        }
    }

    #[test]
    fn test_other_statuses_pass_through() {
        for status in [
            "issued",
            "partially_received",
            "received",
            "billed",
            "cancelled",
            "closed",
        ] {
            assert_eq!(normalize_status(status), status);
        }
    }

    #[test]
    fn test_normalized_status_on_order() {
        let order = PurchaseOrder {
            status: Some("draft".to_string()),
            ..Default::default()
        };
        assert_eq!(order.normalized_status(), Some("reserved"));
        assert_eq!(PurchaseOrder::default().normalized_status(), None);
    }

    #[test]
    fn test_deserialize_zoho_order() {
        let order: PurchaseOrder = serde_json::from_value(json!({
            "purchaseorder_id": "460000000039131",
            "purchaseorder_number": "PO-00001",
            "vendor_id": "460000000026049",
            "status": "issued",
            "total": 125.5,
            "custom_field_hash": {
                "cf_fulfillment_center_id": "FC1",
                "cf_shipment_tracking_number": "1Z999"
            },
            "line_items": [
                {"line_item_id": "1", "item_id": "460000000017088", "quantity": 2, "rate": 62.75}
            ],
            "delivery_address": {"city": "Istanbul"},
            "some_field_we_ignore": true
        }))
        .unwrap();

        assert_eq!(order.fulfillment_center_id(), Some("FC1"));
        assert_eq!(order.shipment_tracking_number(), Some("1Z999"));
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].quantity, Some(2.0));
        assert_eq!(
            order.delivery_address.unwrap().city.as_deref(),
            Some("Istanbul")
        );
    }

    #[test]
    fn test_ownership_accepts_matching_vendor_and_center() {
        let order = order_with("V1", Some("FC1"));
        assert!(order.check_ownership(Some("V1"), Some("FC1")).is_ok());
        assert!(order.check_ownership(None, None).is_ok());
        assert!(order.check_ownership(Some(""), Some("")).is_ok());
    }

    #[test]
    fn test_ownership_rejects_other_vendor() {
        let error = order_with("V1", None)
            .check_ownership(Some("V2"), None)
            .unwrap_err();
        assert_eq!(error.code, 404);
        assert_eq!(error.message, "This order is not related to this vendor");
    }

    #[test]
    fn test_ownership_rejects_other_fulfillment_center() {
        let error = order_with("V1", Some("FC1"))
            .check_ownership(None, Some("FC2"))
            .unwrap_err();
        assert_eq!(
            error.message,
            "This order is not related to this fulfillment center"
        );

        let without_hash = PurchaseOrder {
            vendor_id: Some("V1".to_string()),
            ..Default::default()
        };
        assert!(without_hash.check_ownership(None, Some("FC1")).is_err());
    }

    #[test]
    fn test_create_body_renames_items_and_adds_center_field() {
        let items = vec![NewLineItem {
            id: "ITEM1".to_string(),
            name: Some("Widget".to_string()),
            quantity: 3.0,
            rate: Some(9.99),
            tax_id: Some("TAX1".to_string()),
            salesorder_item_id: Some("SOI1".to_string()),
            ..Default::default()
        }];

        let body = OrderBody::new(Some("V1"), Some(items.as_slice()), Some("FC1"), Vec::new())
            .into_value()
            .unwrap();

        assert_eq!(
            body,
            json!({
                "vendor_id": "V1",
                "line_items": [{
                    "item_id": "ITEM1",
                    "name": "Widget",
                    "quantity": 3.0,
                    "rate": 9.99,
                    "tax_id": "TAX1",
                    "salesorder_item_id": "SOI1"
                }],
                "custom_fields": [
                    {"label": "Fulfillment Center Id", "value": "FC1"}
                ]
            })
        );
    }

    #[test]
    fn test_update_body_keeps_existing_custom_fields() {
        let body = OrderBody::new(
            None,
            Some([].as_slice()),
            Some(""),
            vec![CustomField::other("Warehouse Note", "fragile")],
        )
        .into_value()
        .unwrap();

        assert_eq!(
            body,
            json!({"custom_fields": [{"label": "Warehouse Note", "value": "fragile"}]})
        );
    }

    #[test]
    fn test_list_params_leave_unset_filters_undefined() {
        let params = PurchaseOrderListParams {
            vendor_id: Some("V1".to_string()),
            page: Some(2),
            ..Default::default()
        };
        let query = params.to_query();

        assert_eq!(query.get("vendor_id"), Some("V1"));
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get("status"), None);
        assert_eq!(query.sanitized().to_query_string(), "vendor_id=V1&page=2");
    }

    #[test]
    fn test_new_comment_serializes_date() {
        let comment = NewComment {
            description: "Delayed".to_string(),
            expected_delivery_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        };
        assert_eq!(
            serde_json::to_value(&comment).unwrap(),
            json!({"description": "Delayed", "expected_delivery_date": "2024-05-01"})
        );
    }

    #[test]
    fn test_require_order_id() {
        assert!(require_order_id("460000000039131").is_ok());
        let error = require_order_id(" ").unwrap_err();
        assert_eq!(error.code, 404);
        assert_eq!(error.message, "Order id is required");
    }
}
