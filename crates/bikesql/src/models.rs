//! Rows materialized by the reports.

use serde::Serialize;

pub type CustomerId = i64;
pub type OrderId = i64;
pub type ProductId = i64;
pub type StaffId = i64;
pub type StoreId = i64;
pub type CategoryId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// An order processed by a given staff member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffOrder {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreOrderCount {
    pub store_id: StoreId,
    pub order_count: i64,
}

/// A display name paired with a count of related rows.
///
/// The count is 0, never absent, when there are no related rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffContact {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product_name: String,
    pub brand_name: String,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub product_name: String,
    pub total_quantity: i64,
}
