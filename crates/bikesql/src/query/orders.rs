use super::QueryService;
use crate::error::Result;
use crate::models::{OrderId, StaffId, StaffOrder, StoreOrderCount};

impl QueryService<'_> {
    /// Lists the orders processed by one staff member.
    pub fn orders_by_staff(&self, staff_id: StaffId) -> Result<Vec<StaffOrder>> {
        self.fetch_all(
            "orders_by_staff",
            "SELECT order_id, customer_id
             FROM orders
             WHERE staff_id = ?1
             ORDER BY order_id",
            [staff_id],
            |row| {
                Ok(StaffOrder {
                    order_id: row.get(0)?,
                    customer_id: row.get(1)?,
                })
            },
        )
    }

    /// Counts orders per store. Stores that took no orders are not listed.
    pub fn order_count_per_store(&self) -> Result<Vec<StoreOrderCount>> {
        self.fetch_all(
            "order_count_per_store",
            "SELECT store_id, COUNT(*) AS order_count
             FROM orders
             GROUP BY store_id
             ORDER BY store_id",
            [],
            |row| {
                Ok(StoreOrderCount {
                    store_id: row.get(0)?,
                    order_count: row.get(1)?,
                })
            },
        )
    }

    /// Lists orders without a shipped date.
    pub fn unshipped_orders(&self) -> Result<Vec<OrderId>> {
        self.fetch_all(
            "unshipped_orders",
            "SELECT order_id FROM orders WHERE shipped_date IS NULL ORDER BY order_id",
            [],
            |row| row.get(0),
        )
    }

    /// Lists orders with the given status code.
    pub fn orders_with_status(&self, status: i64) -> Result<Vec<OrderId>> {
        self.fetch_all(
            "orders_with_status",
            "SELECT order_id FROM orders WHERE order_status = ?1 ORDER BY order_id",
            [status],
            |row| row.get(0),
        )
    }
}
