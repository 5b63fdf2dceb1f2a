use super::QueryService;
use crate::error::Result;
use crate::models::{NamedCount, StaffContact};

impl QueryService<'_> {
    /// Counts the orders each staff member processed. Staff without orders count 0.
    pub fn staff_order_counts(&self) -> Result<Vec<NamedCount>> {
        self.fetch_all(
            "staff_order_counts",
            "SELECT s.first_name || ' ' || s.last_name AS full_name,
                    COUNT(o.order_id) AS order_count
             FROM staffs s
             LEFT JOIN orders o ON o.staff_id = s.staff_id
             GROUP BY s.staff_id
             ORDER BY s.staff_id",
            [],
            |row| {
                Ok(NamedCount {
                    name: row.get(0)?,
                    count: row.get(1)?,
                })
            },
        )
    }

    /// Lists active staff members with their phone numbers.
    pub fn active_staff_contacts(&self) -> Result<Vec<StaffContact>> {
        self.fetch_all(
            "active_staff_contacts",
            "SELECT first_name, last_name, phone
             FROM staffs
             WHERE active = 1
             ORDER BY staff_id",
            [],
            |row| {
                Ok(StaffContact {
                    first_name: row.get(0)?,
                    last_name: row.get(1)?,
                    phone: row.get(2)?,
                })
            },
        )
    }
}
