use super::QueryService;
use crate::error::Result;
use crate::models::{CustomerContact, NamedCount};

impl QueryService<'_> {
    /// Lists every customer's name and email address.
    pub fn customer_contacts(&self) -> Result<Vec<CustomerContact>> {
        self.fetch_all(
            "customer_contacts",
            "SELECT first_name, last_name, email
             FROM customers
             ORDER BY customer_id",
            [],
            |row| {
                Ok(CustomerContact {
                    first_name: row.get(0)?,
                    last_name: row.get(1)?,
                    email: row.get(2)?,
                })
            },
        )
    }

    /// Counts the orders each customer placed. Customers without orders count 0.
    pub fn customer_order_counts(&self) -> Result<Vec<NamedCount>> {
        self.fetch_all(
            "customer_order_counts",
            "SELECT c.first_name || ' ' || c.last_name AS full_name,
                    COUNT(o.order_id) AS order_count
             FROM customers c
             LEFT JOIN orders o ON o.customer_id = c.customer_id
             GROUP BY c.customer_id
             ORDER BY c.customer_id",
            [],
            |row| {
                Ok(NamedCount {
                    name: row.get(0)?,
                    count: row.get(1)?,
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{fixture, QueryService};

    #[test]
    fn test_customer_contacts() {
        let conn = fixture::connection();
        let contacts = QueryService::new(&conn).customer_contacts().unwrap();

        assert_eq!(contacts.len(), 4);
        assert_eq!(contacts[0].first_name, "Debra");
        assert_eq!(contacts[0].last_name, "Burks");
        assert_eq!(contacts[0].email, "debra.burks@yahoo.com");
    }

    #[test]
    fn test_customer_order_counts_include_zero() {
        let conn = fixture::connection();
        let counts = QueryService::new(&conn).customer_order_counts().unwrap();

        let pairs: Vec<(&str, i64)> = counts.iter().map(|c| (c.name.as_str(), c.count)).collect();
        assert_eq!(
            pairs,
            vec![
                ("Debra Burks", 3),
                ("Kasha Todd", 2),
                ("Tameka Fisher", 2),
                ("Daryl Spence", 0),
            ]
        );
    }
}
