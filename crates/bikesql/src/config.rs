use crate::error::{Error, Result};
use crate::models::{CategoryId, ProductId, StaffId};
use std::path::PathBuf;

/// Order status code the store uses for completed orders.
pub const COMPLETED_ORDER_STATUS: i64 = 3;

/// Inputs of the parameterized reports.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    /// Staff member whose orders are listed (report 2).
    pub staff_id: StaffId,
    /// Category whose products are listed (report 3).
    pub category_name: String,
    /// Stock quantity below which a product counts as low (report 8).
    pub low_stock_threshold: i64,
    /// Model year filter (report 10).
    pub model_year: i64,
    /// Category whose products are counted (report 12).
    pub category_id: CategoryId,
    /// Product looked up by id (report 14).
    pub product_id: ProductId,
    /// Line item quantity above which a product counts as bulk ordered (report 15).
    pub bulk_quantity_threshold: i64,
    /// Status code of the orders listed (report 19).
    pub order_status: i64,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            staff_id: 3,
            category_name: "Mountain Bikes".to_string(),
            low_stock_threshold: 5,
            model_year: 2019,
            category_id: 2,
            product_id: 5,
            bulk_quantity_threshold: 3,
            order_status: COMPLETED_ORDER_STATUS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub params: QueryParams,
}

impl Config {
    pub fn new(database_path: PathBuf, params: QueryParams) -> Result<Self> {
        if !database_path.is_file() {
            return Err(Error::Connectivity(format!(
                "Database file does not exist: {}",
                database_path.display()
            )));
        }

        Ok(Self {
            database_path,
            params,
        })
    }

    pub fn default_database_path() -> PathBuf {
        PathBuf::from("bikestores.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = QueryParams::default();
        assert_eq!(params.staff_id, 3);
        assert_eq!(params.category_name, "Mountain Bikes");
        assert_eq!(params.low_stock_threshold, 5);
        assert_eq!(params.model_year, 2019);
        assert_eq!(params.category_id, 2);
        assert_eq!(params.product_id, 5);
        assert_eq!(params.bulk_quantity_threshold, 3);
        assert_eq!(params.order_status, COMPLETED_ORDER_STATUS);
    }

    #[test]
    fn test_missing_database_file() {
        let result = Config::new(
            PathBuf::from("/nonexistent/bikestores.db"),
            QueryParams::default(),
        );
        assert!(matches!(result, Err(Error::Connectivity(_))));
    }
}
