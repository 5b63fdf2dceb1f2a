use super::QueryService;
use crate::error::Result;
use crate::models::{CategoryId, NamedCount, ProductDetail, ProductId, ProductSales};

impl QueryService<'_> {
    /// Lists products in the category with the given name, ignoring ASCII case.
    pub fn products_in_category(&self, category_name: &str) -> Result<Vec<String>> {
        self.fetch_names(
            "products_in_category",
            "SELECT p.product_name AS product_name
             FROM products p
             JOIN categories c ON c.category_id = p.category_id
             WHERE c.category_name = ?1 COLLATE NOCASE
             ORDER BY p.product_id",
            [category_name],
        )
    }

    /// Lists products that appear in no order item.
    pub fn never_ordered_products(&self) -> Result<Vec<String>> {
        self.fetch_names(
            "never_ordered_products",
            "SELECT p.product_name AS product_name
             FROM products p
             WHERE NOT EXISTS (
                 SELECT 1 FROM order_items oi WHERE oi.product_id = p.product_id
             )
             ORDER BY p.product_id",
            [],
        )
    }

    /// Lists each product with a stock row below `threshold` in any store, once.
    ///
    /// A product with no stock rows has no quantity to compare and is not listed.
    pub fn low_stock_products(&self, threshold: i64) -> Result<Vec<String>> {
        self.fetch_names(
            "low_stock_products",
            "SELECT DISTINCT p.product_id, p.product_name AS product_name
             FROM stocks s
             JOIN products p ON p.product_id = s.product_id
             WHERE s.quantity < ?1
             ORDER BY p.product_id",
            [threshold],
        )
    }

    /// Returns the product with the lowest id, if any product exists.
    pub fn first_product(&self) -> Result<Option<String>> {
        self.fetch_optional(
            "first_product",
            "SELECT product_name FROM products ORDER BY product_id LIMIT 1",
            [],
            |row| row.get(0),
        )
    }

    pub fn products_by_model_year(&self, year: i64) -> Result<Vec<String>> {
        self.fetch_names(
            "products_by_model_year",
            "SELECT product_name FROM products WHERE model_year = ?1 ORDER BY product_id",
            [year],
        )
    }

    /// Counts the order items of each product. Unordered products count 0.
    pub fn product_order_counts(&self) -> Result<Vec<NamedCount>> {
        self.fetch_all(
            "product_order_counts",
            "SELECT p.product_name, COUNT(oi.product_id) AS times_ordered
             FROM products p
             LEFT JOIN order_items oi ON oi.product_id = p.product_id
             GROUP BY p.product_id
             ORDER BY p.product_id",
            [],
            |row| {
                Ok(NamedCount {
                    name: row.get(0)?,
                    count: row.get(1)?,
                })
            },
        )
    }

    pub fn count_products_in_category(&self, category_id: CategoryId) -> Result<i64> {
        let count = self.fetch_optional(
            "count_products_in_category",
            "SELECT COUNT(*) FROM products WHERE category_id = ?1",
            [category_id],
            |row| row.get(0),
        )?;
        Ok(count.unwrap_or(0))
    }

    /// Averages the list price over all products.
    ///
    /// Returns `None` when there are no products to average.
    pub fn average_list_price(&self) -> Result<Option<f64>> {
        let average = self.fetch_optional(
            "average_list_price",
            "SELECT AVG(list_price) FROM products",
            [],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(average.flatten())
    }

    pub fn product_name_by_id(&self, product_id: ProductId) -> Result<Option<String>> {
        self.fetch_optional(
            "product_name_by_id",
            "SELECT product_name FROM products WHERE product_id = ?1",
            [product_id],
            |row| row.get(0),
        )
    }

    /// Lists each product ordered with more than `threshold` units in a line item, once.
    pub fn bulk_ordered_products(&self, threshold: i64) -> Result<Vec<String>> {
        self.fetch_names(
            "bulk_ordered_products",
            "SELECT DISTINCT p.product_id, p.product_name AS product_name
             FROM order_items oi
             JOIN products p ON p.product_id = oi.product_id
             WHERE oi.quantity > ?1
             ORDER BY p.product_id",
            [threshold],
        )
    }

    /// Lists products with their brand and category names.
    pub fn product_details(&self) -> Result<Vec<ProductDetail>> {
        self.fetch_all(
            "product_details",
            "SELECT p.product_name, b.brand_name, c.category_name
             FROM products p
             JOIN brands b ON b.brand_id = p.brand_id
             JOIN categories c ON c.category_id = p.category_id
             ORDER BY p.product_id",
            [],
            |row| {
                Ok(ProductDetail {
                    product_name: row.get(0)?,
                    brand_name: row.get(1)?,
                    category_name: row.get(2)?,
                })
            },
        )
    }

    /// Sums the quantity sold of each product. Unsold products total 0.
    pub fn product_sales_totals(&self) -> Result<Vec<ProductSales>> {
        self.fetch_all(
            "product_sales_totals",
            "SELECT p.product_name, COALESCE(SUM(oi.quantity), 0) AS total_quantity
             FROM products p
             LEFT JOIN order_items oi ON oi.product_id = p.product_id
             GROUP BY p.product_id
             ORDER BY p.product_id",
            [],
            |row| {
                Ok(ProductSales {
                    product_name: row.get(0)?,
                    total_quantity: row.get(1)?,
                })
            },
        )
    }
}
