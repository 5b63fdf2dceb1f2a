//! The twenty numbered reports and their tabular results.

use crate::config::QueryParams;
use crate::error::{Error, Result};
use crate::query::QueryService;
use serde::Serialize;
use serde_json::{Map, Value};

/// One numbered question over the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    CustomerContacts,
    OrdersByStaff,
    ProductsInCategory,
    OrdersPerStore,
    UnshippedOrders,
    CustomerOrderCounts,
    NeverOrderedProducts,
    LowStockProducts,
    FirstProduct,
    ProductsByModelYear,
    ProductOrderCounts,
    CategoryProductCount,
    AverageListPrice,
    ProductById,
    BulkOrderedProducts,
    StaffOrderCounts,
    ActiveStaffContacts,
    ProductDetails,
    OrdersWithStatus,
    ProductSalesTotals,
}

impl Report {
    /// Every report, in run order.
    pub const ALL: [Report; 20] = [
        Report::CustomerContacts,
        Report::OrdersByStaff,
        Report::ProductsInCategory,
        Report::OrdersPerStore,
        Report::UnshippedOrders,
        Report::CustomerOrderCounts,
        Report::NeverOrderedProducts,
        Report::LowStockProducts,
        Report::FirstProduct,
        Report::ProductsByModelYear,
        Report::ProductOrderCounts,
        Report::CategoryProductCount,
        Report::AverageListPrice,
        Report::ProductById,
        Report::BulkOrderedProducts,
        Report::StaffOrderCounts,
        Report::ActiveStaffContacts,
        Report::ProductDetails,
        Report::OrdersWithStatus,
        Report::ProductSalesTotals,
    ];

    /// One-based position of the report.
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|r| r == self)
            .map(|i| i + 1)
            .unwrap_or_default()
    }

    pub fn from_number(number: usize) -> Option<Report> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Report::CustomerContacts => "Customer names and email addresses",
            Report::OrdersByStaff => "Orders processed by a staff member",
            Report::ProductsInCategory => "Products in a category",
            Report::OrdersPerStore => "Order count per store",
            Report::UnshippedOrders => "Orders not shipped yet",
            Report::CustomerOrderCounts => "Orders placed per customer",
            Report::NeverOrderedProducts => "Products never ordered",
            Report::LowStockProducts => "Products low in stock in any store",
            Report::FirstProduct => "First product",
            Report::ProductsByModelYear => "Products of a model year",
            Report::ProductOrderCounts => "Times each product was ordered",
            Report::CategoryProductCount => "Product count in a category",
            Report::AverageListPrice => "Average list price",
            Report::ProductById => "Product by id",
            Report::BulkOrderedProducts => "Products ordered in bulk",
            Report::StaffOrderCounts => "Orders processed per staff member",
            Report::ActiveStaffContacts => "Active staff and phone numbers",
            Report::ProductDetails => "Products with brand and category",
            Report::OrdersWithStatus => "Orders with a status",
            Report::ProductSalesTotals => "Total quantity sold per product",
        }
    }

    /// Title with the parameter values the report runs with.
    pub fn heading(&self, params: &QueryParams) -> String {
        let detail = match self {
            Report::OrdersByStaff => format!("staff_id = {}", params.staff_id),
            Report::ProductsInCategory => format!("category = '{}'", params.category_name),
            Report::LowStockProducts => format!("quantity < {}", params.low_stock_threshold),
            Report::ProductsByModelYear => format!("model_year = {}", params.model_year),
            Report::CategoryProductCount => format!("category_id = {}", params.category_id),
            Report::ProductById => format!("product_id = {}", params.product_id),
            Report::BulkOrderedProducts => {
                format!("quantity > {}", params.bulk_quantity_threshold)
            }
            Report::OrdersWithStatus => format!("order_status = {}", params.order_status),
            _ => return format!("{}. {}", self.number(), self.title()),
        };
        format!("{}. {} ({})", self.number(), self.title(), detail)
    }

    /// Runs the report and converts its rows into a table.
    pub fn run(&self, queries: &QueryService<'_>, params: &QueryParams) -> Result<ReportOutput> {
        match self {
            Report::CustomerContacts => ReportOutput::from_rows(
                &["first_name", "last_name", "email"],
                &queries.customer_contacts()?,
            ),
            Report::OrdersByStaff => ReportOutput::from_rows(
                &["order_id", "customer_id"],
                &queries.orders_by_staff(params.staff_id)?,
            ),
            Report::ProductsInCategory => Ok(ReportOutput::single_column(
                "product_name",
                queries.products_in_category(&params.category_name)?,
            )),
            Report::OrdersPerStore => ReportOutput::from_rows(
                &["store_id", "order_count"],
                &queries.order_count_per_store()?,
            ),
            Report::UnshippedOrders => Ok(ReportOutput::single_column(
                "order_id",
                queries.unshipped_orders()?,
            )),
            Report::CustomerOrderCounts => ReportOutput::from_rows(
                &["name", "count"],
                &queries.customer_order_counts()?,
            ),
            Report::NeverOrderedProducts => Ok(ReportOutput::single_column(
                "product_name",
                queries.never_ordered_products()?,
            )),
            Report::LowStockProducts => Ok(ReportOutput::single_column(
                "product_name",
                queries.low_stock_products(params.low_stock_threshold)?,
            )),
            Report::FirstProduct => Ok(ReportOutput::single_column(
                "product_name",
                queries.first_product()?,
            )),
            Report::ProductsByModelYear => Ok(ReportOutput::single_column(
                "product_name",
                queries.products_by_model_year(params.model_year)?,
            )),
            Report::ProductOrderCounts => ReportOutput::from_rows(
                &["name", "count"],
                &queries.product_order_counts()?,
            ),
            Report::CategoryProductCount => Ok(ReportOutput::single_column(
                "product_count",
                Some(queries.count_products_in_category(params.category_id)?),
            )),
            Report::AverageListPrice => Ok(ReportOutput::single_column(
                "average_list_price",
                queries.average_list_price()?,
            )),
            Report::ProductById => Ok(ReportOutput::single_column(
                "product_name",
                queries.product_name_by_id(params.product_id)?,
            )),
            Report::BulkOrderedProducts => Ok(ReportOutput::single_column(
                "product_name",
                queries.bulk_ordered_products(params.bulk_quantity_threshold)?,
            )),
            Report::StaffOrderCounts => ReportOutput::from_rows(
                &["name", "count"],
                &queries.staff_order_counts()?,
            ),
            Report::ActiveStaffContacts => ReportOutput::from_rows(
                &["first_name", "last_name", "phone"],
                &queries.active_staff_contacts()?,
            ),
            Report::ProductDetails => ReportOutput::from_rows(
                &["product_name", "brand_name", "category_name"],
                &queries.product_details()?,
            ),
            Report::OrdersWithStatus => Ok(ReportOutput::single_column(
                "order_id",
                queries.orders_with_status(params.order_status)?,
            )),
            Report::ProductSalesTotals => ReportOutput::from_rows(
                &["product_name", "total_quantity"],
                &queries.product_sales_totals()?,
            ),
        }
    }
}

/// The rows of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutput {
    /// Column names, in display order.
    pub columns: Vec<String>,
    /// Row data as JSON values.
    pub rows: Vec<Vec<Value>>,
}

impl ReportOutput {
    /// Builds a table from serializable rows, picking `columns` by field name.
    fn from_rows<T: Serialize>(columns: &[&str], rows: &[T]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| -> Result<Vec<Value>> {
                let value = serde_json::to_value(row)
                    .map_err(|e| Error::SchemaMismatch(format!("unrepresentable row: {e}")))?;
                Ok(columns
                    .iter()
                    .map(|c| value.get(*c).cloned().unwrap_or(Value::Null))
                    .collect())
            })
            .collect::<Result<Vec<Vec<Value>>>>()?;

        Ok(Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Builds a one-column table. An absent value yields no rows.
    fn single_column<I, V>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            columns: vec![column.to_string()],
            rows: values.into_iter().map(|v| vec![v.into()]).collect(),
        }
    }

    /// Returns true if the report produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Converts the output to a JSON array of objects keyed by column name.
    pub fn to_json_array(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (i, col) in self.columns.iter().enumerate() {
                    obj.insert(col.clone(), row.get(i).cloned().unwrap_or(Value::Null));
                }
                Value::Object(obj)
            })
            .collect()
    }
}
