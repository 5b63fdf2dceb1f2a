//! Schema contract for the bike stores database.
//!
//! Lists every table and column the reports read. The store may carry more
//! columns than these; only the listed ones are checked.

use crate::error::{Error, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Storage class a column is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnKind {
    Integer,
    Text,
    Decimal,
    Date,
}

impl ColumnKind {
    /// Returns true if a column declared as `declared_type` can hold this kind.
    ///
    /// Follows SQLite's type affinity rules on the declared type name. A column
    /// declared without a type holds anything.
    pub fn accepts(&self, declared_type: &str) -> bool {
        let declared = declared_type.to_ascii_uppercase();
        if declared.trim().is_empty() {
            return true;
        }

        let any = |needles: &[&str]| needles.iter().any(|n| declared.contains(n));
        match self {
            ColumnKind::Integer => any(&["INT", "BOOL", "BIT"]),
            ColumnKind::Text => any(&["CHAR", "TEXT", "CLOB"]),
            ColumnKind::Decimal => any(&["DEC", "NUM", "REAL", "FLOA", "DOUB", "MONEY"]),
            ColumnKind::Date => any(&["DATE", "TIME", "TEXT", "CHAR"]),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Text => "TEXT",
            ColumnKind::Decimal => "DECIMAL",
            ColumnKind::Date => "DATE",
        }
    }
}

/// A column the reports depend on.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub description: &'static str,
}

/// A table the reports depend on.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: &'static [ColumnInfo],
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

const fn col(name: &'static str, kind: ColumnKind, description: &'static str) -> ColumnInfo {
    ColumnInfo {
        name,
        kind,
        nullable: false,
        description,
    }
}

const fn nullable(name: &'static str, kind: ColumnKind, description: &'static str) -> ColumnInfo {
    ColumnInfo {
        name,
        kind,
        nullable: true,
        description,
    }
}

use ColumnKind::{Date, Decimal, Integer, Text};

/// All tables read by the reports.
pub static TABLES: &[TableInfo] = &[
    TableInfo {
        name: "customers",
        description: "People who place orders",
        columns: &[
            col("customer_id", Integer, "Primary key"),
            col("first_name", Text, "Given name"),
            col("last_name", Text, "Family name"),
            col("email", Text, "Contact email"),
        ],
    },
    TableInfo {
        name: "staffs",
        description: "Employees who process orders",
        columns: &[
            col("staff_id", Integer, "Primary key"),
            col("first_name", Text, "Given name"),
            col("last_name", Text, "Family name"),
            nullable("phone", Text, "Contact phone"),
            col("active", Integer, "1 if currently employed"),
        ],
    },
    TableInfo {
        name: "stores",
        description: "Shops that take orders and hold stock",
        columns: &[col("store_id", Integer, "Primary key")],
    },
    TableInfo {
        name: "categories",
        description: "Product categories",
        columns: &[
            col("category_id", Integer, "Primary key"),
            col("category_name", Text, "Display name"),
        ],
    },
    TableInfo {
        name: "brands",
        description: "Product brands",
        columns: &[
            col("brand_id", Integer, "Primary key"),
            col("brand_name", Text, "Display name"),
        ],
    },
    TableInfo {
        name: "products",
        description: "Catalog of sellable products",
        columns: &[
            col("product_id", Integer, "Primary key"),
            col("product_name", Text, "Display name"),
            col("brand_id", Integer, "References brands"),
            col("category_id", Integer, "References categories"),
            col("model_year", Integer, "Model year"),
            col("list_price", Decimal, "Catalog price"),
        ],
    },
    TableInfo {
        name: "orders",
        description: "Customer orders",
        columns: &[
            col("order_id", Integer, "Primary key"),
            col("customer_id", Integer, "References customers"),
            col("order_status", Integer, "Status code (3 = completed)"),
            nullable("shipped_date", Date, "NULL until shipped"),
            col("store_id", Integer, "References stores"),
            col("staff_id", Integer, "References staffs"),
        ],
    },
    TableInfo {
        name: "order_items",
        description: "Line items of an order",
        columns: &[
            col("order_id", Integer, "References orders"),
            col("product_id", Integer, "References products"),
            col("quantity", Integer, "Units ordered"),
        ],
    },
    TableInfo {
        name: "stocks",
        description: "Units of a product held by a store",
        columns: &[
            col("store_id", Integer, "References stores"),
            col("product_id", Integer, "References products"),
            col("quantity", Integer, "Units on hand"),
        ],
    },
];

/// Looks up a table of the contract by name.
pub fn get_table_info(name: &str) -> Option<&'static TableInfo> {
    TABLES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Checks the live database against the contract, failing on the first mismatch.
pub fn verify(conn: &Connection) -> Result<()> {
    match mismatches(conn)?.into_iter().next() {
        Some(problem) => {
            warn!(%problem, "Schema mismatch");
            Err(Error::SchemaMismatch(problem))
        }
        None => Ok(()),
    }
}

/// Collects every difference between the live database and the contract.
pub fn mismatches(conn: &Connection) -> Result<Vec<String>> {
    let mut problems = Vec::new();

    for table in TABLES {
        let declared = declared_columns(conn, table.name)?;
        if declared.is_empty() {
            problems.push(format!("table '{}' is missing", table.name));
            continue;
        }

        for column in table.columns {
            match declared.get(column.name) {
                None => problems.push(format!(
                    "column '{}.{}' is missing",
                    table.name, column.name
                )),
                Some(declared_type) if !column.kind.accepts(declared_type) => {
                    problems.push(format!(
                        "column '{}.{}' is declared {}, expected {}",
                        table.name,
                        column.name,
                        declared_type,
                        column.kind.as_str()
                    ))
                }
                Some(_) => {}
            }
        }
    }

    Ok(problems)
}

/// Reads column names and declared types. An unknown table yields no rows.
fn declared_columns(conn: &Connection, table: &str) -> Result<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT name, type FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([table], |row| {
            Ok((row.get::<_, String>(0)?.to_lowercase(), row.get(1)?))
        })?
        .collect::<rusqlite::Result<HashMap<String, String>>>()?;
    Ok(columns)
}
