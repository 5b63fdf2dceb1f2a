//! Read queries over the bike stores schema.
//!
//! Each query is one SQL statement with explicit joins, fully materialized
//! before it returns. Queries are grouped by the entity they report on:
//!
//! - `customers`: contacts and order counts per customer
//! - `orders`: orders by staff, store, shipping state and status
//! - `products`: catalog lookups, stock levels and sales
//! - `staff`: order counts and contacts of staff members
//!
//! Unless stated otherwise, results are ordered by primary key.

mod customers;
mod orders;
mod products;
mod staff;

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Params, Row};
use tracing::debug;

/// Runs the report queries against a borrowed connection.
pub struct QueryService<'a> {
    conn: &'a Connection,
}

impl<'a> QueryService<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn fetch_all<T, P, F>(&self, label: &str, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        debug!(query = label, rows = rows.len(), "Query materialized");
        Ok(rows)
    }

    fn fetch_optional<T, P, F>(&self, label: &str, sql: &str, params: P, map: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let row = self.conn.query_row(sql, params, map).optional()?;
        debug!(query = label, found = row.is_some(), "Query materialized");
        Ok(row)
    }

    fn fetch_names<P: Params>(&self, label: &str, sql: &str, params: P) -> Result<Vec<String>> {
        self.fetch_all(label, sql, params, |row| row.get("product_name"))
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use rusqlite::Connection;

    const FIXTURE_SQL: &str = include_str!("../../tests/fixtures/bikestores.sql");

    /// In-memory copy of the test database.
    pub fn connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(FIXTURE_SQL).unwrap();
        conn
    }
}
