//! Error types for bikesql.

use thiserror::Error;

/// Errors raised while reading from the store.
///
/// Both kinds are fatal to a report batch: there is no retry and no partial
/// result. A lookup that finds no row is not an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The store could not be reached or opened.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// An expected table or column is missing or has an unexpected type.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Result type for bikesql operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::Error as E;

        match &err {
            E::FromSqlConversionFailure(..)
            | E::IntegralValueOutOfRange(..)
            | E::InvalidColumnIndex(_)
            | E::InvalidColumnName(_)
            | E::InvalidColumnType(..) => Error::SchemaMismatch(err.to_string()),

            E::SqliteFailure(_, Some(message)) if is_missing_relation(message) => {
                Error::SchemaMismatch(message.clone())
            }

            // Prepare errors with a known offset carry the message separately.
            E::SqlInputError { msg, .. } if is_missing_relation(msg) => {
                Error::SchemaMismatch(msg.clone())
            }

            _ => Error::Connectivity(err.to_string()),
        }
    }
}

/// SQLite reports unknown tables and columns as generic errors at prepare time.
fn is_missing_relation(message: &str) -> bool {
    message.starts_with("no such table") || message.starts_with("no such column")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_missing_table_is_schema_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        let err: Error = conn.prepare("SELECT * FROM products").unwrap_err().into();
        assert!(matches!(err, Error::SchemaMismatch(msg) if msg.contains("products")));
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE brands (brand_id INTEGER)", [])
            .unwrap();
        let err: Error = conn
            .prepare("SELECT brand_name FROM brands")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::SchemaMismatch(msg) if msg.contains("brand_name")));
    }

    #[test]
    fn test_missing_qualified_column_is_schema_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE brands (brand_id INTEGER);
             CREATE TABLE products (product_id INTEGER, brand_id INTEGER);",
        )
        .unwrap();
        let err: Error = conn
            .prepare(
                "SELECT p.product_id, b.brand_name
                   FROM products p JOIN brands b ON b.brand_id = p.brand_id",
            )
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::SchemaMismatch(msg) if msg.contains("b.brand_name")));
    }

    #[test]
    fn test_type_conversion_is_schema_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        let err: Error = conn
            .query_row("SELECT 'not a number'", [], |row| row.get::<_, i64>(0))
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[test]
    fn test_open_failure_is_connectivity() {
        let err: Error = Connection::open_with_flags(
            "/nonexistent/dir/bikestores.db",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .unwrap_err()
        .into();
        assert!(matches!(err, Error::Connectivity(_)));
    }
}
