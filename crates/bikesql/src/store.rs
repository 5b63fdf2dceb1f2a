//! Read-only handle to the bike stores database.

use crate::error::{Error, Result};
use crate::query::QueryService;
use crate::schema;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A read-only connection to the store.
///
/// The connection is acquired once in [`Store::open`] and released when the
/// `Store` is dropped, so a failing report never leaks it.
///
/// # Example
///
/// ```no_run
/// use bikesql::Store;
///
/// let store = Store::open("bikestores.db")?;
/// for contact in store.queries().customer_contacts()? {
///     println!("{} {} - {}", contact.first_name, contact.last_name, contact.email);
/// }
/// # Ok::<(), bikesql::Error>(())
/// ```
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Opens the database read-only and checks it against the schema contract.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connectivity` if the file cannot be opened as a SQLite
    /// database, and `Error::SchemaMismatch` if a table or column the reports
    /// need is missing or has the wrong type.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::open_unverified(path)?;
        schema::verify(&store.conn)?;
        debug!("Schema verified");
        Ok(store)
    }

    /// Opens the database read-only without checking the schema.
    pub fn open_unverified<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!(path = %path.display(), "Opening store");

        if !path.is_file() {
            return Err(Error::Connectivity(format!(
                "Database file not found: {}",
                path.display()
            )));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(&path, flags)?;

        Ok(Self { conn, path })
    }

    /// Returns the query service over this store.
    pub fn queries(&self) -> QueryService<'_> {
        QueryService::new(&self.conn)
    }

    /// Lists every difference between the database and the schema contract.
    pub fn schema_mismatches(&self) -> Result<Vec<String>> {
        schema::mismatches(&self.conn)
    }

    /// Returns true if the database answers a trivial query.
    pub fn health_check(&self) -> bool {
        self.conn
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }

    /// Returns the path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
