//! # bikesql
//!
//! Read-only reports over the bike stores sales database.
//!
//! A [`Store`] holds one read-only SQLite connection, checked against the
//! schema contract in [`schema`] when it opens. Its [`QueryService`] answers
//! twenty fixed questions about customers, orders, products, stock and staff,
//! and [`Report`] numbers those questions for the command line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikesql::{QueryParams, Report, Result, Store};
//!
//! fn main() -> Result<()> {
//!     let store = Store::open("bikestores.db")?;
//!     let queries = store.queries();
//!
//!     for name in queries.never_ordered_products()? {
//!         println!("{name}");
//!     }
//!
//!     let output = Report::OrdersPerStore.run(&queries, &QueryParams::default())?;
//!     println!("{} stores took orders", output.row_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every query fails with either [`Error::Connectivity`] or
//! [`Error::SchemaMismatch`]. Lookups that find nothing return `None`.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod report;
pub mod schema;
pub mod store;

pub use cli::OutputFormat;
pub use config::{Config, QueryParams, COMPLETED_ORDER_STATUS};
pub use error::{Error, Result};
pub use query::QueryService;
pub use report::{Report, ReportOutput};
pub use schema::{TableInfo, TABLES};
pub use store::Store;
