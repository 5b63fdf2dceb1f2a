//! bikesql CLI - read-only reports over the bike stores database

use bikesql::cli::commands;
use bikesql::{Config, OutputFormat, QueryParams, Report};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = r#"Read-only reports over the bike stores sales database.

Runs twenty fixed questions about customers, orders, products, stock and staff
against a SQLite copy of the database and prints each result set.

QUICK START
═══════════════════════════════════════════════════════════════════════════════

  bikesql --db bikestores.db            # Run all 20 reports in order
  bikesql --db bikestores.db run 8      # Run one report
  bikesql list                          # Show report numbers and titles
  bikesql tables                        # Show the tables and columns read
  bikesql --db bikestores.db check      # Compare a database with the schema"#;

const AFTER_LONG_HELP: &str = r#"
PARAMETERS
═══════════════════════════════════════════════════════════════════════════════

  --staff-id 3                  Report 2   orders processed by this staff member
  --category "Mountain Bikes"   Report 3   products in this category
  --low-stock 5                 Report 8   stock quantity below this is low
  --model-year 2019             Report 10  products of this model year
  --category-id 2               Report 12  products counted in this category
  --product-id 5                Report 14  product looked up by id
  --bulk-quantity 3             Report 15  line item quantity above this is bulk
  --status 3                    Report 19  orders with this status (3 = completed)

OUTPUT FORMATS: -f table | json | jsonl | csv"#;

#[derive(Parser)]
#[command(name = "bikesql")]
#[command(version)]
#[command(about = "Read-only reports over the bike stores sales database", long_about = LONG_ABOUT)]
#[command(after_long_help = AFTER_LONG_HELP)]
struct Cli {
    /// Path to the SQLite database (default: ./bikestores.db)
    #[arg(long = "db", env = "BIKESQL_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// Output format: table, json, jsonl, csv
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose/debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    params: ParamArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct ParamArgs {
    /// Staff member for report 2
    #[arg(long, default_value_t = 3, global = true)]
    staff_id: i64,

    /// Category name for report 3
    #[arg(long, default_value = "Mountain Bikes", global = true)]
    category: String,

    /// Low stock threshold for report 8
    #[arg(long, default_value_t = 5, global = true)]
    low_stock: i64,

    /// Model year for report 10
    #[arg(long, default_value_t = 2019, global = true)]
    model_year: i64,

    /// Category id for report 12
    #[arg(long, default_value_t = 2, global = true)]
    category_id: i64,

    /// Product id for report 14
    #[arg(long, default_value_t = 5, global = true)]
    product_id: i64,

    /// Bulk quantity threshold for report 15
    #[arg(long, default_value_t = 3, global = true)]
    bulk_quantity: i64,

    /// Order status code for report 19
    #[arg(long, default_value_t = bikesql::COMPLETED_ORDER_STATUS, global = true)]
    status: i64,
}

impl From<ParamArgs> for QueryParams {
    fn from(args: ParamArgs) -> Self {
        QueryParams {
            staff_id: args.staff_id,
            category_name: args.category,
            low_stock_threshold: args.low_stock,
            model_year: args.model_year,
            category_id: args.category_id,
            product_id: args.product_id,
            bulk_quantity_threshold: args.bulk_quantity,
            order_status: args.status,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run all reports, or only the numbered one
    Run {
        /// Report number (1-20)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=20))]
        number: Option<u8>,
    },

    /// List report numbers and titles
    List,

    /// Show the tables and columns the reports read
    Tables,

    /// Compare the database with the expected schema
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("bikesql=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let database_path = cli
        .database
        .unwrap_or_else(Config::default_database_path);

    match cli.command {
        Some(Commands::List) => commands::list(cli.format),
        Some(Commands::Tables) => commands::tables(cli.format),
        Some(Commands::Check) => commands::check(&database_path),
        Some(Commands::Run { number }) => {
            let config = Config::new(database_path, cli.params.into())?;
            let reports: Vec<Report> = match number {
                Some(n) => Report::from_number(usize::from(n)).into_iter().collect(),
                None => Report::ALL.to_vec(),
            };
            commands::run(&config, &reports, cli.format)
        }
        None => {
            let config = Config::new(database_path, cli.params.into())?;
            commands::run(&config, &Report::ALL, cli.format)
        }
    }
}
