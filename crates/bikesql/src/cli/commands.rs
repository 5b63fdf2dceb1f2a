use crate::cli::output::{create_table, OutputFormat, OutputWriter};
use crate::config::Config;
use crate::report::Report;
use crate::schema::TABLES;
use crate::store::Store;
use anyhow::{bail, Result};
use comfy_table::Cell;
use std::path::Path;
use tracing::{debug, info};

/// Runs the given reports in order against one store connection.
///
/// The first failing report aborts the batch; the connection is released
/// when `store` goes out of scope.
pub fn run(config: &Config, reports: &[Report], format: OutputFormat) -> Result<()> {
    let store = Store::open(&config.database_path)?;
    let queries = store.queries();

    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format);

    for report in reports {
        debug!(report = report.number(), "Running report");
        let output = report.run(&queries, &config.params)?;
        writer.write_report(*report, &report.heading(&config.params), &output)?;
    }

    info!(reports = reports.len(), "Reports complete");
    writer.finish()
}

/// Lists the available reports.
pub fn list(format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format);

    match format {
        OutputFormat::Table => {
            let mut table = create_table();
            table.set_header(vec!["#", "Report"]);
            for report in Report::ALL {
                table.add_row(vec![Cell::new(report.number()), Cell::new(report.title())]);
            }
            writer.write_table(table)?;
        }
        OutputFormat::Json => {
            let entries: Vec<_> = Report::ALL.iter().map(list_entry).collect();
            writer.write_json(&entries)?;
        }
        OutputFormat::Jsonl => {
            for report in &Report::ALL {
                writer.write_json(&list_entry(report))?;
            }
        }
        OutputFormat::Csv => {
            writer.write_csv(
                ["report", "title"],
                Report::ALL
                    .iter()
                    .map(|report| [report.number().to_string(), report.title().to_string()]),
            )?;
        }
    }

    writer.finish()
}

fn list_entry(report: &Report) -> serde_json::Value {
    serde_json::json!({ "report": report.number(), "title": report.title() })
}

/// Prints the tables and columns the reports read.
pub fn tables(format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format);

    match format {
        OutputFormat::Table => print_tables_tree(),
        OutputFormat::Json => writer.write_json(&TABLES)?,
        OutputFormat::Jsonl => {
            for table in TABLES {
                writer.write_json(table)?;
            }
        }
        OutputFormat::Csv => {
            writer.write_csv(
                ["table", "column", "kind", "nullable", "description"],
                TABLES.iter().flat_map(|table| {
                    table.columns.iter().map(move |column| {
                        [
                            table.name.to_string(),
                            column.name.to_string(),
                            column.kind.as_str().to_string(),
                            column.nullable.to_string(),
                            column.description.to_string(),
                        ]
                    })
                }),
            )?;
        }
    }

    writer.finish()
}

fn print_tables_tree() {
    println!("TABLES");
    println!("══════════════════════════════════════════════════════════════════════════════\n");

    for table in TABLES {
        println!("{:<14} {}", table.name, table.description);
        let last = table.columns.len().saturating_sub(1);
        for (i, column) in table.columns.iter().enumerate() {
            let branch = if i == last { "└──" } else { "├──" };
            let kind = if column.nullable {
                format!("{} NULL", column.kind.as_str())
            } else {
                column.kind.as_str().to_string()
            };
            println!(
                "  {} {:<14} {:<14} {}",
                branch, column.name, kind, column.description
            );
        }
        println!();
    }
}

/// Compares the database against the schema contract and prints every mismatch.
pub fn check(database_path: &Path) -> Result<()> {
    let store = Store::open_unverified(database_path)?;

    if !store.health_check() {
        bail!("Database at {} does not answer queries", store.path().display());
    }

    let problems = store.schema_mismatches()?;
    if problems.is_empty() {
        println!("✓ {} matches the schema", store.path().display());
        return Ok(());
    }

    for problem in &problems {
        println!("✗ {}", problem);
    }
    bail!("{} schema mismatch(es) found", problems.len())
}
