use crate::report::{Report, ReportOutput};
use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

const DIVIDER: &str = "--------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Jsonl,
    Csv,
}

/// A report as written in the JSON formats.
#[derive(Debug, Serialize)]
pub struct ReportSection {
    pub report: usize,
    pub title: String,
    pub rows: Vec<Value>,
}

pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pending: Vec<ReportSection>,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            pending: Vec::new(),
        }
    }

    /// Writes one report. JSON output is buffered until [`finish`](Self::finish).
    pub fn write_report(&mut self, report: Report, heading: &str, output: &ReportOutput) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                writeln!(self.writer, "{}", heading.bold())?;
                if output.is_empty() {
                    writeln!(self.writer, "(no data)")?;
                } else {
                    writeln!(self.writer, "{}", render_table(output))?;
                }
                writeln!(self.writer, "{}", DIVIDER)?;
            }
            OutputFormat::Json => {
                self.pending.push(section(report, output));
            }
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(&section(report, output))?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Csv => {
                writeln!(self.writer, "# {}", heading)?;
                self.write_csv(
                    &output.columns,
                    output.rows.iter().map(|row| row.iter().map(display_value)),
                )?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    /// Writes a value as pretty JSON, or on one line for JSONL.
    pub fn write_json<T: Serialize>(&mut self, data: &T) -> Result<()> {
        let json = match self.format {
            OutputFormat::Jsonl => serde_json::to_string(data)?,
            _ => serde_json::to_string_pretty(data)?,
        };
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Writes a header and records as CSV, quoting fields where needed.
    pub fn write_csv<H, I, R>(&mut self, header: H, rows: I) -> Result<()>
    where
        H: IntoIterator,
        H::Item: AsRef<[u8]>,
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: AsRef<[u8]>,
    {
        let mut records = csv::Writer::from_writer(&mut self.writer);
        records.write_record(header)?;
        for row in rows {
            records.write_record(row)?;
        }
        records.flush()?;
        Ok(())
    }

    pub fn write_table(&mut self, table: Table) -> Result<()> {
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }

    /// Flushes buffered JSON output.
    pub fn finish(mut self) -> Result<()> {
        if self.format == OutputFormat::Json && !self.pending.is_empty() {
            let json = serde_json::to_string_pretty(&self.pending)?;
            writeln!(self.writer, "{}", json)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn section(report: Report, output: &ReportOutput) -> ReportSection {
    ReportSection {
        report: report.number(),
        title: report.title().to_string(),
        rows: output.to_json_array(),
    }
}

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn render_table(output: &ReportOutput) -> Table {
    let mut table = create_table();
    table.set_header(&output.columns);
    for row in &output.rows {
        table.add_row(row.iter().map(display_value));
    }
    table
}

/// Formats a cell value without JSON quoting.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
