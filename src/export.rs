//! CSV rendering of record lists
//!
//! Read-only view over records returned by the registry's queries; column
//! headers and timestamp formatting follow the pt-BR reporting convention.

use chrono::{DateTime, Local, Utc};
use csv::{QuoteStyle, WriterBuilder};
use eyre::{Context, Result};

use crate::domain::SectorRecord;

const HEADERS: [&str; 9] = [
    "Bloco",
    "Pavimento",
    "Setor",
    "Status",
    "Executor",
    "Responsável",
    "Início",
    "Fim",
    "Duração (min)",
];

/// Render records as CSV: one header row, then one row per record in the
/// order given. Every field is quoted; absent optionals render empty.
pub fn to_csv(records: &[&SectorRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for record in records {
        writer.write_record([
            record.id.block.as_str(),
            record.id.floor.as_str(),
            record.id.name.as_str(),
            &record.status.to_string(),
            record.executor.as_deref().unwrap_or(""),
            record.responsible.as_deref().unwrap_or(""),
            &format_local(record.checkin_time),
            &format_local(record.checkout_time),
            &record.duration_minutes.map(|m| m.to_string()).unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| eyre::eyre!("Failed to flush CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// dd/mm/yyyy hh:mm:ss in the local zone, empty when unset
fn format_local(instant: Option<DateTime<Utc>>) -> String {
    instant
        .map(|t| t.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_default()
}
