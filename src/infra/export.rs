//! Spreadsheet export of the ledger, ordered by expiry.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::Writer;
use thiserror::Error;
use time::macros::format_description;
use time::Date;

use crate::domain::Ledger;

/// Written to the date column when an entry has no expiry date.
const NO_EXPIRY: &str = "N/A";

const HEADERS: [&str; 4] = ["EAN", "Product Name", "Expiry Date", "Quantity"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Writes the expiry-sorted ledger as CSV with the fixed column set
/// EAN, Product Name, Expiry Date, Quantity.
pub fn write_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(HEADERS)?;
    for entry in ledger.sorted_by_expiry() {
        let expiry = display_date(entry.expiry);
        let quantity = entry.quantity.to_string();
        csv.write_record([
            entry.ean.as_str(),
            entry.name.as_str(),
            expiry.as_str(),
            quantity.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_to_path(ledger: &Ledger, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(ledger, file)
}

/// Spreadsheet date format: DD/MM/YYYY.
fn display_date(date: Option<Date>) -> String {
    let format = format_description!("[day]/[month]/[year]");
    date.and_then(|date| date.format(&format).ok())
        .unwrap_or_else(|| NO_EXPIRY.to_owned())
}
