//! Delimited-text (CSV) encoder
//!
//! All three tables share one stream. Each table starts with a marker row
//! `sheet,<table>`; its header row and data rows are prefixed with the table
//! name, so a reader can split the stream back into sheets:
//!
//! ```text
//! sheet,survey
//! survey,type,name,label
//! survey,text,q1,Q1
//! sheet,choices
//! choices
//! sheet,settings
//! settings,form_id
//! settings,household
//! ```

use super::TableEncoder;
use crate::error::{FormError, FormResult};
use crate::export::{ExportResult, RowTable};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

/// Marker written in the first cell of each table's opening row
pub const SHEET_MARKER: &str = "sheet";

#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedEncoder;

impl DelimitedEncoder {
    fn to_bytes(&self, result: &ExportResult) -> FormResult<Vec<u8>> {
        // Rows have different lengths per table
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        for table in result.tables() {
            write_table(&mut writer, table)?;
        }
        writer
            .into_inner()
            .map_err(|e| FormError::Export(format!("Failed to flush CSV: {}", e)))
    }
}

fn write_table(writer: &mut csv::Writer<Vec<u8>>, table: &RowTable) -> FormResult<()> {
    let name = table.name();
    writer
        .write_record([SHEET_MARKER, name])
        .map_err(|e| FormError::Export(format!("Failed to write CSV row: {}", e)))?;

    let header = std::iter::once(name).chain(table.columns());
    writer
        .write_record(header)
        .map_err(|e| FormError::Export(format!("Failed to write CSV header: {}", e)))?;

    for record in table.records() {
        let row = std::iter::once(name).chain(record.into_iter().map(|cell| cell.unwrap_or("")));
        writer
            .write_record(row)
            .map_err(|e| FormError::Export(format!("Failed to write CSV row: {}", e)))?;
    }
    Ok(())
}

impl TableEncoder for DelimitedEncoder {
    fn encode(
        &self,
        result: &ExportResult,
        destination: Option<&Path>,
    ) -> FormResult<Option<Vec<u8>>> {
        let bytes = self.to_bytes(result)?;
        match destination {
            Some(path) => {
                fs::write(path, &bytes)?;
                Ok(None)
            }
            None => Ok(Some(bytes)),
        }
    }
}
