//! Workbook (.xlsx) encoder

use super::TableEncoder;
use crate::error::{FormError, FormResult};
use crate::export::{ExportResult, RowTable};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::debug;

/// One worksheet per table, header row first, every cell written as text
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookEncoder;

impl WorkbookEncoder {
    fn build(&self, result: &ExportResult) -> FormResult<Workbook> {
        let mut workbook = Workbook::new();
        for table in result.tables() {
            self.write_sheet(&mut workbook, table)?;
        }
        Ok(workbook)
    }

    fn write_sheet(&self, workbook: &mut Workbook, table: &RowTable) -> FormResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(table.name())
            .map_err(|e| FormError::Export(format!("Failed to set worksheet name: {}", e)))?;

        let columns = table.columns();
        for (col_idx, column) in columns.iter().enumerate() {
            worksheet
                .write_string(0, column_index(col_idx)?, *column)
                .map_err(|e| FormError::Export(format!("Failed to write header: {}", e)))?;
        }

        // Data rows start below the header; missing cells stay blank
        for (row_idx, record) in table.records().iter().enumerate() {
            let sheet_row = u32::try_from(row_idx + 1).map_err(|_| {
                FormError::Export(format!("Too many rows for sheet {}", table.name()))
            })?;
            for (col_idx, cell) in record.iter().enumerate() {
                if let Some(value) = cell {
                    worksheet
                        .write_string(sheet_row, column_index(col_idx)?, *value)
                        .map_err(|e| FormError::Export(format!("Failed to write cell: {}", e)))?;
                }
            }
        }

        debug!(
            "Wrote sheet {} ({} columns, {} rows)",
            table.name(),
            columns.len(),
            table.len()
        );
        Ok(())
    }
}

fn column_index(col_idx: usize) -> FormResult<u16> {
    u16::try_from(col_idx).map_err(|_| {
        FormError::Export(format!("Column {} is beyond the last sheet column", col_idx))
    })
}

impl TableEncoder for WorkbookEncoder {
    fn encode(
        &self,
        result: &ExportResult,
        destination: Option<&Path>,
    ) -> FormResult<Option<Vec<u8>>> {
        let mut workbook = self.build(result)?;
        match destination {
            Some(path) => {
                workbook
                    .save(path)
                    .map_err(|e| FormError::Export(format!("Failed to save Excel file: {}", e)))?;
                Ok(None)
            }
            None => {
                let bytes = workbook.save_to_buffer().map_err(|e| {
                    FormError::Export(format!("Failed to encode Excel workbook: {}", e))
                })?;
                Ok(Some(bytes))
            }
        }
    }
}
