//! Physical layouts for an exported form
//!
//! Both encoders write the same three logical tables. With a destination path
//! the file is written and `None` returned; without one the encoded bytes are
//! returned to the caller.

mod delimited;
mod workbook;

pub use delimited::{DelimitedEncoder, SHEET_MARKER};
pub use workbook::WorkbookEncoder;

use crate::error::FormResult;
use crate::export::ExportResult;
use std::path::Path;

/// Serializes an `ExportResult` to a file or an in-memory buffer
pub trait TableEncoder {
    fn encode(
        &self,
        result: &ExportResult,
        destination: Option<&Path>,
    ) -> FormResult<Option<Vec<u8>>>;
}

/// Encode as an `.xlsx` workbook with sheets survey, choices and settings
pub fn to_xls(result: &ExportResult, destination: Option<&Path>) -> FormResult<Option<Vec<u8>>> {
    WorkbookEncoder.encode(result, destination)
}

/// Encode as one CSV stream holding all three tables
pub fn to_csv(result: &ExportResult, destination: Option<&Path>) -> FormResult<Option<Vec<u8>>> {
    DelimitedEncoder.encode(result, destination)
}
