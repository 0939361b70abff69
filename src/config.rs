//! Export settings shared by the CLI and library callers

use crate::encode::{DelimitedEncoder, TableEncoder, WorkbookEncoder};
use crate::error::{FormError, FormResult};
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Physical layout of an exported form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook with survey, choices and settings sheets
    #[default]
    Xlsx,
    /// One CSV stream holding all three tables
    Csv,
}

impl OutputFormat {
    /// Infer the format from a file extension (`.xlsx`, `.xls`, `.csv`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xls" => Some(OutputFormat::Xlsx),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }

    pub fn encoder(&self) -> &'static dyn TableEncoder {
        match self {
            OutputFormat::Xlsx => &WorkbookEncoder,
            OutputFormat::Csv => &DelimitedEncoder,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Xlsx => write!(f, "xlsx"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormError;

    fn from_str(s: &str) -> FormResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "xls" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(FormError::Parse(format!(
                "Unknown output format '{}' (expected xlsx or csv)",
                other
            ))),
        }
    }
}

/// Where and how an export is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportConfig {
    pub format: OutputFormat,
    /// Destination file; `None` writes to stdout
    pub output: Option<PathBuf>,
    /// Seed for reproducible list identifiers
    pub seed: Option<u64>,
}

impl ExportConfig {
    /// Build a config. An explicit format wins, then the output extension, then xlsx.
    pub fn new(format: Option<OutputFormat>, output: Option<PathBuf>, seed: Option<u64>) -> Self {
        let format = format
            .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or_default();
        Self {
            format,
            output,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inferred_from_extension() {
        let config = ExportConfig::new(None, Some(PathBuf::from("form.CSV")), None);
        assert_eq!(config.format, OutputFormat::Csv);

        let config = ExportConfig::new(None, Some(PathBuf::from("form.xlsx")), None);
        assert_eq!(config.format, OutputFormat::Xlsx);
    }

    #[test]
    fn test_explicit_format_wins() {
        let config = ExportConfig::new(
            Some(OutputFormat::Csv),
            Some(PathBuf::from("form.xlsx")),
            Some(3),
        );
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_default_is_xlsx_to_stdout() {
        let config = ExportConfig::new(None, None, None);
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.format, OutputFormat::Xlsx);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("ods".parse::<OutputFormat>().is_err());
    }
}
