//! XLSForm - question-type vocabularies and form-model export
//!
//! This library translates question-type names between pyxform's internal
//! vocabulary, XForm data types and XLSForm question types, and exports an
//! in-memory form model back into the three XLSForm tables.
//!
//! # Features
//!
//! - Type resolution with a fixed lookup order and explicit failures
//! - Multi-language labels flattened to `label::<language>` columns
//! - Survey, choices and settings tables built in one depth-first pass
//! - `.xlsx` workbook and single-stream CSV encoders
//!
//! # Example
//!
//! ```no_run
//! use royalbit_xlsform::encode::to_xls;
//! use royalbit_xlsform::export::XlsFormExporter;
//! use royalbit_xlsform::parser::parse_form;
//! use std::path::Path;
//!
//! let survey = parse_form(Path::new("household.json"))?;
//! let result = XlsFormExporter::new()?.export(&survey)?;
//!
//! for warning in result.warnings.iter() {
//!     eprintln!("warning: {}", warning);
//! }
//! to_xls(&result, Some(Path::new("household.xlsx")))?;
//! # Ok::<(), royalbit_xlsform::error::FormError>(())
//! ```

pub mod cli;
pub mod config;
pub mod encode;
pub mod error;
pub mod export;
pub mod parser;
pub mod types;
pub mod vocabulary;

// Re-export commonly used types
pub use error::{FormError, FormResult};
pub use export::{ExportResult, XlsFormExporter};
pub use types::{ChoiceOption, FormNode, Label, MultipleChoiceQuestion, Question, Section, Survey};
pub use vocabulary::{resolve_to_authoring, resolve_to_runtime};
