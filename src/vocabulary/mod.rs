//! Question-type and header vocabularies
//!
//! Three naming systems meet here:
//! - the internal catalog of question-type names (`"select one"`, `"calculate"`, `"gps"`)
//! - XForm data types, as used in runtime binds (`select1`, `int`, `binary`)
//! - XLSForm question types, as written in the survey sheet (`select_one`, `integer`)

pub mod headers;
mod resolver;
mod tables;
mod type_names;

pub use headers::{AttributeColumn, AttributeSection, HeaderTables};
pub use resolver::{resolve_to_authoring, resolve_to_runtime, TypeResolver};
pub use tables::{init, TableSource, VocabularyTables};
pub use type_names::{AuthoringType, Resolved, RuntimeType, TypeTag, GROUP, XSD_PREFIX};
