//! Form model → XLSForm tables

pub mod exporter;
pub mod labels;
pub mod list_name;
pub mod table;

pub use exporter::{
    XlsFormExporter, BEGIN_GROUP, CASCADING_SELECT_WARNING, END_GROUP, META_SECTION,
    PLACEHOLDER_CHOICE_LABEL, PLACEHOLDER_CHOICE_NAME,
};
pub use labels::{extract_labels, label_columns, LabelColumns};
pub use list_name::{list_name, ListNameSource, RandomListNames, SeededListNames};
pub use table::{ExportResult, Row, RowTable, Warnings};
