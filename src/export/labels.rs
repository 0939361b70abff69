//! Label flattening
//!
//! A label is either one text or a language → text mapping. Tables can only hold
//! flat cells, so translations become one column per language, `label::<lang>`.

use crate::types::{Label, Labelled};
use crate::vocabulary::headers::{COLUMN_SEPARATOR, LABEL};

/// Flattened label cells, in column order
pub type LabelColumns = Vec<(String, String)>;

/// Label columns for a node. Empty text contributes nothing.
pub fn extract_labels<N: Labelled + ?Sized>(node: &N) -> LabelColumns {
    label_columns(LABEL, node.label())
}

/// Flatten `label` under `base` (`label`, `hint`, ...)
pub fn label_columns(base: &str, label: Option<&Label>) -> LabelColumns {
    match label {
        None => Vec::new(),
        Some(Label::Text(text)) if text.is_empty() => Vec::new(),
        Some(Label::Text(text)) => vec![(base.to_string(), text.clone())],
        Some(Label::Translations(translations)) => translations
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(language, text)| {
                (
                    format!("{}{}{}", base, COLUMN_SEPARATOR, language),
                    text.to_string(),
                )
            })
            .collect(),
    }
}
