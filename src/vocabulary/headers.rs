//! Header (column name) vocabularies for the settings, survey and choices sheets
//!
//! Each table maps the spellings accepted in an XLSForm header to the canonical
//! key used by the form model. Export goes the other way, through a short list
//! of preferred column names that must themselves be accepted spellings.

use crate::error::{FormError, FormResult};
use std::collections::HashMap;

pub const TYPE: &str = "type";
pub const NAME: &str = "name";
pub const LABEL: &str = "label";
pub const HINT: &str = "hint";
pub const LIST_NAME: &str = "list name";
pub const TITLE: &str = "title";
pub const ID_STRING: &str = "id_string";

/// Separator between a column and its language or sub-key (`label::English`)
pub const COLUMN_SEPARATOR: &str = "::";

/// Accepted settings-sheet headers → canonical key
pub(crate) const SETTINGS_HEADER: &[(&str, &str)] = &[
    ("form_title", TITLE),
    ("set form title", TITLE),
    ("form_id", ID_STRING),
    ("sms_keyword", "sms_keyword"),
    ("sms_separator", "sms_separator"),
    ("sms_allow_media", "sms_allow_media"),
    ("sms_date_format", "sms_date_format"),
    ("sms_datetime_format", "sms_datetime_format"),
    ("set form id", ID_STRING),
    ("public_key", "public_key"),
    ("submission_url", "submission_url"),
];

/// Accepted survey-sheet headers → canonical key
pub(crate) const SURVEY_HEADER: &[(&str, &str)] = &[
    ("Label", LABEL),
    ("Name", NAME),
    ("SMS Field", "sms_field"),
    ("SMS Option", "sms_option"),
    ("SMS Sepatator", "sms_separator"),
    ("SMS Allow Media", "sms_allow_media"),
    ("SMS Date Format", "sms_date_format"),
    ("SMS DateTime Format", "sms_datetime_format"),
    ("SMS Response", "sms_response"),
    ("Type", TYPE),
    ("List_name", "list_name"),
    ("read_only", "bind::readonly"),
    ("readonly", "bind::readonly"),
    ("relevant", "bind::relevant"),
    ("caption", LABEL),
    ("appearance", "control::appearance"),
    ("relevance", "bind::relevant"),
    ("required", "bind::required"),
    ("constraint", "bind::constraint"),
    ("constraining message", "bind::jr:constraintMsg"),
    ("constraint message", "bind::jr:constraintMsg"),
    ("constraint_message", "bind::jr:constraintMsg"),
    ("calculation", "bind::calculate"),
    ("command", TYPE),
    ("tag", NAME),
    ("value", NAME),
    ("image", "media::image"),
    ("audio", "media::audio"),
    ("video", "media::video"),
    ("count", "control::jr:count"),
    ("repeat_count", "control::jr:count"),
    ("jr:count", "control::jr:count"),
    ("autoplay", "control::autoplay"),
    ("rows", "control::rows"),
    ("noAppErrorString", "bind::jr:noAppErrorString"),
    ("no_app_error_string", "bind::jr:noAppErrorString"),
    ("requiredMsg", "bind::jr:requiredMsg"),
    ("required message", "bind::jr:requiredMsg"),
    ("required_message", "bind::jr:requiredMsg"),
    ("body", "control"),
];

/// Accepted choices-sheet headers → canonical key
pub(crate) const LIST_HEADER: &[(&str, &str)] = &[
    ("caption", LABEL),
    ("list_name", LIST_NAME),
    ("value", NAME),
    ("image", "media::image"),
    ("audio", "media::audio"),
    ("video", "media::video"),
];

/// Settings columns written on export, by canonical key
pub(crate) const SETTINGS_EXPORT_COLUMNS: &[(&str, &str)] =
    &[(ID_STRING, "form_id"), (TITLE, "form_title")];

/// Survey columns written on export for bind/control attributes, in column order
pub(crate) const SURVEY_EXPORT_COLUMNS: &[&str] = &[
    "required",
    "required_message",
    "relevant",
    "constraint",
    "constraint_message",
    "read_only",
    "appearance",
];

/// Column carrying a calculated value's expression
pub(crate) const CALCULATION_COLUMN: &str = "calculation";

/// Which attribute map of a question a survey column reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSection {
    Bind,
    Control,
}

/// A survey column backed by a bind or control attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeColumn {
    pub column: &'static str,
    pub section: AttributeSection,
    pub attribute: &'static str,
}

/// Validated header tables
#[derive(Debug)]
pub struct HeaderTables {
    settings: HashMap<&'static str, &'static str>,
    survey: HashMap<&'static str, &'static str>,
    list: HashMap<&'static str, &'static str>,
    settings_columns: Vec<(&'static str, &'static str)>,
    attribute_columns: Vec<AttributeColumn>,
    calculation: AttributeColumn,
}

impl HeaderTables {
    pub(crate) fn build() -> FormResult<Self> {
        let settings = alias_map("settings", SETTINGS_HEADER)?;
        let survey = alias_map("survey", SURVEY_HEADER)?;
        let list = alias_map("choices", LIST_HEADER)?;

        let mut settings_columns = Vec::new();
        for &(canonical, column) in SETTINGS_EXPORT_COLUMNS {
            if settings.get(column) != Some(&canonical) {
                return Err(FormError::Vocabulary(format!(
                    "settings export column '{}' is not a header for '{}'",
                    column, canonical
                )));
            }
            settings_columns.push((canonical, column));
        }

        if !list.values().any(|canonical| *canonical == LIST_NAME) {
            return Err(FormError::Vocabulary(format!(
                "choices header table has no alias for '{}'",
                LIST_NAME
            )));
        }

        let attribute_columns = SURVEY_EXPORT_COLUMNS
            .iter()
            .map(|column| attribute_column(&survey, column))
            .collect::<FormResult<Vec<_>>>()?;
        let calculation = attribute_column(&survey, CALCULATION_COLUMN)?;

        Ok(Self {
            settings,
            survey,
            list,
            settings_columns,
            attribute_columns,
            calculation,
        })
    }

    /// Canonical key for a settings header
    pub fn settings_canonical(&self, header: &str) -> Option<&'static str> {
        self.settings.get(header).copied()
    }

    /// Canonical key for a survey header
    pub fn survey_canonical(&self, header: &str) -> Option<&'static str> {
        self.survey.get(header).copied()
    }

    /// Canonical key for a choices header
    pub fn list_canonical(&self, header: &str) -> Option<&'static str> {
        self.list.get(header).copied()
    }

    /// Export column for a canonical settings key
    pub fn settings_column(&self, canonical: &str) -> Option<&'static str> {
        self.settings_columns
            .iter()
            .find(|(key, _)| *key == canonical)
            .map(|(_, column)| *column)
    }

    /// Bind/control columns written for every question, in order
    pub fn attribute_columns(&self) -> &[AttributeColumn] {
        &self.attribute_columns
    }

    /// The calculated-value expression column
    pub fn calculation_column(&self) -> &AttributeColumn {
        &self.calculation
    }
}

fn alias_map(
    sheet: &str,
    entries: &[(&'static str, &'static str)],
) -> FormResult<HashMap<&'static str, &'static str>> {
    let mut map = HashMap::with_capacity(entries.len());
    for &(alias, canonical) in entries {
        if let Some(previous) = map.insert(alias, canonical) {
            if previous != canonical {
                return Err(FormError::Vocabulary(format!(
                    "{} header '{}' maps to both '{}' and '{}'",
                    sheet, alias, previous, canonical
                )));
            }
        }
    }
    Ok(map)
}

fn attribute_column(
    survey: &HashMap<&'static str, &'static str>,
    column: &'static str,
) -> FormResult<AttributeColumn> {
    let canonical: &'static str = survey.get(column).copied().ok_or_else(|| {
        FormError::Vocabulary(format!("survey export column '{}' has no header alias", column))
    })?;
    let (section, attribute) = canonical
        .split_once(COLUMN_SEPARATOR)
        .ok_or_else(|| {
            FormError::Vocabulary(format!(
                "survey export column '{}' maps to '{}', not an attribute",
                column, canonical
            ))
        })?;
    let section = match section {
        "bind" => AttributeSection::Bind,
        "control" => AttributeSection::Control,
        other => {
            return Err(FormError::Vocabulary(format!(
                "survey export column '{}' reads unsupported section '{}'",
                column, other
            )))
        }
    };
    Ok(AttributeColumn {
        column,
        section,
        attribute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_header_tables() {
        let headers = HeaderTables::build().unwrap();
        assert_eq!(headers.settings_canonical("set form title"), Some(TITLE));
        assert_eq!(headers.survey_canonical("relevance"), Some("bind::relevant"));
        assert_eq!(headers.list_canonical("list_name"), Some(LIST_NAME));
        assert_eq!(headers.settings_column(ID_STRING), Some("form_id"));
        assert_eq!(headers.settings_column(TITLE), Some("form_title"));
        assert_eq!(headers.settings_column("public_key"), None);
    }

    #[test]
    fn test_attribute_columns_resolve_to_sections() {
        let headers = HeaderTables::build().unwrap();
        let columns = headers.attribute_columns();
        assert_eq!(columns.len(), SURVEY_EXPORT_COLUMNS.len());

        let message = columns
            .iter()
            .find(|c| c.column == "constraint_message")
            .unwrap();
        assert_eq!(message.section, AttributeSection::Bind);
        assert_eq!(message.attribute, "jr:constraintMsg");

        let appearance = columns.iter().find(|c| c.column == "appearance").unwrap();
        assert_eq!(appearance.section, AttributeSection::Control);
        assert_eq!(appearance.attribute, "appearance");

        let calculation = headers.calculation_column();
        assert_eq!(calculation.attribute, "calculate");
    }

    #[test]
    fn test_conflicting_alias_rejected() {
        let result = alias_map(
            "survey",
            &[("relevant", "bind::relevant"), ("relevant", "bind::required")],
        );
        assert!(matches!(result, Err(FormError::Vocabulary(_))));
    }

    #[test]
    fn test_non_attribute_column_rejected() {
        let survey = alias_map("survey", SURVEY_HEADER).unwrap();
        assert!(attribute_column(&survey, "tag").is_err());
        assert!(attribute_column(&survey, "image").is_err());
        assert!(attribute_column(&survey, "no_such_column").is_err());
    }
}
