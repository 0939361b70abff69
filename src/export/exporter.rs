//! Form model → survey / choices / settings tables

use super::labels::{extract_labels, label_columns};
use super::list_name::{list_name, ListNameSource, RandomListNames, SeededListNames};
use super::table::{ExportResult, Row};
use crate::error::{FormError, FormResult};
use crate::types::{ChoiceOption, FormNode, MultipleChoiceQuestion, Question, Section, Survey};
use crate::vocabulary::headers::{HINT, ID_STRING, LABEL, LIST_NAME, NAME, TITLE, TYPE};
use crate::vocabulary::{AttributeSection, AuthoringType, Resolved, TypeResolver};
use tracing::{debug, info, warn};

pub const CASCADING_SELECT_WARNING: &str = "Cascading-select (choice filter) questions not currently supported. Question choices for any such questions have not been imported.";
pub const PLACEHOLDER_CHOICE_NAME: &str = "question_choices_not_imported";
pub const PLACEHOLDER_CHOICE_LABEL: &str =
    "Apologies, your choices for this (cascading-select) question could not be automatically imported.";

pub const BEGIN_GROUP: &str = "begin group";
pub const END_GROUP: &str = "end group";

/// Sections with this name hold form metadata and are never exported
pub const META_SECTION: &str = "meta";

/// Walks a `Survey` and fills the three XLSForm tables
pub struct XlsFormExporter<S: ListNameSource = RandomListNames> {
    resolver: TypeResolver<'static>,
    list_names: S,
}

impl XlsFormExporter<RandomListNames> {
    /// Exporter over the process-wide vocabulary with random list identifiers
    pub fn new() -> FormResult<Self> {
        Ok(Self {
            resolver: TypeResolver::global()?,
            list_names: RandomListNames,
        })
    }
}

impl XlsFormExporter<SeededListNames> {
    /// Exporter whose list identifiers are reproducible for a given seed
    pub fn seeded(seed: u64) -> FormResult<Self> {
        XlsFormExporter::with_list_names(SeededListNames::new(seed))
    }
}

impl<S: ListNameSource> XlsFormExporter<S> {
    pub fn with_list_names(list_names: S) -> FormResult<Self> {
        Ok(Self {
            resolver: TypeResolver::global()?,
            list_names,
        })
    }

    /// Export a survey. Tables are built fresh on every call.
    pub fn export(&mut self, survey: &Survey) -> FormResult<ExportResult> {
        let mut result = ExportResult::new();

        let settings = self.settings_row(survey)?;
        if !settings.is_empty() {
            result.settings.push(settings);
        }

        for child in &survey.children {
            self.visit(child, &mut result)?;
        }

        info!(
            "Exported form {}: {} survey rows, {} choices rows, {} warnings",
            survey.form_id().unwrap_or("<unnamed>"),
            result.survey.len(),
            result.choices.len(),
            result.warnings.len()
        );
        Ok(result)
    }

    fn settings_row(&self, survey: &Survey) -> FormResult<Row> {
        let headers = self.resolver.tables().headers();
        let mut row = Row::new();
        for (canonical, value) in [(ID_STRING, survey.form_id()), (TITLE, survey.form_title())] {
            let Some(value) = value else { continue };
            let column = headers.settings_column(canonical).ok_or_else(|| {
                FormError::Vocabulary(format!("no settings column for '{}'", canonical))
            })?;
            row.insert(column, value);
        }
        Ok(row)
    }

    fn visit(&mut self, node: &FormNode, result: &mut ExportResult) -> FormResult<()> {
        debug!("Visiting {}", node.describe());
        match node {
            FormNode::Question(question) => {
                let row = self.question_row(question)?;
                result.survey.push(row);
            }
            FormNode::MultipleChoice(question) => self.multiple_choice(question, result)?,
            FormNode::Section(section) => self.section(section, result)?,
            FormNode::Option(option) => {
                return Err(FormError::ModelConsistency(format!(
                    "option '{}' found outside a multiple-choice question",
                    option.name
                )))
            }
        }
        Ok(())
    }

    fn question_row(&self, question: &Question) -> FormResult<Row> {
        check_name(question)?;
        let resolved = self.resolver.resolve_to_authoring(&question.question_type)?;
        let calculated = resolved == Resolved::Type(AuthoringType::Calculation);

        let mut row = Row::new()
            .with(TYPE, resolved.as_str())
            .with(NAME, question.name.as_str());
        self.fill_question_columns(&mut row, question, calculated);
        Ok(row)
    }

    fn multiple_choice(
        &mut self,
        question: &MultipleChoiceQuestion,
        result: &mut ExportResult,
    ) -> FormResult<()> {
        check_name(&question.question)?;
        let resolved = self
            .resolver
            .resolve_to_authoring(&question.question.question_type)?;
        let select = match resolved {
            Resolved::Type(authoring) if authoring.is_select() => authoring,
            other => {
                return Err(FormError::ModelConsistency(format!(
                    "multiple-choice question '{}' has type '{}', which is not a select type",
                    question.name(),
                    other
                )))
            }
        };

        let list = list_name(question.name(), self.list_names.suffix_bytes())?;
        let mut row = Row::new()
            .with(TYPE, format!("{} {}", select, list))
            .with(NAME, question.name());
        self.fill_question_columns(&mut row, &question.question, false);
        result.survey.push(row);

        if question.cascading_select {
            debug!("Question {} is a cascading select; choices not exported", question.name());
            result.choices.push(
                Row::new()
                    .with(LIST_NAME, list.as_str())
                    .with(NAME, PLACEHOLDER_CHOICE_NAME)
                    .with(LABEL, PLACEHOLDER_CHOICE_LABEL),
            );
            if result.warnings.push(CASCADING_SELECT_WARNING) {
                warn!("{}", CASCADING_SELECT_WARNING);
            }
            return Ok(());
        }

        for choice in &question.choices {
            result.choices.push(choice_row(&list, choice));
        }
        Ok(())
    }

    fn section(&mut self, section: &Section, result: &mut ExportResult) -> FormResult<()> {
        if section.name.as_deref() == Some(META_SECTION) {
            debug!("Skipping metadata section");
            return Ok(());
        }

        let mut begin = Row::new().with(TYPE, BEGIN_GROUP);
        if let Some(name) = &section.name {
            begin.insert(NAME, name.as_str());
        }
        begin.extend(extract_labels(section));
        result.survey.push(begin);

        for child in &section.children {
            self.visit(child, result)?;
        }

        result.survey.push(Row::new().with(TYPE, END_GROUP));
        Ok(())
    }

    /// Label, hint, calculation and bind/control columns of a question row
    fn fill_question_columns(&self, row: &mut Row, question: &Question, calculated: bool) {
        let headers = self.resolver.tables().headers();

        row.extend(extract_labels(question));
        row.extend(label_columns(HINT, question.hint.as_ref()));

        if calculated {
            let calculation = headers.calculation_column();
            if let Some(expression) = question.bind.get(calculation.attribute) {
                row.insert(calculation.column, expression.as_str());
            }
        }

        for column in headers.attribute_columns() {
            let attributes = match column.section {
                AttributeSection::Bind => &question.bind,
                AttributeSection::Control => &question.control,
            };
            if let Some(value) = attributes.get(column.attribute).filter(|v| !v.is_empty()) {
                row.insert(column.column, value.as_str());
            }
        }
    }
}

fn check_name(question: &Question) -> FormResult<()> {
    if question.name.is_empty() {
        return Err(FormError::ModelConsistency(format!(
            "question of type '{}' has no name",
            question.question_type
        )));
    }
    Ok(())
}

fn choice_row(list: &str, choice: &ChoiceOption) -> Row {
    let mut row = Row::new()
        .with(LIST_NAME, list)
        .with(NAME, choice.name.as_str());
    row.extend(extract_labels(choice));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Translations;

    fn export(survey: &Survey) -> ExportResult {
        XlsFormExporter::seeded(1).unwrap().export(survey).unwrap()
    }

    #[test]
    fn test_text_question_row() {
        let survey = Survey::new().with_child(Question::new("q1", "text").with_label("Q1"));
        let result = export(&survey);
        let row = &result.survey.rows()[0];
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![("type", "text"), ("name", "q1"), ("label", "Q1")]
        );
    }

    #[test]
    fn test_calculate_copies_expression() {
        let survey = Survey::new().with_child(
            Question::new("total", "calculate").with_bind("calculate", "${a} + ${b}"),
        );
        let result = export(&survey);
        let row = &result.survey.rows()[0];
        assert_eq!(row.get("type"), Some("calculation"));
        assert_eq!(row.get("calculation"), Some("${a} + ${b}"));
    }

    #[test]
    fn test_calculate_column_only_for_calculations() {
        let survey = Survey::new()
            .with_child(Question::new("age", "integer").with_bind("calculate", "1 + 1"));
        let result = export(&survey);
        assert_eq!(result.survey.rows()[0].get("calculation"), None);
    }

    #[test]
    fn test_bind_and_control_columns() {
        let survey = Survey::new().with_child(
            Question::new("age", "integer")
                .with_bind("required", "true()")
                .with_bind("jr:constraintMsg", "Too old")
                .with_bind("constraint", ". < 120")
                .with_control("appearance", "numbers"),
        );
        let result = export(&survey);
        let row = &result.survey.rows()[0];
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec!["type", "name", "required", "constraint", "constraint_message", "appearance"]
        );
        assert_eq!(row.get("constraint_message"), Some("Too old"));
    }

    #[test]
    fn test_hint_columns_follow_labels() {
        let hint: Translations = [("en", "Years"), ("fr", "Années")].into_iter().collect();
        let survey = Survey::new()
            .with_child(Question::new("age", "integer").with_label("Age").with_hint(hint));
        let result = export(&survey);
        assert_eq!(
            result.survey.columns(),
            vec!["type", "name", "label", "hint::en", "hint::fr"]
        );
    }

    #[test]
    fn test_stray_option_is_rejected() {
        let survey = Survey::new().with_child(ChoiceOption::new("yes"));
        let err = XlsFormExporter::seeded(1).unwrap().export(&survey).unwrap_err();
        assert!(matches!(err, FormError::ModelConsistency(_)));
    }

    #[test]
    fn test_settings_row_from_id_and_title() {
        let survey = Survey::new().with_id_string("household").with_title("Household");
        let result = export(&survey);
        let row = &result.settings.rows()[0];
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![("form_id", "household"), ("form_title", "Household")]
        );
    }

    #[test]
    fn test_no_settings_row_without_metadata() {
        assert!(export(&Survey::new()).settings.is_empty());
    }
}
