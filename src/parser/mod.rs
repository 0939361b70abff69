use crate::error::{FormError, FormResult};
use crate::types::{
    Attributes, ChoiceOption, FormNode, Label, MultipleChoiceQuestion, Question, Section, Survey,
    Translations,
};
use crate::vocabulary::headers::COLUMN_SEPARATOR;
use crate::vocabulary::{HeaderTables, Resolved, RuntimeType, TypeResolver, GROUP};
use serde_yaml::{Mapping, Value};
use std::path::Path;

const SURVEY_TYPE: &str = "survey";
const BIND: &str = "bind";
const CONTROL: &str = "control";

/// Header vocabulary the keys of a mapping are read with
#[derive(Debug, Clone, Copy)]
enum Sheet {
    Settings,
    Survey,
    Choices,
}

impl Sheet {
    fn canonical(self, headers: &HeaderTables, key: &str) -> Option<&'static str> {
        match self {
            Sheet::Settings => headers.settings_canonical(key),
            Sheet::Survey => headers.survey_canonical(key),
            Sheet::Choices => headers.list_canonical(key),
        }
    }
}

/// Parse a form document (JSON or YAML) into a `Survey`.
///
/// The document follows the shape of a pyxform JSON survey: a root mapping with
/// `type: survey`, optional `name`, `title` and `id_string`, and an ordered
/// `children` list. Children are classified by their `type`:
/// - `group` → a section with its own `children`
/// - a select type (`select one`, `select_multiple`, ...) → a multiple-choice
///   question whose options come from `children` or `choices`
/// - no `type` at all → a choice option
/// - anything else → a question
///
/// Labels and hints are either a string or a language → text mapping. A select
/// with a `choice_filter` or an `itemset` is marked as a cascading select.
///
/// Keys may use the XLSForm header spellings: `form_title` / `form_id` at the
/// root, `caption`, `relevance` or `constraint message` on a question, `value`
/// on a choice. Flat bind and control attributes join the `bind` / `control`
/// maps.
///
/// # Example
/// ```no_run
/// use royalbit_xlsform::parser::parse_form;
/// use std::path::Path;
///
/// let survey = parse_form(Path::new("household.json"))?;
/// println!("Children: {}", survey.children.len());
/// # Ok::<(), royalbit_xlsform::error::FormError>(())
/// ```
pub fn parse_form(path: &Path) -> FormResult<Survey> {
    let content = std::fs::read_to_string(path)?;
    parse_form_str(&content)
}

/// Parse a form document held in memory. JSON is accepted as YAML.
pub fn parse_form_str(content: &str) -> FormResult<Survey> {
    let document: Value = serde_yaml::from_str(content)?;
    parse_form_value(&document)
}

/// Build a `Survey` from an already-parsed document
pub fn parse_form_value(document: &Value) -> FormResult<Survey> {
    let resolver = TypeResolver::global()?;
    let root = document
        .as_mapping()
        .ok_or_else(|| FormError::Parse("Form document must be a mapping".to_string()))?;
    let root = &dealias(resolver.tables().headers(), Sheet::Settings, root, "form root")?;

    if let Some(kind) = optional_string(root, "type", "form root")? {
        if kind != SURVEY_TYPE {
            return Err(FormError::Parse(format!(
                "Form root has type '{}', expected '{}'",
                kind, SURVEY_TYPE
            )));
        }
    }

    Ok(Survey {
        name: optional_string(root, "name", "form root")?,
        id_string: optional_string(root, "id_string", "form root")?,
        title: optional_string(root, "title", "form root")?,
        children: parse_children(&resolver, root, "children", Sheet::Survey, "form root")?,
    })
}

fn parse_children(
    resolver: &TypeResolver<'_>,
    map: &Mapping,
    key: &str,
    sheet: Sheet,
    context: &str,
) -> FormResult<Vec<FormNode>> {
    let Some(value) = map.get(key) else {
        return Ok(Vec::new());
    };
    let items = value.as_sequence().ok_or_else(|| {
        FormError::Parse(format!("'{}' of {} must be a list", key, context))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let context = format!("{}[{}] of {}", key, index, context);
            parse_node(resolver, item, sheet, &context)
        })
        .collect()
}

fn parse_node(
    resolver: &TypeResolver<'_>,
    value: &Value,
    sheet: Sheet,
    context: &str,
) -> FormResult<FormNode> {
    let map = value
        .as_mapping()
        .ok_or_else(|| FormError::Parse(format!("{} must be a mapping", context)))?;
    let map = &dealias(resolver.tables().headers(), sheet, map, context)?;

    let name = optional_string(map, "name", context)?;
    let context = match &name {
        Some(name) => format!("'{}'", name),
        None => context.to_string(),
    };
    let label = optional_label(map, "label", &context)?;

    let Some(kind) = optional_string(map, "type", &context)? else {
        let name = name.ok_or_else(|| FormError::Parse(format!("{} has no name", context)))?;
        return Ok(FormNode::Option(ChoiceOption { name, label }));
    };

    if kind == GROUP {
        return Ok(FormNode::Section(Section {
            name,
            label,
            children: parse_children(resolver, map, "children", Sheet::Survey, &context)?,
        }));
    }

    let question = Question {
        name: name.unwrap_or_default(),
        question_type: kind,
        label,
        hint: optional_label(map, "hint", &context)?,
        bind: attributes(map, "bind", &context)?,
        control: attributes(map, "control", &context)?,
    };

    if !is_select(resolver, &question.question_type) {
        return Ok(FormNode::Question(question));
    }

    let choices_key = if map.contains_key("choices") {
        "choices"
    } else {
        "children"
    };
    let choices = parse_children(resolver, map, choices_key, Sheet::Choices, &context)?
        .into_iter()
        .map(|node| match node {
            FormNode::Option(option) => Ok(option),
            other => Err(FormError::Parse(format!(
                "{} lists {} among its choices",
                context,
                other.describe()
            ))),
        })
        .collect::<FormResult<Vec<_>>>()?;

    let cascading_select = optional_string(map, "choice_filter", &context)?
        .is_some_and(|filter| !filter.is_empty())
        || map.contains_key("itemset");

    Ok(FormNode::MultipleChoice(MultipleChoiceQuestion {
        question,
        choices,
        cascading_select,
    }))
}

/// Select types are recognized by their XForm equivalent; unresolvable types
/// load as plain questions and fail at export.
fn is_select(resolver: &TypeResolver<'_>, kind: &str) -> bool {
    matches!(
        resolver.resolve_to_runtime(kind),
        Ok(Resolved::Type(RuntimeType::SelectOne | RuntimeType::SelectMultiple))
    )
}

/// Copy of `map` with header aliases replaced by their canonical keys
fn dealias(
    headers: &HeaderTables,
    sheet: Sheet,
    map: &Mapping,
    context: &str,
) -> FormResult<Mapping> {
    let mut canonical = Mapping::new();
    for (key, value) in map {
        let Some(header) = key.as_str() else {
            canonical.insert(key.clone(), value.clone());
            continue;
        };
        let target = sheet.canonical(headers, header).unwrap_or(header);

        if let Some((section @ (BIND | CONTROL), attribute)) = target.split_once(COLUMN_SEPARATOR)
        {
            fold_attribute(&mut canonical, section, attribute, value, context)?;
            continue;
        }
        if let (BIND | CONTROL, Value::Mapping(entries)) = (target, value) {
            for (attribute, value) in entries {
                let attribute = scalar_text(attribute).ok_or_else(|| {
                    FormError::Parse(format!(
                        "'{}' of {} has a non-text attribute",
                        header, context
                    ))
                })?;
                fold_attribute(&mut canonical, target, &attribute, value, context)?;
            }
            continue;
        }

        if canonical.insert(Value::from(target), value.clone()).is_some() {
            return Err(FormError::Parse(format!(
                "{} gives '{}' more than once",
                context, target
            )));
        }
    }
    Ok(canonical)
}

fn fold_attribute(
    canonical: &mut Mapping,
    section: &str,
    attribute: &str,
    value: &Value,
    context: &str,
) -> FormResult<()> {
    if !canonical.contains_key(section) {
        canonical.insert(Value::from(section), Value::Mapping(Mapping::new()));
    }
    let Some(Value::Mapping(attributes)) = canonical.get_mut(section) else {
        return Err(FormError::Parse(format!(
            "'{}' of {} must be a mapping",
            section, context
        )));
    };
    if attributes.insert(Value::from(attribute), value.clone()).is_some() {
        return Err(FormError::Parse(format!(
            "{} gives '{}{}{}' more than once",
            context, section, COLUMN_SEPARATOR, attribute
        )));
    }
    Ok(())
}

fn optional_string(map: &Mapping, key: &str, context: &str) -> FormResult<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(value)
            .map(Some)
            .ok_or_else(|| FormError::Parse(format!("'{}' of {} must be text", key, context))),
    }
}

fn optional_label(map: &Mapping, key: &str, context: &str) -> FormResult<Option<Label>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(languages)) => {
            let mut translations = Translations::new();
            for (language, text) in languages {
                let language = scalar_text(language).ok_or_else(|| {
                    FormError::Parse(format!("'{}' of {} has a non-text language", key, context))
                })?;
                let text = scalar_text(text).ok_or_else(|| {
                    FormError::Parse(format!(
                        "'{}::{}' of {} must be text",
                        key, language, context
                    ))
                })?;
                translations.insert(language, text);
            }
            Ok(Some(Label::Translations(translations)))
        }
        Some(value) => scalar_text(value).map(|text| Some(Label::Text(text))).ok_or_else(|| {
            FormError::Parse(format!(
                "'{}' of {} must be text or a language mapping",
                key, context
            ))
        }),
    }
}

fn attributes(map: &Mapping, key: &str, context: &str) -> FormResult<Attributes> {
    let mut attributes = Attributes::new();
    let entries = match map.get(key) {
        None | Some(Value::Null) => return Ok(attributes),
        Some(Value::Mapping(entries)) => entries,
        Some(_) => {
            return Err(FormError::Parse(format!(
                "'{}' of {} must be a mapping",
                key, context
            )))
        }
    };
    for (attribute, value) in entries {
        let attribute = scalar_text(attribute).ok_or_else(|| {
            FormError::Parse(format!("'{}' of {} has a non-text attribute", key, context))
        })?;
        let value = scalar_text(value).ok_or_else(|| {
            FormError::Parse(format!("'{}.{}' of {} must be text", key, attribute, context))
        })?;
        attributes.insert(attribute, value);
    }
    Ok(attributes)
}

/// Text of a scalar value; numbers and booleans are written as they appear
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
