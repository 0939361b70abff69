//! Type synonym tables and the internal question-type catalog
//!
//! The tables are plain data. `VocabularyTables::global()` builds and validates
//! them once per process; every later lookup reads the same immutable instance.

use super::headers::HeaderTables;
use super::type_names::{AuthoringType, RuntimeType, TypeTag};
use crate::error::{FormError, FormResult};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Spellings accepted for a select-one question
pub(crate) const SELECT_ONE_SYNONYMS: &[&str] = &[
    "select one",
    "select_one",
    "select1",
    "select one from",
    "add select one prompt using",
    "select_one_from_file",
    "select one from file",
];

/// Spellings accepted for a select-multiple question
pub(crate) const SELECT_MULTIPLE_SYNONYMS: &[&str] = &[
    "select all that apply",
    "select_multiple",
    "select",
    "select all that apply from",
    "add select multiple prompt using",
    "select multiple from file",
    "select_multiple_from_file",
];

/// XForm type → XLSForm type. `boolean` has no XLSForm counterpart.
pub(crate) const RUNTIME_TO_AUTHORING: &[(RuntimeType, AuthoringType)] = &[
    (RuntimeType::String, AuthoringType::Text),
    (RuntimeType::Int, AuthoringType::Integer),
    (RuntimeType::Decimal, AuthoringType::Decimal),
    (RuntimeType::Date, AuthoringType::Date),
    (RuntimeType::Time, AuthoringType::Time),
    (RuntimeType::DateTime, AuthoringType::DateTime),
    (RuntimeType::SelectMultiple, AuthoringType::SelectMultiple),
    (RuntimeType::SelectOne, AuthoringType::SelectOne),
    (RuntimeType::Geopoint, AuthoringType::Geopoint),
    (RuntimeType::Geotrace, AuthoringType::Geotrace),
    (RuntimeType::Geoshape, AuthoringType::Geoshape),
    (RuntimeType::Binary, AuthoringType::File),
    (RuntimeType::Barcode, AuthoringType::Barcode),
];

/// Internal names that have a more specific XLSForm type than their bind type
/// implies. Consulted before falling back through the XForm vocabulary.
pub(crate) const INTERNAL_TO_AUTHORING: &[(&str, AuthoringType)] = &[
    ("photo", AuthoringType::Image),
    ("q picture", AuthoringType::Image),
    ("imei", AuthoringType::DeviceId),
    ("calculate", AuthoringType::Calculation),
];

/// Internal question-type names and the XForm bind type each declares
pub(crate) const QUESTION_TYPE_CATALOG: &[(&str, Option<&str>)] = &[
    ("calculate", Some("string")),
    ("calculation", Some("string")),
    ("note", Some("string")),
    ("acknowledge", Some("string")),
    ("trigger", Some("string")),
    ("hidden", Some("string")),
    ("photo", Some("binary")),
    ("q picture", Some("binary")),
    ("image", Some("binary")),
    ("audio", Some("binary")),
    ("video", Some("binary")),
    ("file", Some("binary")),
    ("gps", Some("geopoint")),
    ("location", Some("geopoint")),
    ("start", Some("dateTime")),
    ("end", Some("dateTime")),
    ("today", Some("date")),
    ("deviceid", Some("string")),
    ("imei", Some("string")),
    ("subscriberid", Some("string")),
    ("simserial", Some("string")),
    ("phonenumber", Some("string")),
    ("range", Some("int")),
    ("select one external", Some("string")),
    ("xml-external", None),
];

/// The raw tables a `VocabularyTables` is built from
#[derive(Debug, Clone, Copy)]
pub struct TableSource {
    pub select_one: &'static [&'static str],
    pub select_multiple: &'static [&'static str],
    pub runtime_to_authoring: &'static [(RuntimeType, AuthoringType)],
    pub internal_to_authoring: &'static [(&'static str, AuthoringType)],
    pub catalog: &'static [(&'static str, Option<&'static str>)],
}

impl Default for TableSource {
    fn default() -> Self {
        Self {
            select_one: SELECT_ONE_SYNONYMS,
            select_multiple: SELECT_MULTIPLE_SYNONYMS,
            runtime_to_authoring: RUNTIME_TO_AUTHORING,
            internal_to_authoring: INTERNAL_TO_AUTHORING,
            catalog: QUESTION_TYPE_CATALOG,
        }
    }
}

/// Validated, indexed vocabulary tables
#[derive(Debug)]
pub struct VocabularyTables {
    select_one: HashSet<&'static str>,
    select_multiple: HashSet<&'static str>,
    runtime_to_authoring: HashMap<RuntimeType, AuthoringType>,
    authoring_to_runtime: HashMap<&'static str, RuntimeType>,
    internal_to_authoring: HashMap<&'static str, AuthoringType>,
    catalog: HashMap<&'static str, Option<RuntimeType>>,
    headers: HeaderTables,
}

static TABLES: Lazy<Result<VocabularyTables, String>> =
    Lazy::new(|| VocabularyTables::build(TableSource::default()).map_err(|e| e.to_string()));

impl VocabularyTables {
    /// The process-wide tables, built and validated on first use
    pub fn global() -> FormResult<&'static VocabularyTables> {
        match &*TABLES {
            Ok(tables) => Ok(tables),
            Err(message) => Err(FormError::Vocabulary(message.clone())),
        }
    }

    /// Index and validate a set of tables
    pub fn build(source: TableSource) -> FormResult<Self> {
        let select_one = unique_set("select-one", source.select_one)?;
        let select_multiple = unique_set("select-multiple", source.select_multiple)?;
        if let Some(both) = select_one.intersection(&select_multiple).next() {
            return Err(FormError::Vocabulary(format!(
                "'{}' is both a select-one and a select-multiple synonym",
                both
            )));
        }

        let mut runtime_to_authoring = HashMap::new();
        let mut authoring_to_runtime = HashMap::new();
        for &(runtime, authoring) in source.runtime_to_authoring {
            if runtime_to_authoring.insert(runtime, authoring).is_some() {
                return Err(FormError::Vocabulary(format!(
                    "XForm type '{}' has more than one XLSForm equivalent",
                    runtime
                )));
            }
            if authoring_to_runtime
                .insert(authoring.as_str(), runtime)
                .is_some()
            {
                return Err(FormError::Vocabulary(format!(
                    "XLSForm type '{}' has more than one XForm equivalent",
                    authoring
                )));
            }
        }

        let mut catalog = HashMap::with_capacity(source.catalog.len());
        for &(name, bind_type) in source.catalog {
            let bind_type = match bind_type {
                Some(bind) => Some(RuntimeType::parse(bind).ok_or_else(|| {
                    FormError::Vocabulary(format!(
                        "question type '{}' binds unknown XForm type '{}'",
                        name, bind
                    ))
                })?),
                None => None,
            };
            if catalog.insert(name, bind_type).is_some() {
                return Err(FormError::Vocabulary(format!(
                    "question type '{}' is catalogued twice",
                    name
                )));
            }
        }

        let internal_to_authoring = internal_aliases(
            source.internal_to_authoring,
            &catalog,
            &authoring_to_runtime,
        )?;

        Ok(Self {
            select_one,
            select_multiple,
            runtime_to_authoring,
            authoring_to_runtime,
            internal_to_authoring,
            catalog,
            headers: HeaderTables::build()?,
        })
    }

    pub fn is_select_one(&self, name: &str) -> bool {
        self.select_one.contains(name)
    }

    pub fn is_select_multiple(&self, name: &str) -> bool {
        self.select_multiple.contains(name)
    }

    /// Registered XLSForm equivalent of an XForm type
    pub fn authoring_for(&self, runtime: RuntimeType) -> Option<AuthoringType> {
        self.runtime_to_authoring.get(&runtime).copied()
    }

    /// Registered XForm equivalent of an XLSForm type name
    pub fn runtime_for(&self, authoring: &str) -> Option<RuntimeType> {
        self.authoring_to_runtime.get(authoring).copied()
    }

    /// XLSForm type an internal name is exported as, when it has its own
    pub fn authoring_alias(&self, name: &str) -> Option<AuthoringType> {
        self.internal_to_authoring.get(name).copied()
    }

    /// Catalogue lookup: `None` if unknown, `Some(None)` if known without a bind type
    pub fn catalog_bind_type(&self, name: &str) -> Option<Option<RuntimeType>> {
        self.catalog.get(name).copied()
    }

    pub fn headers(&self) -> &HeaderTables {
        &self.headers
    }
}

/// Force table validation, e.g. at process start
pub fn init() -> FormResult<()> {
    VocabularyTables::global().map(|_| ())
}

/// Every alias must be a catalogued internal name that binds the same XForm
/// type as its target, and must not shadow an XLSForm type.
fn internal_aliases(
    entries: &'static [(&'static str, AuthoringType)],
    catalog: &HashMap<&'static str, Option<RuntimeType>>,
    authoring_to_runtime: &HashMap<&'static str, RuntimeType>,
) -> FormResult<HashMap<&'static str, AuthoringType>> {
    let mut aliases = HashMap::with_capacity(entries.len());
    for &(name, authoring) in entries {
        if AuthoringType::parse(name).is_some() {
            return Err(FormError::Vocabulary(format!(
                "'{}' is already an XLSForm type and cannot be aliased",
                name
            )));
        }
        let bind_type = catalog.get(name).copied().flatten().ok_or_else(|| {
            FormError::Vocabulary(format!(
                "aliased question type '{}' has no catalogued XForm type",
                name
            ))
        })?;
        let target = authoring_to_runtime
            .get(authoring.as_str())
            .copied()
            .or_else(|| catalog.get(authoring.as_str()).copied().flatten());
        if target != Some(bind_type) {
            return Err(FormError::Vocabulary(format!(
                "question type '{}' binds '{}' but is aliased to '{}'",
                name, bind_type, authoring
            )));
        }
        if aliases.insert(name, authoring).is_some() {
            return Err(FormError::Vocabulary(format!(
                "question type '{}' is aliased twice",
                name
            )));
        }
    }
    Ok(aliases)
}

fn unique_set(
    what: &str,
    entries: &'static [&'static str],
) -> FormResult<HashSet<&'static str>> {
    let mut set = HashSet::with_capacity(entries.len());
    for &entry in entries {
        if !set.insert(entry) {
            return Err(FormError::Vocabulary(format!(
                "{} synonym '{}' is listed twice",
                what, entry
            )));
        }
    }
    Ok(set)
}
