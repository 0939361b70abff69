use std::fmt;
use thiserror::Error;

pub type FormResult<T> = Result<T, FormError>;

/// Vocabulary a type identifier was being resolved into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// XForm (runtime) data types
    Runtime,
    /// XLSForm (authoring) question types
    Authoring,
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vocabulary::Runtime => write!(f, "XForm"),
            Vocabulary::Authoring => write!(f, "XLSForm"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Could not find {vocabulary} equivalent of type \"{identifier}\"")]
    TypeResolution {
        identifier: String,
        vocabulary: Vocabulary,
    },

    #[error("Unexpected form model: {0}")]
    ModelConsistency(String),

    #[error("Vocabulary table error: {0}")]
    Vocabulary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl FormError {
    pub(crate) fn unresolved(identifier: &str, vocabulary: Vocabulary) -> Self {
        FormError::TypeResolution {
            identifier: identifier.to_string(),
            vocabulary,
        }
    }

    /// The offending type identifier, for resolution errors
    pub fn identifier(&self) -> Option<&str> {
        match self {
            FormError::TypeResolution { identifier, .. } => Some(identifier),
            _ => None,
        }
    }
}
