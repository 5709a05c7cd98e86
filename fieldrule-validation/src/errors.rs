// Validation errors and reports

use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

/// Error raised by a rule implementation.
///
/// These describe a mistake in the declaration (or a value the rule cannot
/// inspect at all), never a value that merely fails the check.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("value `{value}` is not a number: {source}")]
    NotNumeric {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("expected {expected} value, found {found}")]
    Unsupported {
        expected: &'static str,
        found: &'static str,
    },
}

/// Programmer error in a validation declaration.
///
/// Returned from `validate()` instead of being recorded as a field error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Unknown validation rule `{rule}` on field `{field}` of {type_name}")]
    UnknownRule {
        type_name: String,
        field: String,
        rule: String,
    },

    #[error("Unknown custom predicate `{name}` on field `{field}` of {type_name}")]
    UnknownPredicate {
        type_name: String,
        field: String,
        name: String,
    },

    #[error("Rule `{rule}` on field `{field}` of {type_name} failed: {source}")]
    Rule {
        type_name: String,
        field: String,
        rule: String,
        #[source]
        source: RuleError,
    },

    #[error("Validation rule `{0}` is already registered")]
    DuplicateRule(String),

    #[error("Rule name `{0}` is reserved")]
    ReservedRule(String),

    #[error("Failed to parse declaration: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Per-field error report produced by one validation pass.
///
/// Holds exactly one entry per declared field, in declaration order, each
/// listing failure messages in the order the rules were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure an entry exists for `field`
    pub(crate) fn declare(&mut self, field: &str) {
        self.fields.entry(field.to_string()).or_default();
    }

    /// Append a message to `field`
    pub(crate) fn add(&mut self, field: &str, message: String) {
        self.fields.entry(field.to_string()).or_default().push(message);
    }

    /// True iff every field's error list is empty
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    /// Messages for a field, `None` if it was not declared
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields in the report (declared fields, failing or not)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of error messages across all fields
    pub fn error_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Names of fields with at least one error
    pub fn failed_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, _)| field.as_str())
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "errors": self.fields,
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.fields {
            for message in messages {
                writeln!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}
