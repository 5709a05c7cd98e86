// Validation declaration builders

use crate::catalog::FUNCTION_RULE;
use crate::{RuleArgument, Value, map};
use indexmap::IndexMap;

/// Rules declared for one field, keyed by rule name in declaration order.
///
/// Declaring the same rule name twice keeps the position of the first
/// declaration and the argument of the last.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    field: String,
    rules: IndexMap<String, RuleArgument>,
}

impl FieldRules {
    /// Create new validation rules for a field
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: IndexMap::new(),
        }
    }

    pub(crate) fn from_parts(field: String, rules: IndexMap<String, RuleArgument>) -> Self {
        Self { field, rules }
    }

    /// Declare a rule by name
    pub fn rule(mut self, name: impl Into<String>, argument: impl Into<RuleArgument>) -> Self {
        self.rules.insert(name.into(), argument.into());
        self
    }

    /// Declare a custom predicate check.
    ///
    /// `predicate` names a predicate registered on the
    /// [`Validator`](crate::Validator); `message` is reported when it
    /// returns `false`.
    pub fn function(self, predicate: impl Into<String>, message: impl Into<String>) -> Self {
        let predicate: String = predicate.into();
        let message: String = message.into();
        let argument = map! { "name" => predicate, "message" => message };
        self.rule(FUNCTION_RULE, argument)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn get(&self, rule: &str) -> Option<&RuleArgument> {
        self.rules.get(rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleArgument)> {
        self.rules.iter().map(|(name, arg)| (name.as_str(), arg))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Declaration of every validated field of a type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationDeclaration {
    type_name: String,
    fields: IndexMap<String, FieldRules>,
}

impl ValidationDeclaration {
    /// Create a declaration for the named type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add rules for a field, replacing any earlier rules for it
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.insert(rules.field.clone(), rules);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, field: &str) -> Option<&FieldRules> {
        self.fields.get(field)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
