// Validation engine

use crate::catalog::FUNCTION_RULE;
use crate::{
    Attributable, ConfigurationError, Outcome, Result, RuleCatalog, RuleError, RuleSpec,
    ValidationDeclaration, ValidationErrors,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

enum CatalogSource {
    Global,
    Owned(Arc<RuleCatalog>),
}

/// Drives a [`ValidationDeclaration`] against instances of `T`.
///
/// One validator is built per validated type and shared by all of its
/// instances. Rule names resolve through the process-wide catalog unless an
/// owned catalog is supplied with [`with_catalog`](Self::with_catalog).
pub struct Validator<T> {
    declaration: ValidationDeclaration,
    predicates: HashMap<String, Predicate<T>>,
    catalog: CatalogSource,
}

/// Custom predicate reference carried by a `function` rule
struct PredicateCall<'a> {
    name: &'a str,
    message: String,
}

impl<T: Attributable> Validator<T> {
    pub fn new(declaration: ValidationDeclaration) -> Self {
        Self {
            declaration,
            predicates: HashMap::new(),
            catalog: CatalogSource::Global,
        }
    }

    /// Register a named predicate for `function` rules.
    ///
    /// The predicate sees the whole object; returning `false` records the
    /// rule's message against the declaring field.
    pub fn predicate<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Box::new(predicate));
        self
    }

    /// Resolve rules through `catalog` instead of the process-wide one
    pub fn with_catalog(mut self, catalog: Arc<RuleCatalog>) -> Self {
        self.catalog = CatalogSource::Owned(catalog);
        self
    }

    pub fn declaration(&self) -> &ValidationDeclaration {
        &self.declaration
    }

    fn catalog(&self) -> Arc<RuleCatalog> {
        match &self.catalog {
            CatalogSource::Global => RuleCatalog::global(),
            CatalogSource::Owned(catalog) => Arc::clone(catalog),
        }
    }

    /// Resolve every rule and predicate name without reading any field.
    pub fn check_declaration(&self) -> Result<()> {
        let catalog = self.catalog();

        for rules in self.declaration.fields() {
            for (rule, argument) in rules.iter() {
                if rule == FUNCTION_RULE {
                    let spec = argument.normalize();
                    let call = self.predicate_call(rules.field(), &spec)?;
                    self.lookup_predicate(rules.field(), call.name)?;
                } else if !catalog.contains(rule) {
                    return Err(self.unknown_rule(rules.field(), rule));
                }
            }
        }

        Ok(())
    }

    /// Run one full validation pass and return a fresh report.
    ///
    /// Failed checks are recorded per field. A configuration error aborts the
    /// pass and no report is produced.
    pub fn run(&self, target: &T) -> Result<ValidationErrors> {
        let type_name = self.declaration.type_name();
        tracing::debug!(
            type_name,
            fields = self.declaration.len(),
            "Starting validation pass"
        );

        let catalog = self.catalog();
        let errors = self
            .run_with(&catalog, target)
            .inspect_err(|e| tracing::warn!(type_name, error = %e, "Validation aborted"))?;

        tracing::debug!(
            type_name,
            valid = errors.is_valid(),
            errors = errors.error_count(),
            "Finished validation pass"
        );
        Ok(errors)
    }

    fn run_with(&self, catalog: &RuleCatalog, target: &T) -> Result<ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for rules in self.declaration.fields() {
            let field = rules.field();
            errors.declare(field);
            let value = target.field_value(field);

            for (rule, argument) in rules.iter() {
                let spec = argument.normalize();

                let outcome = if rule == FUNCTION_RULE {
                    self.check_predicate(field, &spec, target)?
                } else {
                    let implementation = catalog
                        .get(rule)
                        .ok_or_else(|| self.unknown_rule(field, rule))?;
                    implementation
                        .check(&value, &spec)
                        .map_err(|source| self.rule_error(field, rule, source))?
                };

                if let Outcome::Fail(default) = outcome {
                    let message = spec.message_or(default);
                    tracing::trace!(field, rule, message = %message, "Rule failed");
                    errors.add(field, message);
                }
            }
        }

        Ok(errors)
    }

    fn check_predicate(&self, field: &str, spec: &RuleSpec, target: &T) -> Result<Outcome> {
        let call = self.predicate_call(field, spec)?;
        let predicate = self.lookup_predicate(field, call.name)?;
        let message = call.message;
        Ok(Outcome::fail_if(!predicate(target), || message))
    }

    fn lookup_predicate(&self, field: &str, name: &str) -> Result<&Predicate<T>> {
        self.predicates
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownPredicate {
                type_name: self.declaration.type_name().to_string(),
                field: field.to_string(),
                name: name.to_string(),
            })
    }

    /// Read `{name, message}` from a `function` rule. An explicit spec
    /// message takes precedence over the one inside the value.
    fn predicate_call<'a>(&self, field: &str, spec: &'a RuleSpec) -> Result<PredicateCall<'a>> {
        let invalid = |reason: &str| {
            self.rule_error(
                field,
                FUNCTION_RULE,
                RuleError::InvalidArgument(reason.to_string()),
            )
        };

        let map = spec
            .value
            .as_map()
            .ok_or_else(|| invalid("expected a {name, message} map"))?;
        let name = map
            .get("name")
            .and_then(|name| name.as_str())
            .ok_or_else(|| invalid("missing predicate name"))?;
        let message = spec
            .message
            .clone()
            .or_else(|| map.get("message").and_then(|m| m.as_str()).map(String::from))
            .ok_or_else(|| invalid("custom rules require a message"))?;

        Ok(PredicateCall { name, message })
    }

    fn unknown_rule(&self, field: &str, rule: &str) -> ConfigurationError {
        ConfigurationError::UnknownRule {
            type_name: self.declaration.type_name().to_string(),
            field: field.to_string(),
            rule: rule.to_string(),
        }
    }

    fn rule_error(&self, field: &str, rule: &str, source: RuleError) -> ConfigurationError {
        ConfigurationError::Rule {
            type_name: self.declaration.type_name().to_string(),
            field: field.to_string(),
            rule: rule.to_string(),
            source,
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut predicates: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        predicates.sort_unstable();
        f.debug_struct("Validator")
            .field("declaration", &self.declaration)
            .field("predicates", &predicates)
            .finish()
    }
}
