// fieldrule - declarative per-field validation
//
// A type declares named rules per field; a validation pass checks current
// field values against them and reports errors per field.

// Re-export the validation engine
#[cfg(feature = "validation")]
pub use fieldrule_validation::*;

#[cfg(feature = "logging")]
pub mod logging;

// Prelude for common imports
#[cfg(feature = "validation")]
pub mod prelude {
    pub use crate::{
        Attributable, ConfigurationError, FieldRules, Outcome, Rule, RuleCatalog, RuleError,
        RuleSpec, Validate, ValidationDeclaration, ValidationErrors, ValidationState, Validator,
        Value, register_rule,
    };
}
