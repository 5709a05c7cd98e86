// Validation traits

use crate::{Result, ValidationErrors, Validator, Value};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Read access to an object's named attributes.
pub trait Attributable {
    /// Current value of `field`, [`Value::Null`] when unset.
    fn field_value(&self, field: &str) -> Value;
}

impl Attributable for HashMap<String, Value> {
    fn field_value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl Attributable for IndexMap<String, Value> {
    fn field_value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

/// Outcome of the most recent validation pass, owned by the validated
/// instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    errors: ValidationErrors,
    valid: bool,
}

impl ValidationState {
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
            valid: true,
        }
    }

    /// Replace the state with a fresh report
    pub fn replace(&mut self, errors: ValidationErrors) {
        self.valid = errors.is_valid();
        self.errors = errors;
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Types that validate themselves against a declaration shared by every
/// instance of the type.
///
/// ```
/// use fieldrule_validation::*;
/// use once_cell::sync::Lazy;
///
/// struct Signup {
///     username: String,
///     state: ValidationState,
/// }
///
/// impl Attributable for Signup {
///     fn field_value(&self, field: &str) -> Value {
///         match field {
///             "username" => Value::from(self.username.as_str()),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// static VALIDATOR: Lazy<Validator<Signup>> = Lazy::new(|| {
///     Validator::new(
///         ValidationDeclaration::new("Signup")
///             .field(FieldRules::for_field("username").rule("isLongerThan", 2)),
///     )
/// });
///
/// impl Validate for Signup {
///     fn validator() -> &'static Validator<Self> {
///         &VALIDATOR
///     }
///     fn validation_state(&self) -> &ValidationState {
///         &self.state
///     }
///     fn validation_state_mut(&mut self) -> &mut ValidationState {
///         &mut self.state
///     }
/// }
///
/// let mut signup = Signup { username: "al".into(), state: ValidationState::new() };
/// signup.validate().unwrap();
/// assert!(!signup.is_valid());
/// assert_eq!(signup.validation_errors().field("username").unwrap()[0], "should be longer than 2");
/// ```
pub trait Validate: Attributable + Sized + 'static {
    /// The type's validator
    fn validator() -> &'static Validator<Self>;

    fn validation_state(&self) -> &ValidationState;

    fn validation_state_mut(&mut self) -> &mut ValidationState;

    /// Re-validate every declared field against current values.
    ///
    /// On a configuration error the previous state is left untouched.
    fn validate(&mut self) -> Result<()> {
        let errors = Self::validator().run(self)?;
        self.validation_state_mut().replace(errors);
        Ok(())
    }

    /// Per-field messages from the last successful pass
    fn validation_errors(&self) -> &ValidationErrors {
        self.validation_state().errors()
    }

    /// Whether the last successful pass found no errors
    fn is_valid(&self) -> bool {
        self.validation_state().is_valid()
    }
}
