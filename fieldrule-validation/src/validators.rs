// Built-in validators

use crate::{Outcome, Rule, RuleError, RuleSpec, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

// Argument coercion

fn bool_argument(spec: &RuleSpec) -> Result<bool, RuleError> {
    spec.value.as_bool().ok_or_else(|| {
        RuleError::InvalidArgument(format!("expected a boolean, found {}", spec.value.kind()))
    })
}

fn number_argument(spec: &RuleSpec) -> Result<f64, RuleError> {
    match &spec.value {
        Value::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            RuleError::InvalidArgument(format!("`{}` cannot be coerced to a number", s))
        }),
        other => other.as_f64().ok_or_else(|| {
            RuleError::InvalidArgument(format!("expected a number, found {}", other.kind()))
        }),
    }
}

fn length_argument(spec: &RuleSpec) -> Result<usize, RuleError> {
    let n = number_argument(spec)?;
    if n.fract() != 0.0 || n < 0.0 || !n.is_finite() {
        return Err(RuleError::InvalidArgument(format!(
            "expected a non-negative whole length, found {}",
            spec.value
        )));
    }
    Ok(n as usize)
}

fn list_argument(spec: &RuleSpec) -> Result<&[Value], RuleError> {
    spec.value.as_list().ok_or_else(|| {
        RuleError::InvalidArgument(format!("expected a list, found {}", spec.value.kind()))
    })
}

fn pattern_argument(spec: &RuleSpec) -> Result<Cow<'_, Regex>, RuleError> {
    match &spec.value {
        Value::Pattern(re) => Ok(Cow::Borrowed(re)),
        Value::Text(source) => Regex::new(source)
            .map(Cow::Owned)
            .map_err(|e| RuleError::InvalidArgument(format!("invalid pattern: {}", e))),
        other => Err(RuleError::InvalidArgument(format!(
            "expected a pattern, found {}",
            other.kind()
        ))),
    }
}

// Value coercion

/// Numeric reading of a field value. Text is parsed as a base-10 float and
/// a parse failure is an error, not a failed check.
fn numeric(value: &Value) -> Result<f64, RuleError> {
    match value {
        Value::Text(s) => s.trim().parse::<f64>().map_err(|source| RuleError::NotNumeric {
            value: s.clone(),
            source,
        }),
        other => other.as_f64().ok_or(RuleError::Unsupported {
            expected: "numeric",
            found: other.kind(),
        }),
    }
}

fn length(value: &Value) -> Result<usize, RuleError> {
    value.len().ok_or(RuleError::Unsupported {
        expected: "sized",
        found: value.kind(),
    })
}

fn string_form(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Text(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

// Numeric validators

/// Requires (argument `true`) or forbids (argument `false`) a numeric value.
///
/// Numbers always satisfy the requirement; other values are judged by
/// whether their string form is all ASCII digits. Null satisfies the
/// requirement.
pub struct IsNumeric;

impl IsNumeric {
    pub const NAME: &'static str = "isNumeric";
}

impl Rule for IsNumeric {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let require = bool_argument(spec)?;
        let digits = DIGITS_REGEX.is_match(&string_form(value));

        if require {
            Ok(Outcome::fail_if(
                !value.is_null() && !value.is_number() && !digits,
                || "is not a number".to_string(),
            ))
        } else {
            Ok(Outcome::fail_if(digits, || {
                "is a number, but it shouldn't be".to_string()
            }))
        }
    }
}

/// Numeric value strictly below the argument
pub struct IsLessThan;

impl IsLessThan {
    pub const NAME: &'static str = "isLessThan";
}

impl Rule for IsLessThan {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let bound = number_argument(spec)?;
        let failed = value.is_null() || numeric(value)? >= bound;
        Ok(Outcome::fail_if(failed, || {
            format!("should be less than {}", spec.value)
        }))
    }
}

/// Numeric value strictly above the argument
pub struct IsMoreThan;

impl IsMoreThan {
    pub const NAME: &'static str = "isMoreThan";
}

impl Rule for IsMoreThan {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let bound = number_argument(spec)?;
        let failed = value.is_null() || numeric(value)? <= bound;
        Ok(Outcome::fail_if(failed, || {
            format!("should be more than {}", spec.value)
        }))
    }
}

// Membership validators

pub struct IsOneOf;

impl IsOneOf {
    pub const NAME: &'static str = "isOneOf";
}

impl Rule for IsOneOf {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let allowed = list_argument(spec)?;
        Ok(Outcome::fail_if(!allowed.contains(value), || {
            format!("should be one of the following: {}", spec.value)
        }))
    }
}

pub struct IsNotOneOf;

impl IsNotOneOf {
    pub const NAME: &'static str = "isNotOneOf";
}

impl Rule for IsNotOneOf {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let forbidden = list_argument(spec)?;
        Ok(Outcome::fail_if(forbidden.contains(value), || {
            format!("should NOT be one of the following: {}", spec.value)
        }))
    }
}

// Length validators

pub struct IsLongerThan;

impl IsLongerThan {
    pub const NAME: &'static str = "isLongerThan";
}

impl Rule for IsLongerThan {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let n = length_argument(spec)?;
        let failed = value.is_null() || length(value)? <= n;
        Ok(Outcome::fail_if(failed, || {
            format!("should be longer than {}", spec.value)
        }))
    }
}

pub struct IsShorterThan;

impl IsShorterThan {
    pub const NAME: &'static str = "isShorterThan";
}

impl Rule for IsShorterThan {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let n = length_argument(spec)?;
        let failed = value.is_null() || length(value)? >= n;
        Ok(Outcome::fail_if(failed, || {
            format!("should be shorter than {}", spec.value)
        }))
    }
}

pub struct HasExactLengthOf;

impl HasExactLengthOf {
    pub const NAME: &'static str = "hasExactLengthOf";
}

impl Rule for HasExactLengthOf {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let n = length_argument(spec)?;
        let failed = value.is_null() || length(value)? != n;
        Ok(Outcome::fail_if(failed, || {
            format!("should have the length of {}", spec.value)
        }))
    }
}

// Pattern validator

/// Value contains a match of the pattern (unanchored search)
pub struct Matches;

impl Matches {
    pub const NAME: &'static str = "matches";
}

impl Rule for Matches {
    fn check(&self, value: &Value, spec: &RuleSpec) -> Result<Outcome, RuleError> {
        let pattern = pattern_argument(spec)?;
        let failed = match value {
            Value::Null => true,
            Value::Text(s) => !pattern.is_match(s),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => {
                !pattern.is_match(&value.to_string())
            }
            other => {
                return Err(RuleError::Unsupported {
                    expected: "text",
                    found: other.kind(),
                });
            }
        };
        Ok(Outcome::fail_if(failed, || "has wrong format".to_string()))
    }
}

// Presence validators

/// Fails on null. The argument is not consulted.
pub struct IsNotNull;

impl IsNotNull {
    pub const NAME: &'static str = "isNotNull";
}

impl Rule for IsNotNull {
    fn check(&self, value: &Value, _spec: &RuleSpec) -> Result<Outcome, RuleError> {
        Ok(Outcome::fail_if(value.is_null(), || {
            "should not be null".to_string()
        }))
    }
}

/// Fails on a zero-length value. Null is not empty and passes; pair with
/// [`IsNotNull`] to reject it.
pub struct IsNotEmpty;

impl IsNotEmpty {
    pub const NAME: &'static str = "isNotEmpty";
}

impl Rule for IsNotEmpty {
    fn check(&self, value: &Value, _spec: &RuleSpec) -> Result<Outcome, RuleError> {
        if value.is_null() {
            return Ok(Outcome::Pass);
        }
        let failed = length(value)? == 0;
        Ok(Outcome::fail_if(failed, || "should not be empty".to_string()))
    }
}
