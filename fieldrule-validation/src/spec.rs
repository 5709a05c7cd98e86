// Rule arguments and outcomes

use crate::Value;
use serde::{Deserialize, Deserializer};

/// Normalized argument handed to every rule: the declared value plus an
/// optional message that replaces the rule's default one.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    pub value: Value,
    pub message: Option<String>,
}

impl RuleSpec {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            message: None,
        }
    }

    /// Override the default failure message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Resolve the message to report for a failed check.
    pub fn message_or(&self, default: String) -> String {
        self.message.clone().unwrap_or(default)
    }
}

/// Argument as written in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleArgument {
    /// A bare value such as `true`, `20` or `[1, 2, 3]`
    Bare(Value),
    /// An explicit `{value, message}` record
    Spec(RuleSpec),
}

impl RuleArgument {
    /// Normalize into the uniform shape rules receive.
    pub fn normalize(&self) -> RuleSpec {
        match self {
            RuleArgument::Bare(value) => RuleSpec::new(value.clone()),
            RuleArgument::Spec(spec) => spec.clone(),
        }
    }
}

impl From<RuleSpec> for RuleArgument {
    fn from(spec: RuleSpec) -> Self {
        RuleArgument::Spec(spec)
    }
}

/// Structural detection: a map exposing both `value` and `message` keys is
/// a spec, anything else is a bare value.
impl From<Value> for RuleArgument {
    fn from(value: Value) -> Self {
        if let Value::Map(map) = &value
            && let (Some(inner), Some(message)) = (map.get("value"), map.get("message"))
        {
            let message = match message {
                Value::Null => None,
                Value::Text(s) => Some(s.clone()),
                other => Some(other.to_string()),
            };
            return RuleArgument::Spec(RuleSpec {
                value: inner.clone(),
                message,
            });
        }
        RuleArgument::Bare(value)
    }
}

macro_rules! impl_argument_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RuleArgument {
                fn from(v: $t) -> Self {
                    RuleArgument::from(Value::from(v))
                }
            }
        )*
    };
}

impl_argument_from!(bool, i32, i64, u32, usize, f64, &str, String, regex::Regex);

impl<T: Into<Value>> From<Vec<T>> for RuleArgument {
    fn from(items: Vec<T>) -> Self {
        RuleArgument::from(Value::from(items))
    }
}

impl<'de> Deserialize<'de> for RuleArgument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(RuleArgument::from)
    }
}

/// Result of a single rule check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// Failed, carrying the rule's default message
    Fail(String),
}

impl Outcome {
    /// `Fail(message)` when `failed` holds, `Pass` otherwise.
    pub fn fail_if(failed: bool, message: impl FnOnce() -> String) -> Self {
        if failed {
            Outcome::Fail(message())
        } else {
            Outcome::Pass
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}
