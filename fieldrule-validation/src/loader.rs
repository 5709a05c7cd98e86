// Declaration loaders

use crate::validators::Matches;
use crate::{
    ConfigurationError, FieldRules, Result, RuleArgument, RuleSpec, ValidationDeclaration, Value,
};
use indexmap::IndexMap;
use regex::Regex;

type RawDeclaration = IndexMap<String, IndexMap<String, RuleArgument>>;

/// Supported declaration text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationFormat {
    Json,
    Toml,
}

impl DeclarationFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(DeclarationFormat::Json),
            "toml" => Some(DeclarationFormat::Toml),
            _ => None,
        }
    }
}

/// Builds a [`ValidationDeclaration`] from text of the shape
/// `{ field: { rule: argument } }`.
///
/// Field and rule order follow the document. Textual `matches` patterns are
/// compiled while loading, so a bad pattern is reported here rather than on
/// every validation pass.
///
/// ```
/// use fieldrule_validation::{DeclarationFormat, DeclarationLoader};
///
/// let declaration = DeclarationLoader::new(DeclarationFormat::Json)
///     .parse("User", r#"{
///         "name": { "isNotNull": true, "isLongerThan": 2 },
///         "role": { "isOneOf": { "value": ["admin", "user"], "message": "unknown role" } }
///     }"#)
///     .unwrap();
///
/// assert_eq!(declaration.len(), 2);
/// ```
pub struct DeclarationLoader {
    format: DeclarationFormat,
}

impl DeclarationLoader {
    pub fn new(format: DeclarationFormat) -> Self {
        Self { format }
    }

    /// Parse a declaration for `type_name` from a string
    pub fn parse(&self, type_name: &str, content: &str) -> Result<ValidationDeclaration> {
        let raw = match self.format {
            DeclarationFormat::Json => self.parse_json(content)?,
            DeclarationFormat::Toml => self.parse_toml(content)?,
        };

        let mut declaration = ValidationDeclaration::new(type_name);
        for (field, rules) in raw {
            let rules = rules
                .into_iter()
                .map(|(rule, argument)| {
                    let argument = if rule == Matches::NAME {
                        compile_pattern(&field, argument)?
                    } else {
                        argument
                    };
                    Ok((rule, argument))
                })
                .collect::<Result<IndexMap<_, _>>>()?;
            declaration = declaration.field(FieldRules::from_parts(field, rules));
        }

        tracing::debug!(
            type_name,
            fields = declaration.len(),
            format = ?self.format,
            "Loaded validation declaration"
        );
        Ok(declaration)
    }

    fn parse_json(&self, content: &str) -> Result<RawDeclaration> {
        serde_json::from_str(content)
            .map_err(|e| ConfigurationError::Parse(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<RawDeclaration> {
        toml::from_str(content)
            .map_err(|e| ConfigurationError::Parse(format!("TOML parse error: {}", e)))
    }
}

fn compile_pattern(field: &str, argument: RuleArgument) -> Result<RuleArgument> {
    let compile = |source: &str| {
        Regex::new(source).map(Value::Pattern).map_err(|e| {
            ConfigurationError::Parse(format!("invalid pattern for field `{}`: {}", field, e))
        })
    };

    Ok(match argument {
        RuleArgument::Bare(Value::Text(source)) => RuleArgument::Bare(compile(&source)?),
        RuleArgument::Spec(RuleSpec {
            value: Value::Text(source),
            message,
        }) => RuleArgument::Spec(RuleSpec {
            value: compile(&source)?,
            message,
        }),
        other => other,
    })
}
