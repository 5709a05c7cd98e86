// Rule catalog

use crate::validators::*;
use crate::{ConfigurationError, Outcome, Result, RuleError, RuleSpec, Value};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the meta-rule that invokes a custom predicate on the validated
/// object. It is resolved by the engine, never by the catalog.
pub const FUNCTION_RULE: &str = "function";

/// A named check of one field value against a normalized argument.
pub trait Rule: Send + Sync {
    /// Check `value` against `spec`.
    ///
    /// Return `Ok(Outcome::Fail(default_message))` for a value that fails
    /// the check and `Err` only for a broken declaration or a value the rule
    /// cannot inspect.
    fn check(&self, value: &Value, spec: &RuleSpec) -> std::result::Result<Outcome, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(&Value, &RuleSpec) -> std::result::Result<Outcome, RuleError> + Send + Sync,
{
    fn check(&self, value: &Value, spec: &RuleSpec) -> std::result::Result<Outcome, RuleError> {
        self(value, spec)
    }
}

/// Mapping from rule name to implementation.
///
/// Entries are only ever added. Lookups take `&self`, so a catalog shared
/// behind an `Arc` serves any number of concurrent validations.
#[derive(Clone)]
pub struct RuleCatalog {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl RuleCatalog {
    /// Catalog with no rules at all
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Catalog holding the built-in rules
    pub fn with_builtins() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(IsNumeric::NAME, IsNumeric);
        catalog.insert(IsLessThan::NAME, IsLessThan);
        catalog.insert(IsMoreThan::NAME, IsMoreThan);
        catalog.insert(IsOneOf::NAME, IsOneOf);
        catalog.insert(IsNotOneOf::NAME, IsNotOneOf);
        catalog.insert(IsLongerThan::NAME, IsLongerThan);
        catalog.insert(IsShorterThan::NAME, IsShorterThan);
        catalog.insert(HasExactLengthOf::NAME, HasExactLengthOf);
        catalog.insert(Matches::NAME, Matches);
        catalog.insert(IsNotNull::NAME, IsNotNull);
        catalog.insert(IsNotEmpty::NAME, IsNotEmpty);
        catalog
    }

    fn insert(&mut self, name: &str, rule: impl Rule + 'static) {
        self.rules.insert(name.to_string(), Arc::new(rule));
    }

    /// Register a new named rule.
    ///
    /// Fails if the name is taken or reserved; existing entries are never
    /// replaced.
    pub fn register(&mut self, name: impl Into<String>, rule: impl Rule + 'static) -> Result<()> {
        let name = name.into();
        if name == FUNCTION_RULE {
            return Err(ConfigurationError::ReservedRule(name));
        }
        if self.rules.contains_key(&name) {
            return Err(ConfigurationError::DuplicateRule(name));
        }
        tracing::debug!(rule = %name, "Registering validation rule");
        self.rules.insert(name, Arc::new(rule));
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_rule(mut self, name: impl Into<String>, rule: impl Rule + 'static) -> Result<Self> {
        self.register(name, rule)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Snapshot of the process-wide catalog.
    ///
    /// Rules registered after the snapshot is taken are not visible in it.
    pub fn global() -> Arc<RuleCatalog> {
        Arc::clone(&*GLOBAL_CATALOG.read())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.names())
            .finish()
    }
}

static GLOBAL_CATALOG: Lazy<RwLock<Arc<RuleCatalog>>> =
    Lazy::new(|| RwLock::new(Arc::new(RuleCatalog::with_builtins())));

/// Register a rule in the process-wide catalog.
///
/// Intended for setup code that runs before validation starts. Snapshots
/// already handed out keep the entries they were taken with.
pub fn register_rule(name: impl Into<String>, rule: impl Rule + 'static) -> Result<()> {
    let mut catalog = GLOBAL_CATALOG.write();
    Arc::make_mut(&mut *catalog).register(name, rule)
}
