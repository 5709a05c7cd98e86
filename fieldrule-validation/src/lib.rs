//! Declarative per-field validation
//!
//! A type declares which named rules apply to which of its fields; a
//! validation pass re-checks the current field values against that
//! declaration and produces a per-field error report.
//!
//! # Examples
//!
//! ## Validating a record
//!
//! ```
//! use fieldrule_validation::*;
//! use std::collections::HashMap;
//!
//! let validator = Validator::<HashMap<String, Value>>::new(
//!     ValidationDeclaration::new("Product")
//!         .field(FieldRules::for_field("sku").rule("hasExactLengthOf", 8))
//!         .field(
//!             FieldRules::for_field("price")
//!                 .rule("isNotNull", true)
//!                 .rule("isMoreThan", RuleSpec::new(0).with_message("must be positive")),
//!         ),
//! );
//!
//! let mut product = HashMap::new();
//! product.insert("sku".to_string(), Value::from("AB-12345"));
//! product.insert("price".to_string(), Value::from(-3));
//!
//! let errors = validator.run(&product).unwrap();
//! assert!(!errors.is_valid());
//! assert!(errors.field("sku").unwrap().is_empty());
//! assert_eq!(errors.field("price").unwrap(), ["must be positive"]);
//! ```
//!
//! ## Custom rules
//!
//! ```
//! use fieldrule_validation::*;
//!
//! fn is_even(value: &Value, _spec: &RuleSpec) -> std::result::Result<Outcome, RuleError> {
//!     let n = value.as_f64().unwrap_or(1.0);
//!     Ok(Outcome::fail_if(n % 2.0 != 0.0, || "should be even".to_string()))
//! }
//!
//! register_rule("isEven", is_even).unwrap();
//! assert!(RuleCatalog::global().contains("isEven"));
//! ```
//!
//! ## Built-in rules
//!
//! | Rule | Argument | Default message |
//! |---|---|---|
//! | `isNumeric` | bool | `is not a number` / `is a number, but it shouldn't be` |
//! | `isLessThan` | number | `should be less than N` |
//! | `isMoreThan` | number | `should be more than N` |
//! | `isOneOf` | list | `should be one of the following: L` |
//! | `isNotOneOf` | list | `should NOT be one of the following: L` |
//! | `isLongerThan` | length | `should be longer than N` |
//! | `isShorterThan` | length | `should be shorter than N` |
//! | `hasExactLengthOf` | length | `should have the length of N` |
//! | `matches` | pattern | `has wrong format` |
//! | `isNotNull` | any (unused) | `should not be null` |
//! | `isNotEmpty` | any (unused) | `should not be empty` |
//! | `function` | `{name, message}` | the given message |

mod catalog;
mod engine;
mod errors;
mod loader;
mod rules;
mod spec;
mod traits;
mod validators;
mod value;

pub use catalog::*;
pub use engine::*;
pub use errors::*;
pub use loader::*;
pub use rules::*;
pub use spec::*;
pub use traits::*;
pub use validators::*;
pub use value::*;
