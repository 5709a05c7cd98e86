//! Integration tests for fieldrule-validation

use fieldrule_validation::{
    Attributable, ConfigurationError, DeclarationFormat, DeclarationLoader, FieldRules, RuleSpec,
    Validate, ValidationDeclaration, ValidationState, Validator, Value,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;

/// Object exposing a fixed set of attributes, as an attribute-storage layer
/// would.
#[derive(Default)]
struct Sample {
    num1: Value,
    str3: Value,
    enum2: Value,
    title: Value,
    nickname: Value,
    age: Value,
    state: ValidationState,
}

impl Attributable for Sample {
    fn field_value(&self, field: &str) -> Value {
        match field {
            "num1" => self.num1.clone(),
            "str3" => self.str3.clone(),
            "enum2" => self.enum2.clone(),
            "title" => self.title.clone(),
            "nickname" => self.nickname.clone(),
            "age" => self.age.clone(),
            _ => Value::Null,
        }
    }
}

impl Sample {
    fn is_adult(&self) -> bool {
        self.age.as_f64().is_some_and(|age| age >= 18.0)
    }
}

static SAMPLE_VALIDATOR: Lazy<Validator<Sample>> = Lazy::new(|| {
    Validator::new(
        ValidationDeclaration::new("Sample")
            .field(FieldRules::for_field("num1").rule("isNumeric", true))
            .field(FieldRules::for_field("str3").rule("hasExactLengthOf", 20))
            .field(FieldRules::for_field("enum2").rule("isNotOneOf", vec![1, 2, 3]))
            .field(
                FieldRules::for_field("title")
                    .rule("isNotEmpty", RuleSpec::new(true).with_message("CUSTOM MESSAGE")),
            )
            .field(
                FieldRules::for_field("nickname")
                    .rule("isNotEmpty", true)
                    .rule("isShorterThan", 12),
            )
            .field(FieldRules::for_field("age").function("isAdult", "must be an adult")),
    )
    .predicate("isAdult", Sample::is_adult)
});

impl Validate for Sample {
    fn validator() -> &'static Validator<Self> {
        &SAMPLE_VALIDATOR
    }

    fn validation_state(&self) -> &ValidationState {
        &self.state
    }

    fn validation_state_mut(&mut self) -> &mut ValidationState {
        &mut self.state
    }
}

fn valid_sample() -> Sample {
    Sample {
        num1: Value::from("100"),
        str3: Value::from("a".repeat(20)),
        enum2: Value::from(14),
        title: Value::from("Title"),
        nickname: Value::from("ada"),
        age: Value::from(30),
        ..Default::default()
    }
}

#[test]
fn test_valid_before_first_validation() {
    let sample = Sample::default();
    assert!(sample.is_valid());
    assert!(sample.validation_errors().is_empty());
}

#[test]
fn test_valid_sample() {
    let mut sample = valid_sample();
    sample.validate().unwrap();
    assert!(sample.is_valid());
    assert_eq!(sample.validation_errors().len(), 6);
    assert_eq!(sample.validation_errors().error_count(), 0);
}

#[test]
fn test_is_numeric_scenario() {
    let mut sample = valid_sample();
    sample.num1 = Value::from("non numeric value");
    sample.validate().unwrap();
    assert!(!sample.validation_errors().field("num1").unwrap().is_empty());
    assert!(!sample.is_valid());

    sample.num1 = Value::from("100");
    sample.validate().unwrap();
    assert!(sample.validation_errors().field("num1").unwrap().is_empty());
    assert!(sample.is_valid());
}

#[test]
fn test_exact_length_scenario() {
    let mut sample = valid_sample();
    sample.str3 = Value::from("a".repeat(21));
    sample.validate().unwrap();
    assert!(!sample.validation_errors().field("str3").unwrap().is_empty());

    sample.str3 = Value::from("a".repeat(20));
    sample.validate().unwrap();
    assert!(sample.validation_errors().field("str3").unwrap().is_empty());
}

#[test]
fn test_not_one_of_scenario() {
    let mut sample = valid_sample();
    sample.enum2 = Value::from(1);
    sample.validate().unwrap();
    assert!(!sample.validation_errors().field("enum2").unwrap().is_empty());

    sample.enum2 = Value::from(14);
    sample.validate().unwrap();
    assert!(sample.validation_errors().field("enum2").unwrap().is_empty());
}

#[test]
fn test_custom_message_scenario() {
    let mut sample = valid_sample();
    sample.title = Value::from("");
    sample.validate().unwrap();
    assert_eq!(
        sample.validation_errors().field("title").unwrap()[0],
        "CUSTOM MESSAGE"
    );
}

#[test]
fn test_null_passes_not_empty() {
    let mut sample = valid_sample();
    sample.nickname = Value::Null;
    sample.validate().unwrap();

    // isNotEmpty lets null through, isShorterThan does not
    assert_eq!(
        sample.validation_errors().field("nickname").unwrap(),
        ["should be shorter than 12"]
    );
}

#[test]
fn test_custom_predicate() {
    let mut sample = valid_sample();
    sample.age = Value::from(12);
    sample.validate().unwrap();
    assert_eq!(
        sample.validation_errors().field("age").unwrap(),
        ["must be an adult"]
    );
}

#[test]
fn test_errors_are_rebuilt_each_pass() {
    let mut sample = valid_sample();
    sample.title = Value::from("");
    sample.enum2 = Value::from(2);
    sample.validate().unwrap();
    assert_eq!(
        sample.validation_errors().failed_fields().collect::<Vec<_>>(),
        vec!["enum2", "title"]
    );

    sample.title = Value::from("back");
    sample.enum2 = Value::from(20);
    sample.validate().unwrap();
    assert!(sample.is_valid());
    assert_eq!(sample.validation_errors().error_count(), 0);
}

/// Object whose declaration references a rule nobody registered.
#[derive(Default)]
struct Misdeclared {
    state: ValidationState,
}

impl Attributable for Misdeclared {
    fn field_value(&self, _field: &str) -> Value {
        Value::from("anything")
    }
}

static MISDECLARED_VALIDATOR: Lazy<Validator<Misdeclared>> = Lazy::new(|| {
    Validator::new(
        ValidationDeclaration::new("Misdeclared").field(
            FieldRules::for_field("name")
                .rule("isNotNull", true)
                .rule("isSparkly", true),
        ),
    )
});

impl Validate for Misdeclared {
    fn validator() -> &'static Validator<Self> {
        &MISDECLARED_VALIDATOR
    }

    fn validation_state(&self) -> &ValidationState {
        &self.state
    }

    fn validation_state_mut(&mut self) -> &mut ValidationState {
        &mut self.state
    }
}

#[test]
fn test_unknown_rule_raises_and_records_nothing() {
    let mut misdeclared = Misdeclared::default();
    let err = misdeclared.validate().unwrap_err();

    assert!(matches!(err, ConfigurationError::UnknownRule { .. }));
    assert!(err.to_string().contains("isSparkly"));
    assert!(err.to_string().contains("Misdeclared"));
    assert!(misdeclared.validation_errors().is_empty());
    assert!(misdeclared.is_valid());
}

#[test]
fn test_loaded_declaration_matches_builder() {
    let loaded = DeclarationLoader::new(DeclarationFormat::Json)
        .parse(
            "Sample",
            r#"{
                "num1": { "isNumeric": true },
                "str3": { "hasExactLengthOf": 20 },
                "enum2": { "isNotOneOf": [1, 2, 3] }
            }"#,
        )
        .unwrap();

    let built = ValidationDeclaration::new("Sample")
        .field(FieldRules::for_field("num1").rule("isNumeric", true))
        .field(FieldRules::for_field("str3").rule("hasExactLengthOf", 20))
        .field(FieldRules::for_field("enum2").rule("isNotOneOf", vec![1, 2, 3]));

    assert_eq!(loaded, built);
}

#[test]
fn test_concurrent_validation_shares_validator() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let mut sample = valid_sample();
                sample.enum2 = Value::from(i);
                sample.validate().unwrap();
                sample.is_valid()
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, false, false]);
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9]{0,25}".prop_map(Value::from),
    ]
}

fn text_or_null() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Null), "[a-z]{0,15}".prop_map(Value::from)]
}

proptest! {
    #[test]
    fn prop_one_entry_per_declared_field(
        num1 in any_value(),
        str3 in "[a-z]{0,25}",
        enum2 in any::<i32>(),
        title in "[a-z]{0,3}",
    ) {
        let mut sample = Sample {
            num1,
            str3: Value::from(str3),
            enum2: Value::from(enum2),
            title: Value::from(title),
            nickname: Value::from("ada"),
            age: Value::from(40),
            ..Default::default()
        };
        sample.validate().unwrap();

        let errors = sample.validation_errors();
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        prop_assert_eq!(fields, vec!["num1", "str3", "enum2", "title", "nickname", "age"]);
        prop_assert_eq!(sample.is_valid(), errors.iter().all(|(_, m)| m.is_empty()));
    }

    #[test]
    fn prop_validation_is_idempotent(num1 in any_value(), nickname in text_or_null()) {
        let mut sample = valid_sample();
        sample.num1 = num1;
        sample.nickname = nickname;

        sample.validate().unwrap();
        let first = sample.validation_errors().clone();
        let first_valid = sample.is_valid();

        sample.validate().unwrap();
        prop_assert_eq!(&first, sample.validation_errors());
        prop_assert_eq!(first_valid, sample.is_valid());
    }
}
