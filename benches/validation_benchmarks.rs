use criterion::{Criterion, criterion_group, criterion_main};
use fieldrule::*;
use regex::Regex;
use std::collections::HashMap;
use std::hint::black_box;

type Record = HashMap<String, Value>;

fn bench_builtin_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("builtin_rules");

    let text = Value::from("Hello World 123");
    let number = Value::from("12345");

    group.bench_function("is_numeric", |b| {
        let spec = RuleSpec::new(true);
        b.iter(|| IsNumeric.check(black_box(&number), &spec))
    });

    group.bench_function("is_less_than", |b| {
        let spec = RuleSpec::new(100_000);
        b.iter(|| IsLessThan.check(black_box(&number), &spec))
    });

    group.bench_function("is_longer_than", |b| {
        let spec = RuleSpec::new(5);
        b.iter(|| IsLongerThan.check(black_box(&text), &spec))
    });

    group.bench_function("is_one_of", |b| {
        let spec = RuleSpec::new(vec!["red", "green", "blue", "Hello World 123"]);
        b.iter(|| IsOneOf.check(black_box(&text), &spec))
    });

    group.bench_function("is_not_empty", |b| {
        let spec = RuleSpec::new(true);
        b.iter(|| IsNotEmpty.check(black_box(&text), &spec))
    });

    group.finish();
}

fn bench_pattern_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_rules");

    let phone = Value::from("123-456-7890");

    group.bench_function("matches_compiled", |b| {
        let spec = RuleSpec::new(Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap());
        b.iter(|| Matches.check(black_box(&phone), &spec))
    });

    group.bench_function("matches_text_pattern", |b| {
        let spec = RuleSpec::new(r"^\d{3}-\d{3}-\d{4}$");
        b.iter(|| Matches.check(black_box(&phone), &spec))
    });

    group.finish();
}

fn bench_validation_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation_pass");

    let validator = Validator::<Record>::new(
        ValidationDeclaration::new("User")
            .field(
                FieldRules::for_field("username")
                    .rule("isNotNull", true)
                    .rule("isLongerThan", 2)
                    .rule("isShorterThan", 32),
            )
            .field(
                FieldRules::for_field("age")
                    .rule("isNumeric", true)
                    .rule("isMoreThan", 12),
            )
            .field(FieldRules::for_field("role").rule("isOneOf", vec!["admin", "user"]))
            .field(FieldRules::for_field("agreed").function("hasAgreed", "terms not accepted")),
    )
    .predicate("hasAgreed", |r: &Record| {
        r.get("agreed").and_then(Value::as_bool) == Some(true)
    });

    let mut user = Record::new();
    user.insert("username".to_string(), Value::from("john_doe123"));
    user.insert("age".to_string(), Value::from(34));
    user.insert("role".to_string(), Value::from("user"));
    user.insert("agreed".to_string(), Value::from(true));

    group.bench_function("four_fields", |b| {
        b.iter(|| validator.run(black_box(&user)))
    });

    group.bench_function("load_json_declaration", |b| {
        let loader = DeclarationLoader::new(DeclarationFormat::Json);
        let text = r#"{
            "username": { "isNotNull": true, "isLongerThan": 2, "matches": "^[a-z_0-9]+$" },
            "age": { "isNumeric": true, "isMoreThan": 12 }
        }"#;
        b.iter(|| loader.parse("User", black_box(text)))
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_builtin_rules,
    bench_pattern_rules,
    bench_validation_pass,
);

criterion_main!(validation_benches);
