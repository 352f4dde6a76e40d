//! Property-based tests for validr.

use indexmap::IndexMap;
use proptest::prelude::*;
use serde_json::{Value, json};
use validr::expression::{CallDescription, Literal, Modifiers, parse_expression};
use validr::prelude::*;

fn compiler() -> Compiler {
    Compiler::builtin().unwrap()
}

fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        any::<String>().prop_map(Literal::Str),
        any::<i64>().prop_map(Literal::Int),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Literal::Float),
        any::<bool>().prop_map(Literal::Bool),
    ]
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
}

prop_compose! {
    fn call_description()(
        name in identifier(),
        positional in prop::collection::vec(literal(), 0..4),
        keywords in prop::collection::btree_map(identifier(), literal(), 0..4),
        optional in any::<bool>(),
        default in prop::option::of(literal()),
        desc in prop::option::of(any::<String>()),
    ) -> CallDescription {
        CallDescription {
            name,
            positional,
            keywords: keywords.into_iter().collect::<IndexMap<_, _>>(),
            modifiers: Modifiers { optional, default, desc },
        }
    }
}

// ============================================================================
// PARSER: canonical text parses back to the same call
// ============================================================================

proptest! {
    #[test]
    fn canonical_text_round_trips(call in call_description()) {
        let text = call.to_string();
        let parsed = parse_expression(&text);
        prop_assert_eq!(parsed, Ok(call), "text: {}", text);
    }

    #[test]
    fn parser_never_panics(text in ".{0,40}") {
        let _ = parse_expression(&text);
    }
}

// ============================================================================
// COMPILER: well-formed expressions compile
// ============================================================================

proptest! {
    #[test]
    fn int_expressions_compile(min in any::<i64>(), max in any::<i64>(), optional in any::<bool>()) {
        let suffix = if optional { "&optional" } else { "" };
        let expression = format!("int(min={min},max={max}){suffix}");
        prop_assert!(compiler().parse(&expression).is_ok(), "{}", expression);
    }

    #[test]
    fn str_expressions_compile(minlen in 0u32..1000, maxlen in 0u32..1000, escape in any::<bool>()) {
        let expression = format!("str({minlen},{maxlen},escape={escape})");
        prop_assert!(compiler().parse(&expression).is_ok(), "{}", expression);
    }

    #[test]
    fn enum_expressions_compile(
        items in prop::collection::vec(literal(), 0..6),
        default in literal(),
        desc in any::<String>(),
    ) {
        let items: Vec<String> = items.iter().map(ToString::to_string).collect();
        let expression = format!(
            "enum({})&default={default}&desc={}",
            items.join(","),
            Literal::Str(desc)
        );
        prop_assert!(compiler().parse(&expression).is_ok(), "{}", expression);
    }
}

// ============================================================================
// IDEMPOTENCY: validate(validate(x)) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn int_output_is_normal_form(n in any::<i64>().prop_filter("in range", |n| *n != i64::MIN)) {
        let v = compiler().parse("int").unwrap();
        let once = v.validate(&json!(n.to_string())).unwrap();
        prop_assert_eq!(&once, &json!(n));
        prop_assert_eq!(v.validate(&once), Ok(once.clone()));
    }

    #[test]
    fn float_output_is_normal_form(x in -1.0e12f64..1.0e12) {
        let v = compiler().parse("float").unwrap();
        let once = v.validate(&json!(x)).unwrap();
        prop_assert_eq!(v.validate(&once), Ok(once.clone()));
    }

    #[test]
    fn str_output_is_normal_form(s in ".{0,64}") {
        let v = compiler().parse("str").unwrap();
        let once = v.validate(&json!(s)).unwrap();
        prop_assert_eq!(v.validate(&once), Ok(once.clone()));
    }

    #[test]
    fn validation_is_deterministic(s in ".{0,32}") {
        let v = compiler().parse("email&optional").unwrap();
        prop_assert_eq!(v.validate(&json!(s)), v.validate(&json!(s)));
    }

    #[test]
    fn null_policy_ignores_core(default in any::<i64>()) {
        let v = compiler().parse(&format!("int(min=0,max=0)&default={default}")).unwrap();
        prop_assert_eq!(v.validate(&Value::Null), Ok(json!(default)));
    }
}

#[cfg(feature = "temporal")]
proptest! {
    #[test]
    fn date_output_is_normal_form(y in 1i32..9999, m in 1u32..=12, d in 1u32..=28) {
        let v = compiler().parse("date").unwrap();
        let once = v.validate(&json!(format!("{y}-{m}-{d}"))).unwrap();
        prop_assert_eq!(&once, &json!(format!("{y:04}-{m:02}-{d:02}")));
        prop_assert_eq!(v.validate(&once), Ok(once.clone()));
    }
}
