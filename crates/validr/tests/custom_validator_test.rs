//! Caller-supplied validators: registration, overrides, opting out.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use validr::prelude::*;
use validr::registry::SharedFactory;

fn choice(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let choices: Vec<Value> = args.rest().into_iter().map(Value::from).collect();
    Ok(Box::new(from_fn(move |value: &Value| {
        if choices.contains(value) {
            Ok(value.clone())
        } else {
            Err(Invalid::reason("invalid choice"))
        }
    })))
}

fn compiler() -> Compiler {
    let custom: Vec<(&str, SharedFactory)> = vec![("choice", Arc::new(choice) as SharedFactory)];
    Compiler::new(custom).unwrap()
}

#[test]
fn choice_accepts_listed_values() {
    let v = compiler().parse(r#"choice("A","B","C","D")"#).unwrap();
    for value in ["A", "B", "C", "D"] {
        assert_eq!(v.validate(&json!(value)), Ok(json!(value)));
    }
    let err = v.validate(&json!("E")).unwrap_err();
    assert_eq!(err.to_string(), "invalid choice");
    assert_eq!(err.code, "invalid_choice");
}

#[test]
fn choice_optional_without_arguments() {
    let v = compiler().parse("choice&optional").unwrap();
    assert_eq!(v.validate(&Value::Null), Ok(Value::Null));
    assert!(v.validate(&json!("A")).is_err());
    assert!(v.validate(&json!(0)).is_err());
}

#[test]
fn custom_keyword_arguments() {
    let prefixed = |args: &mut Arguments| -> Result<BoxedValidator, SchemaError> {
        let prefix = args.string("prefix", "")?;
        let upper = args.bool("upper", false)?;
        Ok(Box::new(from_fn(move |value: &Value| {
            let text = value.as_str().ok_or_else(|| Invalid::reason("value must be string"))?;
            if !text.starts_with(&prefix) {
                return Err(Invalid::new("prefix", format!("value must start with {prefix}")));
            }
            Ok(if upper {
                json!(text.to_uppercase())
            } else {
                json!(text)
            })
        })))
    };
    let compiler = Compiler::builder().validator("prefixed", prefixed).build().unwrap();

    let v = compiler.parse(r#"prefixed("id_", upper=true)"#).unwrap();
    assert_eq!(v.validate(&json!("id_x")), Ok(json!("ID_X")));
    assert_eq!(
        v.validate(&json!("x")).unwrap_err().to_string(),
        "value must start with id_"
    );

    let err = compiler.parse("prefixed(suffix=1)").unwrap_err();
    assert_eq!(
        err,
        SchemaError::config("prefixed(): unexpected keyword argument 'suffix'")
    );
}

#[test]
fn custom_entry_overrides_builtin() {
    let lenient: SharedFactory = Arc::new(|_: &mut Arguments| -> Result<BoxedValidator, SchemaError> {
        Ok(Box::new(from_fn(|value: &Value| Ok(value.clone()))))
    });
    let compiler = Compiler::new([("int", lenient)]).unwrap();
    let v = compiler.parse("int").unwrap();
    assert_eq!(v.validate(&json!("abc")), Ok(json!("abc")));
    // composition still applies to the override
    assert_eq!(v.validate(&Value::Null), Err(Invalid::required()));
}

#[test]
fn override_does_not_affect_earlier_validators() {
    let base = compiler();
    let before = base.parse(r#"choice("A")"#).unwrap();

    let anything: SharedFactory = Arc::new(|_: &mut Arguments| -> Result<BoxedValidator, SchemaError> {
        Ok(Box::new(from_fn(|value: &Value| Ok(value.clone()))))
    });
    let extended = base.extended([("choice", anything)]).unwrap();
    let after = extended.parse(r#"choice("A")"#).unwrap();

    assert!(before.validate(&json!("Z")).is_err());
    assert!(after.validate(&json!("Z")).is_ok());
    // the base compiler keeps resolving to the old factory
    assert!(base.parse(r#"choice("A")"#).unwrap().validate(&json!("Z")).is_err());
}

#[test]
fn invalid_custom_name_rejected() {
    let custom: Vec<(&str, SharedFactory)> = vec![("not-valid", Arc::new(choice) as SharedFactory)];
    let err = Compiler::new(custom).unwrap_err();
    assert!(matches!(err, SchemaError::Config { .. }), "{err}");
}

#[test]
fn uncomposed_factory_handles_null_itself() {
    let nullable = uncomposed(|args: &mut Arguments| -> Result<BoxedValidator, SchemaError> {
        let optional = matches!(args.take_keyword("optional"), Some(Literal::Bool(true)));
        Ok(Box::new(from_fn(move |value: &Value| match value {
            Value::Null if optional => Ok(json!("<none>")),
            Value::Null => Err(Invalid::reason("missing value")),
            other => Ok(other.clone()),
        })))
    });
    let compiler = Compiler::builder().validator("nullable", nullable).build().unwrap();

    let v = compiler.parse("nullable&optional").unwrap();
    assert_eq!(v.validate(&Value::Null), Ok(json!("<none>")));

    let v = compiler.parse("nullable").unwrap();
    assert_eq!(v.validate(&Value::Null).unwrap_err().to_string(), "missing value");

    // an uncomposed factory must consume what it is given
    let err = compiler.parse("nullable&default=1").unwrap_err();
    assert!(matches!(err, SchemaError::Config { .. }), "{err}");
}

#[test]
fn core_validator_struct_as_custom() {
    struct Even;

    impl CoreValidator for Even {
        fn validate(&self, value: &Value) -> Result<Value, Invalid> {
            match value.as_i64() {
                Some(n) if n % 2 == 0 => Ok(value.clone()),
                _ => Err(Invalid::reason("invalid even")),
            }
        }
    }

    let compiler = Compiler::builder()
        .validator("even", |_: &mut Arguments| -> Result<BoxedValidator, SchemaError> {
            Ok(Box::new(Even))
        })
        .build()
        .unwrap();
    let v = compiler.parse("even&default=0").unwrap();
    assert_eq!(v.validate(&Value::Null), Ok(json!(0)));
    assert_eq!(v.validate(&json!(4)), Ok(json!(4)));
    assert_eq!(v.validate(&json!(3)).unwrap_err().to_string(), "invalid even");
}
