//! Enumeration validator: membership in a fixed item list

use serde_json::{Number, Value};

use crate::foundation::{Arguments, BoxedValidator, CoreValidator, Invalid, SchemaError};

/// Accepts values equal to one of the items.
///
/// Order is irrelevant and duplicates are harmless. Numbers compare by
/// value, so `1.0` matches the item `1`. Otherwise comparison is JSON
/// equality: `"1"`, `1` and `true` are different items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumValidator {
    items: Vec<Value>,
}

impl EnumValidator {
    pub fn new(items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

fn same_number(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        a.as_f64() == b.as_f64()
    } else {
        a == b
    }
}

fn same_item(item: &Value, value: &Value) -> bool {
    match (item, value) {
        (Value::Number(a), Value::Number(b)) => same_number(a, b),
        _ => item == value,
    }
}

impl CoreValidator for EnumValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        if self.items.iter().any(|item| same_item(item, value)) {
            Ok(value.clone())
        } else {
            Err(Invalid::invalid("enum"))
        }
    }
}

/// Factory for `enum(item, ...)`.
pub fn enumeration(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let items = args.rest().into_iter().map(Value::from);
    Ok(Box::new(EnumValidator::new(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_membership() {
        let v = EnumValidator::new([json!("red"), json!("green"), json!(3)]);
        assert_eq!(v.validate(&json!("red")), Ok(json!("red")));
        assert_eq!(v.validate(&json!(3)), Ok(json!(3)));
        assert_eq!(v.validate(&json!("blue")).unwrap_err().to_string(), "invalid enum");
        assert!(v.validate(&json!("3")).is_err());
    }

    #[test]
    fn test_enum_numbers_compare_by_value() {
        let v = EnumValidator::new([json!(1), json!(2.5)]);
        assert_eq!(v.validate(&json!(1.0)), Ok(json!(1.0)));
        assert_eq!(v.validate(&json!(2.5)), Ok(json!(2.5)));
        assert!(v.validate(&json!(1.5)).is_err());
        assert!(v.validate(&json!(true)).is_err());
        assert!(EnumValidator::new([json!(u64::MAX)]).validate(&json!(u64::MAX)).is_ok());
    }

    #[test]
    fn test_enum_duplicates_harmless() {
        let v = EnumValidator::new([json!("a"), json!("a")]);
        assert!(v.validate(&json!("a")).is_ok());
    }

    #[test]
    fn test_empty_enum_rejects_everything() {
        assert!(EnumValidator::default().validate(&json!("a")).is_err());
    }
}
