//! Boolean validator

use serde_json::Value;

use crate::foundation::{Arguments, BoxedValidator, CoreValidator, Invalid, SchemaError};

/// Accepts JSON booleans only; no coercion from text or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoolValidator;

impl CoreValidator for BoolValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err(Invalid::invalid("bool")),
        }
    }
}

/// Factory for `bool()`.
pub fn boolean(_args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    Ok(Box::new(BoolValidator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool() {
        assert_eq!(BoolValidator.validate(&json!(true)), Ok(json!(true)));
        assert_eq!(BoolValidator.validate(&json!(false)), Ok(json!(false)));
    }

    #[test]
    fn test_bool_rejects_lookalikes() {
        for bad in [json!("true"), json!(1), json!(0)] {
            assert_eq!(BoolValidator.validate(&bad).unwrap_err().to_string(), "invalid bool");
        }
    }
}
