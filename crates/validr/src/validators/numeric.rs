//! Numeric validators: `int` and `float`
//!
//! Both convert their input first (numbers and numeric text), then run the
//! bound checks in a fixed order: minimum before maximum.

use std::num::IntErrorKind;

use serde_json::{Number, Value};

use crate::foundation::{Arguments, BoxedValidator, CoreValidator, Invalid, SchemaError};

// ============================================================================
// INT
// ============================================================================

/// Validates integers within an inclusive range.
///
/// Accepts JSON integers, integral text (surrounding whitespace ignored) and
/// finite floats, which are truncated toward zero. Returns a JSON integer.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validr::foundation::CoreValidator;
/// use validr::validators::IntValidator;
///
/// let v = IntValidator::new(0, 10);
/// assert_eq!(v.validate(&json!("5")), Ok(json!(5)));
/// assert_eq!(v.validate(&json!(11)).unwrap_err().to_string(), "value must <= 10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntValidator {
    min: i64,
    max: i64,
}

impl IntValidator {
    /// Default lower bound, the negated largest `i64`.
    pub const DEFAULT_MIN: i64 = -i64::MAX;
    /// Default upper bound.
    pub const DEFAULT_MAX: i64 = i64::MAX;

    #[must_use]
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Default for IntValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

/// Converts to a wide integer so that integral input beyond `i64` still
/// reaches the bound checks. Text too long even for `i128` saturates.
fn to_int(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| {
                // float to int casts saturate
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i128)
            }),
        Value::String(s) => match s.trim().parse::<i128>() {
            Ok(v) => Some(v),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(i128::MAX),
                IntErrorKind::NegOverflow => Some(i128::MIN),
                _ => None,
            },
        },
        _ => None,
    }
}

impl CoreValidator for IntValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let v = to_int(value).ok_or_else(|| Invalid::invalid("int"))?;
        if v < i128::from(self.min) {
            return Err(Invalid::new("min", format!("value must >= {}", self.min))
                .with_param("min", self.min.to_string()));
        }
        if v > i128::from(self.max) {
            return Err(Invalid::new("max", format!("value must <= {}", self.max))
                .with_param("max", self.max.to_string()));
        }
        i64::try_from(v)
            .map(Value::from)
            .map_err(|_| Invalid::invalid("int"))
    }
}

/// Factory for `int(min, max)`.
pub fn int(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let min = args.int("min", IntValidator::DEFAULT_MIN)?;
    let max = args.int("max", IntValidator::DEFAULT_MAX)?;
    Ok(Box::new(IntValidator::new(min, max)))
}

// ============================================================================
// FLOAT
// ============================================================================

/// Validates finite floats within a range whose ends are inclusive unless
/// flagged exclusive.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validr::foundation::CoreValidator;
/// use validr::validators::FloatValidator;
///
/// let v = FloatValidator::new(0.0, 1.0).exclusive_min();
/// assert_eq!(v.validate(&json!("0.5")), Ok(json!(0.5)));
/// assert!(v.validate(&json!(0)).is_err());
/// assert!(v.validate(&json!(1)).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatValidator {
    min: f64,
    max: f64,
    exmin: bool,
    exmax: bool,
}

impl FloatValidator {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            exmin: false,
            exmax: false,
        }
    }

    /// Exclude the lower bound itself.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclusive_min(mut self) -> Self {
        self.exmin = true;
        self
    }

    /// Exclude the upper bound itself.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclusive_max(mut self) -> Self {
        self.exmax = true;
        self
    }
}

impl Default for FloatValidator {
    fn default() -> Self {
        Self::new(-f64::MAX, f64::MAX)
    }
}

fn to_float(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    v.is_finite().then_some(v)
}

impl CoreValidator for FloatValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let v = to_float(value).ok_or_else(|| Invalid::invalid("float"))?;

        if self.exmin && v <= self.min {
            return Err(Invalid::new("min", format!("value must > {}", self.min))
                .with_param("min", self.min.to_string()));
        }
        if !self.exmin && v < self.min {
            return Err(Invalid::new("min", format!("value must >= {}", self.min))
                .with_param("min", self.min.to_string()));
        }
        if self.exmax && v >= self.max {
            return Err(Invalid::new("max", format!("value must < {}", self.max))
                .with_param("max", self.max.to_string()));
        }
        if !self.exmax && v > self.max {
            return Err(Invalid::new("max", format!("value must <= {}", self.max))
                .with_param("max", self.max.to_string()));
        }

        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| Invalid::invalid("float"))
    }
}

/// Factory for `float(min, max, exmin=false, exmax=false)`.
pub fn float(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let defaults = FloatValidator::default();
    let mut validator = FloatValidator::new(
        args.float("min", defaults.min)?,
        args.float("max", defaults.max)?,
    );
    if args.bool("exmin", false)? {
        validator = validator.exclusive_min();
    }
    if args.bool("exmax", false)? {
        validator = validator.exclusive_max();
    }
    Ok(Box::new(validator))
}
