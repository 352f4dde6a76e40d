//! Temporal validators: `date` and `datetime`
//!
//! Input text is parsed with a chrono `strftime` format and the result is
//! written back with the same format, so `2024-1-5` under `%Y-%m-%d`
//! normalizes to `2024-01-05`.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::foundation::{
    Arguments, BoxedValidator, CoreValidator, Invalid, SchemaError, ValidatorFactory,
};

/// Default `date` format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default `datetime` format: ISO 8601 with optional fractional seconds
/// and a literal `Z`.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Rejects format strings chrono cannot interpret.
pub fn check_format(format: &str) -> Result<(), SchemaError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(SchemaError::config(format!("invalid time format '{format}'")));
    }
    Ok(())
}

fn render(display: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{display}").ok()?;
    Some(out)
}

fn reformat(display: impl std::fmt::Display, kind: &str) -> Result<Value, Invalid> {
    render(display)
        .map(Value::String)
        .ok_or_else(|| Invalid::invalid(kind))
}

fn incomplete_format(format: &str, kind: &str) -> SchemaError {
    SchemaError::config(format!("time format '{format}' does not describe a full {kind}"))
}

/// Rejects formats whose output cannot be read back into a whole date, such
/// as `%Y` alone.
fn check_date_format(format: &str) -> Result<(), SchemaError> {
    check_format(format)?;
    let readable = NaiveDate::from_ymd_opt(2001, 2, 3)
        .and_then(|sample| render(sample.format(format)))
        .is_some_and(|text| NaiveDate::parse_from_str(&text, format).is_ok());
    if readable {
        Ok(())
    } else {
        Err(incomplete_format(format, "date"))
    }
}

fn check_datetime_format(format: &str) -> Result<(), SchemaError> {
    check_format(format)?;
    let readable = NaiveDate::from_ymd_opt(2001, 2, 3)
        .and_then(|date| date.and_hms_opt(4, 5, 6))
        .and_then(|sample| render(sample.format(format)))
        .is_some_and(|text| NaiveDateTime::parse_from_str(&text, format).is_ok());
    if readable {
        Ok(())
    } else {
        Err(incomplete_format(format, "datetime"))
    }
}

// ============================================================================
// DATE
// ============================================================================

/// Validates calendar dates given as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateValidator {
    format: String,
}

impl DateValidator {
    pub fn new(format: impl Into<String>) -> Result<Self, SchemaError> {
        let format = format.into();
        check_date_format(&format)?;
        Ok(Self { format })
    }
}

impl CoreValidator for DateValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let text = value.as_str().ok_or_else(|| Invalid::invalid("date"))?;
        let date =
            NaiveDate::parse_from_str(text, &self.format).map_err(|_| Invalid::invalid("date"))?;
        reformat(date.format(&self.format), "date")
    }
}

/// Factory for `date(format)`; the default format comes from configuration.
#[derive(Debug, Clone)]
pub struct DateFactory {
    default_format: String,
}

impl DateFactory {
    pub fn new(default_format: impl Into<String>) -> Result<Self, SchemaError> {
        let default_format = default_format.into();
        check_date_format(&default_format)?;
        Ok(Self { default_format })
    }
}

impl ValidatorFactory for DateFactory {
    fn build(&self, args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
        let format = args.string("format", &self.default_format)?;
        Ok(Box::new(DateValidator::new(format)?))
    }
}

// ============================================================================
// DATETIME
// ============================================================================

/// Validates date-times given as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTimeValidator {
    format: String,
}

impl DateTimeValidator {
    pub fn new(format: impl Into<String>) -> Result<Self, SchemaError> {
        let format = format.into();
        check_datetime_format(&format)?;
        Ok(Self { format })
    }
}

impl CoreValidator for DateTimeValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let text = value.as_str().ok_or_else(|| Invalid::invalid("datetime"))?;
        let datetime = NaiveDateTime::parse_from_str(text, &self.format)
            .map_err(|_| Invalid::invalid("datetime"))?;
        reformat(datetime.format(&self.format), "datetime")
    }
}

/// Factory for `datetime(format)`; the default format comes from
/// configuration.
#[derive(Debug, Clone)]
pub struct DateTimeFactory {
    default_format: String,
}

impl DateTimeFactory {
    pub fn new(default_format: impl Into<String>) -> Result<Self, SchemaError> {
        let default_format = default_format.into();
        check_datetime_format(&default_format)?;
        Ok(Self { default_format })
    }
}

impl ValidatorFactory for DateTimeFactory {
    fn build(&self, args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
        let format = args.string("format", &self.default_format)?;
        Ok(Box::new(DateTimeValidator::new(format)?))
    }
}
