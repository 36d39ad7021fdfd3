// crates/cube-conformance-core/src/core/value.rs
// ============================================================================
// Module: Scalar Value Model
// Description: Tagged scalar values for attributes, filters, and fields.
// Purpose: Replace duck-typed payload values with an explicit variant and a
// documented cross-representation equality rule.
// Dependencies: bigdecimal, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! The target API is weakly typed on the wire: an attribute value may arrive
//! as a number, a numeric string, a date string, a boolean, or null, and the
//! same attribute may change representation between reads. [`ScalarValue`]
//! makes the shape explicit and [`ScalarValue::loosely_equals`] defines the
//! one equality contract the verifier relies on: numeric values are equal
//! after decimal normalization regardless of representation, dates and plain
//! text compare textually, booleans compare logically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;
use thiserror::Error;
use time::Date;
use time::Month;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while converting raw JSON payload members into scalars.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueShapeError {
    /// The JSON member is a composite, not a scalar.
    #[error("expected a scalar value, found {found}")]
    NotScalar {
        /// JSON type name of the offending member.
        found: &'static str,
    },
    /// The JSON number cannot be represented as `i64` or `f64`.
    #[error("number {rendered} is outside the supported range")]
    NumberRange {
        /// Textual rendering of the offending number.
        rendered: String,
    },
}

// ============================================================================
// SECTION: Scalar Values
// ============================================================================

/// Tagged scalar value carried by attributes, filters, and fields.
///
/// # Invariants
/// - `Date` always renders as `YYYY-MM-DD` on the wire.
/// - Values are immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Explicit null (also used for absent attribute values).
    Null,
    /// Signed integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Calendar date value.
    Date(Date),
    /// Free-form text value.
    Text(String),
}

impl ScalarValue {
    /// Converts a raw JSON member into a scalar.
    ///
    /// Strings shaped like `YYYY-MM-DD` become [`ScalarValue::Date`]; all
    /// other strings stay textual. Arrays and objects are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValueShapeError`] when the member is composite or the number
    /// is unrepresentable.
    pub fn from_json(value: &Value) -> Result<Self, ValueShapeError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(flag) => Ok(Self::Bool(*flag)),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    return Ok(Self::Int(int));
                }
                number.as_f64().map(Self::Float).ok_or_else(|| ValueShapeError::NumberRange {
                    rendered: number.to_string(),
                })
            }
            Value::String(text) => Ok(parse_calendar_date(text)
                .map_or_else(|| Self::Text(text.clone()), Self::Date)),
            Value::Array(_) => Err(ValueShapeError::NotScalar {
                found: "array",
            }),
            Value::Object(_) => Err(ValueShapeError::NotScalar {
                found: "object",
            }),
        }
    }

    /// Renders the scalar back into its raw JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Int(value) => Value::from(*value),
            Self::Float(value) => Value::from(*value),
            Self::Bool(value) => Value::from(*value),
            Self::Date(value) => Value::from(render_date(*value)),
            Self::Text(value) => Value::from(value.clone()),
        }
    }

    /// Returns whether this scalar is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compares two scalars under the cross-representation equality rule.
    ///
    /// Numeric values (`Int`, `Float`, and numeric `Text`) are equal when
    /// their decimal normalizations are equal, so `4000000`, `4000000.0`,
    /// and `"4000000"` all compare equal. `Date` and non-numeric `Text`
    /// compare by exact textual rendering, `Bool` by logical equality, and
    /// `Null` only equals `Null`.
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        if let (Some(left), Some(right)) = (self.decimal_form(), other.decimal_form()) {
            return left == right;
        }
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Date(_) | Self::Text(_), Self::Date(_) | Self::Text(_)) => {
                self.to_string() == other.to_string()
            }
            _ => false,
        }
    }

    /// Returns the decimal normalization of a numeric scalar.
    ///
    /// Non-numeric scalars (including non-numeric text and non-finite
    /// floats) normalize to `None` and fall back to kind-wise comparison.
    fn decimal_form(&self) -> Option<BigDecimal> {
        match self {
            Self::Int(value) => Some(BigDecimal::from(*value)),
            Self::Float(value) => BigDecimal::from_str(&format!("{value}")).ok(),
            Self::Text(value) => BigDecimal::from_str(value).ok(),
            Self::Null | Self::Bool(_) | Self::Date(_) => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int(value) => value.fmt(f),
            Self::Float(value) => value.fmt(f),
            Self::Bool(value) => value.fmt(f),
            Self::Date(value) => f.write_str(&render_date(*value)),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Date(value) => serializer.serialize_str(&render_date(*value)),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

// ============================================================================
// SECTION: Date Handling
// ============================================================================

/// Renders a date in the API wire form (`YYYY-MM-DD`).
fn render_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Parses a `YYYY-MM-DD` string into a calendar date.
fn parse_calendar_date(value: &str) -> Option<Date> {
    let mut parts = value.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}
