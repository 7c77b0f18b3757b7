//! Value to cell coercion.

use crate::error::{Result, WriteError};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use rowbook_types::Value;
use std::borrow::Cow;

/// Largest integer magnitude an IEEE double holds exactly (2^53).
pub const MAX_EXACT_INT: i64 = 1 << 53;

/// First calendar year the container's date serials cover.
pub const MIN_DATE_YEAR: i32 = 1900;
/// Last calendar year the container's date serials cover.
pub const MAX_DATE_YEAR: i32 = 9999;

/// A concrete cell write, borrowing text from the source value where possible
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Blank,
    Bool(bool),
    Number(f64),
    String(Cow<'a, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

/// Map a field value to the cell that represents it.
///
/// `field` and `sheet` only feed the error for values with no cell
/// representation: non-finite floats and dates outside 1900..=9999.
pub fn coerce<'a>(value: &'a Value, field: &str, sheet: &str) -> Result<Cell<'a>> {
    let cell = match value {
        Value::Null => Cell::Blank,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Int(i) => {
            if (-MAX_EXACT_INT..=MAX_EXACT_INT).contains(i) {
                Cell::Number(*i as f64)
            } else {
                tracing::debug!(
                    "Integer {} in field '{}' of sheet '{}' exceeds 2^53, writing as text",
                    i,
                    field,
                    sheet
                );
                Cell::String(Cow::Owned(i.to_string()))
            }
        }
        Value::Float(f) if f.is_finite() => Cell::Number(*f),
        Value::String(s) => Cell::String(Cow::Borrowed(s)),
        Value::Date(d) if in_date_range(d) => Cell::Date(*d),
        Value::DateTime(dt) if in_date_range(&dt.date()) => Cell::DateTime(*dt),
        Value::Time(t) => Cell::Time(*t),
        Value::Nested(v) => Cell::String(Cow::Owned(v.to_string())),
        Value::Float(_) | Value::Date(_) | Value::DateTime(_) => {
            return Err(WriteError::UnsupportedValueType {
                field: field.to_string(),
                sheet: sheet.to_string(),
                kind: value.kind(),
            })
        }
    };
    Ok(cell)
}

fn in_date_range(date: &NaiveDate) -> bool {
    (MIN_DATE_YEAR..=MAX_DATE_YEAR).contains(&date.year())
}
