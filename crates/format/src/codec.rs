//! Field codec
//!
//! Every CSS column has a fixed width and an NA sentinel. Encoding is:
//! 1. absent or empty value → the column's NA sentinel
//! 2. otherwise render the value for the column's semantic kind
//!    (a value the kind cannot represent is malformed → NA sentinel)
//! 3. left-justify in the column width, truncating anything longer
//!
//! Truncation is lossy on purpose: the legacy layout has no overflow
//! representation.

use crate::time;
use chrono::{DateTime, Utc};
use css_core::{ExportError, Scalar};
use tracing::warn;

/// Column width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Exactly this many characters
    Fixed(usize),
    /// Written as-is, no padding
    Free,
}

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Free text or code
    Text,
    /// Integer
    Integer,
    /// Real number
    Float,
    /// Julian date `YYYYDDD`
    JDate,
    /// Epoch seconds
    Epoch,
    /// Load date
    LoadDate,
    /// Defining flag `d`/`n`
    Flag,
}

/// A semantic value before column rendering
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text
    Text(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer (allocated keys)
    Unsigned(u64),
    /// Real number
    Float(f64),
    /// Number in its wire form
    Scalar(Scalar),
    /// Point in time
    Instant(DateTime<Utc>),
    /// Boolean flag
    Flag(bool),
}

impl FieldValue {
    /// Text value
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Scalar(Scalar::Text(s)) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Text(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Unsigned(v)
    }
}

impl From<usize> for FieldValue {
    fn from(v: usize) -> Self {
        FieldValue::Unsigned(v as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<Scalar> for FieldValue {
    fn from(v: Scalar) -> Self {
        FieldValue::Scalar(v)
    }
}

impl From<&Scalar> for FieldValue {
    fn from(v: &Scalar) -> Self {
        FieldValue::Scalar(v.clone())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Instant(t)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Left-justify `value` in `width` columns, substituting `na` when absent
///
/// The result is always exactly `width` characters.
pub fn encode(value: Option<&str>, width: usize, na: &str) -> String {
    let text = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => na,
    };
    fit(text, width)
}

fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Render a real number the way the legacy writers did: shortest
/// round-trip form, always with a fractional part.
pub fn format_float(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// One column of a table layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// CSS attribute name
    pub name: &'static str,
    /// Width in characters
    pub width: Width,
    /// NA sentinel
    pub na: &'static str,
    /// Semantic type
    pub kind: Kind,
}

impl Column {
    /// Column with explicit kind
    pub const fn new(name: &'static str, kind: Kind, width: usize, na: &'static str) -> Self {
        Column {
            name,
            width: Width::Fixed(width),
            na,
            kind,
        }
    }

    /// Text column
    pub const fn text(name: &'static str, width: usize, na: &'static str) -> Self {
        Column::new(name, Kind::Text, width, na)
    }

    /// Integer column
    pub const fn int(name: &'static str, width: usize, na: &'static str) -> Self {
        Column::new(name, Kind::Integer, width, na)
    }

    /// Real-number column
    pub const fn float(name: &'static str, width: usize, na: &'static str) -> Self {
        Column::new(name, Kind::Float, width, na)
    }

    /// Julian date column
    pub const fn jdate(name: &'static str, width: usize, na: &'static str) -> Self {
        Column::new(name, Kind::JDate, width, na)
    }

    /// Epoch time column
    pub const fn epoch(name: &'static str, width: usize, na: &'static str) -> Self {
        Column::new(name, Kind::Epoch, width, na)
    }

    /// Defining-flag column
    pub const fn flag(name: &'static str, width: usize, na: &'static str) -> Self {
        Column::new(name, Kind::Flag, width, na)
    }

    /// Integer column written without padding
    pub const fn free_int(name: &'static str, na: &'static str) -> Self {
        Column {
            name,
            width: Width::Free,
            na,
            kind: Kind::Integer,
        }
    }

    /// Render a value for this column's kind, before width fitting
    ///
    /// Absent and empty values render as the NA sentinel. Values the kind
    /// cannot represent are reported as `MalformedField`.
    pub fn render(&self, value: Option<&FieldValue>) -> Result<String, ExportError> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(self.na.to_string()),
        };
        render_kind(self.kind, value).ok_or_else(|| ExportError::MalformedField {
            column: self.name,
            value: describe(value),
        })
    }

    /// Render and fit a value; malformed values become the NA sentinel
    pub fn encode(&self, value: Option<&FieldValue>) -> String {
        let text = match self.render(value) {
            Ok(text) => text,
            Err(e) => {
                warn!(target: "css::format", column = self.name, error = %e, "Malformed field, writing NA");
                self.na.to_string()
            }
        };
        match self.width {
            Width::Fixed(w) => fit(&text, w),
            Width::Free => text,
        }
    }
}

fn describe(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) | FieldValue::Scalar(Scalar::Text(s)) => s.clone(),
        other => format!("{:?}", other),
    }
}

fn numeric_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|_| trimmed.to_string())
}

fn finite(v: f64) -> Option<f64> {
    Some(v).filter(|v| v.is_finite())
}

fn render_kind(kind: Kind, value: &FieldValue) -> Option<String> {
    use FieldValue as V;
    match kind {
        Kind::Text => Some(match value {
            V::Text(s) | V::Scalar(Scalar::Text(s)) => s.clone(),
            V::Int(i) => i.to_string(),
            V::Unsigned(u) => u.to_string(),
            V::Float(f) | V::Scalar(Scalar::Number(f)) => format_float(finite(*f)?),
            V::Instant(t) => time::epoch(*t),
            V::Flag(b) => flag(*b).to_string(),
        }),
        Kind::Integer => match value {
            V::Int(i) => Some(i.to_string()),
            V::Unsigned(u) => Some(u.to_string()),
            V::Float(f) | V::Scalar(Scalar::Number(f)) => {
                let f = finite(*f)?;
                (f == f.trunc()).then(|| format!("{}", f as i64))
            }
            V::Text(s) | V::Scalar(Scalar::Text(s)) => {
                let trimmed = s.trim();
                trimmed.parse::<i64>().ok().map(|_| trimmed.to_string())
            }
            V::Instant(_) | V::Flag(_) => None,
        },
        Kind::Float => match value {
            V::Float(f) | V::Scalar(Scalar::Number(f)) => finite(*f).map(format_float),
            V::Int(i) => Some(format_float(*i as f64)),
            V::Unsigned(u) => Some(format_float(*u as f64)),
            V::Text(s) | V::Scalar(Scalar::Text(s)) => numeric_text(s),
            V::Instant(_) | V::Flag(_) => None,
        },
        Kind::JDate => match value {
            V::Instant(t) => Some(time::jdate(*t)),
            V::Int(i) => Some(i.to_string()),
            V::Text(s) | V::Scalar(Scalar::Text(s)) => time::parse_instant(s).map(time::jdate),
            _ => None,
        },
        Kind::Epoch => match value {
            V::Instant(t) => Some(time::epoch(*t)),
            V::Float(f) | V::Scalar(Scalar::Number(f)) => finite(*f).map(time::epoch_secs),
            V::Int(i) => Some(time::epoch_secs(*i as f64)),
            V::Text(s) | V::Scalar(Scalar::Text(s)) => time::parse_instant(s)
                .map(time::epoch)
                .or_else(|| numeric_text(s)),
            V::Unsigned(_) | V::Flag(_) => None,
        },
        Kind::LoadDate => match value {
            V::Instant(t) => Some(time::lddate(*t)),
            V::Text(s) => Some(s.clone()),
            _ => None,
        },
        Kind::Flag => match value {
            V::Flag(b) => Some(flag(*b).to_string()),
            V::Text(s) => Some(s.clone()),
            _ => None,
        },
    }
}

fn flag(defining: bool) -> &'static str {
    if defining {
        "d"
    } else {
        "n"
    }
}
