//! Field type registry
//!
//! Every field kind a schema can declare maps to a default value, a rule for
//! coercing loosely-typed stored values and a rule for coercing raw editor
//! input. All of them are total: a value that cannot be parsed falls back to
//! the kind's default and is only logged.
//!
//! Matches over [`FieldKind`] are exhaustive, so a new variant will not
//! compile until each rule below has an arm for it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Declared data type of a schema field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
    /// Long text, edited in a multi-line area
    RichText,
    /// A kind this client does not know; the wire name is kept so the
    /// schema round-trips untouched
    Unknown(String),
}

impl FieldKind {
    /// Kinds that can be picked in the schema builder, in selector order
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Boolean,
        FieldKind::Date,
        FieldKind::RichText,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::RichText => "richtext",
            Self::Unknown(name) => name,
        }
    }

    /// Next authorable kind (wraps; unknown kinds restart at text)
    pub fn next(&self) -> Self {
        match self {
            Self::Text => Self::Number,
            Self::Number => Self::Boolean,
            Self::Boolean => Self::Date,
            Self::Date => Self::RichText,
            Self::RichText | Self::Unknown(_) => Self::Text,
        }
    }

    /// Previous authorable kind (wraps; unknown kinds restart at richtext)
    pub fn prev(&self) -> Self {
        match self {
            Self::Text | Self::Unknown(_) => Self::RichText,
            Self::Number => Self::Text,
            Self::Boolean => Self::Number,
            Self::Date => Self::Boolean,
            Self::RichText => Self::Date,
        }
    }

    /// Widget used to edit a value of this kind
    pub fn editor(&self) -> EditorKind {
        match self {
            Self::Text | Self::Unknown(_) => EditorKind::SingleLine,
            Self::Number => EditorKind::Numeric,
            Self::Boolean => EditorKind::Checkbox,
            Self::Date => EditorKind::Date,
            Self::RichText => EditorKind::MultiLine,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for FieldKind {
    fn from(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "richtext" => Self::RichText,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editing widget derived from a field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    SingleLine,
    Numeric,
    Checkbox,
    /// Calendar date typed as YYYY-MM-DD
    Date,
    MultiLine,
}

/// A field value in its kind's canonical in-memory form
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Value of a text, richtext or unknown field
    Text(String),
    Number(f64),
    Boolean(bool),
    /// ISO calendar date, or empty when no date is selected
    Date(String),
}

impl FieldValue {
    /// Whether this value has the canonical shape for `kind`
    pub fn conforms_to(&self, kind: &FieldKind) -> bool {
        match (kind, self) {
            (FieldKind::Text | FieldKind::RichText | FieldKind::Unknown(_), Self::Text(_)) => true,
            (FieldKind::Number, Self::Number(n)) => n.is_finite(),
            (FieldKind::Boolean, Self::Boolean(_)) => true,
            (FieldKind::Date, Self::Date(_)) => true,
            _ => false,
        }
    }

    /// JSON representation sent to the backend
    ///
    /// Whole numbers are emitted as integers so a stored `5` comes back as
    /// `5`, not `5.0`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) | Self::Date(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::from(0))
                }
            }
        }
    }

    /// Text shown in an input buffer for this value
    pub fn display_value(&self) -> String {
        match self {
            Self::Text(s) | Self::Date(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }

    /// True for empty text and unset dates
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) | Self::Date(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Boolean(_) => false,
        }
    }
}

/// Raw value produced by an editing widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    Toggle(bool),
}

/// Largest integer an f64 represents exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Value of a freshly created field of `kind`
pub fn default_value(kind: &FieldKind) -> FieldValue {
    match kind {
        FieldKind::Text | FieldKind::RichText | FieldKind::Unknown(_) => {
            FieldValue::Text(String::new())
        }
        FieldKind::Number => FieldValue::Number(0.0),
        FieldKind::Boolean => FieldValue::Boolean(false),
        FieldKind::Date => FieldValue::Date(String::new()),
    }
}

/// Convert a stored, loosely-typed value into the canonical form for `kind`
///
/// `None` stands for a key missing from the stored payload.
pub fn coerce_from_storage(kind: &FieldKind, raw: Option<&Value>) -> FieldValue {
    let Some(raw) = raw else {
        return default_value(kind);
    };

    match kind {
        FieldKind::Text | FieldKind::RichText | FieldKind::Unknown(_) => {
            FieldValue::Text(stored_text(raw))
        }
        FieldKind::Boolean => FieldValue::Boolean(is_truthy(raw)),
        FieldKind::Number => match stored_number(raw) {
            Some(n) => FieldValue::Number(n),
            None => fallback(kind, raw),
        },
        FieldKind::Date => {
            if !is_truthy(raw) {
                return default_value(kind);
            }
            match calendar_date(raw) {
                Some(date) => FieldValue::Date(date),
                None => fallback(kind, raw),
            }
        }
    }
}

/// Convert raw editor input into the canonical form for `kind`
///
/// Numeric input is parsed leniently so a half-typed number such as `"1e"`
/// or `"-"` never breaks the form.
pub fn coerce_from_input(kind: &FieldKind, input: InputValue) -> FieldValue {
    match (kind, input) {
        (FieldKind::Text | FieldKind::RichText | FieldKind::Unknown(_), InputValue::Text(s)) => {
            FieldValue::Text(s)
        }
        (FieldKind::Text | FieldKind::RichText | FieldKind::Unknown(_), InputValue::Toggle(b)) => {
            FieldValue::Text(b.to_string())
        }
        (FieldKind::Number, InputValue::Text(s)) => {
            FieldValue::Number(parse_leading_number(&s).unwrap_or(0.0))
        }
        (FieldKind::Number, InputValue::Toggle(_)) => default_value(kind),
        (FieldKind::Boolean, InputValue::Toggle(b)) => FieldValue::Boolean(b),
        (FieldKind::Boolean, InputValue::Text(s)) => FieldValue::Boolean(parse_flag(&s)),
        (FieldKind::Date, InputValue::Text(s)) => FieldValue::Date(s),
        (FieldKind::Date, InputValue::Toggle(_)) => default_value(kind),
    }
}

fn fallback(kind: &FieldKind, raw: &Value) -> FieldValue {
    tracing::debug!(%kind, %raw, "stored value not coercible, using default");
    default_value(kind)
}

fn stored_text(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => raw.to_string(),
    }
}

fn stored_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Day-precision UTC date of a stored timestamp
fn calendar_date(raw: &Value) -> Option<String> {
    let date = match raw {
        Value::String(s) => parse_date_text(s.trim())?,
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)?.date_naive()
        }
        _ => return None,
    };
    Some(date.format("%Y-%m-%d").to_string())
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

/// Longest numeric prefix of `text`, if any
fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    trimmed
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| {
            trimmed[..end]
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
        })
}

fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
