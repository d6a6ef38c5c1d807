use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Date layouts accepted when a check does not name its own.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%m-%d-%Y", "%m/%d/%Y"];

/// A declarative check on one field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCheck {
    pub field: String,
    #[serde(flatten)]
    pub check: CheckKind,
}

/// What a [`FieldCheck`] requires of its field's value.
///
/// Serialized with a `kind` tag so check lists read naturally in TOML:
/// `{ field = "birthdate", kind = "date-string", formats = ["%Y-%m-%d"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CheckKind {
    /// A string that is not empty or whitespace-only.
    NonEmptyString,
    /// A string parsing as a calendar date in one of `formats`
    /// (or [`DEFAULT_DATE_FORMATS`] when empty).
    DateString {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        formats: Vec<String>,
    },
    Number,
    Bool,
    /// Any value, including null, as long as the field exists.
    Present,
}

impl FieldCheck {
    fn simple(field: &str, check: CheckKind) -> Self {
        Self {
            field: field.into(),
            check,
        }
    }

    /// Shorthand for a non-empty string field.
    pub fn non_empty_string(field: &str) -> Self {
        Self::simple(field, CheckKind::NonEmptyString)
    }

    /// Shorthand for a date field in the default formats.
    pub fn date_string(field: &str) -> Self {
        Self::simple(field, CheckKind::DateString { formats: vec![] })
    }

    /// Shorthand for a date field with explicit `chrono` formats.
    pub fn date_string_in(field: &str, formats: &[&str]) -> Self {
        Self::simple(
            field,
            CheckKind::DateString {
                formats: formats.iter().map(|f| (*f).to_string()).collect(),
            },
        )
    }

    pub fn number(field: &str) -> Self {
        Self::simple(field, CheckKind::Number)
    }

    pub fn bool(field: &str) -> Self {
        Self::simple(field, CheckKind::Bool)
    }

    pub fn present(field: &str) -> Self {
        Self::simple(field, CheckKind::Present)
    }

    pub fn passes(&self, value: Option<&Value>) -> bool {
        self.check.passes(value)
    }
}

impl CheckKind {
    /// Tests a field value; `None` means the field is absent.
    pub fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Self::NonEmptyString => is_non_empty_string(value),
            Self::DateString { formats } if formats.is_empty() => is_date_string(value),
            Self::DateString { formats } => value
                .and_then(Value::as_str)
                .is_some_and(|s| parse_date_in(s, formats.iter().map(String::as_str)).is_some()),
            Self::Number => value.is_some_and(Value::is_number),
            Self::Bool => value.is_some_and(Value::is_boolean),
            Self::Present => value.is_some(),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NonEmptyString => "non-empty-string",
            Self::DateString { .. } => "date-string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Present => "present",
        };
        f.write_str(name)
    }
}

/// True for a string with at least one non-whitespace character.
pub fn is_non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// True for a string that parses in one of [`DEFAULT_DATE_FORMATS`].
pub fn is_date_string(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).and_then(parse_date).is_some()
}

/// Parses `text` in the first of [`DEFAULT_DATE_FORMATS`] that fits.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_date_in(text, DEFAULT_DATE_FORMATS.iter().copied())
}

fn parse_date_in<'a>(text: &str, formats: impl IntoIterator<Item = &'a str>) -> Option<NaiveDate> {
    let text = text.trim();
    formats
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Whole years elapsed from `from` to `to`; negative if `to` is earlier.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    if to < from {
        return -whole_years_between(to, from);
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}
