//! Per-type formatting and alignment of single cells.
//!
//! Rules, first match wins:
//! 1. missing values render empty, left-aligned
//! 2. float columns: two fraction digits, right-aligned
//! 3. integer columns: plain (optionally grouped) decimal, right-aligned
//! 4. date columns: `MM/DD/YY`-style pattern, left-aligned
//! 5. anything else: the plain string form, left-aligned
//!
//! A value that doesn't fit its column's type is printed in its plain string
//! form, left-aligned, and flagged as a fallback. Control characters in any
//! text are replaced with spaces so a line never wraps or tabs.

use chrono::{NaiveDate, NaiveDateTime};
use console::Alignment;

use crate::data::{SemanticType, Value};
use crate::options::FormatterConfig;

/// A cell rendered to text, before padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedValue {
    pub text: String,
    pub alignment: Alignment,
    /// The value did not match its column type and was rendered as text
    pub fallback: bool,
}

impl FormattedValue {
    fn left(text: String) -> Self {
        FormattedValue {
            text,
            alignment: Alignment::Left,
            fallback: false,
        }
    }

    fn right(text: String) -> Self {
        FormattedValue {
            text,
            alignment: Alignment::Right,
            fallback: false,
        }
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        display_width(&self.text)
    }

    /// Pad to exactly `width` columns; wider text is never truncated.
    pub fn pad(&self, width: usize) -> String {
        pad_field(&self.text, width, self.alignment)
    }
}

/// Width of `text` in terminal columns
pub fn display_width(text: &str) -> usize {
    console::measure_text_width(text)
}

/// Pad `text` with spaces to `width` columns using the given alignment.
pub fn pad_field(text: &str, width: usize, alignment: Alignment) -> String {
    console::pad_str(text, width, alignment, None).into_owned()
}

/// Format a header label for a column of the given type.
///
/// Labels are never reformatted; numeric columns right-align them so they
/// sit above their values.
pub fn format_label(label: &str, semantic_type: SemanticType) -> FormattedValue {
    if semantic_type.is_numeric() {
        FormattedValue::right(printable(label))
    } else {
        FormattedValue::left(printable(label))
    }
}

/// Format a data cell according to its column's semantic type.
pub fn format_cell(
    value: &Value,
    semantic_type: SemanticType,
    config: &FormatterConfig,
) -> FormattedValue {
    if value.is_null() {
        return FormattedValue::left(String::new());
    }

    let typed = match semantic_type {
        SemanticType::Float => format_float(value).map(FormattedValue::right),
        SemanticType::Integer => {
            format_integer(value, config.group_integers).map(FormattedValue::right)
        }
        SemanticType::Date => format_date(value, config).map(FormattedValue::left),
        SemanticType::Text | SemanticType::Other => {
            return FormattedValue::left(text_form(value, config))
        }
    };

    typed.unwrap_or_else(|| FormattedValue {
        text: printable(&value.to_string()),
        alignment: Alignment::Left,
        fallback: true,
    })
}

fn format_float(value: &Value) -> Option<String> {
    let x = match value {
        Value::Float(x) => *x,
        Value::Integer(i) => *i as f64,
        Value::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(format!("{:.2}", x))
}

fn format_integer(value: &Value, group: bool) -> Option<String> {
    let i = match value {
        Value::Integer(i) => *i,
        Value::Text(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Some(if group {
        group_thousands(i)
    } else {
        i.to_string()
    })
}

fn format_date(value: &Value, config: &FormatterConfig) -> Option<String> {
    let pattern = config.date_format;
    match value {
        Value::Date(d) => Some(d.format(pattern.date_pattern()).to_string()),
        Value::DateTime(dt) => Some(dt.format(pattern.datetime_pattern()).to_string()),
        Value::Text(s) => match parse_date_text(s.trim())? {
            Value::Date(d) => Some(d.format(pattern.date_pattern()).to_string()),
            Value::DateTime(dt) => Some(dt.format(pattern.datetime_pattern()).to_string()),
            _ => None,
        },
        _ => None,
    }
}

const DATETIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse an ISO-style date or timestamp as produced by database drivers.
fn parse_date_text(text: &str) -> Option<Value> {
    if let Some(dt) = DATETIME_PATTERNS
        .iter()
        .find_map(|p| NaiveDateTime::parse_from_str(text, p).ok())
    {
        return Some(Value::DateTime(dt));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(Value::Date)
}

/// Plain string form, with value-name mapping applied to text.
fn text_form(value: &Value, config: &FormatterConfig) -> String {
    let text = match value {
        Value::Text(s) => {
            let mapped = config.value_names.resolve(s);
            if config.capitalize_uppercase && !mapped.chars().any(char::is_lowercase) {
                capitalize(mapped)
            } else {
                mapped.to_string()
            }
        }
        other => other.to_string(),
    };
    printable(&text)
}

/// Replace control characters (`\n`, `\t`, ...) with single spaces.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// First character uppercased, the rest lowercased: `"KANSAS"` → `"Kansas"`.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Insert `,` every three digits: `1234567` → `"1,234,567"`.
fn group_thousands(i: i64) -> String {
    let digits = i.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if i < 0 {
        grouped.push('-');
    }
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
