//! Formatter configuration.
//!
//! A `FormatterConfig` is built once and reused, unchanged, across any number
//! of render passes. It (de)serializes with serde so callers can keep it in a
//! JSON file; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::names::DisplayNameMap;

/// Opaque style annotation attached to rendered lines.
///
/// The formatter never interprets it. Console sinks read it as a dotted style
/// string such as `"green"` or `"yellow.bold"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleToken(pub String);

impl StyleToken {
    pub fn new(style: impl Into<String>) -> Self {
        StyleToken(style.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleToken {
    fn from(s: &str) -> Self {
        StyleToken::new(s)
    }
}

impl std::fmt::Display for StyleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How adjacent fields are separated within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSeparator {
    /// Fixed-width columns separated by whitespace only
    #[default]
    Space,
    /// Every field closed with a `|`
    Pipe,
}

impl FromStr for ColumnSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "space" | "none" => Ok(ColumnSeparator::Space),
            "pipe" | "|" => Ok(ColumnSeparator::Pipe),
            _ => Err(format!("Unknown column separator: {}", s)),
        }
    }
}

/// Pattern used for date columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    /// `MM/DD/YY`
    #[default]
    ShortYear,
    /// `MM/DD/YYYY`
    LongYear,
    /// `MM/DD/YYYY @ HH:MM` (date-only values omit the time)
    LongYearTime,
}

impl DateFormat {
    /// strftime pattern for date-only values
    pub fn date_pattern(&self) -> &'static str {
        match self {
            DateFormat::ShortYear => "%m/%d/%y",
            DateFormat::LongYear | DateFormat::LongYearTime => "%m/%d/%Y",
        }
    }

    /// strftime pattern for values carrying a time of day
    pub fn datetime_pattern(&self) -> &'static str {
        match self {
            DateFormat::LongYearTime => "%m/%d/%Y @ %H:%M",
            _ => self.date_pattern(),
        }
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" | "short-year" | "mm/dd/yy" => Ok(DateFormat::ShortYear),
            "long" | "long-year" | "mm/dd/yyyy" => Ok(DateFormat::LongYear),
            "long-time" | "long-year-time" => Ok(DateFormat::LongYearTime),
            _ => Err(format!("Unknown date format: {}", s)),
        }
    }
}

/// Configuration of a [`TabularResultFormatter`](crate::TabularResultFormatter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Column source name → header label
    pub display_names: DisplayNameMap,
    /// Spaces appended after every field, before the separator
    pub extra_padding: usize,
    /// Style of the header line
    pub header_style: StyleToken,
    /// Style of data lines
    pub row_style: StyleToken,
    pub separator: ColumnSeparator,
    pub date_format: DateFormat,
    /// Render integers with `,` thousands separators
    pub group_integers: bool,
    /// Text cell value → display label
    pub value_names: DisplayNameMap,
    /// Capitalize text cells written entirely without lowercase letters
    pub capitalize_uppercase: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            display_names: DisplayNameMap::default(),
            extra_padding: 0,
            header_style: StyleToken::new("green"),
            row_style: StyleToken::new("yellow"),
            separator: ColumnSeparator::default(),
            date_format: DateFormat::default(),
            group_integers: false,
            value_names: DisplayNameMap::default(),
            capitalize_uppercase: false,
        }
    }
}

impl FormatterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_names(mut self, names: DisplayNameMap) -> Self {
        self.display_names = names;
        self
    }

    /// Map one column source name to a header label
    pub fn map_column(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.display_names.insert(from, to);
        self
    }

    pub fn extra_padding(mut self, padding: usize) -> Self {
        self.extra_padding = padding;
        self
    }

    pub fn header_style(mut self, style: impl Into<StyleToken>) -> Self {
        self.header_style = style.into();
        self
    }

    pub fn row_style(mut self, style: impl Into<StyleToken>) -> Self {
        self.row_style = style.into();
        self
    }

    pub fn separator(mut self, separator: ColumnSeparator) -> Self {
        self.separator = separator;
        self
    }

    pub fn date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn group_integers(mut self, group: bool) -> Self {
        self.group_integers = group;
        self
    }

    pub fn value_names(mut self, names: DisplayNameMap) -> Self {
        self.value_names = names;
        self
    }

    pub fn capitalize_uppercase(mut self, capitalize: bool) -> Self {
        self.capitalize_uppercase = capitalize;
        self
    }

    /// Text written after a field: the padding plus the separator.
    ///
    /// `last` marks the final field of a line, which gets nothing in space
    /// mode.
    pub fn field_suffix(&self, last: bool) -> String {
        match self.separator {
            ColumnSeparator::Pipe => format!("{}|", " ".repeat(self.extra_padding)),
            ColumnSeparator::Space if last => String::new(),
            ColumnSeparator::Space => " ".repeat(self.extra_padding + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormatterConfig::default();
        assert_eq!(config.extra_padding, 0);
        assert_eq!(config.header_style.as_str(), "green");
        assert_eq!(config.row_style.as_str(), "yellow");
        assert_eq!(config.separator, ColumnSeparator::Space);
        assert_eq!(config.date_format, DateFormat::ShortYear);
        assert!(config.display_names.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = FormatterConfig::new()
            .map_column("order_id", "id")
            .extra_padding(4)
            .separator(ColumnSeparator::Pipe)
            .header_style("cyan.bold");
        assert_eq!(config.display_names.resolve("order_id"), "id");
        assert_eq!(config.extra_padding, 4);
        assert_eq!(config.header_style, StyleToken::new("cyan.bold"));
    }

    #[test]
    fn test_field_suffix_space() {
        let config = FormatterConfig::new().extra_padding(2);
        assert_eq!(config.field_suffix(false), "   ");
        assert_eq!(config.field_suffix(true), "");
    }

    #[test]
    fn test_field_suffix_pipe() {
        let config = FormatterConfig::new()
            .extra_padding(2)
            .separator(ColumnSeparator::Pipe);
        assert_eq!(config.field_suffix(false), "  |");
        assert_eq!(config.field_suffix(true), "  |");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FormatterConfig = serde_json::from_str(
            r#"{"extra_padding": 4, "separator": "pipe", "date_format": "long-year",
                "display_names": {"ship_city": "city"}}"#,
        )
        .unwrap();
        assert_eq!(config.extra_padding, 4);
        assert_eq!(config.separator, ColumnSeparator::Pipe);
        assert_eq!(config.date_format, DateFormat::LongYear);
        assert_eq!(config.display_names.resolve("ship_city"), "city");
        assert_eq!(config.row_style.as_str(), "yellow");
    }

    #[test]
    fn test_date_patterns() {
        assert_eq!(DateFormat::ShortYear.datetime_pattern(), "%m/%d/%y");
        assert_eq!(DateFormat::LongYearTime.date_pattern(), "%m/%d/%Y");
        assert_eq!(
            DateFormat::LongYearTime.datetime_pattern(),
            "%m/%d/%Y @ %H:%M"
        );
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("PIPE".parse::<ColumnSeparator>(), Ok(ColumnSeparator::Pipe));
        assert_eq!("long-time".parse::<DateFormat>(), Ok(DateFormat::LongYearTime));
        assert!("tab".parse::<ColumnSeparator>().is_err());
    }
}
