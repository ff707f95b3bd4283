//! Column-aligned rendering of a whole result set.
//!
//! A render pass runs in two steps:
//! 1. every cell is formatted once and column widths are computed from the
//!    formatted text and the header labels
//! 2. header and data lines are assembled against those fixed widths
//!
//! Widths never change while lines are being emitted, so every line of a
//! pass has the same width.

use serde::Serialize;

use crate::data::{ColumnSchema, ResultSet, SemanticType, Value};
use crate::options::{FormatterConfig, StyleToken};
use crate::Result;

use super::format::{format_cell, format_label, FormattedValue};

/// One output line together with the style the sink should apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledLine {
    pub text: String,
    pub style: StyleToken,
}

/// A cell that was rendered as plain text because its value did not match
/// the column's semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatFallback {
    /// Zero-based data row index
    pub row: usize,
    /// Zero-based column index
    pub column: usize,
    pub column_name: String,
    pub semantic_type: SemanticType,
}

/// Result of one render pass.
///
/// Emission is left to the caller: the table only holds text and style
/// annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub header: StyledLine,
    pub rows: Vec<StyledLine>,
    /// Field width of each column, excluding padding and separators
    pub widths: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<FormatFallback>,
}

impl RenderedTable {
    /// Header line followed by all data lines
    pub fn lines(&self) -> impl Iterator<Item = &StyledLine> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }

    /// Unstyled text of the whole table, one line per row
    pub fn to_plain_text(&self) -> String {
        self.lines().fold(String::new(), |mut out, line| {
            out.push_str(&line.text);
            out.push('\n');
            out
        })
    }
}

/// Formats typed result sets into aligned console columns.
///
/// Holds nothing but its configuration, so a single formatter can render any
/// number of result sets.
#[derive(Debug, Clone, Default)]
pub struct TabularResultFormatter {
    config: FormatterConfig,
}

impl TabularResultFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Header label for a column: its mapped display name, or the source
    /// name unchanged.
    pub fn resolve_display_name<'a>(&'a self, source_name: &'a str) -> &'a str {
        self.config.display_names.resolve(source_name)
    }

    /// Format a single value (or, with `is_header`, a header label) and pad
    /// it to exactly `width` columns.
    ///
    /// Text wider than `width` is returned whole rather than truncated. The
    /// padding and separator that follow a field in an assembled line are
    /// not included; they come from [`FormatterConfig::field_suffix`].
    pub fn format_value(
        &self,
        value: &Value,
        semantic_type: SemanticType,
        width: usize,
        is_header: bool,
    ) -> String {
        let formatted = if is_header {
            format_label(&value.to_string(), semantic_type)
        } else {
            format_cell(value, semantic_type, &self.config)
        };
        formatted.pad(width)
    }

    /// Display width of every column: the widest of its header label and its
    /// formatted values.
    pub fn compute_column_widths(
        &self,
        schema: &ColumnSchema,
        result_set: &ResultSet,
    ) -> Result<Vec<usize>> {
        result_set.check_shape(schema)?;
        let cells = self.format_cells(schema, result_set);
        Ok(column_widths(&self.header_labels(schema), &cells))
    }

    /// Render header and data lines for one result set.
    ///
    /// Fails only when a row's length disagrees with the schema; values that
    /// cannot be formatted under their column type are rendered as text and
    /// listed in [`RenderedTable::fallbacks`].
    pub fn render(&self, schema: &ColumnSchema, result_set: &ResultSet) -> Result<RenderedTable> {
        result_set.check_shape(schema)?;

        let labels = self.header_labels(schema);
        let cells = self.format_cells(schema, result_set);
        let widths = column_widths(&labels, &cells);

        let fallbacks: Vec<FormatFallback> = cells
            .iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.fallback)
                    .map(move |(column, _)| (row, column))
            })
            .map(|(row, column)| {
                let descriptor = &schema[column];
                tracing::debug!(
                    row,
                    column = %descriptor.source_name,
                    semantic_type = %descriptor.semantic_type,
                    "value does not match column type, rendered as text"
                );
                FormatFallback {
                    row,
                    column,
                    column_name: descriptor.source_name.clone(),
                    semantic_type: descriptor.semantic_type,
                }
            })
            .collect();

        let header = StyledLine {
            text: self.assemble_line(&labels, &widths),
            style: self.config.header_style.clone(),
        };
        let rows: Vec<StyledLine> = cells
            .iter()
            .map(|values| StyledLine {
                text: self.assemble_line(values, &widths),
                style: self.config.row_style.clone(),
            })
            .collect();

        tracing::trace!(
            columns = widths.len(),
            rows = rows.len(),
            fallbacks = fallbacks.len(),
            "rendered result set"
        );

        Ok(RenderedTable {
            header,
            rows,
            widths,
            fallbacks,
        })
    }

    fn header_labels(&self, schema: &ColumnSchema) -> Vec<FormattedValue> {
        schema
            .iter()
            .map(|c| {
                format_label(
                    self.resolve_display_name(&c.source_name),
                    c.semantic_type,
                )
            })
            .collect()
    }

    fn format_cells(&self, schema: &ColumnSchema, result_set: &ResultSet) -> Vec<Vec<FormattedValue>> {
        result_set
            .iter()
            .map(|row| {
                row.iter()
                    .zip(schema.iter())
                    .map(|(value, c)| format_cell(value, c.semantic_type, &self.config))
                    .collect()
            })
            .collect()
    }

    fn assemble_line(&self, fields: &[FormattedValue], widths: &[usize]) -> String {
        let last = fields.len().saturating_sub(1);
        fields
            .iter()
            .zip(widths)
            .enumerate()
            .fold(String::new(), |mut line, (idx, (field, &width))| {
                line.push_str(&field.pad(width));
                line.push_str(&self.config.field_suffix(idx == last));
                line
            })
    }
}

fn column_widths(labels: &[FormattedValue], cells: &[Vec<FormattedValue>]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            cells
                .iter()
                .map(|row| row[idx].width())
                .fold(label.width(), usize::max)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResultPrintError;
    use crate::names::DisplayNameMap;
    use crate::options::ColumnSeparator;
    use chrono::NaiveDate;

    fn id_total_schema() -> ColumnSchema {
        ColumnSchema::default()
            .column("id", SemanticType::Integer)
            .column("total", SemanticType::Float)
    }

    fn id_total_rows() -> ResultSet {
        ResultSet::new(vec![
            vec![Value::Integer(1), Value::Float(9.5)],
            vec![Value::Integer(22), Value::Float(100.0)],
        ])
    }

    fn orders() -> (ColumnSchema, ResultSet) {
        let schema = ColumnSchema::default()
            .column("order_id", SemanticType::Integer)
            .column("ship_city", SemanticType::Text)
            .column("order_date", SemanticType::Date)
            .column("freight", SemanticType::Float);
        let d = |m, day| Value::Date(NaiveDate::from_ymd_opt(1996, m, day).unwrap());
        let rows = ResultSet::new(vec![
            vec![Value::Integer(10248), "Reims".into(), d(7, 4), Value::Float(32.38)],
            vec![Value::Integer(10249), "Münster".into(), d(7, 5), Value::Float(11.61)],
            vec![Value::Integer(10250), Value::Null, Value::Null, Value::Float(65.83)],
            vec![Value::Integer(10251), "Lyon".into(), d(7, 8), "unknown".into()],
        ]);
        (schema, rows)
    }

    #[test]
    fn test_end_to_end_id_total() {
        let formatter = TabularResultFormatter::new(
            FormatterConfig::new().map_column("id", "ID").extra_padding(3),
        );
        let table = formatter.render(&id_total_schema(), &id_total_rows()).unwrap();

        assert_eq!(table.widths, vec![2, 6]);
        assert_eq!(table.header.text, "ID     total");
        assert_eq!(table.rows[0].text, " 1      9.50");
        assert_eq!(table.rows[1].text, "22    100.00");
        assert!(table.fallbacks.is_empty());
    }

    #[test]
    fn test_compute_column_widths() {
        let formatter =
            TabularResultFormatter::new(FormatterConfig::new().map_column("id", "ID"));
        let widths = formatter
            .compute_column_widths(&id_total_schema(), &id_total_rows())
            .unwrap();
        assert_eq!(widths, vec![2, 6]);
    }

    #[test]
    fn test_widths_of_empty_result_set_are_label_widths() {
        let formatter = TabularResultFormatter::default();
        let widths = formatter
            .compute_column_widths(&id_total_schema(), &ResultSet::default())
            .unwrap();
        assert_eq!(widths, vec![2, 5]);
    }

    #[test]
    fn test_widths_use_formatted_text() {
        // 0.5 is 3 characters raw but "0.50" once formatted
        let schema = ColumnSchema::default().column("x", SemanticType::Float);
        let rows = ResultSet::default().row([0.5f64]);
        let widths = TabularResultFormatter::default()
            .compute_column_widths(&schema, &rows)
            .unwrap();
        assert_eq!(widths, vec![4]);
    }

    #[test]
    fn test_all_lines_same_width() {
        let (schema, rows) = orders();
        for separator in [ColumnSeparator::Space, ColumnSeparator::Pipe] {
            let formatter = TabularResultFormatter::new(
                FormatterConfig::new().extra_padding(4).separator(separator),
            );
            let table = formatter.render(&schema, &rows).unwrap();
            let width = console::measure_text_width(&table.header.text);
            for line in table.lines() {
                assert_eq!(console::measure_text_width(&line.text), width, "{:?}", line);
            }
        }
    }

    #[test]
    fn test_no_value_is_truncated() {
        let (schema, rows) = orders();
        let formatter = TabularResultFormatter::default();
        let table = formatter.render(&schema, &rows).unwrap();
        for row in &rows {
            for (idx, value) in row.iter().enumerate() {
                let field =
                    formatter.format_value(value, schema[idx].semantic_type, table.widths[idx], false);
                assert_eq!(console::measure_text_width(&field), table.widths[idx]);
            }
        }
    }

    #[test]
    fn test_pipe_separator_layout() {
        let formatter = TabularResultFormatter::new(
            FormatterConfig::new()
                .extra_padding(1)
                .separator(ColumnSeparator::Pipe),
        );
        let table = formatter.render(&id_total_schema(), &id_total_rows()).unwrap();
        assert_eq!(table.header.text, "id | total |");
        assert_eq!(table.rows[0].text, " 1 |  9.50 |");
    }

    #[test]
    fn test_control_characters_stay_on_one_line() {
        let schema = ColumnSchema::default()
            .column("note", SemanticType::Text)
            .column("n", SemanticType::Integer);
        let rows = ResultSet::new(vec![
            vec!["abcd".into(), Value::Integer(1)],
            vec!["a\tb".into(), Value::Integer(2)],
            vec!["x\ny".into(), Value::Integer(3)],
        ]);
        let table = TabularResultFormatter::default().render(&schema, &rows).unwrap();

        assert_eq!(table.rows[1].text, "a b  2");
        assert_eq!(table.rows[2].text, "x y  3");
        for line in table.lines() {
            assert_eq!(line.text.lines().count(), 1, "{:?}", line);
            assert_eq!(line.text.chars().count(), 6, "{:?}", line);
        }
    }

    #[test]
    fn test_format_value_plus_suffix_builds_line() {
        let config = FormatterConfig::new()
            .extra_padding(1)
            .separator(ColumnSeparator::Pipe);
        let formatter = TabularResultFormatter::new(config.clone());
        let line = format!(
            "{}{}{}{}",
            formatter.format_value(&Value::Integer(1), SemanticType::Integer, 2, false),
            config.field_suffix(false),
            formatter.format_value(&Value::Float(9.5), SemanticType::Float, 6, false),
            config.field_suffix(true),
        );
        let table = formatter.render(&id_total_schema(), &id_total_rows()).unwrap();
        assert_eq!(line, table.rows[0].text);
    }

    #[test]
    fn test_render_is_deterministic() {
        let (schema, rows) = orders();
        let formatter = TabularResultFormatter::new(FormatterConfig::new().extra_padding(2));
        let first = formatter.render(&schema, &rows).unwrap();
        let second = formatter.render(&schema, &rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_styles_attached() {
        let formatter = TabularResultFormatter::new(
            FormatterConfig::new().header_style("cyan").row_style("white"),
        );
        let table = formatter.render(&id_total_schema(), &id_total_rows()).unwrap();
        assert_eq!(table.header.style.as_str(), "cyan");
        assert!(table.rows.iter().all(|r| r.style.as_str() == "white"));
    }

    #[test]
    fn test_null_cells_render_blank() {
        let (schema, rows) = orders();
        let table = TabularResultFormatter::default().render(&schema, &rows).unwrap();
        let blank_city = " ".repeat(table.widths[1]);
        assert!(table.rows[2].text.contains(&blank_city));
    }

    #[test]
    fn test_fallbacks_are_reported() {
        let (schema, rows) = orders();
        let table = TabularResultFormatter::default().render(&schema, &rows).unwrap();
        assert_eq!(
            table.fallbacks,
            vec![FormatFallback {
                row: 3,
                column: 3,
                column_name: "freight".to_string(),
                semantic_type: SemanticType::Float,
            }]
        );
        assert!(table.rows[3].text.ends_with("unknown"));
    }

    #[test]
    fn test_schema_length_mismatch() {
        let schema = ColumnSchema::default()
            .column("a", SemanticType::Text)
            .column("b", SemanticType::Text)
            .column("c", SemanticType::Text)
            .column("d", SemanticType::Text);
        let rows = ResultSet::default().row(["1", "2", "3"]);
        let formatter = TabularResultFormatter::default();

        let err = formatter.render(&schema, &rows).unwrap_err();
        assert!(matches!(
            err,
            ResultPrintError::SchemaLengthMismatch {
                row: 0,
                expected: 4,
                found: 3
            }
        ));
        assert!(formatter.compute_column_widths(&schema, &rows).is_err());
    }

    #[test]
    fn test_display_names_in_header() {
        let names: DisplayNameMap = [("ship_city", "city"), ("order_date", "order")]
            .into_iter()
            .collect();
        let (schema, rows) = orders();
        let formatter = TabularResultFormatter::new(FormatterConfig::new().display_names(names));
        let table = formatter.render(&schema, &rows).unwrap();
        assert!(table.header.text.contains("city"));
        assert!(!table.header.text.contains("ship_city"));
        assert_eq!(formatter.resolve_display_name("order_date"), "order");
        assert_eq!(formatter.resolve_display_name("freight"), "freight");
    }

    #[test]
    fn test_format_value_header_is_not_reformatted() {
        let formatter = TabularResultFormatter::default();
        let label = Value::from("1.5");
        assert_eq!(
            formatter.format_value(&label, SemanticType::Float, 6, true),
            "   1.5"
        );
        assert_eq!(
            formatter.format_value(&label, SemanticType::Float, 6, false),
            "  1.50"
        );
    }

    #[test]
    fn test_to_plain_text() {
        let formatter = TabularResultFormatter::new(FormatterConfig::new().map_column("id", "ID"));
        let table = formatter.render(&id_total_schema(), &id_total_rows()).unwrap();
        assert_eq!(table.to_plain_text(), "ID  total\n 1   9.50\n22 100.00\n");
    }
}
