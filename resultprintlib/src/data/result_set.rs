//! Materialized rows of a query or data fetch.

use crate::error::ResultPrintError;
use crate::Result;

use super::schema::ColumnSchema;
use super::value::Value;

/// A single result row, positionally aligned with a [`ColumnSchema`].
pub type Row = Vec<Value>;

/// Ordered rows, fully materialized in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Append a row (builder style)
    pub fn row<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Values of column `idx`, top to bottom.
    ///
    /// Rows too short to have the column are skipped.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Check that every row has exactly one value per schema column.
    pub fn check_shape(&self, schema: &ColumnSchema) -> Result<()> {
        let expected = schema.len();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, values)) => Err(ResultPrintError::SchemaLengthMismatch {
                row,
                expected,
                found: values.len(),
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<Row> for ResultSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
