//! Loading result sets from JSON documents.
//!
//! A result document pairs column metadata with materialized rows:
//!
//! ```json
//! {
//!   "columns": ["id", {"name": "freight", "type": "numeric"}],
//!   "rows": [[10248, 32.38], [10249, 11.61]]
//! }
//! ```
//!
//! Column types may be semantic type names or database type names. A column
//! without a type gets one inferred from its values.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::ResultPrintError;
use crate::Result;

use super::result_set::{ResultSet, Row};
use super::schema::{ColumnDescriptor, ColumnSchema, SemanticType};
use super::value::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColumnSpec {
    Name(String),
    Described {
        name: String,
        #[serde(rename = "type")]
        type_name: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    columns: Vec<ColumnSpec>,
    #[serde(default)]
    rows: Vec<serde_json::Value>,
}

/// A parsed result document: schema plus rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDocument {
    pub schema: ColumnSchema,
    pub result_set: ResultSet,
}

impl ResultDocument {
    /// Parse a document from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(input)?;
        Self::from_raw(raw)
    }

    /// Parse a document from any reader (e.g. stdin).
    ///
    /// A failing reader surfaces as [`ResultPrintError::Io`].
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json_str(&content)
    }

    /// Read and parse a document file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            ResultPrintError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json_str(&content)
    }

    /// Split into the schema and rows consumed by the formatter.
    pub fn into_parts(self) -> (ColumnSchema, ResultSet) {
        (self.schema, self.result_set)
    }

    fn from_raw(raw: RawDocument) -> Result<Self> {
        let rows = raw
            .rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| match row {
                serde_json::Value::Array(values) => {
                    Ok(values.into_iter().map(Value::from).collect::<Row>())
                }
                other => Err(ResultPrintError::InvalidDocument(format!(
                    "row {} is not an array: {}",
                    idx, other
                ))),
            })
            .collect::<Result<Vec<Row>>>()?;
        let result_set = ResultSet::new(rows);

        // Row lengths are checked by the formatter, not here.
        let schema = raw
            .columns
            .into_iter()
            .enumerate()
            .map(|(idx, spec)| match spec {
                ColumnSpec::Name(name) => {
                    ColumnDescriptor::new(name, SemanticType::infer(result_set.column_values(idx)))
                }
                ColumnSpec::Described { name, type_name } => {
                    let semantic_type = match type_name {
                        Some(t) => t
                            .parse::<SemanticType>()
                            .unwrap_or_else(|_| SemanticType::from_type_name(&t)),
                        None => SemanticType::infer(result_set.column_values(idx)),
                    };
                    ColumnDescriptor::new(name, semantic_type)
                }
            })
            .collect();

        Ok(ResultDocument { schema, result_set })
    }
}
