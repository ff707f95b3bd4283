//! Column metadata describing a result set.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::value::Value;

/// Display-formatting category of a column.
///
/// The semantic type drives alignment and formatting only; it is never used
/// to validate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Text,
    Integer,
    #[serde(alias = "floatingpoint", alias = "floatingPoint")]
    Float,
    Date,
    #[default]
    Other,
}

impl SemanticType {
    /// Map a database type name to a semantic type.
    ///
    /// Accepts the names cursor descriptors typically report (`int4`,
    /// `longinteger`, `numeric`, `timestamp`, `varchar`, ...) as well as the
    /// semantic type names themselves. Unknown names map to `Other`.
    pub fn from_type_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        // "character varying(40)" -> "character varying"
        let base = name.split('(').next().unwrap_or("").trim();
        match base {
            "text" | "string" | "unicode" | "varchar" | "char" | "bpchar" | "character"
            | "character varying" | "name" => SemanticType::Text,
            "integer" | "int" | "int2" | "int4" | "int8" | "smallint" | "bigint"
            | "longinteger" | "serial" | "bigserial" => SemanticType::Integer,
            "float" | "floatingpoint" | "float4" | "float8" | "real" | "double"
            | "double precision" | "numeric" | "decimal" | "money" => SemanticType::Float,
            "date" | "datetime" | "timestamp" | "timestamptz" | "pydate"
            | "pydatetime" => SemanticType::Date,
            _ => SemanticType::Other,
        }
    }

    /// Infer a semantic type from the first non-null value.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        values
            .into_iter()
            .find(|v| !v.is_null())
            .map(|v| match v {
                Value::Integer(_) => SemanticType::Integer,
                Value::Float(_) => SemanticType::Float,
                Value::Date(_) | Value::DateTime(_) => SemanticType::Date,
                Value::Text(_) => SemanticType::Text,
                Value::Bool(_) | Value::Null => SemanticType::Other,
            })
            .unwrap_or_default()
    }

    /// Whether fields of this type are right-aligned
    pub fn is_numeric(&self) -> bool {
        matches!(self, SemanticType::Integer | SemanticType::Float)
    }
}

impl FromStr for SemanticType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SemanticType::Text),
            "integer" | "int" => Ok(SemanticType::Integer),
            "float" | "floatingpoint" => Ok(SemanticType::Float),
            "date" => Ok(SemanticType::Date),
            "other" => Ok(SemanticType::Other),
            _ => Err(format!("Unknown semantic type: {}", s)),
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SemanticType::Text => "text",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::Date => "date",
            SemanticType::Other => "other",
        };
        f.write_str(name)
    }
}

/// One column of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Raw, unmapped identifier of the column
    #[serde(rename = "name")]
    pub source_name: String,
    /// Formatting category
    #[serde(rename = "type", default)]
    pub semantic_type: SemanticType,
}

impl ColumnDescriptor {
    pub fn new(source_name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            source_name: source_name.into(),
            semantic_type,
        }
    }
}

/// Ordered column metadata, one descriptor per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema {
    pub columns: Vec<ColumnDescriptor>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Append a column (builder style)
    pub fn column(mut self, source_name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.columns
            .push(ColumnDescriptor::new(source_name, semantic_type));
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor> {
        self.columns.iter()
    }
}

impl std::ops::Index<usize> for ColumnSchema {
    type Output = ColumnDescriptor;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.columns[idx]
    }
}

impl FromIterator<ColumnDescriptor> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = ColumnDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
