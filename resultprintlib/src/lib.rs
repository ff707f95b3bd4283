//! # resultprintlib
//!
//! Render typed tabular results (query result sets, statistics documents) as
//! aligned, styled console columns.
//!
//! ## Overview
//!
//! Data arrives already fetched: a `ColumnSchema` naming each column and its
//! semantic type, plus a `ResultSet` of rows. The `TabularResultFormatter`
//! turns that pair into a header line and data lines in which every column
//! has a fixed width:
//!
//! - **Floats** render with two fraction digits, right-aligned
//! - **Integers** render as plain (optionally grouped) decimals, right-aligned
//! - **Dates** render as `MM/DD/YY` or `MM/DD/YYYY`
//! - **Missing values** render as blank fields
//! - **Mismatched values** fall back to their plain text form instead of
//!   failing the render
//!
//! Only structural problems, a row whose length differs from the schema,
//! are reported as errors.
//!
//! ## Example
//!
//! ```rust
//! use resultprintlib::{FormatterConfig, ResultDocument, TabularResultFormatter};
//!
//! let doc = ResultDocument::from_json_str(r#"{
//!     "columns": [{"name": "ship_city", "type": "text"}, {"name": "freight", "type": "numeric"}],
//!     "rows": [["Reims", 32.38], ["Lyon", 140.51]]
//! }"#).unwrap();
//! let (schema, rows) = doc.into_parts();
//!
//! let config = FormatterConfig::new().map_column("ship_city", "city").extra_padding(2);
//! let table = TabularResultFormatter::new(config).render(&schema, &rows).unwrap();
//!
//! assert_eq!(table.header.text, "city    freight");
//! assert_eq!(table.rows[1].text, "Lyon     140.51");
//! ```

pub mod data;
pub mod error;
pub mod names;
pub mod options;
pub mod output;

pub use data::{ColumnDescriptor, ColumnSchema, ResultDocument, ResultSet, Row, SemanticType, Value};
pub use error::ResultPrintError;
pub use names::DisplayNameMap;
pub use options::{ColumnSeparator, DateFormat, FormatterConfig, StyleToken};
pub use output::{FormatFallback, RenderedTable, StyledLine, TabularResultFormatter};

/// Result type for resultprintlib operations
pub type Result<T> = std::result::Result<T, ResultPrintError>;
