//! Output formatting: present result sets as aligned console columns.
//!
//! - **format**: per-type formatting and alignment of single cells
//! - **table**: `TabularResultFormatter`, which computes column widths once
//!   and assembles header and data lines into a `RenderedTable`
//!
//! Rendering is pure string computation. Lines carry a `StyleToken` and the
//! caller decides how to apply it and where to write.
//!
//! ## Example
//!
//! ```rust
//! use resultprintlib::output::TabularResultFormatter;
//! use resultprintlib::{ColumnSchema, FormatterConfig, ResultSet, SemanticType, Value};
//!
//! let schema = ColumnSchema::default()
//!     .column("id", SemanticType::Integer)
//!     .column("total", SemanticType::Float);
//! let rows = ResultSet::new(vec![vec![Value::Integer(22), Value::Float(100.0)]]);
//!
//! let formatter = TabularResultFormatter::new(FormatterConfig::new().map_column("id", "ID"));
//! let table = formatter.render(&schema, &rows).unwrap();
//! assert_eq!(table.header.text, "ID  total");
//! assert_eq!(table.rows[0].text, "22 100.00");
//! ```

pub mod format;
pub mod table;

pub use format::{display_width, format_cell, format_label, FormattedValue};
pub use table::{FormatFallback, RenderedTable, StyledLine, TabularResultFormatter};
