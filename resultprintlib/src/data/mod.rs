//! Data model: the typed tabular input consumed by the formatter.
//!
//! - **Values**: runtime cell values (`Value`)
//! - **Schema**: ordered column metadata (`ColumnSchema`, `SemanticType`)
//! - **Result sets**: materialized rows (`ResultSet`)
//! - **Documents**: JSON result documents pairing a schema with rows
//!
//! Acquiring the data (database cursors, statistics feeds) happens upstream;
//! this module only describes what was fetched.

pub mod document;
pub mod result_set;
pub mod schema;
pub mod value;

pub use document::ResultDocument;
pub use result_set::{ResultSet, Row};
pub use schema::{ColumnDescriptor, ColumnSchema, SemanticType};
pub use value::Value;
