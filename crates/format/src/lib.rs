//! Fixed-width field codec for CSS3.0 flat files
//!
//! - `codec`: semantic value → fixed-width column text, with NA substitution
//! - `time`: ISO-8601 instants → JDATE, epoch seconds and load dates
//! - `na`: the NA sentinel literals shared by the table schemas
//! - `table`: column layout of every exported table
//! - `row`: builder that renders one table row

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod na;
pub mod row;
pub mod table;
pub mod time;

pub use codec::{encode, Column, FieldValue, Kind, Width};
pub use row::Row;
pub use table::Table;
