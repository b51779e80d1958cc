//! Row builder
//!
//! A row starts with every column absent (NA). Emitters set the columns
//! their source data covers and render once.

use crate::codec::FieldValue;
use crate::table::Table;
use tracing::error;

/// One row of a table, before rendering
#[derive(Debug, Clone)]
pub struct Row {
    table: Table,
    values: Vec<Option<FieldValue>>,
}

impl Row {
    /// Row with every column at its NA sentinel
    pub fn new(table: Table) -> Self {
        Row {
            table,
            values: vec![None; table.columns().len()],
        }
    }

    /// Table this row belongs to
    pub fn table(&self) -> Table {
        self.table
    }

    /// Set a column; `None` leaves the NA sentinel in place
    ///
    /// An unknown column name is logged and leaves the row unchanged.
    pub fn set(&mut self, column: &str, value: impl Into<Option<FieldValue>>) -> &mut Self {
        match self.table.position(column) {
            Some(i) => self.values[i] = value.into(),
            None => {
                error!(target: "css::format", table = %self.table, column, "Unknown column");
            }
        }
        self
    }

    /// Current value of a column
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.table
            .position(column)
            .and_then(|i| self.values[i].as_ref())
    }

    /// Render the row: fitted columns joined by single spaces
    pub fn render(&self) -> String {
        self.table
            .columns()
            .iter()
            .zip(&self.values)
            .map(|(col, v)| col.encode(v.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
