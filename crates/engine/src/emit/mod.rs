//! Table emitters
//!
//! Each emitter turns a resolved graph (plus the keys it depends on) into
//! rendered rows. Emitters do no I/O: binary side files travel with their
//! row as a `Sidecar` and `TableWriter` puts both on disk.
//!
//! Key dependencies are carried by types. `sitechan::assign_keys` yields
//! the `ChannelKeys` SENSOR and WFDISC need; `event::assign_keys` yields
//! the `EventKeys` ORIGIN, ORIGERR and ASSOC need; `arrival::assign_keys`
//! yields the `ArrivalKeys` ASSOC needs.

pub mod affiliation;
pub mod arrival;
pub mod assoc;
pub mod event;
pub mod instrument;
pub mod network;
pub mod origerr;
pub mod origin;
pub mod sensor;
pub mod site;
pub mod sitechan;
pub mod wfdisc;

use crate::config::ExportConfig;
use chrono::{DateTime, Utc};
use css_core::ExportError;
use css_format::{FieldValue, Row, Table};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wfdisc::SampleFormat;

/// Settings shared by every emitter of a run
#[derive(Debug, Clone, PartialEq)]
pub struct EmitContext {
    /// Value of every `lddate` column
    pub load_date: Option<DateTime<Utc>>,
    /// Prefix of side file names
    pub file_prefix: String,
    /// Waveform sample encoding
    pub sample_format: SampleFormat,
}

impl Default for EmitContext {
    fn default() -> Self {
        EmitContext::from_config(&ExportConfig::default())
    }
}

impl EmitContext {
    /// Context for a configured run
    pub fn from_config(config: &ExportConfig) -> Self {
        EmitContext {
            load_date: config.load_date,
            file_prefix: config.file_prefix.clone(),
            sample_format: config.sample_format,
        }
    }

    /// Fresh row with the load date filled in
    pub fn row(&self, table: Table) -> Row {
        let mut row = Row::new(table);
        row.set("lddate", self.load_date.map(FieldValue::from));
        row
    }

    /// Side file name `<prefix>.<key>.<ext>`
    pub fn side_file(&self, key: u64, ext: &str) -> String {
        format!("{}.{}.{}", self.file_prefix, key, ext)
    }
}

/// Binary file written next to the tables
#[derive(Debug, Clone, PartialEq)]
pub struct Sidecar {
    /// File name inside the output directory
    pub file_name: String,
    /// File content
    pub bytes: Vec<u8>,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedRow {
    /// Fixed-width text, without newline
    pub line: String,
    /// Side file the row points at
    pub sidecar: Option<Sidecar>,
    /// Line written instead when the side file fails; `None` drops the row
    pub fallback: Option<String>,
}

/// Rendered rows of one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRows {
    /// Table
    pub table: Table,
    /// Rows in file order
    pub rows: Vec<EmittedRow>,
    /// Rows written all-NA because their chain ended early
    pub na_rows: usize,
}

impl TableRows {
    /// No rows
    pub fn empty(table: Table) -> Self {
        TableRows {
            table,
            rows: Vec::new(),
            na_rows: 0,
        }
    }

    /// Render and append a row
    pub fn push(&mut self, row: &Row) {
        debug_assert_eq!(row.table(), self.table);
        self.rows.push(EmittedRow {
            line: row.render(),
            sidecar: None,
            fallback: None,
        });
    }

    /// Append a placeholder row for an incomplete record
    pub fn push_na(&mut self, row: &Row) {
        self.push(row);
        self.na_rows += 1;
    }

    /// Append a row with its side file; the row is dropped if the file fails
    pub fn push_with_sidecar(&mut self, row: &Row, sidecar: Sidecar) {
        debug_assert_eq!(row.table(), self.table);
        self.rows.push(EmittedRow {
            line: row.render(),
            sidecar: Some(sidecar),
            fallback: None,
        });
    }

    /// Append a row with its side file; if the file fails the row is kept
    /// with `columns` reset to NA
    pub fn push_with_detachable_sidecar(
        &mut self,
        row: &Row,
        sidecar: Sidecar,
        columns: &[&str],
    ) {
        debug_assert_eq!(row.table(), self.table);
        let mut detached = row.clone();
        for column in columns {
            detached.set(column, None::<FieldValue>);
        }
        self.rows.push(EmittedRow {
            line: row.render(),
            sidecar: Some(sidecar),
            fallback: Some(detached.render()),
        });
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rendered lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.line.as_str())
    }
}

/// What was written for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableReport {
    /// Table
    pub table: Table,
    /// Rows written
    pub rows: usize,
    /// Rows written all-NA
    pub na_rows: usize,
    /// Side files written
    pub sidecars: usize,
    /// Rows dropped because their side file failed
    pub dropped: usize,
    /// Rows kept without their side file because it failed
    pub detached: usize,
}

/// Writes table files and side files into the output directory
#[derive(Debug, Clone)]
pub struct TableWriter {
    dir: PathBuf,
    prefix: String,
}

impl TableWriter {
    /// Writer for a configured run; creates the output directory
    pub fn new(config: &ExportConfig) -> Result<Self, ExportError> {
        fs::create_dir_all(&config.output_dir)?;
        Ok(TableWriter {
            dir: config.output_dir.clone(),
            prefix: config.file_prefix.clone(),
        })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a table file `<prefix>.<table>`
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.dir.join(format!("{}.{}", self.prefix, table.name()))
    }

    /// Write a table file, truncating any previous content
    ///
    /// Each side file is written before its row. A failed side file drops
    /// only that row, or writes the row's fallback line when it has one.
    pub fn write(&self, rows: &TableRows) -> Result<TableReport, ExportError> {
        let path = self.table_path(rows.table);
        let mut out = BufWriter::new(File::create(&path)?);
        let mut report = TableReport {
            table: rows.table,
            rows: 0,
            na_rows: rows.na_rows,
            sidecars: 0,
            dropped: 0,
            detached: 0,
        };

        for row in &rows.rows {
            let mut line = &row.line;
            if let Some(sidecar) = &row.sidecar {
                let side_path = self.dir.join(&sidecar.file_name);
                match fs::write(&side_path, &sidecar.bytes) {
                    Ok(()) => report.sidecars += 1,
                    Err(source) => {
                        let err = ExportError::SidecarWrite {
                            path: side_path,
                            source,
                        };
                        match &row.fallback {
                            Some(fallback) => {
                                warn!(target: "css::export", table = %rows.table, error = %err, "Keeping row without side file");
                                report.detached += 1;
                                line = fallback;
                            }
                            None => {
                                warn!(target: "css::export", table = %rows.table, error = %err, "Dropping row");
                                report.dropped += 1;
                                continue;
                            }
                        }
                    }
                }
            }
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
            report.rows += 1;
        }
        out.flush()?;

        info!(
            target: "css::export",
            table = %rows.table,
            path = %path.display(),
            rows = report.rows,
            na_rows = report.na_rows,
            sidecars = report.sidecars,
            dropped = report.dropped,
            detached = report.detached,
            "Table written"
        );
        Ok(report)
    }
}
