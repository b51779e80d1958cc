//! Export engine for CSS3.0 flat files
//!
//! This crate orchestrates the export layers:
//! - Source: the retrieval seam (`EntitySource`) and the in-memory `Catalog`
//! - Resolve: channel-, event- and detection-rooted graph resolution
//! - Segment: validity intervals of versioned entities
//! - Keys: per-run synthetic key allocation (chanid, inid, wfid, evid, orid, arid)
//! - Emit: one emitter per table, plus the table/sidecar writer
//! - Export: the four export modes and their run summaries
//!
//! Nothing here installs a tracing subscriber; callers choose their own.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod emit;
pub mod export;
pub mod keys;
pub mod resolve;
pub mod segment;
pub mod source;

#[cfg(test)]
mod fixtures;

pub use catalog::{Catalog, CatalogError, ChannelScoped, SiteChannel};
pub use config::{ConfigError, ExportConfig, CONFIG_FILE_NAME};
pub use emit::wfdisc::SampleFormat;
pub use emit::{EmitContext, Sidecar, TableReport, TableRows, TableWriter};
pub use export::{ExportSummary, Exporter};
pub use keys::{KeyAllocator, KeyBases, KeyKind, KeyMap, SharedKeyAllocator};
pub use resolve::{
    AnalysisDepth, AnalysisGraph, DetectionSet, EventSelection, ReferenceGraph, WaveformGraph,
};
pub use segment::{segment, segment_coalesced, SegmentError, ValidUntil, ValidityInterval, Versioned};
pub use source::EntitySource;
