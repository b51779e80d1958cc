//! css-export - relational to CSS3.0 flat-file export
//!
//! Converts versioned seismological reference and analysis entities
//! (networks, stations, sites, channels, instruments, waveforms, events and
//! signal detections) into fixed-column CSS3.0 tables.
//!
//! # Quick Start
//!
//! ```ignore
//! use css_export::{Catalog, EventSelection, ExportConfig, Exporter, TimeWindow};
//!
//! let catalog = Catalog::from_file("entities.json".as_ref())?;
//! let exporter = Exporter::new(catalog, ExportConfig::in_dir("out"))?;
//!
//! exporter.export_reference(channel_id, &TimeWindow::all())?;
//! exporter.export_waveforms(channel_id, &TimeWindow::all())?;
//! exporter.export_events(&EventSelection::Ids(vec![event_id]))?;
//! ```
//!
//! # Architecture
//!
//! - [`css_core`]: entity model, time windows, error taxonomy
//! - [`css_format`]: field codec and table layouts
//! - [`css_engine`]: resolution, segmentation, key allocation, emitters

pub use css_core;
pub use css_engine;
pub use css_format;

pub use css_core::{ExportError, Hop, Scalar, TimeWindow};
pub use css_engine::*;
pub use css_format::{FieldValue, Row, Table, Width};
