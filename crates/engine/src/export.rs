//! Export pipeline
//!
//! `Exporter` ties a retrieval source to a configuration and runs one of
//! four export modes. Each run owns a fresh `KeyAllocator`, resolves its
//! graph, allocates keys before the emitters that depend on them, and
//! rewrites every table file of the mode.
//!
//! Failure policy:
//! - reference and waveform modes: a resolution gap (or out-of-order
//!   versions) leaves every table of the mode as an empty file
//! - analysis modes: missing links lower the resolution depth; tables past
//!   the break are empty files, incomplete records become NA rows
//! - I/O failures on table files abort the run

use crate::config::ExportConfig;
use crate::emit::{
    affiliation, arrival, assoc, event, instrument, network, origerr, origin, sensor, site,
    sitechan, wfdisc, EmitContext, TableReport, TableRows, TableWriter,
};
use crate::keys::KeyAllocator;
use crate::resolve::{
    resolve_detections, resolve_events, resolve_reference, resolve_waveforms, AnalysisDepth,
    EventSelection, ReferenceGraph,
};
use crate::source::EntitySource;
use css_core::{ExportError, TimeWindow};
use css_format::Table;
use tracing::{info, warn};
use uuid::Uuid;

/// Tables of a reference export, in write order
pub const REFERENCE_TABLES: [Table; 6] = [
    Table::Network,
    Table::Sitechan,
    Table::Site,
    Table::Affiliation,
    Table::Sensor,
    Table::Instrument,
];

/// Tables of a waveform export
pub const WAVEFORM_TABLES: [Table; 1] = [Table::Wfdisc];

/// Tables of an event export, in write order
pub const EVENT_TABLES: [Table; 5] = [
    Table::Event,
    Table::Origerr,
    Table::Origin,
    Table::Assoc,
    Table::Arrival,
];

/// Tables of a detection export
pub const DETECTION_TABLES: [Table; 1] = [Table::Arrival];

/// What one export run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// One report per table, in write order
    pub tables: Vec<TableReport>,
}

impl ExportSummary {
    /// Report of a table
    pub fn get(&self, table: Table) -> Option<&TableReport> {
        self.tables.iter().find(|r| r.table == table)
    }

    /// Rows written to a table (0 if the run did not touch it)
    pub fn rows(&self, table: Table) -> usize {
        self.get(table).map_or(0, |r| r.rows)
    }

    /// Rows written across all tables
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|r| r.rows).sum()
    }

    /// Side files written across all tables
    pub fn sidecars(&self) -> usize {
        self.tables.iter().map(|r| r.sidecars).sum()
    }

    /// NA placeholder rows across all tables
    pub fn na_rows(&self) -> usize {
        self.tables.iter().map(|r| r.na_rows).sum()
    }
}

/// Runs exports from an entity source into CSS3.0 files
#[derive(Debug)]
pub struct Exporter<S> {
    source: S,
    config: ExportConfig,
}

impl<S: EntitySource> Exporter<S> {
    /// Exporter over `source`; the configuration is validated up front
    pub fn new(source: S, config: ExportConfig) -> Result<Self, ExportError> {
        config.validate()?;
        Ok(Exporter { source, config })
    }

    /// Entity source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn begin(&self) -> (KeyAllocator, EmitContext) {
        (
            KeyAllocator::new(self.config.keys),
            EmitContext::from_config(&self.config),
        )
    }

    /// NETWORK, SITECHAN, SITE, AFFILIATION, SENSOR and INSTRUMENT of a
    /// channel's membership chain
    pub fn export_reference(
        &self,
        channel_id: Uuid,
        window: &TimeWindow,
    ) -> Result<ExportSummary, ExportError> {
        let (mut alloc, ctx) = self.begin();
        let tables = match resolve_reference(&self.source, channel_id, window)
            .and_then(|graph| reference_tables(&graph, &mut alloc, &ctx))
        {
            Ok(tables) => tables,
            Err(e) if e.is_resolution_gap() => {
                warn!(target: "css::export", %channel_id, error = %e, "Reference export aborted, writing empty tables");
                empty(&REFERENCE_TABLES)
            }
            Err(e) => return Err(e),
        };
        self.write("reference", &tables)
    }

    /// WFDISC and `.w` sample files of a channel's segments
    pub fn export_waveforms(
        &self,
        channel_id: Uuid,
        window: &TimeWindow,
    ) -> Result<ExportSummary, ExportError> {
        let (mut alloc, ctx) = self.begin();
        let tables = match resolve_waveforms(&self.source, channel_id, window) {
            Ok(graph) => {
                let channel_keys = sitechan::assign_keys(&graph.channels, &mut alloc);
                vec![wfdisc::emit(&graph, &channel_keys, &mut alloc, &ctx)]
            }
            Err(e) if e.is_resolution_gap() => {
                warn!(target: "css::export", %channel_id, error = %e, "Waveform export aborted, writing empty table");
                empty(&WAVEFORM_TABLES)
            }
            Err(e) => return Err(e),
        };
        self.write("waveform", &tables)
    }

    /// EVENT, ORIGERR, ORIGIN, ASSOC and ARRIVAL of selected events
    pub fn export_events(&self, selection: &EventSelection) -> Result<ExportSummary, ExportError> {
        let (mut alloc, ctx) = self.begin();
        let graph = resolve_events(&self.source, selection);

        let tables = match graph.depth {
            AnalysisDepth::NoEvents => empty(&EVENT_TABLES),
            AnalysisDepth::EventsOnly => {
                let event_keys = event::assign_keys(&graph.events, &mut alloc);
                vec![
                    event::emit(&graph.events, &event_keys, &ctx),
                    origerr::emit(&graph.events, &event_keys, &ctx),
                    TableRows::empty(Table::Origin),
                    TableRows::empty(Table::Assoc),
                    TableRows::empty(Table::Arrival),
                ]
            }
            AnalysisDepth::Full => {
                let event_keys = event::assign_keys(&graph.events, &mut alloc);
                let arrival_keys = arrival::assign_keys(&graph.detections.hypotheses, &mut alloc);
                vec![
                    event::emit(&graph.events, &event_keys, &ctx),
                    origerr::emit(&graph.events, &event_keys, &ctx),
                    origin::emit(&graph.events, &event_keys, &ctx),
                    assoc::emit(
                        &graph.events,
                        &event_keys,
                        &graph.detections,
                        &arrival_keys,
                        &ctx,
                    ),
                    arrival::emit(&graph.detections, &arrival_keys, &ctx),
                ]
            }
        };
        self.write("event", &tables)
    }

    /// ARRIVAL rows of signal detection hypotheses
    pub fn export_detections(&self, hypothesis_ids: &[Uuid]) -> Result<ExportSummary, ExportError> {
        let (mut alloc, ctx) = self.begin();
        let tables = match resolve_detections(&self.source, hypothesis_ids) {
            Some(detections) => {
                let keys = arrival::assign_keys(&detections.hypotheses, &mut alloc);
                vec![arrival::emit(&detections, &keys, &ctx)]
            }
            None => {
                warn!(target: "css::export", requested = hypothesis_ids.len(), "No detections retrieved, writing empty table");
                empty(&DETECTION_TABLES)
            }
        };
        self.write("detection", &tables)
    }

    fn write(&self, mode: &str, tables: &[TableRows]) -> Result<ExportSummary, ExportError> {
        let writer = TableWriter::new(&self.config)?;
        let mut summary = ExportSummary::default();
        for rows in tables {
            summary.tables.push(writer.write(rows)?);
        }
        info!(
            target: "css::export",
            mode,
            dir = %writer.dir().display(),
            tables = summary.tables.len(),
            rows = summary.total_rows(),
            na_rows = summary.na_rows(),
            sidecars = summary.sidecars(),
            "Export complete"
        );
        Ok(summary)
    }
}

fn empty(tables: &[Table]) -> Vec<TableRows> {
    tables.iter().map(|&t| TableRows::empty(t)).collect()
}

/// Reference tables in write order; SITECHAN keys are allocated before
/// SENSOR needs them
fn reference_tables(
    graph: &ReferenceGraph,
    alloc: &mut KeyAllocator,
    ctx: &EmitContext,
) -> Result<Vec<TableRows>, ExportError> {
    let channel_keys = sitechan::assign_keys(&graph.channels, alloc);
    let instrument_keys = graph
        .instruments
        .as_ref()
        .map(|chain| sensor::assign_instrument_keys(chain, alloc))
        .unwrap_or_default();

    Ok(vec![
        network::emit(graph, ctx),
        sitechan::emit(graph, &channel_keys, ctx)?,
        site::emit(graph, ctx)?,
        affiliation::emit(graph, ctx)?,
        sensor::emit(graph, &channel_keys, &instrument_keys, ctx)?,
        instrument::emit(graph, &instrument_keys, ctx),
    ])
}
