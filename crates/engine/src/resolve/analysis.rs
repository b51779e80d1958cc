//! Analysis chain resolution (event- or detection-rooted)
//!
//! Unlike the reference chain, nothing here aborts the export. A chain
//! that ends early lowers the `AnalysisDepth` (which tables get rows at
//! all) or leaves a single record without its denormalized columns.

use super::distinct;
use crate::source::EntitySource;
use css_core::{Event, Hop, SignalDetectionHypothesis, TimeWindow};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Which events to export
#[derive(Debug, Clone, PartialEq)]
pub enum EventSelection {
    /// Events by id
    Ids(Vec<Uuid>),
    /// Events located inside a window
    Window(TimeWindow),
}

/// How far the analysis chain resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisDepth {
    /// No events; every analysis table is empty
    NoEvents,
    /// Events resolved but the chain to detections ended early; only
    /// EVENT and ORIGERR have rows
    EventsOnly,
    /// Full chain; every analysis table has rows
    Full,
}

/// Denormalized context of one signal detection hypothesis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Name of the detecting station
    pub station: Option<String>,
    /// Organization that produced the detection
    pub auth: Option<String>,
}

/// Signal detection hypotheses with their station context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSet {
    /// Hypotheses, in retrieval order
    pub hypotheses: Vec<SignalDetectionHypothesis>,
    /// Context per hypothesis id
    pub context: HashMap<Uuid, Detection>,
}

impl DetectionSet {
    /// Hypothesis by id
    pub fn hypothesis(&self, id: Uuid) -> Option<&SignalDetectionHypothesis> {
        self.hypotheses.iter().find(|h| h.id == id)
    }

    /// Station name of a hypothesis
    pub fn station(&self, id: Uuid) -> Option<&str> {
        self.context.get(&id).and_then(|d| d.station.as_deref())
    }

    /// Producing organization of a hypothesis
    pub fn auth(&self, id: Uuid) -> Option<&str> {
        self.context.get(&id).and_then(|d| d.auth.as_deref())
    }
}

/// Everything the analysis tables are written from
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisGraph {
    /// Selected events
    pub events: Vec<Event>,
    /// How far the chain resolved
    pub depth: AnalysisDepth,
    /// Associated detections (empty unless `depth` is `Full`)
    pub detections: DetectionSet,
}

/// Resolve selected events down to their associated detections
pub fn resolve_events<S: EntitySource + ?Sized>(
    source: &S,
    selection: &EventSelection,
) -> AnalysisGraph {
    let events = match selection {
        EventSelection::Ids(ids) => source.events(ids),
        EventSelection::Window(window) => source.events_in_window(window),
    }
    .unwrap_or_default();

    let shallow = |events: Vec<Event>, depth: AnalysisDepth| AnalysisGraph {
        events,
        depth,
        detections: DetectionSet::default(),
    };

    if events.is_empty() {
        warn!(target: "css::resolve", hop = %Hop::Event, "No events resolved");
        return shallow(events, AnalysisDepth::NoEvents);
    }

    let hypotheses: Vec<_> = events.iter().flat_map(|e| e.hypotheses.iter()).collect();
    if hypotheses.is_empty() {
        info!(target: "css::resolve", events = events.len(), "Events have no hypotheses");
        return shallow(events, AnalysisDepth::EventsOnly);
    }

    let sdh_ids = distinct(
        hypotheses
            .iter()
            .flat_map(|h| h.associations.iter())
            .map(|a| a.signal_detection_hypothesis_id),
    );
    if sdh_ids.is_empty() {
        info!(target: "css::resolve", hypotheses = hypotheses.len(), "Hypotheses have no associations");
        return shallow(events, AnalysisDepth::EventsOnly);
    }

    match resolve_detections(source, &sdh_ids) {
        Some(detections) => {
            debug!(
                target: "css::resolve",
                events = events.len(),
                detections = detections.hypotheses.len(),
                "Analysis graph resolved"
            );
            AnalysisGraph {
                events,
                depth: AnalysisDepth::Full,
                detections,
            }
        }
        None => {
            info!(target: "css::resolve", requested = sdh_ids.len(), "No associated detections retrieved");
            shallow(events, AnalysisDepth::EventsOnly)
        }
    }
}

/// Resolve signal detection hypotheses and their station names
///
/// `None` when no hypothesis could be retrieved. A hypothesis whose parent
/// detection or station is missing keeps an empty context.
pub fn resolve_detections<S: EntitySource + ?Sized>(
    source: &S,
    ids: &[Uuid],
) -> Option<DetectionSet> {
    let hypotheses = source
        .signal_detection_hypotheses(ids)
        .filter(|h| !h.is_empty())?;

    let parent_ids = distinct(
        hypotheses
            .iter()
            .filter_map(|h| h.parent_signal_detection_id),
    );
    let parents = if parent_ids.is_empty() {
        Vec::new()
    } else {
        source.signal_detections(&parent_ids).unwrap_or_default()
    };

    let mut station_names: HashMap<Uuid, Option<String>> = HashMap::new();
    for station_id in distinct(parents.iter().map(|d| d.station_id)) {
        let name = source
            .stations(station_id, &TimeWindow::all())
            .and_then(|versions| versions.into_iter().last())
            .map(|s| s.name);
        if name.is_none() {
            warn!(target: "css::resolve", hop = %Hop::Station, scope = %station_id, "Resolution gap");
        }
        station_names.insert(station_id, name);
    }

    let mut context = HashMap::new();
    for h in &hypotheses {
        let parent = h
            .parent_signal_detection_id
            .and_then(|pid| parents.iter().find(|d| d.id == pid));
        if parent.is_none() {
            warn!(
                target: "css::resolve",
                hop = %Hop::SignalDetection,
                scope = %h.id,
                "Resolution gap"
            );
        }
        context.insert(
            h.id,
            Detection {
                station: parent
                    .and_then(|d| station_names.get(&d.station_id).cloned())
                    .flatten(),
                auth: parent.and_then(|d| d.monitoring_organization.clone()),
            },
        );
    }

    Some(DetectionSet {
        hypotheses,
        context,
    })
}
