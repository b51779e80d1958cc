//! Entity graph resolution
//!
//! Each export mode walks its chain of retrieval hops and assembles the
//! typed collections the emitters need:
//! - `reference`: channel → sites → station memberships → stations →
//!   network memberships → networks, plus the optional instrument chain
//! - `waveform`: channel versions and segments with their context
//! - `analysis`: events → hypotheses → associations → signal detection
//!   hypotheses → parent detections → station names
//!
//! Reference hops are all-or-nothing: any empty hop is a `ResolutionGap`.
//! Analysis hops degrade per record.

pub mod analysis;
pub mod reference;
pub mod waveform;

pub use analysis::{
    resolve_detections, resolve_events, AnalysisDepth, AnalysisGraph, Detection, DetectionSet,
    EventSelection,
};
pub use reference::{resolve_reference, InstrumentChain, ReferenceGraph};
pub use waveform::{resolve_waveforms, WaveformGraph};

use css_core::{ExportError, Hop};
use tracing::{debug, warn};
use uuid::Uuid;

/// Collection returned by a required hop; `None` or empty is a gap
pub(crate) fn required<T>(
    hop: Hop,
    scope: Uuid,
    found: Option<Vec<T>>,
) -> Result<Vec<T>, ExportError> {
    match found {
        Some(items) if !items.is_empty() => {
            debug!(target: "css::resolve", hop = %hop, %scope, count = items.len(), "Resolved");
            Ok(items)
        }
        _ => {
            warn!(target: "css::resolve", hop = %hop, %scope, "Resolution gap");
            Err(ExportError::gap(hop, scope))
        }
    }
}

/// Distinct ids in first-seen order
pub(crate) fn distinct(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
