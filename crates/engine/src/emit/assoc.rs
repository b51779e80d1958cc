//! ASSOC table
//!
//! One row per (event hypothesis, associated detection hypothesis) pair,
//! joining the hypothesis orid with the detection's arid. Residuals and
//! defining flags come from the location behaviors (of any solution of the
//! hypothesis) that point at the detection's arrival time, azimuth and
//! slowness measurements.
//!
//! A hypothesis none of whose associated detections were retrieved, and an
//! event without hypotheses, each leave one placeholder row with the orid.

use super::arrival::ArrivalKeys;
use super::event::EventKeys;
use super::{EmitContext, TableRows};
use crate::resolve::DetectionSet;
use css_core::{
    Event, EventHypothesis, FeatureMeasurementType, LocationBehavior, SignalDetectionHypothesis,
};
use css_format::{FieldValue, Row, Table};

/// Behavior of the hypothesis's location solutions for a measurement
fn behavior_for<'a>(
    hypothesis: &'a EventHypothesis,
    sdh: &SignalDetectionHypothesis,
    ty: FeatureMeasurementType,
) -> Option<&'a LocationBehavior> {
    let fm = sdh.measurement(ty)?;
    hypothesis
        .location_solutions
        .iter()
        .flat_map(|s| s.location_behaviors.iter())
        .find(|b| b.feature_measurement_id == fm.id)
}

fn measured(row: &mut Row, column: &str, sdh: &SignalDetectionHypothesis, ty: FeatureMeasurementType) {
    row.set(
        column,
        sdh.measurement(ty)
            .and_then(|fm| fm.value.as_ref())
            .map(FieldValue::from),
    );
}

fn fill(row: &mut Row, hypothesis: &EventHypothesis, sdh: &SignalDetectionHypothesis) {
    use FeatureMeasurementType as F;
    measured(row, "phase", sdh, F::Phase);
    measured(row, "delta", sdh, F::SourceToReceiverDistance);
    measured(row, "seaz", sdh, F::ReceiverToSourceAzimuth);
    measured(row, "esaz", sdh, F::SourceToReceiverAzimuth);

    let residuals = [
        (F::ArrivalTime, "timeres", "timedef"),
        (F::Azimuth, "azres", "azdef"),
        (F::Slowness, "slores", "slodef"),
    ];
    for (ty, res_col, def_col) in residuals {
        if let Some(b) = behavior_for(hypothesis, sdh, ty) {
            row.set(res_col, b.residual.as_ref().map(FieldValue::from))
                .set(def_col, FieldValue::Flag(b.defining));
        }
    }
    if let Some(b) = behavior_for(hypothesis, sdh, F::ArrivalTime) {
        row.set("wgt", b.weight.as_ref().map(FieldValue::from));
    }
}

/// Associated rows of every event; placeholders where a chain ends early
pub fn emit(
    events: &[Event],
    event_keys: &EventKeys,
    detections: &DetectionSet,
    arrival_keys: &ArrivalKeys,
    ctx: &EmitContext,
) -> TableRows {
    let mut rows = TableRows::empty(Table::Assoc);
    for event in events {
        for slot in event_keys.origin_slots(event) {
            let mut row = ctx.row(Table::Assoc);
            row.set("orid", slot.orid.map(FieldValue::from));

            let Some(hypothesis) = slot.hypothesis else {
                rows.push_na(&row);
                continue;
            };
            let associated: Vec<&SignalDetectionHypothesis> = hypothesis
                .associations
                .iter()
                .filter_map(|a| detections.hypothesis(a.signal_detection_hypothesis_id))
                .collect();
            if associated.is_empty() {
                rows.push_na(&row);
                continue;
            }
            for sdh in associated {
                let mut row = row.clone();
                row.set("arid", arrival_keys.get(sdh.id).map(FieldValue::from))
                    .set("sta", detections.station(sdh.id).map(FieldValue::from));
                fill(&mut row, hypothesis, sdh);
                rows.push(&row);
            }
        }
    }
    rows
}
