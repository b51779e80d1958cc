//! ARRIVAL table
//!
//! One row per signal detection hypothesis. Each feature measurement fills
//! only the columns its type maps to; everything else stays NA, so a
//! hypothesis without measurements still yields exactly one row.

use super::{EmitContext, TableRows};
use crate::keys::{KeyAllocator, KeyKind, KeyMap};
use crate::resolve::DetectionSet;
use css_core::{FeatureMeasurement, FeatureMeasurementType, SignalDetectionHypothesis};
use css_format::{time, FieldValue, Row, Table};
use uuid::Uuid;

/// arid of each signal detection hypothesis
#[derive(Debug, Clone)]
pub struct ArrivalKeys(KeyMap);

impl ArrivalKeys {
    /// arid of a signal detection hypothesis
    pub fn get(&self, hypothesis_id: Uuid) -> Option<u64> {
        self.0.get(&hypothesis_id)
    }
}

/// Allocate one arid per hypothesis, in retrieval order
pub fn assign_keys(hypotheses: &[SignalDetectionHypothesis], alloc: &mut KeyAllocator) -> ArrivalKeys {
    let mut keys = KeyMap::new(KeyKind::Arid);
    for h in hypotheses {
        keys.assign(h.id, alloc);
    }
    ArrivalKeys(keys)
}

/// Columns filled by a measurement: value column, then standard deviation
/// column where the table has one
fn columns(ty: FeatureMeasurementType) -> Option<(&'static str, Option<&'static str>)> {
    use FeatureMeasurementType as F;
    Some(match ty {
        F::ArrivalTime => ("time", Some("deltim")),
        F::Azimuth => ("azimuth", Some("delaz")),
        F::Slowness => ("slow", Some("delslo")),
        F::EmergenceAngle => ("ema", None),
        F::Rectilinearity => ("rect", None),
        F::Amplitude => ("amp", None),
        F::Period => ("per", None),
        F::Snr => ("snr", None),
        F::Phase => ("iphase", None),
        F::FirstMotion => ("fm", None),
        _ => return None,
    })
}

fn apply(row: &mut Row, fm: &FeatureMeasurement) {
    let Some((value_col, sd_col)) = columns(fm.feature_measurement_type) else {
        return;
    };
    row.set(value_col, fm.value.as_ref().map(FieldValue::from));
    if let Some(sd_col) = sd_col {
        row.set(sd_col, fm.standard_deviation.as_ref().map(FieldValue::from));
    }
    if fm.feature_measurement_type == FeatureMeasurementType::ArrivalTime {
        // jdate follows whichever form filled `time`: ISO text or epoch seconds
        let onset = fm.value.as_ref().and_then(|v| {
            v.as_str()
                .and_then(time::parse_instant)
                .or_else(|| v.as_f64().and_then(time::from_epoch_secs))
        });
        row.set("jdate", onset.map(FieldValue::from));
    }
}

/// One row per signal detection hypothesis
pub fn emit(detections: &DetectionSet, keys: &ArrivalKeys, ctx: &EmitContext) -> TableRows {
    let mut rows = TableRows::empty(Table::Arrival);
    for h in &detections.hypotheses {
        let mut row = ctx.row(Table::Arrival);
        row.set("sta", detections.station(h.id).map(FieldValue::from))
            .set("arid", keys.get(h.id).map(FieldValue::from))
            .set("auth", detections.auth(h.id).map(FieldValue::from));
        for fm in &h.feature_measurements {
            apply(&mut row, fm);
        }
        if h.feature_measurements.is_empty() {
            rows.push_na(&row);
        } else {
            rows.push(&row);
        }
    }
    rows
}
