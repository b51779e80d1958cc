//! INSTRUMENT table
//!
//! One row per inid. The response payload arrives base64 encoded; it is
//! decoded into a `<prefix>.<inid>.resp` side file named in `dfile`. SENSOR
//! rows point at every inid, so a response file that cannot be written
//! leaves the row in place with `dir` and `dfile` NA.

use super::sensor::InstrumentKeys;
use super::{EmitContext, Sidecar, TableRows};
use crate::resolve::ReferenceGraph;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use css_core::{Response, Sensor};
use css_format::{FieldValue, Table};
use tracing::{debug, warn};

/// Side file extension of response payloads
pub const RESPONSE_EXT: &str = "resp";

/// `manufacturer model`, whichever parts are known
fn insname(sensor: &Sensor) -> Option<String> {
    let parts: Vec<&str> = [&sensor.instrument_manufacturer, &sensor.instrument_model]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn decode_response(response: &Response, inid: u64) -> Option<Vec<u8>> {
    let Some(data) = &response.response_data else {
        debug!(target: "css::export", inid, "Response has no payload");
        return None;
    };
    match BASE64.decode(data.trim()) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(target: "css::export", inid, error = %e, "Undecodable response payload, dfile left NA");
            None
        }
    }
}

/// One row per instrument combination; empty without an instrument chain
pub fn emit(graph: &ReferenceGraph, keys: &InstrumentKeys, ctx: &EmitContext) -> TableRows {
    let mut rows = TableRows::empty(Table::Instrument);
    let Some(chain) = &graph.instruments else {
        return rows;
    };

    for combo in keys.combos() {
        let (Some(sensor), Some(cal), Some(response)) = (
            chain.sensors.get(combo.sensor),
            chain.calibrations.get(combo.calibration),
            chain.responses.get(combo.response),
        ) else {
            continue;
        };
        let channel = graph.channel_version(cal.channel_id);

        let mut row = ctx.row(Table::Instrument);
        row.set("inid", FieldValue::Unsigned(combo.inid))
            .set("insname", insname(sensor).map(FieldValue::from))
            .set("instype", sensor.instrument_model.as_ref().map(FieldValue::from))
            .set("digital", FieldValue::text("d"))
            .set(
                "samprate",
                channel
                    .and_then(|c| c.nominal_sample_rate.as_ref())
                    .map(FieldValue::from),
            )
            .set("ncalib", cal.calibration_factor.as_ref().map(FieldValue::from))
            .set("ncalper", cal.calibration_period.as_ref().map(FieldValue::from))
            .set("rsptype", response.response_type.as_ref().map(FieldValue::from));

        match decode_response(response, combo.inid) {
            Some(bytes) => {
                let file_name = ctx.side_file(combo.inid, RESPONSE_EXT);
                row.set("dir", FieldValue::text("."))
                    .set("dfile", FieldValue::text(&file_name));
                rows.push_with_detachable_sidecar(
                    &row,
                    Sidecar { file_name, bytes },
                    &["dir", "dfile"],
                );
            }
            None => rows.push(&row),
        }
    }
    rows
}
