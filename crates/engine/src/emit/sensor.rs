//! SENSOR table
//!
//! One row per sensor × calibration × response combination, each with its
//! own inid. The combinations and their keys are shared with INSTRUMENT,
//! which writes one row per inid.

use super::sitechan::ChannelKeys;
use super::{EmitContext, TableRows};
use crate::keys::{KeyAllocator, KeyKind};
use crate::resolve::{InstrumentChain, ReferenceGraph};
use crate::segment::segment;
use css_core::ExportError;
use css_format::{FieldValue, Table};

/// One instrument combination, by position in the chain's collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combo {
    /// Allocated instrument id
    pub inid: u64,
    /// Index into `InstrumentChain::sensors`
    pub sensor: usize,
    /// Index into `InstrumentChain::calibrations`
    pub calibration: usize,
    /// Index into `InstrumentChain::responses`
    pub response: usize,
}

/// inid of every instrument combination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentKeys {
    combos: Vec<Combo>,
}

impl InstrumentKeys {
    /// Combinations in allocation order
    pub fn combos(&self) -> &[Combo] {
        &self.combos
    }

    /// Number of combinations
    pub fn len(&self) -> usize {
        self.combos.len()
    }

    /// Whether there are no combinations
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }
}

/// Allocate one inid per sensor × calibration × response combination
pub fn assign_instrument_keys(chain: &InstrumentChain, alloc: &mut KeyAllocator) -> InstrumentKeys {
    let mut combos = Vec::new();
    for sensor in 0..chain.sensors.len() {
        for calibration in 0..chain.calibrations.len() {
            for response in 0..chain.responses.len() {
                combos.push(Combo {
                    inid: alloc.allocate(KeyKind::Inid),
                    sensor,
                    calibration,
                    response,
                });
            }
        }
    }
    InstrumentKeys { combos }
}

/// One row per instrument combination; empty without an instrument chain
pub fn emit(
    graph: &ReferenceGraph,
    channel_keys: &ChannelKeys,
    keys: &InstrumentKeys,
    ctx: &EmitContext,
) -> Result<TableRows, ExportError> {
    let mut rows = TableRows::empty(Table::Sensor);
    let Some(chain) = &graph.instruments else {
        return Ok(rows);
    };
    let sensor_segments = segment(&chain.sensors)?;

    for combo in keys.combos() {
        let (Some(seg), Some(cal)) = (
            sensor_segments.get(combo.sensor),
            chain.calibrations.get(combo.calibration),
        ) else {
            continue;
        };
        let channel = graph.channel_version(cal.channel_id);
        let site = channel.and_then(|c| graph.site_at(c.actual_time));

        let mut row = ctx.row(Table::Sensor);
        row.set("sta", site.map(|s| FieldValue::text(&s.name)))
            .set("chan", channel.map(|c| FieldValue::text(&c.name)))
            .set("time", FieldValue::Instant(seg.interval.from))
            .set("endtime", seg.interval.until.at().map(FieldValue::from))
            .set("inid", FieldValue::Unsigned(combo.inid))
            .set("chanid", channel_keys.get(cal.channel_id).map(FieldValue::from))
            .set("jdate", FieldValue::Instant(seg.interval.from))
            .set(
                "calratio",
                cal.calibration_conversion_ratio.as_ref().map(FieldValue::from),
            )
            .set("calper", cal.calibration_period.as_ref().map(FieldValue::from))
            .set("tshift", cal.time_shift.as_ref().map(FieldValue::from))
            .set("instant", FieldValue::text("y"));
        rows.push(&row);
    }
    Ok(rows)
}
