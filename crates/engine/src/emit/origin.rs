//! ORIGIN table
//!
//! One row per location solution, all solutions of a hypothesis sharing its
//! orid. Placeholder rows (hypothesis without solutions, event without
//! hypotheses) carry only orid and evid, so ORIGIN and ORIGERR always have
//! the same row count.

use super::event::EventKeys;
use super::{EmitContext, TableRows};
use css_core::{DepthRestraintType, Event, EventHypothesis, LocationRestraint, LocationSolution};
use css_format::{FieldValue, Row, Table};

/// CSS depth type: `f` for a free depth, `r` for a restrained one
pub fn dtype(restraint: Option<&LocationRestraint>) -> Option<&'static str> {
    match restraint?.depth_restraint_type {
        DepthRestraintType::Unrestrained => Some("f"),
        DepthRestraintType::FixedAtSurface | DepthRestraintType::FixedAtDepth => Some("r"),
        DepthRestraintType::Unknown => None,
    }
}

fn fill(row: &mut Row, hypothesis: &EventHypothesis, solution: &LocationSolution) {
    let loc = &solution.location;
    let defining = solution
        .location_behaviors
        .iter()
        .filter(|b| b.defining)
        .count();
    row.set("lat", loc.latitude_degrees.as_ref().map(FieldValue::from))
        .set("lon", loc.longitude_degrees.as_ref().map(FieldValue::from))
        .set("depth", loc.depth_km.as_ref().map(FieldValue::from))
        .set("time", loc.time.map(FieldValue::from))
        .set("jdate", loc.time.map(FieldValue::from))
        .set("nass", FieldValue::from(hypothesis.associations.len()))
        .set("ndef", FieldValue::from(defining))
        .set(
            "dtype",
            dtype(solution.location_restraint.as_ref()).map(FieldValue::from),
        );
}

/// One row per location solution of every event
pub fn emit(events: &[Event], keys: &EventKeys, ctx: &EmitContext) -> TableRows {
    let mut rows = TableRows::empty(Table::Origin);
    for event in events {
        let evid = keys.evid(event.id);
        for slot in keys.origin_slots(event) {
            let mut row = ctx.row(Table::Origin);
            row.set("orid", slot.orid.map(FieldValue::from))
                .set("evid", evid.map(FieldValue::from));

            let Some(hypothesis) = slot.hypothesis.filter(|h| !h.location_solutions.is_empty())
            else {
                rows.push_na(&row);
                continue;
            };
            row.set(
                "auth",
                event.monitoring_organization.as_ref().map(FieldValue::from),
            );
            for solution in &hypothesis.location_solutions {
                let mut row = row.clone();
                fill(&mut row, hypothesis, solution);
                rows.push(&row);
            }
        }
    }
    rows
}
