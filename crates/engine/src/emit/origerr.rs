//! ORIGERR table
//!
//! One row per location solution, keyed by its hypothesis orid. The error
//! ellipse columns come from the first ellipse of the solution's
//! uncertainty. A solution without uncertainty, a hypothesis without
//! location solutions and an event without hypotheses each leave one
//! placeholder row carrying only the orid.

use super::event::EventKeys;
use super::{EmitContext, TableRows};
use css_core::{Event, LocationUncertainty};
use css_format::{FieldValue, Row, Table};

fn fill(row: &mut Row, u: &LocationUncertainty) {
    let pairs = [
        ("sxx", &u.xx),
        ("syy", &u.yy),
        ("szz", &u.zz),
        ("stt", &u.tt),
        ("sxy", &u.xy),
        ("sxz", &u.xz),
        ("syz", &u.yz),
        ("sxt", &u.xt),
        ("syt", &u.yt),
        ("szt", &u.zt),
        ("sdobs", &u.st_dev_one_observation),
    ];
    for (column, value) in pairs {
        row.set(column, value.as_ref().map(FieldValue::from));
    }
    if let Some(e) = u.ellipses.first() {
        let pairs = [
            ("smajax", &e.major_axis_length),
            ("sminax", &e.minor_axis_length),
            ("strike", &e.major_axis_trend),
            ("sdepth", &e.depth_uncertainty),
            ("stime", &e.time_uncertainty),
            ("conf", &e.confidence_level),
        ];
        for (column, value) in pairs {
            row.set(column, value.as_ref().map(FieldValue::from));
        }
    }
}

/// One row per location solution of every event
pub fn emit(events: &[Event], keys: &EventKeys, ctx: &EmitContext) -> TableRows {
    let mut rows = TableRows::empty(Table::Origerr);
    for event in events {
        for slot in keys.origin_slots(event) {
            let mut row = ctx.row(Table::Origerr);
            row.set("orid", slot.orid.map(FieldValue::from));

            let solutions = slot
                .hypothesis
                .map(|h| h.location_solutions.as_slice())
                .unwrap_or(&[]);
            if solutions.is_empty() {
                rows.push_na(&row);
                continue;
            }
            for solution in solutions {
                let mut row = row.clone();
                match &solution.location_uncertainty {
                    Some(u) => {
                        fill(&mut row, u);
                        rows.push(&row);
                    }
                    None => rows.push_na(&row),
                }
            }
        }
    }
    rows
}
