//! AFFILIATION table
//!
//! Network → station pairs from network memberships, then station → site
//! pairs from station memberships (array convention: `net` holds the
//! station name, `sta` the element site). Adjacent membership versions
//! with the same status collapse into one run; each active run is a row.

use super::{EmitContext, TableRows};
use crate::resolve::ReferenceGraph;
use crate::segment::{effective_at, segment_coalesced};
use css_core::{ExportError, MembershipStatus, StationMembership};
use css_format::{FieldValue, Table};

/// Network rows, then station/site rows
pub fn emit(graph: &ReferenceGraph, ctx: &EmitContext) -> Result<TableRows, ExportError> {
    let mut rows = TableRows::empty(Table::Affiliation);

    for net in &graph.networks {
        for station_id in graph.stations_of_network(net.entity_id) {
            let Some(station) = graph.station_versions(station_id).last() else {
                continue;
            };
            let mut row = ctx.row(Table::Affiliation);
            row.set("net", FieldValue::text(&net.name))
                .set("sta", FieldValue::text(&station.name));
            rows.push(&row);
        }
    }

    for (station_id, station_versions) in &graph.stations {
        for (site_id, site_versions) in &graph.sites {
            let history: Vec<StationMembership> = graph
                .station_memberships
                .iter()
                .filter(|m| m.station_id == *station_id && m.site_id == *site_id)
                .cloned()
                .collect();
            for run in segment_coalesced(&history, |m| m.status)? {
                if run.entity.status != MembershipStatus::Active {
                    continue;
                }
                let at = run.interval.from;
                let (Some(station), Some(site)) = (
                    effective_at(station_versions, at),
                    effective_at(site_versions, at),
                ) else {
                    continue;
                };
                let mut row = ctx.row(Table::Affiliation);
                row.set("net", FieldValue::text(&station.name))
                    .set("sta", FieldValue::text(&site.name));
                rows.push(&row);
            }
        }
    }

    Ok(rows)
}
