//! SITE table
//!
//! Station versions first, then site versions. Each version spans from its
//! change time (ondate) to the next version's change time (offdate, NA
//! while current). Adjacent versions that would write the same columns
//! share one row spanning the run. Site rows point at their station
//! through `refsta` and carry their offset from it in km.

use super::{EmitContext, TableRows};
use crate::resolve::ReferenceGraph;
use crate::segment::{segment_coalesced, ValidityInterval, Versioned};
use css_core::{ExportError, Scalar, Site, Station, StationType};
use css_format::{FieldValue, Row, Table};

/// Kilometres per degree of latitude
const KM_PER_DEGREE: f64 = 111.195;

/// CSS station type code
pub fn statype(ty: StationType) -> Option<&'static str> {
    match ty {
        StationType::Unknown => None,
        t if t.is_array() => Some("ar"),
        _ => Some("ss"),
    }
}

/// North and east offset of `site` from `reference`, in km, rounded to 0.1 m
pub fn offset_km(reference: (f64, f64), site: (f64, f64)) -> (f64, f64) {
    let round = |v: f64| (v * 10_000.0).round() / 10_000.0;
    let dnorth = (site.0 - reference.0) * KM_PER_DEGREE;
    let deast = (site.1 - reference.1) * KM_PER_DEGREE * reference.0.to_radians().cos();
    (round(dnorth), round(deast))
}

fn coords(lat: &Option<Scalar>, lon: &Option<Scalar>) -> Option<(f64, f64)> {
    Some((lat.as_ref()?.as_f64()?, lon.as_ref()?.as_f64()?))
}

fn dated(row: &mut Row, interval: &ValidityInterval) {
    row.set("ondate", FieldValue::Instant(interval.from))
        .set("offdate", interval.until.at().map(FieldValue::from));
}

fn located(row: &mut Row, lat: &Option<Scalar>, lon: &Option<Scalar>, elev: &Option<Scalar>) {
    row.set("lat", lat.as_ref().map(FieldValue::from))
        .set("lon", lon.as_ref().map(FieldValue::from))
        .set("elev", elev.as_ref().map(FieldValue::from));
}

fn station_row(station: &Station, ctx: &EmitContext) -> Row {
    let mut row = ctx.row(Table::Site);
    row.set("sta", FieldValue::text(&station.name));
    located(
        &mut row,
        &station.latitude,
        &station.longitude,
        &station.elevation,
    );
    row.set("staname", station.description.as_ref().map(FieldValue::from))
        .set("statype", statype(station.station_type).map(FieldValue::from))
        .set("refsta", FieldValue::text(&station.name))
        .set("dnorth", FieldValue::Float(0.0))
        .set("deast", FieldValue::Float(0.0));
    row
}

fn site_row(site: &Site, station: Option<&Station>, ctx: &EmitContext) -> Row {
    let mut row = ctx.row(Table::Site);
    row.set("sta", FieldValue::text(&site.name));
    located(&mut row, &site.latitude, &site.longitude, &site.elevation);
    row.set("staname", site.description.as_ref().map(FieldValue::from))
        .set("statype", FieldValue::text("ss"))
        .set("refsta", station.map(|s| FieldValue::text(&s.name)));
    let offset = station
        .and_then(|s| coords(&s.latitude, &s.longitude))
        .zip(coords(&site.latitude, &site.longitude))
        .map(|(reference, here)| offset_km(reference, here));
    if let Some((dnorth, deast)) = offset {
        row.set("dnorth", FieldValue::Float(dnorth))
            .set("deast", FieldValue::Float(deast));
    }
    row
}

/// Station rows, then site rows
pub fn emit(graph: &ReferenceGraph, ctx: &EmitContext) -> Result<TableRows, ExportError> {
    let mut rows = TableRows::empty(Table::Site);

    for (_, versions) in &graph.stations {
        for seg in segment_coalesced(versions, |s| station_row(s, ctx).render())? {
            let mut row = station_row(seg.entity, ctx);
            dated(&mut row, &seg.interval);
            rows.push(&row);
        }
    }

    for (site_id, versions) in &graph.sites {
        let station_at = move |site: &Site| graph.station_of_site_at(*site_id, site.change_time());
        for seg in segment_coalesced(versions, |s| site_row(s, station_at(s), ctx).render())? {
            let mut row = site_row(seg.entity, station_at(seg.entity), ctx);
            dated(&mut row, &seg.interval);
            rows.push(&row);
        }
    }

    Ok(rows)
}
