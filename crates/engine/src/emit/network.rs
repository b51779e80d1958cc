//! NETWORK table

use super::{EmitContext, TableRows};
use crate::resolve::ReferenceGraph;
use css_core::{Network, NetworkRegion};
use css_format::{FieldValue, Table};

/// Two-letter network type code
pub fn nettype(region: NetworkRegion) -> Option<&'static str> {
    match region {
        NetworkRegion::Global => Some("ww"),
        NetworkRegion::Regional => Some("ar"),
        NetworkRegion::Local => Some("LO"),
        NetworkRegion::Unknown => None,
    }
}

/// One row per network
pub fn emit(graph: &ReferenceGraph, ctx: &EmitContext) -> TableRows {
    emit_networks(&graph.networks, ctx)
}

/// One row per network, from bare networks
pub fn emit_networks(networks: &[Network], ctx: &EmitContext) -> TableRows {
    let mut rows = TableRows::empty(Table::Network);
    for net in networks {
        let mut row = ctx.row(Table::Network);
        row.set("net", FieldValue::text(&net.name))
            .set("netname", net.description.as_ref().map(FieldValue::from))
            .set("nettype", nettype(net.region).map(FieldValue::from))
            .set(
                "auth",
                net.originating_organization.as_ref().map(FieldValue::from),
            )
            .set("lddate", net.system_change_time.or(ctx.load_date).map(FieldValue::from));
        rows.push(&row);
    }
    rows
}
