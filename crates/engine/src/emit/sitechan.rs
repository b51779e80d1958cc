//! SITECHAN table
//!
//! One row per channel version. The chanid allocated here is the foreign
//! key SENSOR and WFDISC rows point at, so keys are assigned before any of
//! those tables is emitted.

use super::{EmitContext, TableRows};
use crate::keys::{KeyAllocator, KeyKind, KeyMap};
use crate::resolve::ReferenceGraph;
use crate::segment::segment;
use css_core::{Channel, ExportError};
use css_format::{FieldValue, Table};
use uuid::Uuid;

/// chanid of each channel version
#[derive(Debug, Clone)]
pub struct ChannelKeys(KeyMap);

impl ChannelKeys {
    /// chanid of a channel version
    pub fn get(&self, version_id: Uuid) -> Option<u64> {
        self.0.get(&version_id)
    }

    /// Number of keyed versions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no version is keyed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Allocate one chanid per channel version, in version order
pub fn assign_keys(channels: &[Channel], alloc: &mut KeyAllocator) -> ChannelKeys {
    let mut keys = KeyMap::new(KeyKind::Chanid);
    for channel in channels {
        keys.assign(channel.version_id, alloc);
    }
    ChannelKeys(keys)
}

/// One row per channel version
pub fn emit(
    graph: &ReferenceGraph,
    keys: &ChannelKeys,
    ctx: &EmitContext,
) -> Result<TableRows, ExportError> {
    let mut rows = TableRows::empty(Table::Sitechan);
    for seg in segment(&graph.channels)? {
        let channel = seg.entity;
        let site = graph.site_at(seg.interval.from);
        let mut row = ctx.row(Table::Sitechan);
        row.set("sta", site.map(|s| FieldValue::text(&s.name)))
            .set("chan", FieldValue::text(&channel.name))
            .set("ondate", FieldValue::Instant(seg.interval.from))
            .set("chanid", keys.get(channel.version_id).map(FieldValue::from))
            .set("offdate", seg.interval.until.at().map(FieldValue::from))
            .set("ctype", FieldValue::text("n"))
            .set("edepth", channel.depth.as_ref().map(FieldValue::from))
            .set("hang", channel.horizontal_angle.as_ref().map(FieldValue::from))
            .set("vang", channel.vertical_angle.as_ref().map(FieldValue::from))
            .set("descrip", channel.description.as_ref().map(FieldValue::from));
        rows.push(&row);
    }
    Ok(rows)
}
