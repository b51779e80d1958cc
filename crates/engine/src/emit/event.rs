//! EVENT table and the evid/orid keys of the analysis tables
//!
//! Every event gets an evid. Every event hypothesis gets an orid, shared by
//! all ORIGIN and ORIGERR rows of its location solutions and by its ASSOC
//! rows. An event without hypotheses still gets one bare orid so that its
//! placeholder ORIGIN, ORIGERR and ASSOC rows have a key to carry.

use super::{EmitContext, TableRows};
use crate::keys::{KeyAllocator, KeyKind, KeyMap};
use css_core::{Event, EventHypothesis};
use css_format::{FieldValue, Table};
use uuid::Uuid;

/// evid and orid assignments of one run
#[derive(Debug, Clone)]
pub struct EventKeys {
    evids: KeyMap,
    orids: KeyMap,
    bare_orids: KeyMap,
}

/// One origin record: an event hypothesis, or the bare placeholder of an
/// event without hypotheses
#[derive(Debug, Clone, Copy)]
pub struct OriginSlot<'a> {
    /// Allocated orid
    pub orid: Option<u64>,
    /// The hypothesis, if the event has any
    pub hypothesis: Option<&'a EventHypothesis>,
}

/// Allocate evids per event and orids per hypothesis, in event order
pub fn assign_keys(events: &[Event], alloc: &mut KeyAllocator) -> EventKeys {
    let mut keys = EventKeys {
        evids: KeyMap::new(KeyKind::Evid),
        orids: KeyMap::new(KeyKind::Orid),
        bare_orids: KeyMap::new(KeyKind::Orid),
    };
    for event in events {
        keys.evids.assign(event.id, alloc);
        if event.hypotheses.is_empty() {
            keys.bare_orids.assign(event.id, alloc);
        }
        for hypothesis in &event.hypotheses {
            keys.orids.assign(hypothesis.id, alloc);
        }
    }
    keys
}

impl EventKeys {
    /// evid of an event
    pub fn evid(&self, event_id: Uuid) -> Option<u64> {
        self.evids.get(&event_id)
    }

    /// orid of an event hypothesis
    pub fn orid(&self, hypothesis_id: Uuid) -> Option<u64> {
        self.orids.get(&hypothesis_id)
    }

    /// Placeholder orid of an event without hypotheses
    pub fn bare_orid(&self, event_id: Uuid) -> Option<u64> {
        self.bare_orids.get(&event_id)
    }

    /// Origin records of an event, in hypothesis order
    pub fn origin_slots<'a>(&self, event: &'a Event) -> Vec<OriginSlot<'a>> {
        if event.hypotheses.is_empty() {
            return vec![OriginSlot {
                orid: self.bare_orid(event.id),
                hypothesis: None,
            }];
        }
        event
            .hypotheses
            .iter()
            .map(|h| OriginSlot {
                orid: self.orid(h.id),
                hypothesis: Some(h),
            })
            .collect()
    }

    /// orid the EVENT row names as preferred
    pub fn prefor(&self, event: &Event) -> Option<u64> {
        match event.preferred_hypothesis_id() {
            Some(id) => self.orid(id),
            None => self.bare_orid(event.id),
        }
    }
}

/// One row per event
pub fn emit(events: &[Event], keys: &EventKeys, ctx: &EmitContext) -> TableRows {
    let mut rows = TableRows::empty(Table::Event);
    for event in events {
        let mut row = ctx.row(Table::Event);
        row.set("evid", keys.evid(event.id).map(FieldValue::from))
            .set("prefor", keys.prefor(event).map(FieldValue::from))
            .set(
                "auth",
                event.monitoring_organization.as_ref().map(FieldValue::from),
            );
        rows.push(&row);
    }
    rows
}
