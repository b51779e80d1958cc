//! Entity model
//!
//! Entities are immutable snapshots returned by the retrieval layer. The
//! export never mutates them; it only derives keyed flat-file records.
//! Field names follow the camelCase JSON the upstream services produce.

pub mod analysis;
pub mod reference;
pub mod waveform;
