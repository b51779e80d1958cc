//! Integration tests for the export pipeline.
//!
//! These tests run whole export modes against an in-memory catalog and
//! inspect the files written to a temporary directory: table contents,
//! side files, short circuits on missing links, and run-to-run stability.
//!
//! Emitter-level column mapping is covered by the unit tests in
//! crates/engine/src/emit/.

#[path = "../common/mod.rs"]
mod common;

mod analysis;
mod properties;
mod reference;
