//! WFDISC table and `.w` sample files
//!
//! One row and one side file per waveform segment. Each side file holds
//! exactly one segment's samples, so `foff` is always 0.
//!
//! Sample formats (CSS `datatype` codes):
//! - `s4` / `i4`: 32-bit integer, big / little endian
//! - `t4` / `f4`: 32-bit IEEE float, big / little endian
//! - `t8` / `f8`: 64-bit IEEE float, big / little endian
//!
//! Integer formats round to nearest and saturate at the i32 range.

use super::sitechan::ChannelKeys;
use super::{EmitContext, Sidecar, TableRows};
use crate::keys::{KeyAllocator, KeyKind};
use crate::resolve::WaveformGraph;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use css_format::{FieldValue, Table};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::warn;

/// Side file extension of waveform samples
pub const WAVEFORM_EXT: &str = "w";

/// Binary encoding of waveform samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Big-endian i32
    S4,
    /// Little-endian i32
    I4,
    /// Big-endian f32
    #[default]
    T4,
    /// Little-endian f32
    F4,
    /// Big-endian f64
    T8,
    /// Little-endian f64
    F8,
}

impl SampleFormat {
    /// CSS `datatype` code
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleFormat::S4 => "s4",
            SampleFormat::I4 => "i4",
            SampleFormat::T4 => "t4",
            SampleFormat::F4 => "f4",
            SampleFormat::T8 => "t8",
            SampleFormat::F8 => "f8",
        }
    }

    /// Bytes per sample
    pub fn sample_size(&self) -> usize {
        match self {
            SampleFormat::T8 | SampleFormat::F8 => 8,
            _ => 4,
        }
    }

    /// Write samples in this format
    pub fn write_samples<W: Write>(&self, values: &[f64], out: &mut W) -> io::Result<()> {
        for &v in values {
            match self {
                SampleFormat::S4 => out.write_i32::<BigEndian>(v.round() as i32)?,
                SampleFormat::I4 => out.write_i32::<LittleEndian>(v.round() as i32)?,
                SampleFormat::T4 => out.write_f32::<BigEndian>(v as f32)?,
                SampleFormat::F4 => out.write_f32::<LittleEndian>(v as f32)?,
                SampleFormat::T8 => out.write_f64::<BigEndian>(v)?,
                SampleFormat::F8 => out.write_f64::<LittleEndian>(v)?,
            }
        }
        Ok(())
    }

    /// Samples as a byte buffer
    pub fn encode(&self, values: &[f64]) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(values.len() * self.sample_size());
        self.write_samples(values, &mut buf)?;
        Ok(buf)
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row plus sample file per segment, each with a fresh wfid
pub fn emit(
    graph: &WaveformGraph,
    channel_keys: &ChannelKeys,
    alloc: &mut KeyAllocator,
    ctx: &EmitContext,
) -> TableRows {
    let mut rows = TableRows::empty(Table::Wfdisc);
    let format = ctx.sample_format;

    for seg in &graph.segments {
        let start = seg.start_time;
        let channel = graph.channel_at(start);
        let calibration = channel.and_then(|c| graph.calibration_for(c.version_id));
        let wfid = alloc.allocate(KeyKind::Wfid);

        if seg.values.len() as u64 != seg.sample_count {
            warn!(
                target: "css::export",
                wfid,
                segment = %seg.id,
                declared = seg.sample_count,
                actual = seg.values.len(),
                "Sample count mismatch, writing actual count"
            );
        }
        let bytes = match format.encode(&seg.values) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(target: "css::export", wfid, error = %e, "Cannot encode samples, dropping row");
                continue;
            }
        };
        let file_name = ctx.side_file(wfid, WAVEFORM_EXT);

        let mut row = ctx.row(Table::Wfdisc);
        row.set("sta", graph.site_at(start).map(|s| FieldValue::text(&s.name)))
            .set("chan", channel.map(|c| FieldValue::text(&c.name)))
            .set("time", FieldValue::Instant(start))
            .set("wfid", FieldValue::Unsigned(wfid))
            .set(
                "chanid",
                channel
                    .and_then(|c| channel_keys.get(c.version_id))
                    .map(FieldValue::from),
            )
            .set("jdate", FieldValue::Instant(start))
            .set("endtime", FieldValue::Instant(seg.end_time))
            .set("nsamp", FieldValue::from(seg.values.len()))
            .set("samprate", FieldValue::Float(seg.sample_rate))
            .set(
                "calib",
                calibration
                    .and_then(|c| c.calibration_factor.as_ref())
                    .map(FieldValue::from),
            )
            .set(
                "calper",
                calibration
                    .and_then(|c| c.calibration_period.as_ref())
                    .map(FieldValue::from),
            )
            .set(
                "instype",
                graph
                    .sensor_at(start)
                    .and_then(|s| s.instrument_model.as_ref())
                    .map(FieldValue::from),
            )
            .set("segtype", FieldValue::text("o"))
            .set("datatype", FieldValue::text(format.as_str()))
            .set("dir", FieldValue::text("."))
            .set("dfile", FieldValue::text(&file_name))
            .set("foff", FieldValue::Int(0));
        rows.push_with_sidecar(&row, Sidecar { file_name, bytes });
    }
    rows
}
