//! Waveform resolution
//!
//! Channel versions and segments are required; sites, calibrations and
//! sensors only fill descriptive WFDISC columns and may be missing.

use super::required;
use crate::segment::{effective_among, effective_at, ensure_ascending, group_by_entity};
use crate::source::EntitySource;
use chrono::{DateTime, Utc};
use css_core::{
    Calibration, Channel, ChannelSegment, ExportError, Hop, Sensor, Site, TimeWindow,
};
use tracing::debug;
use uuid::Uuid;

/// Everything the WFDISC table is written from
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformGraph {
    /// Root channel entity id
    pub channel_id: Uuid,
    /// Versions of the channel, ascending
    pub channels: Vec<Channel>,
    /// Versions of each site holding the channel
    pub sites: Vec<(Uuid, Vec<Site>)>,
    /// Calibrations of the channel versions
    pub calibrations: Vec<Calibration>,
    /// Sensor versions, ascending
    pub sensors: Vec<Sensor>,
    /// Waveform segments, in acquisition order
    pub segments: Vec<ChannelSegment>,
}

/// Resolve a channel's waveform segments and their context
pub fn resolve_waveforms<S: EntitySource + ?Sized>(
    source: &S,
    channel_id: Uuid,
    window: &TimeWindow,
) -> Result<WaveformGraph, ExportError> {
    let channels = required(Hop::Channel, channel_id, source.channels(channel_id, window))?;
    ensure_ascending(&channels)?;
    let mut segments = required(
        Hop::ChannelSegment,
        channel_id,
        source.channel_segments(channel_id, window),
    )?;
    segments.sort_by_key(|s| s.start_time);

    let sites = source
        .sites_by_channel(channel_id, window)
        .map(|versions| group_by_entity(&versions))
        .unwrap_or_default();
    let calibrations = source.calibrations(channel_id, window).unwrap_or_default();
    let sensors = source.sensors(channel_id, window).unwrap_or_default();
    ensure_ascending(&sensors)?;

    debug!(
        target: "css::resolve",
        %channel_id,
        segments = segments.len(),
        sites = sites.len(),
        calibrations = calibrations.len(),
        sensors = sensors.len(),
        "Waveform graph resolved"
    );

    Ok(WaveformGraph {
        channel_id,
        channels,
        sites,
        calibrations,
        sensors,
        segments,
    })
}

impl WaveformGraph {
    /// Channel version current at `t`
    pub fn channel_at(&self, t: DateTime<Utc>) -> Option<&Channel> {
        effective_at(&self.channels, t)
    }

    /// Site version holding the channel at `t`
    pub fn site_at(&self, t: DateTime<Utc>) -> Option<&Site> {
        effective_among(self.sites.iter().map(|(_, v)| v.as_slice()), t)
    }

    /// Sensor version current at `t`
    pub fn sensor_at(&self, t: DateTime<Utc>) -> Option<&Sensor> {
        effective_at(&self.sensors, t)
    }

    /// Calibration of a channel version
    pub fn calibration_for(&self, channel_version: Uuid) -> Option<&Calibration> {
        self.calibrations
            .iter()
            .find(|c| c.channel_id == channel_version)
    }
}
