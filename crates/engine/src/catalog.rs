//! In-memory entity catalog
//!
//! A bundle of entity collections, typically deserialized from a JSON dump
//! of the retrieval services, answering `EntitySource` queries with the
//! same scoping rules: id match plus a time window on change time.
//!
//! Window rule for versioned entities: a version is returned if it becomes
//! effective before the window ends and is not superseded at or before the
//! window starts.

use crate::resolve::distinct;
use crate::segment::{group_by_entity, Versioned};
use crate::source::EntitySource;
use css_core::{
    Calibration, Channel, ChannelSegment, Event, Network, NetworkMembership, Response, Sensor,
    SignalDetection, SignalDetectionHypothesis, Site, Station, StationMembership, TimeWindow,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Channel held by a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteChannel {
    /// Site entity id
    pub site_id: Uuid,
    /// Channel entity id
    pub channel_id: Uuid,
}

/// An entity the source model attaches to a channel only by query scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelScoped<T> {
    /// Channel entity id
    pub channel_id: Uuid,
    /// The entity
    #[serde(flatten)]
    pub item: T,
}

/// Entity collections answering retrieval queries from memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    /// Networks
    pub networks: Vec<Network>,
    /// Network memberships
    pub network_memberships: Vec<NetworkMembership>,
    /// Station versions
    pub stations: Vec<Station>,
    /// Station memberships
    pub station_memberships: Vec<StationMembership>,
    /// Site versions
    pub sites: Vec<Site>,
    /// Site → channel relation
    pub site_channels: Vec<SiteChannel>,
    /// Channel versions
    pub channels: Vec<Channel>,
    /// Calibrations
    pub calibrations: Vec<Calibration>,
    /// Sensors per channel
    pub sensors: Vec<ChannelScoped<Sensor>>,
    /// Responses per channel
    pub responses: Vec<ChannelScoped<Response>>,
    /// Waveform segments
    pub channel_segments: Vec<ChannelSegment>,
    /// Events
    pub events: Vec<Event>,
    /// Signal detection hypotheses
    pub signal_detection_hypotheses: Vec<SignalDetectionHypothesis>,
    /// Signal detections
    pub signal_detections: Vec<SignalDetection>,
}

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("Failed to read catalog '{}': {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Content is not a catalog
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Catalog {
    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Serialize the catalog to pretty JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn channel_version_ids(&self, channel_id: Uuid) -> Vec<Uuid> {
        self.channels
            .iter()
            .filter(|c| c.entity_id == channel_id)
            .map(|c| c.version_id)
            .collect()
    }

    fn scoped<T: Clone>(items: &[ChannelScoped<T>], channel_id: Uuid) -> Vec<T> {
        items
            .iter()
            .filter(|s| s.channel_id == channel_id)
            .map(|s| s.item.clone())
            .collect()
    }
}

fn found<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Versions current at some point inside the window
pub fn versions_in_window<T: Versioned + Clone>(versions: &[T], window: &TimeWindow) -> Vec<T> {
    let mut out = Vec::new();
    for (_, group) in group_by_entity(versions) {
        for (i, v) in group.iter().enumerate() {
            let superseded = match (group.get(i + 1), window.start) {
                (Some(next), Some(start)) => next.change_time() <= start,
                _ => false,
            };
            let started = window.end.map_or(true, |end| v.change_time() < end);
            if started && !superseded {
                out.push(v.clone());
            }
        }
    }
    out
}

fn located_in(event: &Event, window: &TimeWindow) -> bool {
    event
        .hypotheses
        .iter()
        .flat_map(|h| h.location_solutions.iter())
        .filter_map(|ls| ls.location.time)
        .any(|t| window.contains(t))
}

fn by_ids<T: Clone>(items: &[T], ids: &[Uuid], id: impl Fn(&T) -> Uuid) -> Vec<T> {
    ids.iter()
        .filter_map(|wanted| items.iter().find(|item| id(item) == *wanted))
        .cloned()
        .collect()
}

impl EntitySource for Catalog {
    fn channels(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Channel>> {
        debug!(target: "css::catalog", %channel_id, "channels");
        let versions: Vec<Channel> = self
            .channels
            .iter()
            .filter(|c| c.entity_id == channel_id)
            .cloned()
            .collect();
        found(versions_in_window(&versions, window))
    }

    fn sites_by_channel(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Site>> {
        debug!(target: "css::catalog", %channel_id, "sites by channel");
        let site_ids: Vec<Uuid> = self
            .site_channels
            .iter()
            .filter(|sc| sc.channel_id == channel_id)
            .map(|sc| sc.site_id)
            .collect();
        let versions: Vec<Site> = self
            .sites
            .iter()
            .filter(|s| site_ids.contains(&s.entity_id))
            .cloned()
            .collect();
        found(versions_in_window(&versions, window))
    }

    fn station_memberships(
        &self,
        site_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<StationMembership>> {
        debug!(target: "css::catalog", %site_id, "station memberships");
        let memberships: Vec<StationMembership> = self
            .station_memberships
            .iter()
            .filter(|m| m.site_id == site_id)
            .cloned()
            .collect();
        found(versions_in_window(&memberships, window))
    }

    fn stations(&self, station_id: Uuid, window: &TimeWindow) -> Option<Vec<Station>> {
        debug!(target: "css::catalog", %station_id, "stations");
        let versions: Vec<Station> = self
            .stations
            .iter()
            .filter(|s| s.entity_id == station_id)
            .cloned()
            .collect();
        found(versions_in_window(&versions, window))
    }

    fn network_memberships(
        &self,
        station_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<NetworkMembership>> {
        debug!(target: "css::catalog", %station_id, "network memberships");
        let memberships: Vec<NetworkMembership> = self
            .network_memberships
            .iter()
            .filter(|m| m.station_id == station_id)
            .cloned()
            .collect();
        let mut in_window = Vec::new();
        for network_id in distinct(memberships.iter().map(|m| m.network_id)) {
            let history: Vec<NetworkMembership> = memberships
                .iter()
                .filter(|m| m.network_id == network_id)
                .cloned()
                .collect();
            in_window.extend(versions_in_window(&history, window));
        }
        found(in_window)
    }

    fn networks(&self, network_id: Uuid, window: &TimeWindow) -> Option<Vec<Network>> {
        debug!(target: "css::catalog", %network_id, "networks");
        found(
            self.networks
                .iter()
                .filter(|n| n.entity_id == network_id)
                .filter(|n| {
                    n.system_change_time
                        .map_or(true, |t| window.end.map_or(true, |end| t < end))
                })
                .cloned()
                .collect(),
        )
    }

    fn calibrations(&self, channel_id: Uuid, _window: &TimeWindow) -> Option<Vec<Calibration>> {
        let versions = self.channel_version_ids(channel_id);
        found(
            self.calibrations
                .iter()
                .filter(|c| c.channel_id == channel_id || versions.contains(&c.channel_id))
                .cloned()
                .collect(),
        )
    }

    fn sensors(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Sensor>> {
        let sensors = Self::scoped(&self.sensors, channel_id);
        found(versions_in_window(&sensors, window))
    }

    fn responses(&self, channel_id: Uuid, _window: &TimeWindow) -> Option<Vec<Response>> {
        found(Self::scoped(&self.responses, channel_id))
    }

    fn channel_segments(
        &self,
        channel_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<ChannelSegment>> {
        debug!(target: "css::catalog", %channel_id, "channel segments");
        let versions = self.channel_version_ids(channel_id);
        found(
            self.channel_segments
                .iter()
                .filter(|s| s.channel_id == channel_id || versions.contains(&s.channel_id))
                .filter(|s| window.overlaps(s.start_time, s.end_time))
                .cloned()
                .collect(),
        )
    }

    fn events(&self, ids: &[Uuid]) -> Option<Vec<Event>> {
        found(by_ids(&self.events, ids, |e| e.id))
    }

    fn events_in_window(&self, window: &TimeWindow) -> Option<Vec<Event>> {
        found(
            self.events
                .iter()
                .filter(|e| located_in(e, window))
                .cloned()
                .collect(),
        )
    }

    fn signal_detection_hypotheses(&self, ids: &[Uuid]) -> Option<Vec<SignalDetectionHypothesis>> {
        found(by_ids(&self.signal_detection_hypotheses, ids, |h| h.id))
    }

    fn signal_detections(&self, ids: &[Uuid]) -> Option<Vec<SignalDetection>> {
        found(by_ids(&self.signal_detections, ids, |d| d.id))
    }
}
