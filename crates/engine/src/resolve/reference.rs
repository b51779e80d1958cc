//! Reference chain resolution (channel-rooted)

use super::{distinct, required};
use crate::segment::{effective_among, effective_at, ensure_ascending, group_by_entity};
use crate::source::EntitySource;
use chrono::{DateTime, Utc};
use css_core::{
    Calibration, Channel, ExportError, Hop, MembershipStatus, Network, NetworkMembership, Response,
    Sensor, Site, Station, StationMembership, TimeWindow,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Calibrations, sensors and responses of the root channel
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentChain {
    /// Calibrations, each scoped to a channel version
    pub calibrations: Vec<Calibration>,
    /// Sensor versions, ascending
    pub sensors: Vec<Sensor>,
    /// Responses
    pub responses: Vec<Response>,
}

/// Everything the reference tables are written from
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceGraph {
    /// Root channel entity id
    pub channel_id: Uuid,
    /// Versions of the root channel, ascending
    pub channels: Vec<Channel>,
    /// Versions of each site holding the channel
    pub sites: Vec<(Uuid, Vec<Site>)>,
    /// Station memberships of those sites
    pub station_memberships: Vec<StationMembership>,
    /// Versions of each station the sites belong to
    pub stations: Vec<(Uuid, Vec<Station>)>,
    /// Network memberships of those stations
    pub network_memberships: Vec<NetworkMembership>,
    /// Networks the stations belong to, one per entity
    pub networks: Vec<Network>,
    /// Instrument chain, if every part of it resolved
    pub instruments: Option<InstrumentChain>,
}

/// Walk the membership chain from a channel
///
/// Every hop is required; the first empty one aborts with `ResolutionGap`.
/// A version list out of change-time order aborts with `OutOfOrder`.
pub fn resolve_reference<S: EntitySource + ?Sized>(
    source: &S,
    channel_id: Uuid,
    window: &TimeWindow,
) -> Result<ReferenceGraph, ExportError> {
    let channels = required(Hop::Channel, channel_id, source.channels(channel_id, window))?;
    ensure_ascending(&channels)?;

    let site_versions = required(
        Hop::Site,
        channel_id,
        source.sites_by_channel(channel_id, window),
    )?;
    let sites = group_by_entity(&site_versions);
    for (_, versions) in &sites {
        ensure_ascending(versions)?;
    }

    let mut station_memberships = Vec::new();
    for (site_id, _) in &sites {
        let found = required(
            Hop::StationMembership,
            *site_id,
            source.station_memberships(*site_id, window),
        )?;
        for (_, history) in group_by_entity(&found) {
            ensure_ascending(&history)?;
        }
        station_memberships.extend(found);
    }

    let mut stations = Vec::new();
    for station_id in distinct(station_memberships.iter().map(|m| m.station_id)) {
        let versions = required(Hop::Station, station_id, source.stations(station_id, window))?;
        ensure_ascending(&versions)?;
        stations.push((station_id, versions));
    }

    let mut network_memberships = Vec::new();
    for (station_id, _) in &stations {
        let found = required(
            Hop::NetworkMembership,
            *station_id,
            source.network_memberships(*station_id, window),
        )?;
        for network_id in distinct(found.iter().map(|m| m.network_id)) {
            let history: Vec<&NetworkMembership> =
                found.iter().filter(|m| m.network_id == network_id).collect();
            ensure_ascending(&history)?;
        }
        network_memberships.extend(found);
    }

    let mut networks: Vec<Network> = Vec::new();
    for network_id in distinct(network_memberships.iter().map(|m| m.network_id)) {
        let found = required(Hop::Network, network_id, source.networks(network_id, window))?;
        if let Some(latest) = found.into_iter().last() {
            networks.push(latest);
        }
    }

    let instruments = resolve_instruments(source, channel_id, window);

    debug!(
        target: "css::resolve",
        %channel_id,
        channels = channels.len(),
        sites = sites.len(),
        stations = stations.len(),
        networks = networks.len(),
        instruments = instruments.is_some(),
        "Reference graph resolved"
    );

    Ok(ReferenceGraph {
        channel_id,
        channels,
        sites,
        station_memberships,
        stations,
        network_memberships,
        networks,
        instruments,
    })
}

/// The instrument chain is all-or-nothing but optional
fn resolve_instruments<S: EntitySource + ?Sized>(
    source: &S,
    channel_id: Uuid,
    window: &TimeWindow,
) -> Option<InstrumentChain> {
    let calibrations = source.calibrations(channel_id, window).unwrap_or_default();
    let sensors = source.sensors(channel_id, window).unwrap_or_default();
    let responses = source.responses(channel_id, window).unwrap_or_default();
    if calibrations.is_empty() || sensors.is_empty() || responses.is_empty() {
        info!(
            target: "css::resolve",
            %channel_id,
            calibrations = calibrations.len(),
            sensors = sensors.len(),
            responses = responses.len(),
            "Instrument chain incomplete, sensor and instrument tables will be empty"
        );
        return None;
    }
    if let Err(e) = ensure_ascending(&sensors) {
        info!(target: "css::resolve", %channel_id, error = %e, "Sensor versions out of order");
        return None;
    }
    Some(InstrumentChain {
        calibrations,
        sensors,
        responses,
    })
}

impl ReferenceGraph {
    /// Versions of a station
    pub fn station_versions(&self, station_id: Uuid) -> &[Station] {
        self.stations
            .iter()
            .find(|(id, _)| *id == station_id)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// Versions of a site
    pub fn site_versions(&self, site_id: Uuid) -> &[Site] {
        self.sites
            .iter()
            .find(|(id, _)| *id == site_id)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// Channel version by version id
    pub fn channel_version(&self, version_id: Uuid) -> Option<&Channel> {
        self.channels.iter().find(|c| c.version_id == version_id)
    }

    /// Site version holding the channel at `t`, across every site that held it
    pub fn site_at(&self, t: DateTime<Utc>) -> Option<&Site> {
        effective_among(self.sites.iter().map(|(_, v)| v.as_slice()), t)
    }

    /// Version of the station a site belongs to at `t`
    pub fn station_of_site_at(&self, site_id: Uuid, t: DateTime<Utc>) -> Option<&Station> {
        let history: Vec<StationMembership> = self
            .station_memberships
            .iter()
            .filter(|m| m.site_id == site_id && m.status == MembershipStatus::Active)
            .cloned()
            .collect();
        let membership = effective_at(&history, t)?;
        effective_at(self.station_versions(membership.station_id), t)
    }

    /// Station entity ids of a network
    pub fn stations_of_network(&self, network_id: Uuid) -> Vec<Uuid> {
        distinct(
            self.network_memberships
                .iter()
                .filter(|m| m.network_id == network_id && m.status == MembershipStatus::Active)
                .map(|m| m.station_id),
        )
    }
}
