//! Entity retrieval seam
//!
//! The engine never fetches anything itself. Every hop of the resolver is a
//! blocking call on an `EntitySource`, scoped by one id and (for versioned
//! collections) a time window. `None` means the retrieval layer found
//! nothing; the resolver treats it the same as an empty collection.

use css_core::{
    Calibration, Channel, ChannelSegment, Event, Network, NetworkMembership, Response, Sensor,
    SignalDetection, SignalDetectionHypothesis, Site, Station, StationMembership, TimeWindow,
};
use uuid::Uuid;

/// Retrieval collaborator
pub trait EntitySource {
    /// Versions of a channel, ascending by change time
    fn channels(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Channel>>;

    /// Versions of the sites that hold a channel
    fn sites_by_channel(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Site>>;

    /// Station memberships of a site
    fn station_memberships(
        &self,
        site_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<StationMembership>>;

    /// Versions of a station
    fn stations(&self, station_id: Uuid, window: &TimeWindow) -> Option<Vec<Station>>;

    /// Network memberships of a station
    fn network_memberships(
        &self,
        station_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<NetworkMembership>>;

    /// Networks by id
    fn networks(&self, network_id: Uuid, window: &TimeWindow) -> Option<Vec<Network>>;

    /// Calibrations of any version of a channel
    fn calibrations(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Calibration>>;

    /// Sensor versions installed on a channel
    fn sensors(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Sensor>>;

    /// Responses of a channel
    fn responses(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Response>>;

    /// Waveform segments of a channel overlapping the window
    fn channel_segments(
        &self,
        channel_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<ChannelSegment>>;

    /// Events by id
    fn events(&self, ids: &[Uuid]) -> Option<Vec<Event>>;

    /// Events located inside the window
    fn events_in_window(&self, window: &TimeWindow) -> Option<Vec<Event>>;

    /// Signal detection hypotheses by id
    fn signal_detection_hypotheses(&self, ids: &[Uuid]) -> Option<Vec<SignalDetectionHypothesis>>;

    /// Signal detections by id
    fn signal_detections(&self, ids: &[Uuid]) -> Option<Vec<SignalDetection>>;
}

impl<S: EntitySource + ?Sized> EntitySource for &S {
    fn channels(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Channel>> {
        (**self).channels(channel_id, window)
    }

    fn sites_by_channel(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Site>> {
        (**self).sites_by_channel(channel_id, window)
    }

    fn station_memberships(
        &self,
        site_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<StationMembership>> {
        (**self).station_memberships(site_id, window)
    }

    fn stations(&self, station_id: Uuid, window: &TimeWindow) -> Option<Vec<Station>> {
        (**self).stations(station_id, window)
    }

    fn network_memberships(
        &self,
        station_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<NetworkMembership>> {
        (**self).network_memberships(station_id, window)
    }

    fn networks(&self, network_id: Uuid, window: &TimeWindow) -> Option<Vec<Network>> {
        (**self).networks(network_id, window)
    }

    fn calibrations(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Calibration>> {
        (**self).calibrations(channel_id, window)
    }

    fn sensors(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Sensor>> {
        (**self).sensors(channel_id, window)
    }

    fn responses(&self, channel_id: Uuid, window: &TimeWindow) -> Option<Vec<Response>> {
        (**self).responses(channel_id, window)
    }

    fn channel_segments(
        &self,
        channel_id: Uuid,
        window: &TimeWindow,
    ) -> Option<Vec<ChannelSegment>> {
        (**self).channel_segments(channel_id, window)
    }

    fn events(&self, ids: &[Uuid]) -> Option<Vec<Event>> {
        (**self).events(ids)
    }

    fn events_in_window(&self, window: &TimeWindow) -> Option<Vec<Event>> {
        (**self).events_in_window(window)
    }

    fn signal_detection_hypotheses(&self, ids: &[Uuid]) -> Option<Vec<SignalDetectionHypothesis>> {
        (**self).signal_detection_hypotheses(ids)
    }

    fn signal_detections(&self, ids: &[Uuid]) -> Option<Vec<SignalDetection>> {
        (**self).signal_detections(ids)
    }
}
