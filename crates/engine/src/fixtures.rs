//! Demo entity graph shared by unit tests
//!
//! One network with one array station, one site, one channel (two
//! versions), a full instrument chain, one waveform segment and one event
//! whose single hypothesis is associated with one detection.

#![allow(dead_code)]

use crate::catalog::{Catalog, ChannelScoped, SiteChannel};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, TimeZone, Utc};
use css_core::*;
use uuid::Uuid;

pub const NETWORK: u128 = 100;
pub const STATION: u128 = 200;
pub const SITE: u128 = 400;
pub const SITE_2: u128 = 410;
pub const CHANNEL: u128 = 600;
pub const CHANNEL_V1: u128 = 601;
pub const CHANNEL_V2: u128 = 602;
pub const EVENT: u128 = 2000;
pub const HYPOTHESIS: u128 = 2100;
pub const SDH: u128 = 2300;
pub const DETECTION: u128 = 2500;

pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn num(v: f64) -> Option<Scalar> {
    Some(Scalar::Number(v))
}

pub fn network() -> Network {
    Network {
        entity_id: id(NETWORK),
        name: "demo".to_string(),
        description: Some("Demo network".to_string()),
        region: NetworkRegion::Local,
        originating_organization: Some("IDC".to_string()),
        system_change_time: Some(at(2010, 1, 1)),
    }
}

pub fn station(version: u128, changed: DateTime<Utc>) -> Station {
    Station {
        entity_id: id(STATION),
        version_id: id(version),
        name: "ASAR".to_string(),
        description: None,
        latitude: num(-23.665),
        longitude: num(133.905),
        elevation: num(0.6047),
        station_type: StationType::SeismicArray,
        actual_change_time: changed,
    }
}

pub fn site() -> Site {
    Site {
        entity_id: id(SITE),
        version_id: id(401),
        name: "AS01".to_string(),
        description: Some("Alice Springs Array element".to_string()),
        latitude: num(-23.665134),
        longitude: num(133.905261),
        elevation: num(0.6273),
        actual_change_time: at(2010, 1, 1),
    }
}

pub fn channel(version: u128, changed: DateTime<Utc>) -> Channel {
    Channel {
        entity_id: id(CHANNEL),
        version_id: id(version),
        name: "SHZ".to_string(),
        description: Some("short period vertical".to_string()),
        depth: num(0.0),
        horizontal_angle: num(-1.0),
        vertical_angle: num(0.0),
        nominal_sample_rate: num(40.0),
        actual_time: changed,
    }
}

pub fn event() -> Event {
    let solution = LocationSolution {
        id: id(2400),
        location: EventLocation {
            latitude_degrees: num(10.0),
            longitude_degrees: num(20.0),
            depth_km: num(0.0),
            time: Some(Utc.with_ymd_and_hms(2011, 7, 1, 0, 5, 0).unwrap()),
        },
        location_restraint: Some(LocationRestraint {
            depth_restraint_type: DepthRestraintType::FixedAtSurface,
            depth_restraint_km: num(0.0),
        }),
        location_uncertainty: Some(LocationUncertainty {
            xx: num(1.5),
            yy: num(2.5),
            tt: num(0.25),
            st_dev_one_observation: num(0.75),
            ellipses: vec![Ellipse {
                confidence_level: num(0.9),
                major_axis_length: num(12.0),
                major_axis_trend: num(45.0),
                minor_axis_length: num(6.0),
                depth_uncertainty: num(3.0),
                time_uncertainty: num(0.5),
            }],
            ..Default::default()
        }),
        location_behaviors: vec![LocationBehavior {
            residual: num(0.5),
            weight: num(1.0),
            defining: true,
            feature_prediction_id: None,
            feature_measurement_id: id(2310),
        }],
    };
    Event {
        id: id(EVENT),
        monitoring_organization: Some("IDC".to_string()),
        hypotheses: vec![EventHypothesis {
            id: id(HYPOTHESIS),
            event_id: id(EVENT),
            rejected: false,
            associations: vec![Association {
                id: id(2200),
                event_hypothesis_id: id(HYPOTHESIS),
                signal_detection_hypothesis_id: id(SDH),
                rejected: false,
            }],
            location_solutions: vec![solution],
        }],
        preferred_event_hypothesis_history: vec![PreferredEventHypothesis {
            processing_stage_id: None,
            event_hypothesis_id: id(HYPOTHESIS),
        }],
    }
}

pub fn measurement(
    n: u128,
    ty: FeatureMeasurementType,
    value: Scalar,
    sd: Option<f64>,
) -> FeatureMeasurement {
    FeatureMeasurement {
        id: id(n),
        feature_measurement_type: ty,
        value: Some(value),
        standard_deviation: sd.map(Scalar::Number),
    }
}

pub fn detection_hypothesis() -> SignalDetectionHypothesis {
    use FeatureMeasurementType as F;
    SignalDetectionHypothesis {
        id: id(SDH),
        parent_signal_detection_id: Some(id(DETECTION)),
        rejected: false,
        feature_measurements: vec![
            measurement(2310, F::ArrivalTime, Scalar::from("2011-07-01T00:06:00.500Z"), Some(0.12)),
            measurement(2311, F::Azimuth, Scalar::Number(45.0), Some(2.0)),
            measurement(2312, F::Slowness, Scalar::Number(12.5), Some(0.8)),
            measurement(2313, F::Phase, Scalar::from("P"), None),
            measurement(2314, F::SourceToReceiverDistance, Scalar::Number(30.25), None),
        ],
    }
}

pub fn catalog() -> Catalog {
    Catalog {
        networks: vec![network()],
        network_memberships: vec![NetworkMembership {
            id: id(300),
            network_id: id(NETWORK),
            station_id: id(STATION),
            actual_change_time: at(2010, 1, 1),
            status: MembershipStatus::Active,
        }],
        stations: vec![
            station(201, at(2010, 1, 1)),
            Station {
                elevation: num(0.61),
                ..station(202, at(2012, 1, 1))
            },
        ],
        station_memberships: vec![StationMembership {
            id: id(500),
            station_id: id(STATION),
            site_id: id(SITE),
            actual_change_time: at(2010, 1, 1),
            status: MembershipStatus::Active,
        }],
        sites: vec![site()],
        site_channels: vec![SiteChannel {
            site_id: id(SITE),
            channel_id: id(CHANNEL),
        }],
        channels: vec![
            channel(CHANNEL_V1, at(2010, 1, 1)),
            channel(CHANNEL_V2, at(2011, 6, 1)),
        ],
        calibrations: vec![Calibration {
            entity_id: id(700),
            channel_id: id(CHANNEL_V2),
            calibration_factor: num(0.5),
            calibration_period: num(1.0),
            time_shift: num(0.0),
            calibration_conversion_ratio: num(1.0),
        }],
        sensors: vec![ChannelScoped {
            channel_id: id(CHANNEL),
            item: Sensor {
                id: id(800),
                instrument_manufacturer: Some("Geotech".to_string()),
                instrument_model: Some("GS-13".to_string()),
                actual_time: at(2010, 1, 1),
            },
        }],
        responses: vec![ChannelScoped {
            channel_id: id(CHANNEL),
            item: Response {
                id: Some(id(900)),
                response_type: Some("paz".to_string()),
                response_data: Some(BASE64.encode(b"poles and zeros")),
            },
        }],
        channel_segments: vec![ChannelSegment {
            id: id(1000),
            channel_id: id(CHANNEL),
            start_time: at(2011, 7, 1),
            end_time: Utc.timestamp_millis_opt(at(2011, 7, 1).timestamp_millis() + 100).unwrap(),
            sample_count: 4,
            sample_rate: 40.0,
            values: vec![1.0, -2.0, 3.5, 0.0],
        }],
        events: vec![event()],
        signal_detection_hypotheses: vec![detection_hypothesis()],
        signal_detections: vec![SignalDetection {
            id: id(DETECTION),
            station_id: id(STATION),
            monitoring_organization: Some("IDC".to_string()),
        }],
    }
}

/// The demo catalog where the channel moves from AS01 to a second site,
/// AS02, together with its 2011-06-01 version. AS02 is listed first.
pub fn moved_channel_catalog() -> Catalog {
    let mut catalog = catalog();
    catalog.sites.insert(
        0,
        Site {
            entity_id: id(SITE_2),
            version_id: id(411),
            name: "AS02".to_string(),
            actual_change_time: at(2011, 6, 1),
            ..site()
        },
    );
    catalog.site_channels.push(SiteChannel {
        site_id: id(SITE_2),
        channel_id: id(CHANNEL),
    });
    catalog.station_memberships.push(StationMembership {
        id: id(510),
        station_id: id(STATION),
        site_id: id(SITE_2),
        actual_change_time: at(2011, 6, 1),
        status: MembershipStatus::Active,
    });
    catalog
}

/// Slice one column out of a rendered row
pub fn column<'a>(table: css_format::Table, line: &'a str, name: &str) -> &'a str {
    let mut start = 0;
    for c in table.columns() {
        let width = match c.width {
            css_format::Width::Fixed(w) => w,
            css_format::Width::Free => line[start..].find(' ').unwrap_or(line.len() - start),
        };
        if c.name == name {
            return &line[start..start + width];
        }
        start += width + 1;
    }
    panic!("{} has no column {}", table, name)
}
