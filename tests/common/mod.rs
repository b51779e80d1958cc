//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, TimeZone, Utc};
pub use css_export::css_core::*;
pub use css_export::{
    Catalog, ChannelScoped, EventSelection, ExportConfig, ExportSummary, Exporter, SiteChannel,
    Table, Width,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
pub use uuid::Uuid;

// ============================================================================
// Ids and values
// ============================================================================

pub const NETWORK: u128 = 100;
pub const STATION: u128 = 200;
pub const SITE: u128 = 400;
pub const CHANNEL: u128 = 600;
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

// ============================================================================
// Demo entity graph
// ============================================================================

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

pub fn segment(n: u128, start: DateTime<Utc>, values: Vec<f64>) -> ChannelSegment {
    let end = start + chrono::Duration::milliseconds(25 * values.len() as i64);
    ChannelSegment {
        id: id(n),
        channel_id: id(CHANNEL),
        start_time: start,
        end_time: end,
        sample_count: values.len() as u64,
        sample_rate: 40.0,
        values,
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

pub fn detection_hypothesis(n: u128, arrival_fm: u128) -> SignalDetectionHypothesis {
    use FeatureMeasurementType as F;
    SignalDetectionHypothesis {
        id: id(n),
        parent_signal_detection_id: Some(id(DETECTION)),
        rejected: false,
        feature_measurements: vec![
            measurement(arrival_fm, F::ArrivalTime, Scalar::from("2011-07-01T00:06:00.500Z"), Some(0.12)),
            measurement(arrival_fm + 1, F::Azimuth, Scalar::Number(45.0), Some(2.0)),
            measurement(arrival_fm + 2, F::Phase, Scalar::from("P"), None),
        ],
    }
}

pub fn event(n: u128, hypothesis: u128, sdhs: &[u128]) -> Event {
    let associations = sdhs
        .iter()
        .enumerate()
        .map(|(i, &sdh)| Association {
            id: id(hypothesis * 10 + i as u128),
            event_hypothesis_id: id(hypothesis),
            signal_detection_hypothesis_id: id(sdh),
            rejected: false,
        })
        .collect();
    Event {
        id: id(n),
        monitoring_organization: Some("IDC".to_string()),
        hypotheses: vec![EventHypothesis {
            id: id(hypothesis),
            event_id: id(n),
            rejected: false,
            associations,
            location_solutions: vec![LocationSolution {
                id: id(hypothesis + 1),
                location: EventLocation {
                    latitude_degrees: num(10.0),
                    longitude_degrees: num(20.0),
                    depth_km: num(0.0),
                    time: Some(Utc.with_ymd_and_hms(2011, 7, 1, 0, 5, 0).unwrap()),
                },
                location_restraint: None,
                location_uncertainty: Some(LocationUncertainty {
                    xx: num(1.5),
                    ..Default::default()
                }),
                location_behaviors: vec![LocationBehavior {
                    residual: num(0.5),
                    weight: num(1.0),
                    defining: true,
                    feature_prediction_id: None,
                    feature_measurement_id: id(2310),
                }],
            }],
        }],
        preferred_event_hypothesis_history: vec![PreferredEventHypothesis {
            processing_stage_id: None,
            event_hypothesis_id: id(hypothesis),
        }],
    }
}

/// One network, one array station with one element site, one channel with
/// two versions, a full instrument chain, two waveform segments and one
/// event associated with one detection
pub fn demo_catalog() -> Catalog {
    Catalog {
        networks: vec![Network {
            entity_id: id(NETWORK),
            name: "demo".to_string(),
            description: Some("Demo network".to_string()),
            region: NetworkRegion::Local,
            originating_organization: Some("IDC".to_string()),
            system_change_time: Some(at(2010, 1, 1)),
        }],
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
        sites: vec![Site {
            entity_id: id(SITE),
            version_id: id(401),
            name: "AS01".to_string(),
            description: Some("Alice Springs Array element".to_string()),
            latitude: num(-23.665134),
            longitude: num(133.905261),
            elevation: num(0.6273),
            actual_change_time: at(2010, 1, 1),
        }],
        site_channels: vec![SiteChannel {
            site_id: id(SITE),
            channel_id: id(CHANNEL),
        }],
        channels: vec![channel(601, at(2010, 1, 1)), channel(602, at(2011, 6, 1))],
        calibrations: vec![Calibration {
            entity_id: id(700),
            channel_id: id(602),
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
        channel_segments: vec![
            segment(1000, at(2011, 7, 1), vec![1.0, -2.0, 3.5, 0.0]),
            segment(1001, at(2011, 7, 2), vec![5.0, 6.0]),
        ],
        events: vec![event(EVENT, HYPOTHESIS, &[SDH])],
        signal_detection_hypotheses: vec![detection_hypothesis(SDH, 2310)],
        signal_detections: vec![SignalDetection {
            id: id(DETECTION),
            station_id: id(STATION),
            monitoring_organization: Some("IDC".to_string()),
        }],
    }
}

// ============================================================================
// TestExport - exporter writing into a temporary directory
// ============================================================================

/// Exporter over a catalog, writing into its own temporary directory
pub struct TestExport {
    pub dir: TempDir,
    pub exporter: Exporter<Catalog>,
}

impl TestExport {
    /// Export the given catalog with default settings
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, |c| c)
    }

    /// Export the given catalog with adjusted settings
    pub fn with_config(catalog: Catalog, f: impl FnOnce(ExportConfig) -> ExportConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = f(ExportConfig::in_dir(dir.path()));
        let exporter = Exporter::new(catalog, config).expect("Invalid test config");
        TestExport { dir, exporter }
    }

    /// Path of a file in the output directory
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }

    /// Path of a table file
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.path(&format!(
            "{}.{}",
            self.exporter.config().file_prefix,
            table.name()
        ))
    }

    /// Content of a table file
    pub fn read(&self, table: Table) -> String {
        fs::read_to_string(self.table_path(table)).expect("Table file missing")
    }

    /// Lines of a table file
    pub fn lines(&self, table: Table) -> Vec<String> {
        self.read(table).lines().map(str::to_string).collect()
    }

    /// Content of every table file, for byte comparisons
    pub fn snapshot(&self) -> Vec<(Table, Vec<u8>)> {
        Table::ALL
            .iter()
            .filter_map(|&t| fs::read(self.table_path(t)).ok().map(|b| (t, b)))
            .collect()
    }
}

/// Slice one column out of a rendered row
pub fn column<'a>(table: Table, line: &'a str, name: &str) -> &'a str {
    let mut start = 0;
    for c in table.columns() {
        let width = match c.width {
            Width::Fixed(w) => w,
            Width::Free => line[start..].find(' ').unwrap_or(line.len() - start),
        };
        if c.name == name {
            return &line[start..start + width];
        }
        start += width + 1;
    }
    panic!("{} has no column {}", table, name)
}
