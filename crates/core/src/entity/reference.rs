//! Station reference entities
//!
//! Membership chain: Network ← NetworkMembership → Station ← StationMembership → Site → Channel.
//! Stations, sites, channels and sensors are versioned; each version carries
//! the time it became effective.

use crate::Scalar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic extent of a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkRegion {
    /// Worldwide network
    Global,
    /// Regional network
    Regional,
    /// Local network
    Local,
    /// Any region the export has no code for
    #[serde(other)]
    Unknown,
}

/// A station network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Network id
    pub entity_id: Uuid,
    /// Network name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Geographic extent
    pub region: NetworkRegion,
    /// Organization that operates the network
    #[serde(default)]
    pub originating_organization: Option<String>,
    /// Time the record was last changed in the system
    #[serde(default)]
    pub system_change_time: Option<DateTime<Utc>>,
}

/// Membership state of a network or station membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    /// Member from `actualChangeTime` on
    Active,
    /// No longer a member from `actualChangeTime` on
    Inactive,
}

impl Default for MembershipStatus {
    fn default() -> Self {
        MembershipStatus::Active
    }
}

/// Station ↔ network membership change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMembership {
    /// Membership record id
    pub id: Uuid,
    /// Network side
    pub network_id: Uuid,
    /// Station side
    pub station_id: Uuid,
    /// Time the membership change took effect
    pub actual_change_time: DateTime<Utc>,
    /// Membership state from that time on
    #[serde(default)]
    pub status: MembershipStatus,
}

/// Kind of station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationType {
    /// Three-component seismic station
    Seismic3Component,
    /// Single-component seismic station
    Seismic1Component,
    /// Seismic array
    SeismicArray,
    /// Hydroacoustic station
    Hydroacoustic,
    /// Hydroacoustic array
    HydroacousticArray,
    /// Infrasound station
    Infrasound,
    /// Infrasound array
    InfrasoundArray,
    /// Weather station
    Weather,
    /// Unrecognized type
    #[serde(other)]
    Unknown,
}

impl StationType {
    /// Whether the station is an array of sites
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            StationType::SeismicArray | StationType::HydroacousticArray | StationType::InfrasoundArray
        )
    }
}

/// One version of a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Station id, shared by all versions
    pub entity_id: Uuid,
    /// Id of this version
    pub version_id: Uuid,
    /// Station code
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<Scalar>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<Scalar>,
    /// Elevation in km
    #[serde(default)]
    pub elevation: Option<Scalar>,
    /// Kind of station
    pub station_type: StationType,
    /// Time this version took effect
    pub actual_change_time: DateTime<Utc>,
}

/// Site ↔ station membership change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationMembership {
    /// Membership record id
    pub id: Uuid,
    /// Station side
    pub station_id: Uuid,
    /// Site side
    pub site_id: Uuid,
    /// Time the membership change took effect
    pub actual_change_time: DateTime<Utc>,
    /// Membership state from that time on
    #[serde(default)]
    pub status: MembershipStatus,
}

/// One version of a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site id, shared by all versions
    pub entity_id: Uuid,
    /// Id of this version
    pub version_id: Uuid,
    /// Site code
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<Scalar>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<Scalar>,
    /// Elevation in km
    #[serde(default)]
    pub elevation: Option<Scalar>,
    /// Time this version took effect
    pub actual_change_time: DateTime<Utc>,
}

/// One version of a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Channel id, shared by all versions
    pub entity_id: Uuid,
    /// Id of this version
    pub version_id: Uuid,
    /// Channel code
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Emplacement depth in km
    #[serde(default)]
    pub depth: Option<Scalar>,
    /// Horizontal orientation in degrees clockwise from north
    #[serde(default)]
    pub horizontal_angle: Option<Scalar>,
    /// Vertical orientation in degrees from vertical
    #[serde(default)]
    pub vertical_angle: Option<Scalar>,
    /// Nominal samples per second
    #[serde(default)]
    pub nominal_sample_rate: Option<Scalar>,
    /// Time this version took effect
    pub actual_time: DateTime<Utc>,
}

/// Calibration of a channel version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    /// Calibration id
    pub entity_id: Uuid,
    /// Version id of the calibrated channel
    pub channel_id: Uuid,
    /// Nominal calibration factor (nm/count)
    #[serde(default)]
    pub calibration_factor: Option<Scalar>,
    /// Period at which the factor applies, in seconds
    #[serde(default)]
    pub calibration_period: Option<Scalar>,
    /// Correction to the data time stamps, in seconds
    #[serde(default)]
    pub time_shift: Option<Scalar>,
    /// Ratio of actual to nominal calibration
    #[serde(default)]
    pub calibration_conversion_ratio: Option<Scalar>,
}

/// One version of the sensor installed on a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    /// Sensor id
    pub id: Uuid,
    /// Manufacturer
    #[serde(default)]
    pub instrument_manufacturer: Option<String>,
    /// Model code
    #[serde(default)]
    pub instrument_model: Option<String>,
    /// Time this version took effect
    pub actual_time: DateTime<Utc>,
}

/// Instrument response of a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Response id
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Response format code (e.g. `paz`, `fap`)
    #[serde(default)]
    pub response_type: Option<String>,
    /// Base64 encoded response file contents
    #[serde(default)]
    pub response_data: Option<String>,
}
