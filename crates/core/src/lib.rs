//! Core types for the CSS3.0 export engine
//!
//! This crate defines the foundational types used throughout the system:
//! - Entity model: typed snapshots of the reference graph (networks,
//!   stations, sites, channels, calibrations, sensors, responses), waveform
//!   segments, and the analysis graph (events, hypotheses, associations,
//!   signal detections, feature measurements, location solutions)
//! - Scalar: a numeric attribute as delivered by the retrieval layer
//! - TimeWindow: the `[start, end)` scope every retrieval call carries
//! - Error: the export error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error;
pub mod scalar;
pub mod window;

pub use entity::analysis::{
    Association, DepthRestraintType, Ellipse, Event, EventHypothesis, EventLocation,
    FeatureMeasurement, FeatureMeasurementType, LocationBehavior, LocationRestraint,
    LocationSolution, LocationUncertainty, PreferredEventHypothesis, SignalDetection,
    SignalDetectionHypothesis,
};
pub use entity::reference::{
    Calibration, Channel, MembershipStatus, Network, NetworkMembership, NetworkRegion, Response,
    Sensor, Site, Station, StationMembership, StationType,
};
pub use entity::waveform::ChannelSegment;
pub use error::{ExportError, Hop, Result};
pub use scalar::Scalar;
pub use window::TimeWindow;
