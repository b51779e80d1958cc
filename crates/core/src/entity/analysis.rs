//! Analysis entities
//!
//! Event → EventHypothesis → Association → SignalDetectionHypothesis →
//! FeatureMeasurement, with location solutions hanging off each event
//! hypothesis.

use crate::Scalar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seismic event and its hypotheses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event id
    pub id: Uuid,
    /// Organization that produced the event
    #[serde(default)]
    pub monitoring_organization: Option<String>,
    /// Hypotheses, in creation order
    #[serde(default)]
    pub hypotheses: Vec<EventHypothesis>,
    /// Preferred hypothesis per processing stage, oldest first
    #[serde(default)]
    pub preferred_event_hypothesis_history: Vec<PreferredEventHypothesis>,
}

impl Event {
    /// Id of the currently preferred hypothesis (last history entry)
    pub fn preferred_hypothesis_id(&self) -> Option<Uuid> {
        self.preferred_event_hypothesis_history
            .last()
            .map(|p| p.event_hypothesis_id)
    }
}

/// Entry of an event's preferred hypothesis history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredEventHypothesis {
    /// Processing stage the preference was made in
    #[serde(default)]
    pub processing_stage_id: Option<Uuid>,
    /// Preferred hypothesis
    pub event_hypothesis_id: Uuid,
}

/// One hypothesis of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHypothesis {
    /// Hypothesis id
    pub id: Uuid,
    /// Owning event
    pub event_id: Uuid,
    /// Whether an analyst rejected the hypothesis
    #[serde(default)]
    pub rejected: bool,
    /// Signal detection associations
    #[serde(default)]
    pub associations: Vec<Association>,
    /// Location solutions
    #[serde(default)]
    pub location_solutions: Vec<LocationSolution>,
}

/// Link between an event hypothesis and a signal detection hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    /// Association id
    pub id: Uuid,
    /// Event hypothesis side
    pub event_hypothesis_id: Uuid,
    /// Signal detection hypothesis side
    pub signal_detection_hypothesis_id: Uuid,
    /// Whether the association was rejected
    #[serde(default)]
    pub rejected: bool,
}

/// A located solution of an event hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSolution {
    /// Solution id
    pub id: Uuid,
    /// Hypocenter
    pub location: EventLocation,
    /// Restraints applied by the locator
    #[serde(default)]
    pub location_restraint: Option<LocationRestraint>,
    /// Covariance and error ellipses
    #[serde(default)]
    pub location_uncertainty: Option<LocationUncertainty>,
    /// Per-measurement residuals and defining flags
    #[serde(default)]
    pub location_behaviors: Vec<LocationBehavior>,
}

/// Hypocenter and origin time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    /// Latitude in degrees
    #[serde(default)]
    pub latitude_degrees: Option<Scalar>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude_degrees: Option<Scalar>,
    /// Depth in km
    #[serde(default)]
    pub depth_km: Option<Scalar>,
    /// Origin time
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// How the locator treated depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepthRestraintType {
    /// Depth solved for
    Unrestrained,
    /// Depth fixed at the surface
    FixedAtSurface,
    /// Depth fixed at a given value
    FixedAtDepth,
    /// Unrecognized restraint
    #[serde(other)]
    Unknown,
}

/// Locator restraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRestraint {
    /// Depth restraint
    pub depth_restraint_type: DepthRestraintType,
    /// Depth the solution was restrained to, in km
    #[serde(default)]
    pub depth_restraint_km: Option<Scalar>,
}

/// Covariance matrix terms and error ellipses
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationUncertainty {
    /// Variance in x (km²)
    pub xx: Option<Scalar>,
    /// Covariance x/y
    pub xy: Option<Scalar>,
    /// Covariance x/z
    pub xz: Option<Scalar>,
    /// Covariance x/t
    pub xt: Option<Scalar>,
    /// Variance in y
    pub yy: Option<Scalar>,
    /// Covariance y/z
    pub yz: Option<Scalar>,
    /// Covariance y/t
    pub yt: Option<Scalar>,
    /// Variance in z
    pub zz: Option<Scalar>,
    /// Covariance z/t
    pub zt: Option<Scalar>,
    /// Variance in t (s²)
    pub tt: Option<Scalar>,
    /// Standard error of one observation
    pub st_dev_one_observation: Option<Scalar>,
    /// Error ellipses, one per scaling configuration
    pub ellipses: Vec<Ellipse>,
}

/// Horizontal error ellipse
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ellipse {
    /// Confidence level (0..1)
    pub confidence_level: Option<Scalar>,
    /// Semi-major axis in km
    pub major_axis_length: Option<Scalar>,
    /// Trend of the major axis in degrees
    pub major_axis_trend: Option<Scalar>,
    /// Semi-minor axis in km
    pub minor_axis_length: Option<Scalar>,
    /// Depth error in km
    pub depth_uncertainty: Option<Scalar>,
    /// Origin time error in seconds
    pub time_uncertainty: Option<Scalar>,
}

/// Locator treatment of one feature measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBehavior {
    /// Observed minus predicted
    #[serde(default)]
    pub residual: Option<Scalar>,
    /// Weight in the solution
    #[serde(default)]
    pub weight: Option<Scalar>,
    /// Whether the measurement defined the solution
    #[serde(default)]
    pub defining: bool,
    /// Prediction the residual was computed against
    #[serde(default)]
    pub feature_prediction_id: Option<Uuid>,
    /// Measurement the behavior applies to
    pub feature_measurement_id: Uuid,
}

/// A signal detection at a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalDetection {
    /// Detection id
    pub id: Uuid,
    /// Detecting station (entity id)
    pub station_id: Uuid,
    /// Organization that produced the detection
    #[serde(default)]
    pub monitoring_organization: Option<String>,
}

/// One hypothesis of a signal detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalDetectionHypothesis {
    /// Hypothesis id
    pub id: Uuid,
    /// Detection this hypothesis belongs to
    #[serde(default)]
    pub parent_signal_detection_id: Option<Uuid>,
    /// Whether an analyst rejected the hypothesis
    #[serde(default)]
    pub rejected: bool,
    /// Measurements made on the detection
    #[serde(default)]
    pub feature_measurements: Vec<FeatureMeasurement>,
}

impl SignalDetectionHypothesis {
    /// First measurement of a given type
    pub fn measurement(&self, ty: FeatureMeasurementType) -> Option<&FeatureMeasurement> {
        self.feature_measurements
            .iter()
            .find(|fm| fm.feature_measurement_type == ty)
    }
}

/// Kind of feature measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureMeasurementType {
    /// Onset time
    ArrivalTime,
    /// Observed back azimuth
    Azimuth,
    /// Observed slowness
    Slowness,
    /// Phase label
    Phase,
    /// Emergence angle
    EmergenceAngle,
    /// Amplitude
    Amplitude,
    /// Period of the amplitude measurement
    Period,
    /// Signal to noise ratio
    Snr,
    /// Rectilinearity
    Rectilinearity,
    /// First motion
    FirstMotion,
    /// Epicentral distance in degrees
    SourceToReceiverDistance,
    /// Event to station azimuth
    SourceToReceiverAzimuth,
    /// Station to event azimuth
    ReceiverToSourceAzimuth,
    /// Any measurement type without a CSS column
    #[serde(other)]
    Other,
}

/// A measurement made on a signal detection hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMeasurement {
    /// Measurement id
    pub id: Uuid,
    /// Kind of measurement
    pub feature_measurement_type: FeatureMeasurementType,
    /// Measured value: a number, a numeric string, an ISO-8601 instant or a label
    #[serde(default)]
    pub value: Option<Scalar>,
    /// Standard deviation of the value
    #[serde(default)]
    pub standard_deviation: Option<Scalar>,
}
