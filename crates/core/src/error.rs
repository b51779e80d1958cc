//! Error types for the export engine
//!
//! The taxonomy mirrors how failures propagate through an export:
//! - `ResolutionGap`: a required hop of the entity graph returned nothing
//! - `MalformedField`: a present value that cannot be rendered in its column
//! - `SidecarWrite`: a binary side file could not be written
//! - `OutOfOrder`: a version sequence violated ascending change time
//!
//! Record-local failures are recovered by the emitters (NA substitution,
//! dropped rows); only I/O on table files and configuration problems are
//! returned to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// A hop of the entity graph walked by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hop {
    /// Channel versions by channel id
    Channel,
    /// Sites containing a channel
    Site,
    /// Station memberships of a site
    StationMembership,
    /// Station versions by station id
    Station,
    /// Network memberships of a station
    NetworkMembership,
    /// Networks by network id
    Network,
    /// Calibrations, sensors and responses of a channel
    Instrument,
    /// Waveform segments of a channel
    ChannelSegment,
    /// Events by id or time window
    Event,
    /// Signal detection hypotheses by id
    SignalDetectionHypothesis,
    /// Parent signal detection of a hypothesis
    SignalDetection,
}

impl Hop {
    /// Human-readable hop name used in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            Hop::Channel => "channel",
            Hop::Site => "site",
            Hop::StationMembership => "station-membership",
            Hop::Station => "station",
            Hop::NetworkMembership => "network-membership",
            Hop::Network => "network",
            Hop::Instrument => "instrument",
            Hop::ChannelSegment => "channel-segment",
            Hop::Event => "event",
            Hop::SignalDetectionHypothesis => "signal-detection-hypothesis",
            Hop::SignalDetection => "signal-detection",
        }
    }
}

impl std::fmt::Display for Hop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for the export engine
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O error writing a table file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required hop of the entity graph returned nothing
    #[error("Resolution gap at {hop} hop for {scope}")]
    ResolutionGap {
        /// Hop that came back empty
        hop: Hop,
        /// Id the hop was scoped by
        scope: Uuid,
    },

    /// Version sequence not ordered by change time
    #[error("Versions of {entity} out of order at index {index}")]
    OutOfOrder {
        /// Entity whose versions were out of order
        entity: Uuid,
        /// Index of the first version earlier than its predecessor
        index: usize,
    },

    /// A value not representable in its column
    #[error("Malformed value {value:?} for column {column}")]
    MalformedField {
        /// Column name
        column: &'static str,
        /// Offending value
        value: String,
    },

    /// Failure writing a binary side file
    #[error("Failed to write sidecar {}: {source}", path.display())]
    SidecarWrite {
        /// Path of the side file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExportError {
    /// Build a resolution gap error
    pub fn gap(hop: Hop, scope: Uuid) -> Self {
        ExportError::ResolutionGap { hop, scope }
    }

    /// Whether this error is a resolution gap (including ordering violations
    /// detected at the resolver boundary)
    pub fn is_resolution_gap(&self) -> bool {
        matches!(
            self,
            ExportError::ResolutionGap { .. } | ExportError::OutOfOrder { .. }
        )
    }
}
