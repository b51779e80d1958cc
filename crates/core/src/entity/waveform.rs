//! Acquired waveform data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One contiguous acquisition interval of a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSegment {
    /// Segment id
    pub id: Uuid,
    /// Channel id (entity id)
    pub channel_id: Uuid,
    /// Time of the first sample
    pub start_time: DateTime<Utc>,
    /// Time of the last sample
    pub end_time: DateTime<Utc>,
    /// Declared number of samples
    pub sample_count: u64,
    /// Samples per second
    pub sample_rate: f64,
    /// Sample values
    #[serde(default)]
    pub values: Vec<f64>,
}
