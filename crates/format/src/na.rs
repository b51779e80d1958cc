//! NA sentinels
//!
//! The literal written when a value is absent. Legacy readers compare these
//! byte-for-byte, so each column picks exactly one of them.

/// Absent string or code
pub const DASH: &str = "-";

/// Absent integer, id or date
pub const INT: &str = "-1";

/// Absent non-negative measurement
pub const FLOAT: &str = "-1.0";

/// Absent coordinate, residual or magnitude
pub const COORD: &str = "-999.0";

/// Absent start time
pub const TIME: &str = "-9999999999.999";

/// Open-ended end time
pub const ENDTIME: &str = "9999999999.999";

/// Absent count
pub const ZERO: &str = "0";

/// Absent offset or shift
pub const ZERO_FLOAT: &str = "0.0";

/// Absent calibration ratio
pub const CALRATIO: &str = "1";
