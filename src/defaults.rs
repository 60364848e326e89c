pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Estimated travel time between adjacent stops with no observation.
pub const DEFAULT_ADJACENT_TRAVEL_MINUTES: i32 = 5;

/// Segments longer than this raise an "unusually long" warning.
pub const DEFAULT_LONG_SEGMENT_WARNING_MINUTES: i32 = 60;

pub const DEFAULT_DWELL_MINUTES: i32 = 0;

/// Observed segments longer than a full day are rejected outright.
pub const MAX_SEGMENT_MINUTES: i32 = MINUTES_PER_DAY;

/// Estimated connections never exceed this.
pub const MAX_ESTIMATED_TRAVEL_MINUTES: i32 = MINUTES_PER_DAY;
