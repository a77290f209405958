/// Longest medication schedule, in days.
pub const MAX_DURATION_DAYS: u32 = 365;

/// Most reminder times a medication schedule can have per day.
pub const MAX_TIMES_PER_DAY: usize = 4;

/// Number of events shown in the "coming up" list when no limit is given.
pub const DEFAULT_UPCOMING_LIMIT: usize = 10;
