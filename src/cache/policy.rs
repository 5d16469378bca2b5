use chrono::{DateTime, TimeDelta, Utc};

/// How long a cached feed stays usable.
pub const MAX_CACHE_AGE_DAYS: i64 = 7;

/// Freshness rule for the cached feed. Pure: no clock, no state.
pub struct FeedCachePolicy;

impl FeedCachePolicy {
    pub fn max_age() -> TimeDelta {
        TimeDelta::days(MAX_CACHE_AGE_DAYS)
    }

    /// A cache written at `timestamp` is fresh strictly before it turns
    /// seven days old.
    pub fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match timestamp.checked_add_signed(Self::max_age()) {
            Some(max_age) => now < max_age,
            None => false,
        }
    }
}
