use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single daily trigger time in the process-local timezone.
///
/// The scheduler polls once a minute, so the rule only needs minute
/// granularity; "has it already fired today" is tracked by the scheduler,
/// not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleRule {
    pub hour: u32,
    pub minute: u32,
}

impl ScheduleRule {
    pub fn daily_at(hour: u32, minute: u32) -> Self {
        debug_assert!(hour < 24 && minute < 60);
        Self { hour, minute }
    }

    /// True when `now` falls inside the trigger minute.
    pub fn matches_minute(&self, now: NaiveTime) -> bool {
        now.hour() == self.hour && now.minute() == self.minute
    }
}
