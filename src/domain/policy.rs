use chrono::{DateTime, Duration, Utc};

use super::CooldownMinutes;

/// Fixed window after a snooze, independent of the configured cooldown.
pub const SNOOZE_MINUTES: i64 = 5;

#[derive(Clone, Copy, Debug)]
pub struct CooldownPolicy {
    pub cooldown: CooldownMinutes,
}

impl CooldownPolicy {
    pub fn new(cooldown: CooldownMinutes) -> Self {
        Self { cooldown }
    }

    /// `now - last >= cooldown`
    pub fn has_elapsed(&self, last_exercise: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - last_exercise >= self.cooldown.as_duration()
    }

    pub fn next_eligible(&self, last_exercise: DateTime<Utc>) -> DateTime<Utc> {
        last_exercise + self.cooldown.as_duration()
    }

    /// Back-dates the last exercise so the next reminder is due exactly
    /// [`SNOOZE_MINUTES`] after `now`.
    pub fn snoozed_last_exercise(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.cooldown.as_duration() + Duration::minutes(SNOOZE_MINUTES)
    }
}
