use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TriggerKind;

pub const REMINDER_TITLE: &str = "Time for a break!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(pub u64);

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderAction {
    Done,
    Snooze,
}

impl ReminderAction {
    pub fn label(&self) -> &'static str {
        match self {
            ReminderAction::Done => "Done",
            ReminderAction::Snooze => "Snooze",
        }
    }
}

/// A "take a break" notification. Text is fixed when the reminder is created;
/// later settings edits do not change it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub exercise: String,
    pub title: String,
    pub body: String,
    pub actions: Vec<ReminderAction>,
    pub trigger: Option<TriggerKind>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(
        id: ReminderId,
        exercise: String,
        trigger: Option<TriggerKind>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let body = format!("Your exercise: {}", exercise);
        Self {
            id,
            exercise,
            title: REMINDER_TITLE.to_string(),
            body,
            actions: vec![ReminderAction::Done, ReminderAction::Snooze],
            trigger,
            created_at,
        }
    }
}

/// Why `maybe_show_reminder` did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    PluginDisabled,
    TriggerDisabled,
    AlreadyShowing,
    CooldownActive,
    NoExercisesEnabled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::PluginDisabled => "plugin is disabled",
            SkipReason::TriggerDisabled => "trigger is disabled",
            SkipReason::AlreadyShowing => "notification already showing",
            SkipReason::CooldownActive => "not enough time has passed since last exercise",
            SkipReason::NoExercisesEnabled => "no exercises enabled",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReminderDecision {
    Shown(Reminder),
    Skipped(SkipReason),
}

impl ReminderDecision {
    pub fn is_shown(&self) -> bool {
        matches!(self, ReminderDecision::Shown(_))
    }

    pub fn reminder(&self) -> Option<&Reminder> {
        match self {
            ReminderDecision::Shown(r) => Some(r),
            ReminderDecision::Skipped(_) => None,
        }
    }
}
