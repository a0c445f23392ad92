use serde::{Deserialize, Serialize};

use super::{ExerciseList, TriggerKind};

/// Minutes between two reminders, always within
/// [`CooldownMinutes::MIN`]..=[`CooldownMinutes::MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct CooldownMinutes(u32);

impl CooldownMinutes {
    pub const MIN: u32 = 15;
    pub const MAX: u32 = 90;
    pub const DEFAULT: u32 = 30;

    /// Out-of-range values are clamped, the same way the settings spinner does.
    pub fn new(minutes: u32) -> Self {
        Self(minutes.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_duration(self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.0))
    }
}

impl Default for CooldownMinutes {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u32> for CooldownMinutes {
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl From<CooldownMinutes> for u32 {
    fn from(v: CooldownMinutes) -> Self {
        v.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerToggles {
    pub compilation: bool,
    pub process_termination: bool,
    pub indexing: bool,
}

impl TriggerToggles {
    pub fn is_enabled(&self, kind: TriggerKind) -> bool {
        match kind {
            TriggerKind::Compilation => self.compilation,
            TriggerKind::ProcessTermination => self.process_termination,
            TriggerKind::Indexing => self.indexing,
        }
    }

    pub fn set(&mut self, kind: TriggerKind, enabled: bool) {
        match kind {
            TriggerKind::Compilation => self.compilation = enabled,
            TriggerKind::ProcessTermination => self.process_termination = enabled,
            TriggerKind::Indexing => self.indexing = enabled,
        }
    }
}

impl Default for TriggerToggles {
    fn default() -> Self {
        Self {
            compilation: true,
            process_termination: true,
            indexing: true,
        }
    }
}

/// User configuration, as persisted by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub plugin_enabled: bool,
    pub cooldown_minutes: CooldownMinutes,
    pub triggers: TriggerToggles,
    pub exercises: ExerciseList,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plugin_enabled: true,
            cooldown_minutes: CooldownMinutes::default(),
            triggers: TriggerToggles::default(),
            exercises: [("Squat", true), ("Push-up", true), ("Burpee", true)]
                .into_iter()
                .collect(),
        }
    }
}
