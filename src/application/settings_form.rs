use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CooldownMinutes, Settings, TriggerKind, TriggerToggles};

/// Edit buffer behind the settings page.
///
/// The exercise rows are fixed when the form is created; `reset` only flips
/// their checkboxes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettingsForm {
    pub plugin_enabled: bool,
    cooldown_minutes: u32,
    pub triggers: TriggerToggles,
    exercises: Vec<(String, bool)>,
}

impl SettingsForm {
    pub fn new(settings: &Settings) -> Self {
        Self {
            plugin_enabled: settings.plugin_enabled,
            cooldown_minutes: settings.cooldown_minutes.get(),
            triggers: settings.triggers,
            exercises: settings
                .exercises
                .iter()
                .map(|e| (e.name.clone(), e.enabled))
                .collect(),
        }
    }

    pub fn cooldown_minutes(&self) -> u32 {
        self.cooldown_minutes
    }

    /// Spinner range is 15..=90, step 1.
    pub fn set_cooldown_minutes(&mut self, minutes: u32) {
        self.cooldown_minutes = minutes.clamp(CooldownMinutes::MIN, CooldownMinutes::MAX);
    }

    pub fn set_trigger(&mut self, kind: TriggerKind, enabled: bool) {
        self.triggers.set(kind, enabled);
    }

    pub fn exercises(&self) -> &[(String, bool)] {
        &self.exercises
    }

    /// Returns false when the form has no checkbox with that name.
    pub fn set_exercise(&mut self, name: &str, enabled: bool) -> bool {
        match self.exercises.iter_mut().find(|(n, _)| n == name) {
            Some((_, selected)) => {
                *selected = enabled;
                true
            }
            None => false,
        }
    }

    pub fn is_modified(&self, settings: &Settings) -> bool {
        self.plugin_enabled != settings.plugin_enabled
            || self.cooldown_minutes != settings.cooldown_minutes.get()
            || self.triggers != settings.triggers
            || self.exercises.iter().any(|(name, selected)| {
                settings
                    .exercises
                    .get(name)
                    .is_some_and(|stored| stored != *selected)
            })
    }

    pub fn apply(&self, settings: &mut Settings) {
        settings.plugin_enabled = self.plugin_enabled;
        settings.cooldown_minutes = CooldownMinutes::new(self.cooldown_minutes);
        settings.triggers = self.triggers;
        for (name, selected) in &self.exercises {
            settings.exercises.set(name, *selected);
        }
    }

    pub fn reset(&mut self, settings: &Settings) {
        self.plugin_enabled = settings.plugin_enabled;
        self.cooldown_minutes = settings.cooldown_minutes.get();
        self.triggers = settings.triggers;
        for (name, selected) in &mut self.exercises {
            *selected = settings.exercises.get(name).unwrap_or(false);
        }
    }

    /// Copy the fields present in `patch` into the buffer. Unknown exercise
    /// names are returned.
    pub fn update(&mut self, patch: &SettingsPatch) -> Vec<String> {
        if let Some(v) = patch.plugin_enabled {
            self.plugin_enabled = v;
        }
        if let Some(v) = patch.cooldown_minutes {
            self.set_cooldown_minutes(v);
        }
        for (kind, v) in [
            (TriggerKind::Compilation, patch.compilation),
            (TriggerKind::ProcessTermination, patch.process_termination),
            (TriggerKind::Indexing, patch.indexing),
        ] {
            if let Some(v) = v {
                self.set_trigger(kind, v);
            }
        }

        let mut unknown = vec![];
        for (name, enabled) in &patch.exercises {
            if !self.set_exercise(name, *enabled) {
                unknown.push(name.clone());
            }
        }
        unknown
    }
}

/// Partial form input, as sent by the host's settings page.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub plugin_enabled: Option<bool>,
    pub cooldown_minutes: Option<u32>,
    pub compilation: Option<bool>,
    pub process_termination: Option<bool>,
    pub indexing: Option<bool>,
    pub exercises: BTreeMap<String, bool>,
}
