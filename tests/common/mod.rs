#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use idlefit::application::usecases::{ReminderService, SharedSettings, shared_settings};
use idlefit::application::{AppError, AppResult, Clock, ExercisePicker, Notifier};
use idlefit::domain::{CooldownMinutes, ExerciseList, Reminder, Settings};

#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn at(t: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(t)),
        }
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.now.lock().unwrap() += Duration::minutes(minutes);
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.now.lock().unwrap() += Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Always picks the first enabled exercise.
pub struct FirstPicker;

impl ExercisePicker for FirstPicker {
    fn pick(&self, enabled: &[String]) -> Option<String> {
        enabled.first().cloned()
    }
}

#[derive(Clone, Default)]
pub struct CountingNotifier {
    shown: Arc<Mutex<Vec<Reminder>>>,
}

impl CountingNotifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
    pub fn last(&self) -> Option<Reminder> {
        self.shown.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(&self, reminder: &Reminder) -> AppResult<()> {
        self.shown.lock().unwrap().push(reminder.clone());
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _reminder: &Reminder) -> AppResult<()> {
        Err(AppError::Notifier("ui unavailable".into()))
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

pub fn settings_with(cooldown: u32, exercises: &[(&str, bool)]) -> Settings {
    Settings {
        cooldown_minutes: CooldownMinutes::new(cooldown),
        exercises: exercises.iter().map(|(n, e)| (*n, *e)).collect::<ExerciseList>(),
        ..Settings::default()
    }
}

pub struct Harness {
    pub clock: ManualClock,
    pub notifier: CountingNotifier,
    pub settings: SharedSettings,
    pub service: ReminderService,
}

/// Service created at `t0()` with a deterministic picker.
pub fn harness(settings: Settings) -> Harness {
    let clock = ManualClock::at(t0());
    let notifier = CountingNotifier::new();
    let settings = shared_settings(settings);
    let service = ReminderService::new(
        settings.clone(),
        Arc::new(notifier.clone()),
        Arc::new(clock.clone()),
        Arc::new(FirstPicker),
    );
    Harness {
        clock,
        notifier,
        settings,
        service,
    }
}
