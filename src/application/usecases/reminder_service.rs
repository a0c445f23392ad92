use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::{AppError, AppResult, Clock, ExercisePicker, Notifier};
use crate::domain::{
    CooldownPolicy, Reminder, ReminderAction, ReminderDecision, ReminderId, Settings, SkipReason,
    TriggerKind,
};

pub type SharedSettings = Arc<RwLock<Settings>>;

pub fn shared_settings(settings: Settings) -> SharedSettings {
    Arc::new(RwLock::new(settings))
}

#[derive(Debug)]
struct NotifierState {
    last_exercise_time: DateTime<Utc>,
    active: Option<Reminder>,
    next_id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReminderStatus {
    pub plugin_enabled: bool,
    pub cooldown_minutes: u32,
    pub active: Option<ReminderId>,
    pub last_exercise_time: DateTime<Utc>,
    pub next_eligible_at: DateTime<Utc>,
}

/// Decides when to remind and tracks the reminder lifecycle.
///
/// Cloning is cheap; all clones share the same settings and state. The
/// precondition checks, the exercise pick and the activation of a reminder all
/// happen under the state lock, so concurrent triggers can never both show one.
#[derive(Clone)]
pub struct ReminderService {
    settings: SharedSettings,
    state: Arc<Mutex<NotifierState>>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    picker: Arc<dyn ExercisePicker>,
}

impl ReminderService {
    /// The cooldown starts counting from construction time.
    pub fn new(
        settings: SharedSettings,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        picker: Arc<dyn ExercisePicker>,
    ) -> Self {
        let state = NotifierState {
            last_exercise_time: clock.now(),
            active: None,
            next_id: 1,
        };
        Self {
            settings,
            state: Arc::new(Mutex::new(state)),
            notifier,
            clock,
            picker,
        }
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn read_settings(&self) -> AppResult<Settings> {
        let settings = self
            .settings
            .read()
            .map_err(|_| AppError::State("settings lock poisoned".into()))?;
        Ok(settings.clone())
    }

    fn lock_state(&self) -> AppResult<MutexGuard<'_, NotifierState>> {
        self.state
            .lock()
            .map_err(|_| AppError::State("notifier lock poisoned".into()))
    }

    /// Show a reminder if the plugin is enabled, nothing is showing, the
    /// cooldown has passed and at least one exercise is enabled.
    ///
    /// A delivery failure releases the reminder slot and is returned as
    /// [`AppError::Notifier`].
    pub async fn maybe_show_reminder(
        &self,
        trigger: Option<TriggerKind>,
    ) -> AppResult<ReminderDecision> {
        let reminder = match self.try_activate(trigger)? {
            Ok(r) => r,
            Err(reason) => {
                tracing::debug!(%reason, "reminder skipped");
                return Ok(ReminderDecision::Skipped(reason));
            }
        };

        tracing::info!(
            id = %reminder.id,
            exercise = %reminder.exercise,
            "conditions met, showing notification"
        );

        if let Err(e) = self.notifier.notify(&reminder).await {
            let mut state = self.lock_state()?;
            if state.active.as_ref().map(|r| r.id) == Some(reminder.id) {
                state.active = None;
            }
            return Err(e);
        }

        Ok(ReminderDecision::Shown(reminder))
    }

    // 检查 + 选择 + 激活 必须在同一把锁里完成
    fn try_activate(
        &self,
        trigger: Option<TriggerKind>,
    ) -> AppResult<Result<Reminder, SkipReason>> {
        let mut state = self.lock_state()?;
        let settings = self
            .settings
            .read()
            .map_err(|_| AppError::State("settings lock poisoned".into()))?;

        if !settings.plugin_enabled {
            return Ok(Err(SkipReason::PluginDisabled));
        }
        if state.active.is_some() {
            return Ok(Err(SkipReason::AlreadyShowing));
        }

        let now = self.clock.now();
        let policy = CooldownPolicy::new(settings.cooldown_minutes);
        if !policy.has_elapsed(state.last_exercise_time, now) {
            return Ok(Err(SkipReason::CooldownActive));
        }

        let enabled = settings.exercises.enabled_names();
        if enabled.is_empty() {
            return Ok(Err(SkipReason::NoExercisesEnabled));
        }
        let Some(exercise) = self.picker.pick(&enabled) else {
            return Ok(Err(SkipReason::NoExercisesEnabled));
        };

        let id = ReminderId(state.next_id);
        state.next_id += 1;
        let reminder = Reminder::new(id, exercise, trigger, now);
        state.active = Some(reminder.clone());
        Ok(Ok(reminder))
    }

    /// Apply a user action to the active reminder and expire it.
    pub fn resolve(&self, id: ReminderId, action: ReminderAction) -> AppResult<DateTime<Utc>> {
        let mut state = self.lock_state()?;
        if state.active.as_ref().map(|r| r.id) != Some(id) {
            return Err(AppError::UnknownReminder(id));
        }

        let cooldown = self.read_settings()?.cooldown_minutes;
        let now = self.clock.now();
        state.last_exercise_time = match action {
            ReminderAction::Done => now,
            ReminderAction::Snooze => CooldownPolicy::new(cooldown).snoozed_last_exercise(now),
        };
        state.active = None;

        match action {
            ReminderAction::Done => tracing::info!(%id, "'Done' clicked, timer reset"),
            ReminderAction::Snooze => {
                tracing::info!(%id, "'Snooze' clicked, next notification in 5 minutes")
            }
        }
        Ok(state.last_exercise_time)
    }

    pub fn done(&self, id: ReminderId) -> AppResult<DateTime<Utc>> {
        self.resolve(id, ReminderAction::Done)
    }

    pub fn snooze(&self, id: ReminderId) -> AppResult<DateTime<Utc>> {
        self.resolve(id, ReminderAction::Snooze)
    }

    /// The host dismissed the notification on its own. The timer is untouched.
    pub fn expire(&self, id: ReminderId) -> AppResult<()> {
        let mut state = self.lock_state()?;
        if state.active.as_ref().map(|r| r.id) != Some(id) {
            return Err(AppError::UnknownReminder(id));
        }
        state.active = None;
        tracing::debug!(%id, "notification expired");
        Ok(())
    }

    pub fn active_reminder(&self) -> AppResult<Option<Reminder>> {
        Ok(self.lock_state()?.active.clone())
    }

    pub fn status(&self) -> AppResult<ReminderStatus> {
        let state = self.lock_state()?;
        let settings = self.read_settings()?;
        let policy = CooldownPolicy::new(settings.cooldown_minutes);
        Ok(ReminderStatus {
            plugin_enabled: settings.plugin_enabled,
            cooldown_minutes: settings.cooldown_minutes.get(),
            active: state.active.as_ref().map(|r| r.id),
            last_exercise_time: state.last_exercise_time,
            next_eligible_at: policy.next_eligible(state.last_exercise_time),
        })
    }
}
