use crate::application::usecases::ReminderService;
use crate::domain::{ReminderDecision, SkipReason, TriggerKind};

pub struct HandleTriggerUseCase<'a> {
    pub reminders: &'a ReminderService,
}

impl<'a> HandleTriggerUseCase<'a> {
    /// Never fails: errors are logged here so they do not reach the host's
    /// event dispatch.
    pub async fn execute(&self, kind: TriggerKind) -> Option<ReminderDecision> {
        let enabled = match self.reminders.read_settings() {
            Ok(s) => s.triggers.is_enabled(kind),
            Err(e) => {
                tracing::warn!(trigger = %kind, "cannot read settings: {e}");
                return None;
            }
        };
        if !enabled {
            tracing::debug!(trigger = %kind, "trigger disabled");
            return Some(ReminderDecision::Skipped(SkipReason::TriggerDisabled));
        }

        tracing::info!(trigger = %kind, "trigger fired");
        match self.reminders.maybe_show_reminder(Some(kind)).await {
            Ok(decision) => Some(decision),
            Err(e) => {
                tracing::warn!(trigger = %kind, "failed to show reminder: {e}");
                None
            }
        }
    }
}
