use async_trait::async_trait;

use crate::application::{AppResult, Notifier};
use crate::domain::Reminder;

/// Prints reminders to stderr; stdout belongs to the host bridge.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, reminder: &Reminder) -> AppResult<()> {
        let actions: Vec<&str> = reminder.actions.iter().map(|a| a.label()).collect();
        eprintln!(
            "REMINDER #{}: {} {} [{}] trigger={}",
            reminder.id,
            reminder.title,
            reminder.body,
            actions.join("|"),
            reminder
                .trigger
                .map(|t| t.to_string())
                .unwrap_or_else(|| "(none)".into())
        );
        Ok(())
    }
}
