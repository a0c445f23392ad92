use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::mpsc;

use crate::application::{AppError, AppResult, Notifier};
use crate::domain::Reminder;

/// Sends `notification/show` messages to the host bridge's output queue.
pub struct StdioNotifier {
    out: mpsc::UnboundedSender<Value>,
}

impl StdioNotifier {
    pub fn new(out: mpsc::UnboundedSender<Value>) -> Self {
        Self { out }
    }
}

pub fn show_notification_message(reminder: &Reminder) -> Value {
    let actions: Vec<Value> = reminder
        .actions
        .iter()
        .map(|a| json!({ "label": a.label(), "action": a }))
        .collect();
    json!({
        "jsonrpc": "2.0",
        "method": "notification/show",
        "params": {
            "id": reminder.id,
            "title": reminder.title,
            "body": reminder.body,
            "exercise": reminder.exercise,
            "trigger": reminder.trigger,
            "actions": actions,
            "created_at": reminder.created_at.to_rfc3339(),
        }
    })
}

#[async_trait]
impl Notifier for StdioNotifier {
    async fn notify(&self, reminder: &Reminder) -> AppResult<()> {
        self.out
            .send(show_notification_message(reminder))
            .map_err(|_| AppError::Notifier("host bridge output closed".into()))
    }
}
