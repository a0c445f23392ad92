use async_trait::async_trait;
use serde::Serialize;

use crate::application::{AppError, AppResult, Notifier};
use crate::domain::Reminder;

/// Posts reminders as a text message to a chat webhook.
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook: String,
}

impl WebhookNotifier {
    pub fn new(webhook: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook,
        }
    }
}

#[derive(Debug, Serialize)]
struct TextMsg<'a> {
    msg_type: &'a str,
    content: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    text: &'a str,
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, reminder: &Reminder) -> AppResult<()> {
        let text = format_reminder_text(reminder);

        let payload = TextMsg {
            msg_type: "text",
            content: TextContent { text: &text },
        };

        self.client
            .post(&self.webhook)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Notifier(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::Notifier(e.to_string()))?;

        Ok(())
    }
}

pub fn format_reminder_text(reminder: &Reminder) -> String {
    let mut lines = vec![];

    lines.push(format!("🏋 {}", reminder.title));
    lines.push(reminder.body.clone());
    if let Some(t) = reminder.trigger {
        lines.push(format!("Trigger: {}", t));
    }
    lines.push(format!("At: {}", reminder.created_at.to_rfc3339()));

    lines.join("\n")
}
