use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Reminder, ReminderId, Settings};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("notifier error: {0}")]
    Notifier(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("state error: {0}")]
    State(String),
    #[error("reminder {0} is not active")]
    UnknownReminder(ReminderId),
}

pub type AppResult<T> = Result<T, AppError>;

/// Deliver a reminder to the user (the host's UI). Called outside of any lock.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, reminder: &Reminder) -> AppResult<()>;
}

/// Load/save the settings record owned by the host.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Missing record -> defaults.
    async fn load(&self) -> AppResult<Settings>;
    async fn save(&self, settings: &Settings) -> AppResult<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Choose one exercise out of a non-empty list of enabled names.
pub trait ExercisePicker: Send + Sync {
    fn pick(&self, enabled: &[String]) -> Option<String>;
}
