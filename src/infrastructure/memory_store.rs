use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::{AppError, AppResult, SettingsStore};
use crate::domain::Settings;

#[derive(Clone, Default)]
pub struct InMemorySettingsStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    settings: Option<Settings>,
    saves: u32,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                settings: Some(settings),
                saves: 0,
            })),
        }
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> u32 {
        self.inner.lock().map(|i| i.saves).unwrap_or(0)
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> AppResult<Settings> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        Ok(inner.settings.clone().unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> AppResult<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        inner.settings = Some(settings.clone());
        inner.saves += 1;
        Ok(())
    }
}
