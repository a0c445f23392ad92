use crate::application::usecases::SharedSettings;
use crate::application::{AppError, AppResult, SettingsForm, SettingsStore};

pub struct ApplySettingsUseCase<'a> {
    pub settings: &'a SharedSettings,
    pub store: &'a dyn SettingsStore,
}

impl<'a> ApplySettingsUseCase<'a> {
    /// Persist the form, then make it the live settings.
    /// Returns false (and writes nothing) when the form is unchanged. A failed
    /// save leaves the live settings untouched.
    pub async fn execute(&self, form: &SettingsForm) -> AppResult<bool> {
        let mut snapshot = self
            .settings
            .read()
            .map_err(|_| AppError::State("settings lock poisoned".into()))?
            .clone();
        if !form.is_modified(&snapshot) {
            return Ok(false);
        }
        form.apply(&mut snapshot);

        self.store.save(&snapshot).await?;
        *self
            .settings
            .write()
            .map_err(|_| AppError::State("settings lock poisoned".into()))? = snapshot.clone();
        tracing::info!(
            enabled = snapshot.plugin_enabled,
            cooldown_minutes = snapshot.cooldown_minutes.get(),
            "settings applied"
        );
        Ok(true)
    }
}
