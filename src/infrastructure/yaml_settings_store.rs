use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::{AppError, AppResult, SettingsStore};
use crate::domain::Settings;

/// Settings kept in a YAML file, e.g. `idlefit.yaml`:
///
/// ```yaml
/// plugin_enabled: true
/// cooldown_minutes: 30
/// triggers:
///   compilation: true
///   process_termination: true
///   indexing: false
/// exercises:
///   Squat: true
///   Push-up: true
///   Burpee: false
/// ```
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for YamlSettingsStore {
    async fn load(&self) -> AppResult<Settings> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => return Err(AppError::Storage(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(&raw).map_err(|e| AppError::Storage(e.to_string()))
    }

    async fn save(&self, settings: &Settings) -> AppResult<()> {
        let raw = serde_yaml::to_string(settings).map_err(|e| AppError::Storage(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }
}
