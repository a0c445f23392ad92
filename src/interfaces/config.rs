use serde::Deserialize;

fn default_settings_path() -> String {
    "idlefit.yaml".to_string()
}

fn default_bus_capacity() -> usize {
    64
}

/// Process configuration (`config.yaml`). User settings live in their own file
/// at `settings_path`, written back whenever the settings form is applied.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
    /// Also POST reminders to this chat webhook.
    pub webhook_url: Option<String>,
    /// Also print reminders on stderr.
    #[serde(default)]
    pub console: bool,
    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            webhook_url: None,
            console: false,
            bus_capacity: default_bus_capacity(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let raw = expand_env(raw);
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut cfg: Config = serde_yaml::from_str(&raw)?;
        // an unset ${VAR} expands to nothing
        if cfg.webhook_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            cfg.webhook_url = None;
        }
        if cfg.bus_capacity == 0 {
            anyhow::bail!("bus_capacity must be greater than 0");
        }
        Ok(cfg)
    }
}

/// very small ${VAR} expansion to keep config simple; unknown vars become empty
fn expand_env(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                out.push_str(&std::env::var(&after[..end]).unwrap_or_default());
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
