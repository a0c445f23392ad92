use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use idlefit::application::usecases::{ReminderService, shared_settings};
use idlefit::application::{Notifier, SettingsStore};
use idlefit::infrastructure::{
    console_notifier::ConsoleNotifier,
    event_bus::TriggerBus,
    multi_notifier::MultiNotifier,
    stdio_notifier::StdioNotifier,
    system::{RandomExercisePicker, SystemClock},
    trigger_listener::spawn_trigger_listener,
    webhook_notifier::WebhookNotifier,
    yaml_settings_store::YamlSettingsStore,
};
use idlefit::interfaces::config::Config;
use idlefit::interfaces::stdio::HostBridge;

#[derive(Parser, Debug)]
#[command(name = "idlefit")]
struct Args {
    /// Path to config.yaml (optional; defaults are used when missing)
    #[arg(long, default_value = "config.yaml")]
    config: String,

    /// Override the settings file from config
    #[arg(long)]
    settings: Option<String>,

    /// Do not send external notifications (console + host bridge only)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    // stdout is the host protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                "idlefit=info"
                    .parse()
                    .expect("static directive is valid"),
            ),
        )
        .init();
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // 1) load config
    let cfg = if Path::new(&args.config).exists() {
        match Config::load_from_file(&args.config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("Failed to load config {}: {}", args.config, e);
                std::process::exit(1);
            }
        }
    } else {
        tracing::info!(path = %args.config, "no config file, using defaults");
        Config::default()
    };

    // 2) settings
    let settings_path = args.settings.unwrap_or(cfg.settings_path);
    let store: Arc<dyn SettingsStore> = Arc::new(YamlSettingsStore::new(&settings_path));
    let settings = match store.load().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to load settings {settings_path}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        path = %settings_path,
        enabled = settings.plugin_enabled,
        cooldown_minutes = settings.cooldown_minutes.get(),
        "settings loaded"
    );

    // 3) notifiers fanout
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let mut notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(StdioNotifier::new(out_tx))];
    if cfg.console || args.dry_run {
        notifiers.push(Box::new(ConsoleNotifier::new()));
    }
    if !args.dry_run {
        if let Some(hook) = cfg.webhook_url.clone() {
            notifiers.push(Box::new(WebhookNotifier::new(hook)));
        }
    } else {
        tracing::warn!("--dry-run enabled: webhook disabled");
    }
    let notifier: Arc<dyn Notifier> = Arc::new(MultiNotifier::new(notifiers));

    // 4) reminder service + trigger listener
    let reminders = ReminderService::new(
        shared_settings(settings),
        notifier,
        Arc::new(SystemClock),
        Arc::new(RandomExercisePicker),
    );
    let bus = TriggerBus::new(cfg.bus_capacity);
    let listener = spawn_trigger_listener(&bus, reminders.clone());

    // 5) serve the host until stdin closes
    tracing::info!("idlefit started");
    let bridge = HostBridge {
        bus,
        reminders,
        store,
        outbound: out_rx,
        listener: Some(listener),
    };
    if let Err(e) = bridge.serve_stdio().await {
        tracing::error!("host bridge failed: {e}");
        std::process::exit(1);
    }
    tracing::info!("idlefit stopped");
}
