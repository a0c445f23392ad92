pub mod console_notifier;
pub mod event_bus;
pub mod memory_store;
pub mod multi_notifier;
pub mod stdio_notifier;
pub mod system;
pub mod trigger_listener;
pub mod webhook_notifier;
pub mod yaml_settings_store;
