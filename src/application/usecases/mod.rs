pub mod apply_settings;
pub mod handle_trigger;
pub mod reminder_service;

pub use apply_settings::*;
pub use handle_trigger::*;
pub use reminder_service::*;
