pub mod ports;
pub mod settings_form;
pub mod usecases;

pub use ports::*;
pub use settings_form::*;
