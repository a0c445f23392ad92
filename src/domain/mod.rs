pub mod exercise;
pub mod policy;
pub mod reminder;
pub mod settings;
pub mod trigger;

pub use exercise::*;
pub use policy::*;
pub use reminder::*;
pub use settings::*;
pub use trigger::*;
