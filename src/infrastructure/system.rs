use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

use crate::application::{Clock, ExercisePicker};

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Uniform pick over the enabled exercises.
pub struct RandomExercisePicker;

impl ExercisePicker for RandomExercisePicker {
    fn pick(&self, enabled: &[String]) -> Option<String> {
        enabled.choose(&mut rand::thread_rng()).cloned()
    }
}
