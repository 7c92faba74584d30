mod engine;
mod rules;

pub use engine::{AlertProfile, BackgroundSnapshot, HungerEngine, HungerState};
pub use rules::HungerRules;
