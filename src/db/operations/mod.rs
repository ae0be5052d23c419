pub mod learner;
pub mod telemetry;

pub use learner::*;
pub use telemetry::*;
