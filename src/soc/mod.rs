//! State-of-charge models and the trace engine.

pub mod engine;
pub mod model;
/// `HH:MM` parsing and time gaps between readings.
pub mod time;

pub use engine::{DEFAULT_FIRST_STEP_HOURS, DEFAULT_INITIAL_SOC, SocEngine, SocTrace, TracePoint};
pub use model::{BatteryKind, LinearLossModel, SocModel};
