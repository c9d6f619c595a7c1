//! Battery state-of-charge trace over a time series of power readings.

/// Driver that reads, traces, and prints.
pub mod calculator;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
/// SOC models and the trace engine.
pub mod soc;

pub use calculator::{Calculation, PowerCalculator};
pub use error::{TraceError, TraceResult};
pub use soc::{BatteryKind, LinearLossModel, SocEngine, SocModel, TracePoint};
