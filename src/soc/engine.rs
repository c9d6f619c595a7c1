//! SOC trace engine: walks readings in order and applies a [`SocModel`].

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use tracing::{debug, warn};

use super::model::{BatteryKind, SocModel};
use super::time::time_gap;
use crate::error::{TraceError, TraceResult};
use crate::io::reader::Reading;

/// SOC at the start of every trace.
pub const DEFAULT_INITIAL_SOC: f64 = 0.80;
/// Time gap (hours) applied to the first reading, which has no predecessor.
pub const DEFAULT_FIRST_STEP_HOURS: f64 = 0.5;

/// One emitted trace row.
#[derive(Debug, Clone, PartialEq)]
pub struct TracePoint {
    /// Time of day exactly as read.
    pub time: String,
    /// Parsed power (kW).
    pub power_kw: i64,
    /// SOC after applying this reading.
    pub soc: f64,
}

impl fmt::Display for TracePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{:.2}", self.time, self.power_kw, self.soc)
    }
}

/// Computes SOC traces from ordered readings.
///
/// Generic over `M: SocModel` for static dispatch. The engine itself holds
/// no per-trace state: each call to [`SocEngine::trace`] starts again from
/// the initial SOC, so one engine can compute any number of independent
/// traces.
///
/// # Examples
///
/// ```
/// use soc_trace::io::Reading;
/// use soc_trace::soc::{BatteryKind, SocEngine};
///
/// let engine = SocEngine::new(BatteryKind::default());
/// let readings = [Reading::new("09:00", "50"), Reading::new("09:30", "50")];
/// let trace = engine.compute_trace(&readings).unwrap();
/// assert_eq!(trace[0].to_string(), "09:00,50,0.53");
/// assert_eq!(trace[1].to_string(), "09:30,50,0.25");
/// ```
#[derive(Debug, Clone)]
pub struct SocEngine<M: SocModel> {
    model: M,
    initial_soc: f64,
    first_step_hours: f64,
}

impl<M: SocModel> SocEngine<M> {
    /// Creates an engine starting at 0.80 SOC with a 0.5 h first step.
    pub fn new(model: M) -> Self {
        Self {
            model,
            initial_soc: DEFAULT_INITIAL_SOC,
            first_step_hours: DEFAULT_FIRST_STEP_HOURS,
        }
    }

    #[must_use]
    pub fn with_initial_soc(mut self, initial_soc: f64) -> Self {
        self.initial_soc = initial_soc;
        self
    }

    #[must_use]
    pub fn with_first_step_hours(mut self, first_step_hours: f64) -> Self {
        self.first_step_hours = first_step_hours;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn initial_soc(&self) -> f64 {
        self.initial_soc
    }

    pub fn first_step_hours(&self) -> f64 {
        self.first_step_hours
    }

    /// Returns a lazy trace over `readings`, yielding one row per reading.
    ///
    /// The iterator stops after yielding the first error; rows yielded
    /// before it stay valid.
    pub fn trace<'a>(&'a self, readings: &'a [Reading]) -> SocTrace<'a, M> {
        SocTrace {
            engine: self,
            readings: readings.iter(),
            soc: self.initial_soc,
            prev_time: None,
            done: false,
        }
    }

    /// Computes the whole trace, failing on the first bad reading.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPower`, `InvalidTime`, or `InvalidInput` from the
    /// first reading that fails.
    pub fn compute_trace(&self, readings: &[Reading]) -> TraceResult<Vec<TracePoint>> {
        self.trace(readings).collect()
    }
}

impl Default for SocEngine<BatteryKind> {
    fn default() -> Self {
        Self::new(BatteryKind::default())
    }
}

/// Iterator returned by [`SocEngine::trace`].
pub struct SocTrace<'a, M: SocModel> {
    engine: &'a SocEngine<M>,
    readings: slice::Iter<'a, Reading>,
    soc: f64,
    prev_time: Option<&'a str>,
    done: bool,
}

impl<'a, M: SocModel> SocTrace<'a, M> {
    fn step(&mut self, reading: &'a Reading) -> TraceResult<TracePoint> {
        let power_kw = parse_power(&reading.power)?;

        // An empty previous time counts as no previous reading.
        let gap_hours = match self.prev_time.filter(|prev| !prev.is_empty()) {
            Some(prev) => time_gap(prev, &reading.time)?,
            None => self.engine.first_step_hours,
        };
        if gap_hours < 0.0 {
            warn!(
                prev = self.prev_time.unwrap_or_default(),
                time = %reading.time,
                gap_hours,
                "negative time gap between readings"
            );
        }
        self.prev_time = Some(reading.time.as_str());

        let soc = self
            .engine
            .model
            .next_soc(gap_hours, power_kw as f64, self.soc)?;
        debug!(
            time = %reading.time,
            power_kw,
            gap_hours,
            soc,
            model = self.engine.model.name(),
            "soc step"
        );
        self.soc = soc;

        Ok(TracePoint {
            time: reading.time.clone(),
            power_kw,
            soc,
        })
    }
}

impl<M: SocModel> Iterator for SocTrace<'_, M> {
    type Item = TraceResult<TracePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let reading = self.readings.next()?;
        let result = self.step(reading);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

impl<M: SocModel> FusedIterator for SocTrace<'_, M> {}

fn parse_power(value: &str) -> TraceResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| TraceError::InvalidPower {
            value: value.to_string(),
        })
}
