//! SOC update models.

use crate::error::{TraceError, TraceResult};

/// Default battery capacity (kWh).
pub const DEFAULT_CAPACITY_KWH: f64 = 100.0;
/// Default efficiency.
pub const DEFAULT_EFFICIENCY: f64 = 0.90;

/// Fraction of SOC removed per kWh transferred.
const SOC_PER_KWH: f64 = 0.01;

/// A model that advances the state of charge by one reading.
pub trait SocModel {
    /// Returns the SOC after transferring `power_kw` for `time_gap_hours`.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::InvalidInput` when an argument is not finite or
    /// `current_soc` lies outside `[0, 1]`.
    fn next_soc(&self, time_gap_hours: f64, power_kw: f64, current_soc: f64) -> TraceResult<f64>;

    /// Short identifier used in configuration and logs.
    fn name(&self) -> &'static str;
}

/// Linear model with a proportional loss term.
///
/// ```text
/// energy = power * time_gap
/// loss   = energy * (1 - efficiency)
/// soc'   = soc - (energy + |loss|) * 0.01
/// ```
///
/// The result is not clamped. `capacity_kwh` is carried with the model but
/// does not enter the update.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearLossModel {
    pub capacity_kwh: f64,
    pub efficiency: f64,
}

impl Default for LinearLossModel {
    fn default() -> Self {
        Self {
            capacity_kwh: DEFAULT_CAPACITY_KWH,
            efficiency: DEFAULT_EFFICIENCY,
        }
    }
}

impl LinearLossModel {
    pub fn new(capacity_kwh: f64, efficiency: f64) -> Self {
        Self {
            capacity_kwh,
            efficiency,
        }
    }
}

impl SocModel for LinearLossModel {
    fn next_soc(&self, time_gap_hours: f64, power_kw: f64, current_soc: f64) -> TraceResult<f64> {
        if !time_gap_hours.is_finite() {
            return Err(TraceError::invalid_input("'hour' should be a number."));
        }
        if !power_kw.is_finite() {
            return Err(TraceError::invalid_input("'power' should be a number."));
        }
        if !current_soc.is_finite() {
            return Err(TraceError::invalid_input("'current_soc' should be a number."));
        }
        if !(0.0..=1.0).contains(&current_soc) {
            return Err(TraceError::invalid_input(format!(
                "'current_soc' should be between 0 and 1, got {current_soc}"
            )));
        }

        let energy_kwh = power_kw * time_gap_hours;
        let loss_kwh = energy_kwh * (1.0 - self.efficiency);
        Ok(current_soc - (energy_kwh + loss_kwh.abs()) * SOC_PER_KWH)
    }

    fn name(&self) -> &'static str {
        "linear_loss"
    }
}

/// The set of SOC models selectable from configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum BatteryKind {
    LinearLoss(LinearLossModel),
}

impl BatteryKind {
    /// Model names accepted by [`BatteryKind::from_name`].
    pub const NAMES: &[&str] = &["linear_loss"];

    /// Builds the model registered under `name`.
    pub fn from_name(name: &str, capacity_kwh: f64, efficiency: f64) -> Option<Self> {
        match name {
            "linear_loss" => Some(Self::LinearLoss(LinearLossModel::new(
                capacity_kwh,
                efficiency,
            ))),
            _ => None,
        }
    }
}

impl Default for BatteryKind {
    fn default() -> Self {
        Self::LinearLoss(LinearLossModel::default())
    }
}

impl SocModel for BatteryKind {
    fn next_soc(&self, time_gap_hours: f64, power_kw: f64, current_soc: f64) -> TraceResult<f64> {
        match self {
            Self::LinearLoss(model) => model.next_soc(time_gap_hours, power_kw, current_soc),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::LinearLoss(model) => model.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn charging_half_hour_at_fifty_kw() {
        // energy 25 kWh, loss 2.5 kWh -> 27.5 * 0.01
        let soc = LinearLossModel::default().next_soc(0.5, 50.0, 0.8);
        assert!(soc.as_ref().is_ok_and(|s| approx(*s, 0.525)), "{soc:?}");
    }

    #[test]
    fn discharging_raises_soc_by_energy_minus_loss() {
        // energy -10 kWh, |loss| 1 kWh -> soc - (-10 + 1) * 0.01
        let soc = LinearLossModel::default().next_soc(1.0, -10.0, 0.5);
        assert!(soc.as_ref().is_ok_and(|s| approx(*s, 0.59)), "{soc:?}");
    }

    #[test]
    fn zero_power_leaves_soc_unchanged() {
        let soc = LinearLossModel::default().next_soc(2.0, 0.0, 0.37);
        assert_eq!(soc.ok(), Some(0.37));
    }

    #[test]
    fn result_is_not_clamped() {
        let soc = LinearLossModel::default().next_soc(1.0, 100.0, 0.1);
        assert!(soc.as_ref().is_ok_and(|s| *s < 0.0), "{soc:?}");
    }

    #[test]
    fn capacity_does_not_affect_update() {
        let small = LinearLossModel::new(1.0, 0.9).next_soc(0.5, 40.0, 0.9).ok();
        let large = LinearLossModel::new(1000.0, 0.9).next_soc(0.5, 40.0, 0.9).ok();
        assert_eq!(small, large);
    }

    #[test]
    fn efficiency_scales_loss() {
        let lossless = LinearLossModel::new(100.0, 1.0).next_soc(1.0, 10.0, 0.5);
        assert!(lossless.as_ref().is_ok_and(|s| approx(*s, 0.4)), "{lossless:?}");
    }

    #[test]
    fn soc_bounds_are_inclusive() {
        let model = LinearLossModel::default();
        assert!(model.next_soc(0.5, 0.0, 0.0).is_ok());
        assert!(model.next_soc(0.5, 0.0, 1.0).is_ok());
    }

    #[test]
    fn soc_out_of_range_is_invalid_input() {
        let model = LinearLossModel::default();
        for soc in [-0.01, 1.01] {
            let err = model.next_soc(0.5, 10.0, soc);
            assert!(matches!(err, Err(TraceError::InvalidInput { .. })), "soc {soc}");
        }
    }

    #[test]
    fn non_finite_arguments_are_invalid_input() {
        let model = LinearLossModel::default();
        assert!(matches!(
            model.next_soc(f64::NAN, 1.0, 0.5),
            Err(TraceError::InvalidInput { .. })
        ));
        assert!(matches!(
            model.next_soc(0.5, f64::INFINITY, 0.5),
            Err(TraceError::InvalidInput { .. })
        ));
        assert!(matches!(
            model.next_soc(0.5, 1.0, f64::NAN),
            Err(TraceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn battery_kind_resolves_known_names() {
        assert!(BatteryKind::from_name("linear_loss", 100.0, 0.9).is_some());
        assert!(BatteryKind::from_name("lithium", 100.0, 0.9).is_none());
        assert_eq!(BatteryKind::default().name(), "linear_loss");
    }

    #[test]
    fn battery_kind_delegates_to_model() {
        let kind = BatteryKind::default();
        let direct = LinearLossModel::default().next_soc(0.5, 50.0, 0.8).ok();
        assert_eq!(kind.next_soc(0.5, 50.0, 0.8).ok(), direct);
    }
}
