//! TOML-based trace configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::soc::engine::{DEFAULT_FIRST_STEP_HOURS, DEFAULT_INITIAL_SOC, SocEngine};
use crate::soc::model::{BatteryKind, DEFAULT_CAPACITY_KWH, DEFAULT_EFFICIENCY};

/// Input file read when nothing else is configured.
pub const DEFAULT_INPUT: &str = "power_over_time.csv";

/// Top-level configuration parsed from TOML.
///
/// Every field has a default matching the stock battery, so an empty
/// file (or [`TraceConfig::default`]) reproduces the stock behavior.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Battery model parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Input and stepping parameters.
    #[serde(default)]
    pub trace: TraceSettings,
}

/// Battery model parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// SOC model name (`"linear_loss"`).
    pub model: String,
    /// Nominal capacity (kWh, must be > 0). Not used by `linear_loss`.
    pub capacity_kwh: f64,
    /// Efficiency (0.0, 1.0].
    pub efficiency: f64,
    /// SOC at the start of every trace (0.0–1.0).
    pub initial_soc: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            model: "linear_loss".to_string(),
            capacity_kwh: DEFAULT_CAPACITY_KWH,
            efficiency: DEFAULT_EFFICIENCY,
            initial_soc: DEFAULT_INITIAL_SOC,
        }
    }
}

/// Input and stepping parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceSettings {
    /// CSV file with `Time` and `Power` columns.
    pub input: PathBuf,
    /// Time gap (hours) applied to the first reading.
    pub first_step_hours: f64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            first_step_hours: DEFAULT_FIRST_STEP_HOURS,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.efficiency"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl TraceConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let bat = &self.battery;
        if !BatteryKind::NAMES.contains(&bat.model.as_str()) {
            errors.push(ConfigError {
                field: "battery.model".into(),
                message: format!(
                    "unknown model \"{}\", available: {}",
                    bat.model,
                    BatteryKind::NAMES.join(", ")
                ),
            });
        }
        if bat.capacity_kwh.is_nan() || bat.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if !(bat.efficiency > 0.0 && bat.efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "battery.efficiency".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(0.0..=1.0).contains(&bat.initial_soc) {
            errors.push(ConfigError {
                field: "battery.initial_soc".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        let tr = &self.trace;
        if !tr.first_step_hours.is_finite() {
            errors.push(ConfigError {
                field: "trace.first_step_hours".into(),
                message: "must be a finite number of hours".into(),
            });
        }
        if tr.input.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "trace.input".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }

    /// Builds an engine for the configured model and stepping parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the model name is unknown.
    pub fn build_engine(&self) -> Result<SocEngine<BatteryKind>, ConfigError> {
        let bat = &self.battery;
        let model = BatteryKind::from_name(&bat.model, bat.capacity_kwh, bat.efficiency)
            .ok_or_else(|| ConfigError {
                field: "battery.model".to_string(),
                message: format!("unknown model \"{}\"", bat.model),
            })?;
        Ok(SocEngine::new(model)
            .with_initial_soc(bat.initial_soc)
            .with_first_step_hours(self.trace.first_step_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soc::model::{LinearLossModel, SocModel};

    #[test]
    fn default_config_valid() {
        let cfg = TraceConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn default_matches_stock_battery() {
        let cfg = TraceConfig::default();
        assert_eq!(cfg.battery.capacity_kwh, 100.0);
        assert_eq!(cfg.battery.efficiency, 0.90);
        assert_eq!(cfg.battery.initial_soc, 0.80);
        assert_eq!(cfg.trace.first_step_hours, 0.5);
        assert_eq!(cfg.trace.input, PathBuf::from("power_over_time.csv"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[battery]
model = "linear_loss"
capacity_kwh = 50.0
efficiency = 0.95
initial_soc = 0.6

[trace]
input = "data/site_a.csv"
first_step_hours = 0.25
"#;
        let cfg = TraceConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.battery.efficiency), Some(0.95));
        assert_eq!(cfg.as_ref().map(|c| c.trace.first_step_hours), Some(0.25));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.trace.input.to_str()),
            Some("data/site_a.csv")
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[battery]
initial_soc = 0.5
"#;
        let cfg = TraceConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.battery.initial_soc), Some(0.5));
        assert_eq!(cfg.as_ref().map(|c| c.battery.efficiency), Some(0.90));
        assert_eq!(cfg.as_ref().map(|c| c.trace.first_step_hours), Some(0.5));
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = TraceConfig::from_toml_str("");
        assert!(cfg.is_ok_and(|c| c.validate().is_empty()));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_kwh = 100.0
chemistry = "lfp"
"#;
        let result = TraceConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_unknown_model() {
        let mut cfg = TraceConfig::default();
        cfg.battery.model = "lithium".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.model"));
        assert!(cfg.build_engine().is_err());
    }

    #[test]
    fn validation_catches_invalid_soc() {
        let mut cfg = TraceConfig::default();
        cfg.battery.initial_soc = 1.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.initial_soc"));
    }

    #[test]
    fn validation_catches_bad_efficiency_and_capacity() {
        let mut cfg = TraceConfig::default();
        cfg.battery.efficiency = 0.0;
        cfg.battery.capacity_kwh = f64::NAN;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.efficiency"));
        assert!(errors.iter().any(|e| e.field == "battery.capacity_kwh"));
    }

    #[test]
    fn validation_catches_non_finite_first_step() {
        let mut cfg = TraceConfig::default();
        cfg.trace.first_step_hours = f64::INFINITY;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "trace.first_step_hours"));
    }

    #[test]
    fn build_engine_applies_settings() {
        let mut cfg = TraceConfig::default();
        cfg.battery.efficiency = 0.8;
        cfg.battery.initial_soc = 0.4;
        cfg.trace.first_step_hours = 1.0;
        let engine = cfg.build_engine().expect("known model");
        assert_eq!(engine.initial_soc(), 0.4);
        assert_eq!(engine.first_step_hours(), 1.0);
        assert_eq!(
            engine.model(),
            &BatteryKind::LinearLoss(LinearLossModel::new(100.0, 0.8))
        );
        assert_eq!(engine.model().name(), "linear_loss");
    }
}
