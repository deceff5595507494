//! Environment-driven configuration for the dispatch CLI.

use std::env;

use crate::params::{CustomsDelay, ParamError, PlanningParams};

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub planning: PlanningParams,
    pub customs_delay: CustomsDelay,
    pub telemetry: TelemetryConfig,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Customs delay preselected when nothing is configured, in hours.
const DEFAULT_CUSTOMS_DELAY_HOURS: f64 = 2.0;

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PlanningParams::default();
        let number = |key: &'static str, default: f64| -> Result<f64, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
            }
        };

        let planning = PlanningParams {
            speed_kmh: number("FLEET_SPEED_KMH", defaults.speed_kmh)?,
            cost_per_km: number("FLEET_COST_PER_KM", defaults.cost_per_km)?,
            max_deadhead_km: number("FLEET_MAX_DEADHEAD_KM", defaults.max_deadhead_km)?,
            delay_risk_threshold_percent: number(
                "FLEET_DELAY_RISK_THRESHOLD",
                defaults.delay_risk_threshold_percent,
            )?,
        };
        planning.validate()?;

        let customs_delay = CustomsDelay::new(number(
            "FLEET_CUSTOMS_DELAY_HOURS",
            DEFAULT_CUSTOMS_DELAY_HOURS,
        )?)?;

        let log_level = lookup("FLEET_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            planning,
            customs_delay,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error(transparent)]
    Param(#[from] ParamError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("config loads with defaults");
        assert_eq!(config.planning, PlanningParams::default());
        assert_eq!(config.customs_delay.hours(), 2.0);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("FLEET_SPEED_KMH", "75"),
            ("FLEET_MAX_DEADHEAD_KM", " 450 "),
            ("FLEET_CUSTOMS_DELAY_HOURS", "0"),
            ("FLEET_LOG_LEVEL", "debug"),
        ]))
        .expect("config loads");

        assert_eq!(config.planning.speed_kmh, 75.0);
        assert_eq!(config.planning.max_deadhead_km, 450.0);
        assert_eq!(config.customs_delay.hours(), 0.0);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = AppConfig::from_lookup(lookup(&[("FLEET_COST_PER_KM", "cheap")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { key: "FLEET_COST_PER_KM", .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_customs_delay() {
        let err = AppConfig::from_lookup(lookup(&[("FLEET_CUSTOMS_DELAY_HOURS", "9")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Param(ParamError::CustomsDelayOutOfRange(_))
        ));
    }
}
