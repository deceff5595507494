//! Caller-supplied tuning knobs. Pure inputs, never mutated by the engine.

use serde::Serialize;

/// Upper bound accepted for the customs delay scenario, in hours.
pub const MAX_CUSTOMS_DELAY_HOURS: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningParams {
    /// Constant driving speed used for every ETA.
    pub speed_kmh: f64,
    /// Monetary cost per driven kilometer.
    pub cost_per_km: f64,
    /// Longest empty leg the repositioning planner will propose.
    pub max_deadhead_km: f64,
    /// Delay percent above which a risk record is flagged high.
    pub delay_risk_threshold_percent: f64,
}

impl Default for PlanningParams {
    fn default() -> Self {
        Self {
            speed_kmh: 60.0,
            cost_per_km: 3.5,
            max_deadhead_km: 300.0,
            delay_risk_threshold_percent: 20.0,
        }
    }
}

impl PlanningParams {
    /// Checks the values would produce finite, meaningful estimates.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return Err(ParamError::NonPositiveSpeed(self.speed_kmh));
        }
        if !(self.cost_per_km.is_finite() && self.cost_per_km >= 0.0) {
            return Err(ParamError::NegativeCost(self.cost_per_km));
        }
        if !(self.max_deadhead_km.is_finite() && self.max_deadhead_km >= 0.0) {
            return Err(ParamError::NegativeDeadhead(self.max_deadhead_km));
        }
        if !self.delay_risk_threshold_percent.is_finite() {
            return Err(ParamError::InvalidThreshold(self.delay_risk_threshold_percent));
        }
        Ok(())
    }
}

/// Extra hours spent at customs, bounded to `[0, 6]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct CustomsDelay(f64);

impl CustomsDelay {
    pub fn new(hours: f64) -> Result<Self, ParamError> {
        if (0.0..=MAX_CUSTOMS_DELAY_HOURS).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(ParamError::CustomsDelayOutOfRange(hours))
        }
    }

    pub fn hours(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("customs delay must be within 0..=6 hours, got {0}")]
    CustomsDelayOutOfRange(f64),
    #[error("speed must be a positive number of km/h, got {0}")]
    NonPositiveSpeed(f64),
    #[error("cost per km must not be negative, got {0}")]
    NegativeCost(f64),
    #[error("max deadhead distance must not be negative, got {0}")]
    NegativeDeadhead(f64),
    #[error("delay risk threshold must be finite, got {0}")]
    InvalidThreshold(f64),
}
