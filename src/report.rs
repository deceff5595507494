//! One full evaluation pass over a fleet/order snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::assignment::{simulate_customs_delay, suggest_assignments};
use crate::kpi::{FleetSummary, fleet_summary};
use crate::model::{CandidateMatch, Order, RepositionSuggestion, RiskRecord, Vehicle};
use crate::params::{CustomsDelay, PlanningParams};
use crate::reposition::plan_empty_legs;
use crate::risk::assess_assignments;
use crate::traits::LocationResolver;

/// Vehicles and orders as loaded for a single refresh.
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<Order>,
}

impl FleetSnapshot {
    /// The vehicle with `id`, provided it can take a pickup right now.
    pub fn available_vehicle(&self, id: &str) -> Result<&Vehicle, VehicleLookupError> {
        let vehicle = self
            .vehicles
            .iter()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| VehicleLookupError::Unknown(id.to_string()))?;
        if !vehicle.is_available() {
            return Err(VehicleLookupError::Unavailable(id.to_string()));
        }
        Ok(vehicle)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VehicleLookupError {
    #[error("vehicle '{0}' not found in fleet")]
    Unknown(String),
    #[error("vehicle '{0}' is not available for dispatch")]
    Unavailable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub evaluated_at: DateTime<Utc>,
    pub customs_delay_hours: f64,
    pub summary: FleetSummary,
    pub suggestions: Vec<CandidateMatch>,
    pub delay_scenario: Vec<CandidateMatch>,
    pub risks: Vec<RiskRecord>,
    pub empty_legs: Vec<RepositionSuggestion>,
}

impl DispatchReport {
    pub fn high_risk_orders(&self) -> impl Iterator<Item = &RiskRecord> {
        self.risks.iter().filter(|record| record.is_high_risk())
    }
}

/// Recompute every output from scratch. Nothing carries over between calls.
pub fn evaluate<R>(
    snapshot: &FleetSnapshot,
    resolver: &R,
    params: &PlanningParams,
    customs_delay: CustomsDelay,
    now: DateTime<Utc>,
) -> DispatchReport
where
    R: LocationResolver,
{
    let FleetSnapshot { vehicles, orders } = snapshot;

    let report = DispatchReport {
        evaluated_at: now,
        customs_delay_hours: customs_delay.hours(),
        summary: fleet_summary(vehicles, orders),
        suggestions: suggest_assignments(orders, vehicles, resolver, params),
        delay_scenario: simulate_customs_delay(orders, vehicles, resolver, params, customs_delay),
        risks: assess_assignments(orders, vehicles, resolver, now, params),
        empty_legs: plan_empty_legs(orders, vehicles, resolver, now, params),
    };

    info!(
        pending = report.summary.pending_orders,
        suggestions = report.suggestions.len(),
        high_risk = report.high_risk_orders().count(),
        empty_legs = report.empty_legs.len(),
        "dispatch evaluation complete"
    );
    report
}
