//! Records exchanged between the ingestion side, the engine and presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleState {
    Available,
    InTransit,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub state: VehicleState,
    /// Place name looked up through a [`LocationResolver`](crate::traits::LocationResolver).
    pub location_name: String,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, state: VehicleState, location_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state,
            location_name: location_name.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.state == VehicleState::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub origin_name: String,
    /// Latest instant a vehicle may reach the origin to collect the cargo.
    pub pickup_deadline: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        origin_name: impl Into<String>,
        pickup_deadline: DateTime<Utc>,
        status: OrderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            origin_name: origin_name.into(),
            pickup_deadline,
            status,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Hours left until the pickup deadline. Negative once the deadline has passed.
    pub fn remaining_hours(&self, now: DateTime<Utc>) -> f64 {
        let millis = (self.pickup_deadline - now).num_milliseconds();
        millis as f64 / 3_600_000.0
    }
}

/// Best vehicle found for an order in one evaluation pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMatch {
    pub order_id: String,
    pub vehicle_id: String,
    pub distance_km: f64,
    pub eta_hours: f64,
    pub cost_estimate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskRecord {
    pub order_id: String,
    pub vehicle_id: String,
    pub delay_percent: f64,
    pub urgency_score: f64,
    pub distance_km: f64,
    pub cost_estimate: f64,
    pub level: RiskLevel,
}

impl RiskRecord {
    pub fn is_high_risk(&self) -> bool {
        self.level == RiskLevel::High
    }
}

/// Empty-leg movement recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositionSuggestion {
    pub order_id: String,
    pub vehicle_id: String,
    pub distance_km: f64,
    pub eta_hours: f64,
    pub cost_estimate: f64,
}
