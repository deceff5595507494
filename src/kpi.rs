//! Fleet indicators and map positions for the presentation side.

use serde::Serialize;
use tracing::debug;

use crate::model::{Coordinate, Order, Vehicle, VehicleState};
use crate::traits::LocationResolver;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    pub total_vehicles: usize,
    pub available: usize,
    pub in_transit: usize,
    pub other: usize,
    /// Share of the fleet that is available, 0 for an empty fleet.
    pub available_percent: f64,
    pub pending_orders: usize,
}

pub fn fleet_summary(vehicles: &[Vehicle], orders: &[Order]) -> FleetSummary {
    let count = |state: VehicleState| vehicles.iter().filter(|v| v.state == state).count();
    let available = count(VehicleState::Available);
    let available_percent = if vehicles.is_empty() {
        0.0
    } else {
        available as f64 / vehicles.len() as f64 * 100.0
    };

    FleetSummary {
        total_vehicles: vehicles.len(),
        available,
        in_transit: count(VehicleState::InTransit),
        other: count(VehicleState::Other),
        available_percent,
        pending_orders: orders.iter().filter(|order| order.is_pending()).count(),
    }
}

/// A vehicle marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePosition {
    pub vehicle_id: String,
    pub state: VehicleState,
    pub coordinate: Coordinate,
}

/// Positions of every vehicle whose location resolves, regardless of state.
pub fn locate_fleet<R: LocationResolver>(vehicles: &[Vehicle], resolver: &R) -> Vec<VehiclePosition> {
    let positions: Vec<VehiclePosition> = vehicles
        .iter()
        .filter_map(|vehicle| {
            let coordinate = resolver.resolve(&vehicle.location_name)?;
            Some(VehiclePosition {
                vehicle_id: vehicle.id.clone(),
                state: vehicle.state,
                coordinate,
            })
        })
        .collect();

    if positions.len() < vehicles.len() {
        debug!(
            unlocated = vehicles.len() - positions.len(),
            "some vehicles have no known position"
        );
    }
    positions
}
