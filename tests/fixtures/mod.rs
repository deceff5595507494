//! Test fixtures for fleet-dispatch.
//!
//! Provides:
//! - Real port and city coordinates from the southern Brazil operating area
//! - Builders for vehicles, orders and synthetic gazetteers

#![allow(dead_code)]

pub mod places;

pub use places::*;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fleet_dispatch::gazetteer::Gazetteer;
use fleet_dispatch::model::{Order, OrderStatus, Vehicle, VehicleState};

/// Fixed reference instant so deadlines are reproducible.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap()
}

pub fn available(id: &str, place: &Place) -> Vehicle {
    Vehicle::new(id, VehicleState::Available, place.name)
}

pub fn in_transit(id: &str, place: &Place) -> Vehicle {
    Vehicle::new(id, VehicleState::InTransit, place.name)
}

/// Pending order at `place` due `hours` after [`reference_now`].
pub fn pending(id: &str, place: &Place, hours: f64) -> Order {
    let deadline = reference_now() + Duration::milliseconds((hours * 3_600_000.0) as i64);
    Order::new(id, place.name, deadline, OrderStatus::Pending)
}

/// Gazetteer containing only the given places.
pub fn gazetteer_of(places: &[&Place]) -> Gazetteer {
    places.iter().map(|place| (place.name, place.coordinate())).collect()
}
