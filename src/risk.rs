//! Delay, urgency and cost scoring for a (vehicle, order) pair.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::assignment::{assign_nearest, pending_origin};
use crate::haversine::{haversine_km, travel_hours};
use crate::model::{Order, RiskLevel, RiskRecord, Vehicle};
use crate::params::PlanningParams;
use crate::traits::LocationResolver;

/// Urgency points lost per hour of slack before the deadline.
const URGENCY_DECAY_PER_HOUR: f64 = 5.0;

/// Delay percent reported once the deadline has already passed.
const OVERDUE_DELAY_PERCENT: f64 = 100.0;

/// Score one vehicle against one order.
///
/// Returns `None` when the order is not pending, the vehicle is not available,
/// or either location is missing from the gazetteer.
pub fn score<R>(
    order: &Order,
    vehicle: &Vehicle,
    resolver: &R,
    now: DateTime<Utc>,
    params: &PlanningParams,
) -> Option<RiskRecord>
where
    R: LocationResolver,
{
    if !vehicle.is_available() {
        return None;
    }
    let origin = pending_origin(order, resolver)?;
    let position = resolver.resolve(&vehicle.location_name)?;
    let distance_km = haversine_km(position, origin);

    Some(score_distance(order, vehicle, distance_km, now, params))
}

/// Score a pair whose distance is already known.
pub fn score_distance(
    order: &Order,
    vehicle: &Vehicle,
    distance_km: f64,
    now: DateTime<Utc>,
    params: &PlanningParams,
) -> RiskRecord {
    let eta_hours = travel_hours(distance_km, params.speed_kmh);
    let remaining_hours = order.remaining_hours(now);
    let delay_percent = delay_percent(eta_hours, remaining_hours);
    let level = if delay_percent > params.delay_risk_threshold_percent {
        RiskLevel::High
    } else {
        RiskLevel::Low
    };

    let record = RiskRecord {
        order_id: order.id.clone(),
        vehicle_id: vehicle.id.clone(),
        delay_percent,
        urgency_score: urgency_score(remaining_hours),
        distance_km,
        cost_estimate: distance_km * params.cost_per_km,
        level,
    };

    if record.is_high_risk() {
        warn!(
            order_id = %record.order_id,
            vehicle_id = %record.vehicle_id,
            delay_percent = record.delay_percent,
            "high risk of late pickup"
        );
    }
    record
}

/// How far the ETA overshoots the time left, as a percentage of the time left.
/// A deadline at or before `now` counts as fully overdue.
pub fn delay_percent(eta_hours: f64, remaining_hours: f64) -> f64 {
    if remaining_hours <= 0.0 {
        return OVERDUE_DELAY_PERCENT;
    }
    ((eta_hours - remaining_hours) / remaining_hours * 100.0).max(0.0)
}

pub fn urgency_score(remaining_hours: f64) -> f64 {
    (100.0 - remaining_hours * URGENCY_DECAY_PER_HOUR).max(0.0)
}

/// Risk of sending `vehicle` to each pending order it can be located against.
pub fn assess_vehicle<R>(
    orders: &[Order],
    vehicle: &Vehicle,
    resolver: &R,
    now: DateTime<Utc>,
    params: &PlanningParams,
) -> Vec<RiskRecord>
where
    R: LocationResolver,
{
    let records: Vec<RiskRecord> = orders
        .iter()
        .filter_map(|order| score(order, vehicle, resolver, now, params))
        .collect();

    debug!(vehicle_id = %vehicle.id, scored = records.len(), "vehicle risk sweep complete");
    records
}

/// Risk of each pending order's baseline (nearest vehicle) assignment.
pub fn assess_assignments<R>(
    orders: &[Order],
    vehicles: &[Vehicle],
    resolver: &R,
    now: DateTime<Utc>,
    params: &PlanningParams,
) -> Vec<RiskRecord>
where
    R: LocationResolver,
{
    orders
        .iter()
        .filter(|order| order.is_pending())
        .filter_map(|order| {
            let (vehicle, distance_km) = assign_nearest(order, vehicles, resolver)?;
            Some(score_distance(order, vehicle, distance_km, now, params))
        })
        .collect()
}
