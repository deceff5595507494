//! Empty-leg repositioning.
//!
//! Unlike the baseline assignment, a vehicle only qualifies when it is within
//! the deadhead cap and can reach the origin before the pickup deadline.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::assignment::{first_minimum, pending_origin, reachable_vehicles};
use crate::haversine::travel_hours;
use crate::model::{Order, RepositionSuggestion, Vehicle};
use crate::params::PlanningParams;
use crate::traits::LocationResolver;

/// Nearest feasible vehicle for each pending order.
///
/// Orders without a feasible vehicle are left out of the result.
pub fn plan_empty_legs<R>(
    orders: &[Order],
    vehicles: &[Vehicle],
    resolver: &R,
    now: DateTime<Utc>,
    params: &PlanningParams,
) -> Vec<RepositionSuggestion>
where
    R: LocationResolver,
{
    let suggestions: Vec<RepositionSuggestion> = orders
        .iter()
        .filter(|order| order.is_pending())
        .filter_map(|order| plan_for_order(order, vehicles, resolver, now, params))
        .collect();

    debug!(
        orders = orders.len(),
        suggested = suggestions.len(),
        max_deadhead_km = params.max_deadhead_km,
        "empty-leg planning complete"
    );
    suggestions
}

fn plan_for_order<R>(
    order: &Order,
    vehicles: &[Vehicle],
    resolver: &R,
    now: DateTime<Utc>,
    params: &PlanningParams,
) -> Option<RepositionSuggestion>
where
    R: LocationResolver,
{
    let origin = pending_origin(order, resolver)?;
    let remaining_hours = order.remaining_hours(now);

    let feasible = reachable_vehicles(origin, vehicles, resolver).filter(|&(_, distance_km)| {
        distance_km <= params.max_deadhead_km
            && travel_hours(distance_km, params.speed_kmh) <= remaining_hours
    });

    let Some((vehicle, distance_km)) = first_minimum(feasible) else {
        debug!(order_id = %order.id, remaining_hours, "no feasible empty leg");
        return None;
    };

    Some(RepositionSuggestion {
        order_id: order.id.clone(),
        vehicle_id: vehicle.id.clone(),
        distance_km: round_to(distance_km, 1),
        eta_hours: round_to(travel_hours(distance_km, params.speed_kmh), 1),
        cost_estimate: round_to(distance_km * params.cost_per_km, 2),
    })
}

/// Exact halves go to the even neighbour, matching the dashboard's figures.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(round_to(81.0903, 1), 81.1);
        assert_eq!(round_to(283.816, 2), 283.82);
    }

    #[test]
    fn exact_halves_round_to_even() {
        assert_eq!(round_to(1.25, 1), 1.2);
        assert_eq!(round_to(1.75, 1), 1.8);
        assert_eq!(round_to(0.5, 0), 0.0);
    }
}
