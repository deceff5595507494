//! Greedy vehicle-to-order assignment.
//!
//! Each order is evaluated on its own: there is no exclusivity across orders,
//! so one vehicle can be the best pick for several orders in the same pass.
//! Ties keep the first vehicle in input order.

use tracing::debug;

use crate::haversine::{haversine_km, travel_hours};
use crate::model::{CandidateMatch, Coordinate, Order, Vehicle};
use crate::params::{CustomsDelay, PlanningParams};
use crate::traits::LocationResolver;

/// Nearest available vehicle to the order's origin, with its distance in km.
pub fn assign_nearest<'v, R>(
    order: &Order,
    vehicles: &'v [Vehicle],
    resolver: &R,
) -> Option<(&'v Vehicle, f64)>
where
    R: LocationResolver,
{
    let origin = pending_origin(order, resolver)?;
    first_minimum(reachable_vehicles(origin, vehicles, resolver))
}

/// Vehicle with the lowest ETA once a customs delay is added, with that ETA in hours.
pub fn assign_fastest_under_delay<'v, R>(
    order: &Order,
    vehicles: &'v [Vehicle],
    resolver: &R,
    customs_delay: CustomsDelay,
    speed_kmh: f64,
) -> Option<(&'v Vehicle, f64)>
where
    R: LocationResolver,
{
    fastest_under_delay(order, vehicles, resolver, customs_delay, speed_kmh)
        .map(|(vehicle, _, eta)| (vehicle, eta))
}

/// Baseline suggestion for every pending order that has a reachable vehicle.
pub fn suggest_assignments<R>(
    orders: &[Order],
    vehicles: &[Vehicle],
    resolver: &R,
    params: &PlanningParams,
) -> Vec<CandidateMatch>
where
    R: LocationResolver,
{
    let matches: Vec<CandidateMatch> = orders
        .iter()
        .filter(|order| order.is_pending())
        .filter_map(|order| {
            let (vehicle, distance_km) = assign_nearest(order, vehicles, resolver)?;
            Some(CandidateMatch {
                order_id: order.id.clone(),
                vehicle_id: vehicle.id.clone(),
                distance_km,
                eta_hours: travel_hours(distance_km, params.speed_kmh),
                cost_estimate: distance_km * params.cost_per_km,
            })
        })
        .collect();

    debug!(
        orders = orders.len(),
        vehicles = vehicles.len(),
        matched = matches.len(),
        "baseline assignment pass complete"
    );
    matches
}

/// Best pick per pending order when every trip also waits `customs_delay` at the border.
pub fn simulate_customs_delay<R>(
    orders: &[Order],
    vehicles: &[Vehicle],
    resolver: &R,
    params: &PlanningParams,
    customs_delay: CustomsDelay,
) -> Vec<CandidateMatch>
where
    R: LocationResolver,
{
    let matches: Vec<CandidateMatch> = orders
        .iter()
        .filter(|order| order.is_pending())
        .filter_map(|order| {
            let (vehicle, distance_km, eta_hours) =
                fastest_under_delay(order, vehicles, resolver, customs_delay, params.speed_kmh)?;
            Some(CandidateMatch {
                order_id: order.id.clone(),
                vehicle_id: vehicle.id.clone(),
                distance_km,
                eta_hours,
                cost_estimate: distance_km * params.cost_per_km,
            })
        })
        .collect();

    debug!(
        customs_delay_hours = customs_delay.hours(),
        matched = matches.len(),
        "customs delay scenario complete"
    );
    matches
}

fn fastest_under_delay<'v, R>(
    order: &Order,
    vehicles: &'v [Vehicle],
    resolver: &R,
    customs_delay: CustomsDelay,
    speed_kmh: f64,
) -> Option<(&'v Vehicle, f64, f64)>
where
    R: LocationResolver,
{
    let origin = pending_origin(order, resolver)?;
    let timed = reachable_vehicles(origin, vehicles, resolver).map(|(vehicle, distance_km)| {
        let eta = travel_hours(distance_km, speed_kmh) + customs_delay.hours();
        ((vehicle, distance_km), eta)
    });

    first_minimum(timed).map(|((vehicle, distance_km), eta)| (vehicle, distance_km, eta))
}

/// Origin of a pending order, or `None` when the order is not pending or its
/// origin is not in the gazetteer.
pub(crate) fn pending_origin<R: LocationResolver>(order: &Order, resolver: &R) -> Option<Coordinate> {
    if !order.is_pending() {
        return None;
    }
    let origin = resolver.resolve(&order.origin_name);
    if origin.is_none() {
        debug!(order_id = %order.id, origin = %order.origin_name, "order origin unresolvable; skipping");
    }
    origin
}

/// Available, locatable vehicles paired with their distance to `origin`, in input order.
pub(crate) fn reachable_vehicles<'v, 'r, R>(
    origin: Coordinate,
    vehicles: &'v [Vehicle],
    resolver: &'r R,
) -> impl Iterator<Item = (&'v Vehicle, f64)>
where
    R: LocationResolver,
{
    vehicles
        .iter()
        .filter(|vehicle| vehicle.is_available())
        .filter_map(move |vehicle| match resolver.resolve(&vehicle.location_name) {
            Some(position) => Some((vehicle, haversine_km(position, origin))),
            None => {
                debug!(vehicle_id = %vehicle.id, location = %vehicle.location_name, "vehicle location unresolvable; skipping");
                None
            }
        })
}

/// Item with the strictly smallest key; the earliest one wins ties.
/// Non-finite keys never win.
pub(crate) fn first_minimum<T>(items: impl Iterator<Item = (T, f64)>) -> Option<(T, f64)> {
    items
        .filter(|(_, key)| key.is_finite())
        .fold(None, |best, (item, key)| match best {
            Some((_, best_key)) if !(key < best_key) => best,
            _ => Some((item, key)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderStatus, VehicleState};
    use chrono::{Duration, TimeZone, Utc};

    fn gazetteer() -> std::collections::HashMap<String, Coordinate> {
        [
            ("origin", Coordinate::new(0.0, 0.0)),
            ("east", Coordinate::new(0.0, 1.0)),
            ("west", Coordinate::new(0.0, -1.0)),
            ("far", Coordinate::new(0.0, 3.0)),
        ]
        .into_iter()
        .map(|(name, coordinate)| (name.to_string(), coordinate))
        .collect()
    }

    fn order(origin: &str) -> Order {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        Order::new("o1", origin, now + Duration::hours(10), OrderStatus::Pending)
    }

    #[test]
    fn first_minimum_keeps_earliest_tie() {
        let picked = first_minimum(vec![("a", 2.0), ("b", 1.0), ("c", 1.0)].into_iter());
        assert_eq!(picked, Some(("b", 1.0)));
    }

    #[test]
    fn first_minimum_ignores_non_finite_keys() {
        let picked = first_minimum(vec![("nan", f64::NAN), ("a", 2.0), ("inf", f64::INFINITY), ("b", f64::NAN)].into_iter());
        assert_eq!(picked, Some(("a", 2.0)));
        assert_eq!(first_minimum(vec![("nan", f64::NAN)].into_iter()), None);
    }

    #[test]
    fn equidistant_vehicles_keep_input_order() {
        let vehicles = vec![
            Vehicle::new("w", VehicleState::Available, "west"),
            Vehicle::new("e", VehicleState::Available, "east"),
        ];
        let (vehicle, _) = assign_nearest(&order("origin"), &vehicles, &gazetteer()).expect("match");
        assert_eq!(vehicle.id, "w");

        let reversed: Vec<Vehicle> = vehicles.into_iter().rev().collect();
        let (vehicle, _) = assign_nearest(&order("origin"), &reversed, &gazetteer()).expect("match");
        assert_eq!(vehicle.id, "e");
    }

    #[test]
    fn skips_unavailable_and_unlocatable_vehicles() {
        let vehicles = vec![
            Vehicle::new("busy", VehicleState::InTransit, "origin"),
            Vehicle::new("lost", VehicleState::Available, "nowhere"),
            Vehicle::new("far", VehicleState::Available, "far"),
        ];
        let (vehicle, distance) = assign_nearest(&order("origin"), &vehicles, &gazetteer()).expect("match");
        assert_eq!(vehicle.id, "far");
        assert!(distance > 300.0);
    }

    #[test]
    fn non_pending_order_gets_no_match() {
        let vehicles = vec![Vehicle::new("e", VehicleState::Available, "east")];
        let mut closed = order("origin");
        closed.status = OrderStatus::Other;
        assert!(assign_nearest(&closed, &vehicles, &gazetteer()).is_none());
    }

    #[test]
    fn delay_is_added_to_eta() {
        let vehicles = vec![Vehicle::new("e", VehicleState::Available, "east")];
        let delay = CustomsDelay::new(2.0).unwrap();
        let (_, eta) = assign_fastest_under_delay(&order("origin"), &vehicles, &gazetteer(), delay, 60.0)
            .expect("match");
        let distance = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((eta - (distance / 60.0 + 2.0)).abs() < 1e-9);
    }
}
