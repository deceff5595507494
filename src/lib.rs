//! fleet-dispatch core
//!
//! Matches available vehicles to pending transport orders, scores the delay
//! risk of each match and proposes empty-leg repositioning. Every function is
//! stateless: callers pass the current vehicle/order snapshot and `now`.

pub mod traits;
pub mod model;
pub mod params;
pub mod gazetteer;
pub mod haversine;
pub mod assignment;
pub mod risk;
pub mod reposition;
pub mod kpi;
pub mod ingest;
pub mod report;
pub mod config;
pub mod telemetry;
pub mod error;
