//! CSV ingestion of fleet and order exports.
//!
//! Accepts the dashboard spreadsheet headers (`Caminhao`, `Estado`, ...) as well
//! as plain English ones. Deadlines are validated here so the engine only ever
//! sees well-formed timestamps.

use std::io::Read;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::model::{Order, OrderStatus, Vehicle, VehicleState};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid pickup deadline '{value}'")]
    InvalidDeadline { row: usize, value: String },
}

pub fn read_vehicles<R: Read>(reader: R) -> Result<Vec<Vehicle>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut vehicles = Vec::new();

    for record in csv_reader.deserialize::<VehicleRow>() {
        let row = record?;
        vehicles.push(Vehicle {
            id: row.id,
            state: parse_state(&row.state),
            location_name: row.location,
        });
    }

    Ok(vehicles)
}

pub fn read_orders<R: Read>(reader: R) -> Result<Vec<Order>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut orders = Vec::new();

    for (index, record) in csv_reader.deserialize::<OrderRow>().enumerate() {
        let row = record?;
        // Header is line 1, so the first data row is line 2.
        let line = index + 2;
        let pickup_deadline =
            parse_deadline(&row.pickup_deadline).ok_or_else(|| IngestError::InvalidDeadline {
                row: line,
                value: row.pickup_deadline.clone(),
            })?;

        orders.push(Order {
            id: row.id,
            origin_name: row.origin,
            pickup_deadline,
            status: parse_status(&row.status),
        });
    }

    Ok(orders)
}

#[derive(Debug, Deserialize)]
struct VehicleRow {
    #[serde(alias = "Caminhao", alias = "vehicle_id")]
    id: String,
    #[serde(alias = "Estado")]
    state: String,
    #[serde(alias = "Localização Atual", alias = "Localizacao Atual", alias = "location_name")]
    location: String,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(alias = "ID")]
    id: String,
    #[serde(alias = "Origem", alias = "origin_name")]
    origin: String,
    #[serde(alias = "Data_Limite_Coleta")]
    pickup_deadline: String,
    #[serde(alias = "Status")]
    status: String,
}

fn parse_state(value: &str) -> VehicleState {
    match normalize(value).as_str() {
        "disponível" | "disponivel" | "available" => VehicleState::Available,
        "em trânsito" | "em transito" | "in transit" | "intransit" | "in_transit" => {
            VehicleState::InTransit
        }
        _ => VehicleState::Other,
    }
}

fn parse_status(value: &str) -> OrderStatus {
    match normalize(value).as_str() {
        "pendente" | "pending" => OrderStatus::Pending,
        _ => OrderStatus::Other,
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` read as UTC.
pub fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reads_dashboard_fleet_headers() {
        let data = "Caminhao,Estado,Localização Atual\n\
                    CAM-01,Disponível,Santos\n\
                    CAM-02,Em Trânsito,Betim\n\
                    CAM-03,Manutenção,Curitiba\n";
        let vehicles = read_vehicles(data.as_bytes()).expect("fleet parses");

        assert_eq!(vehicles.len(), 3);
        assert_eq!(vehicles[0], Vehicle::new("CAM-01", VehicleState::Available, "Santos"));
        assert_eq!(vehicles[1].state, VehicleState::InTransit);
        assert_eq!(vehicles[2].state, VehicleState::Other);
    }

    #[test]
    fn reads_english_order_headers() {
        let data = "id,origin,pickup_deadline,status\n\
                    O1,Cachoeirinha,2024-03-10T18:00:00Z,Pending\n\
                    O2,Santos,2024-03-11 06:30,done\n";
        let orders = read_orders(data.as_bytes()).expect("orders parse");

        assert_eq!(orders.len(), 2);
        assert_eq!(
            orders[0].pickup_deadline,
            Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap()
        );
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(
            orders[1].pickup_deadline,
            Utc.with_ymd_and_hms(2024, 3, 11, 6, 30, 0).unwrap()
        );
        assert_eq!(orders[1].status, OrderStatus::Other);
    }

    #[test]
    fn rejects_malformed_deadline_with_row() {
        let data = "ID,Origem,Data_Limite_Coleta,Status\n\
                    P1,Santos,2024-03-10 08:00:00,Pendente\n\
                    P2,Santos,tomorrow,Pendente\n";
        let err = read_orders(data.as_bytes()).unwrap_err();

        match err {
            IngestError::InvalidDeadline { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "tomorrow");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let parsed = parse_deadline("2024-03-10T15:00:00-03:00").expect("parses");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap());
        assert_eq!(parse_deadline("  "), None);
    }
}
