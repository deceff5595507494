use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use fleet_dispatch::assignment::{simulate_customs_delay, suggest_assignments};
use fleet_dispatch::config::AppConfig;
use fleet_dispatch::error::AppError;
use fleet_dispatch::gazetteer::Gazetteer;
use fleet_dispatch::ingest::{self, IngestError};
use fleet_dispatch::kpi::{fleet_summary, locate_fleet};
use fleet_dispatch::params::{CustomsDelay, PlanningParams};
use fleet_dispatch::report::{FleetSnapshot, evaluate};
use fleet_dispatch::reposition::plan_empty_legs;
use fleet_dispatch::risk::{assess_assignments, assess_vehicle};
use fleet_dispatch::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "fleet-dispatch",
    about = "Match idle vehicles to pending orders and flag delay risk",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fleet availability indicators and vehicle positions
    Summary(InputArgs),
    /// Nearest available vehicle per pending order
    Assign(PlanArgs),
    /// Fastest vehicle per pending order under a customs delay
    Scenario {
        #[command(flatten)]
        plan: PlanArgs,
        /// Hours lost at customs (0-6); defaults to FLEET_CUSTOMS_DELAY_HOURS
        #[arg(long)]
        customs_delay: Option<f64>,
    },
    /// Delay risk for one vehicle against every pending order, or for the baseline suggestions
    Risk {
        #[command(flatten)]
        plan: PlanArgs,
        /// Vehicle to analyse; omit to score each order's nearest vehicle
        #[arg(long)]
        vehicle: Option<String>,
    },
    /// Empty-leg repositioning suggestions
    Reposition(PlanArgs),
    /// Full evaluation pass
    Report {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long)]
        customs_delay: Option<f64>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Fleet CSV export
    #[arg(long)]
    vehicles: PathBuf,
    /// Orders CSV export
    #[arg(long)]
    orders: PathBuf,
    /// Extra places (name,latitude,longitude) merged over the built-in table
    #[arg(long)]
    gazetteer: Option<PathBuf>,
    /// Reference time (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long)]
    speed_kmh: Option<f64>,
    #[arg(long)]
    cost_per_km: Option<f64>,
    #[arg(long)]
    max_deadhead_km: Option<f64>,
    /// Delay percent above which a pickup is flagged high risk
    #[arg(long)]
    delay_threshold: Option<f64>,
}

impl PlanArgs {
    fn params(&self, config: &AppConfig) -> Result<PlanningParams, AppError> {
        let defaults = &config.planning;
        let params = PlanningParams {
            speed_kmh: self.speed_kmh.unwrap_or(defaults.speed_kmh),
            cost_per_km: self.cost_per_km.unwrap_or(defaults.cost_per_km),
            max_deadhead_km: self.max_deadhead_km.unwrap_or(defaults.max_deadhead_km),
            delay_risk_threshold_percent: self
                .delay_threshold
                .unwrap_or(defaults.delay_risk_threshold_percent),
        };
        params.validate()?;
        Ok(params)
    }
}

struct Loaded {
    snapshot: FleetSnapshot,
    gazetteer: Gazetteer,
    now: DateTime<Utc>,
}

fn load(input: &InputArgs) -> Result<Loaded, AppError> {
    let vehicles = read_csv(&input.vehicles, ingest::read_vehicles)?;
    let orders = read_csv(&input.orders, ingest::read_orders)?;

    let mut gazetteer = Gazetteer::builtin();
    if let Some(path) = &input.gazetteer {
        let file = open(path)?;
        let extra = Gazetteer::from_csv(BufReader::new(file)).map_err(|source| {
            AppError::Gazetteer {
                path: path.clone(),
                source,
            }
        })?;
        gazetteer.extend(extra);
    }

    let now = input.now.unwrap_or_else(Utc::now);
    info!(
        vehicles = vehicles.len(),
        orders = orders.len(),
        places = gazetteer.len(),
        %now,
        "snapshot loaded"
    );

    Ok(Loaded {
        snapshot: FleetSnapshot { vehicles, orders },
        gazetteer,
        now,
    })
}

fn read_csv<T>(
    path: &Path,
    parse: fn(BufReader<File>) -> Result<Vec<T>, IngestError>,
) -> Result<Vec<T>, AppError> {
    let file = open(path)?;
    parse(BufReader::new(file)).map_err(|source| AppError::Ingest {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File, AppError> {
    File::open(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("expected RFC 3339 timestamp: {err}"))
}

fn customs_delay(value: Option<f64>, config: &AppConfig) -> Result<CustomsDelay, AppError> {
    match value {
        Some(hours) => Ok(CustomsDelay::new(hours)?),
        None => Ok(config.customs_delay),
    }
}

fn emit<T: Serialize>(value: &T) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

#[derive(Serialize)]
struct SummaryOutput {
    summary: fleet_dispatch::kpi::FleetSummary,
    positions: Vec<fleet_dispatch::kpi::VehiclePosition>,
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), AppError> {
    match cli.command {
        Command::Summary(input) => {
            let Loaded {
                snapshot, gazetteer, ..
            } = load(&input)?;
            emit(&SummaryOutput {
                summary: fleet_summary(&snapshot.vehicles, &snapshot.orders),
                positions: locate_fleet(&snapshot.vehicles, &gazetteer),
            })
        }
        Command::Assign(plan) => {
            let params = plan.params(config)?;
            let Loaded {
                snapshot, gazetteer, ..
            } = load(&plan.input)?;
            emit(&suggest_assignments(
                &snapshot.orders,
                &snapshot.vehicles,
                &gazetteer,
                &params,
            ))
        }
        Command::Scenario {
            plan,
            customs_delay: delay,
        } => {
            let params = plan.params(config)?;
            let delay = customs_delay(delay, config)?;
            let Loaded {
                snapshot, gazetteer, ..
            } = load(&plan.input)?;
            emit(&simulate_customs_delay(
                &snapshot.orders,
                &snapshot.vehicles,
                &gazetteer,
                &params,
                delay,
            ))
        }
        Command::Risk { plan, vehicle } => {
            let params = plan.params(config)?;
            let Loaded {
                snapshot,
                gazetteer,
                now,
            } = load(&plan.input)?;
            let records = match vehicle {
                Some(id) => {
                    let selected = snapshot.available_vehicle(&id)?;
                    assess_vehicle(&snapshot.orders, selected, &gazetteer, now, &params)
                }
                None => assess_assignments(
                    &snapshot.orders,
                    &snapshot.vehicles,
                    &gazetteer,
                    now,
                    &params,
                ),
            };
            emit(&records)
        }
        Command::Reposition(plan) => {
            let params = plan.params(config)?;
            let Loaded {
                snapshot,
                gazetteer,
                now,
            } = load(&plan.input)?;
            emit(&plan_empty_legs(
                &snapshot.orders,
                &snapshot.vehicles,
                &gazetteer,
                now,
                &params,
            ))
        }
        Command::Report {
            plan,
            customs_delay: delay,
        } => {
            let params = plan.params(config)?;
            let delay = customs_delay(delay, config)?;
            let Loaded {
                snapshot,
                gazetteer,
                now,
            } = load(&plan.input)?;
            emit(&evaluate(&snapshot, &gazetteer, &params, delay, now))
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = AppConfig::load()
        .map_err(AppError::from)
        .and_then(|config| {
            telemetry::init(&config.telemetry)?;
            run(cli, &config)
        });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
