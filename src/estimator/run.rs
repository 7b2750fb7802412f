use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use tracing::{error, info, span, warn, Instrument, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::engine::{is_unfulfillable, Estimator};
use super::manifest::read_manifest_csv;
use crate::config::constant::{DEMO_REQUEST_COUNT, DEMO_SEED};
use crate::config::Settings;
use crate::distance::{lookup_distances, DistanceSource};
use crate::domain::catalog::VehicleCatalog;
use crate::domain::types::DeliveryEstimationResult;
use crate::error::EstimationError;
use crate::fixtures::generate_random_requests;
use crate::validation::{ComputeDeliveryEstimation, CoordinateInput};

#[derive(Debug, Parser)]
#[command(name = "delivery-estimator", about = "Vehicle selection and price estimates for deliveries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate a ComputeDeliveryEstimation JSON request
    Quote { request: PathBuf },
    /// Estimate a CSV product manifest
    Manifest {
        csv: PathBuf,
        /// Pickup as "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        pickup: String,
        /// Delivery as "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        delivery: String,
        #[arg(long, default_value = "standard")]
        priority: String,
    },
    /// Estimate a seeded batch of random requests
    Demo {
        #[arg(long, default_value_t = DEMO_REQUEST_COUNT)]
        count: usize,
        #[arg(long, default_value_t = DEMO_SEED)]
        seed: u64,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_target(false))
        .init();
}

fn parse_coordinate(raw: &str) -> Result<CoordinateInput, Box<dyn Error>> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lon', got '{raw}'"))?;
    Ok(CoordinateInput {
        latitude: lat.trim().parse()?,
        longitude: lon.trim().parse()?,
    })
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    // Refuse to start without a complete configuration
    let settings = Settings::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;
    let source = DistanceSource::from_settings(&settings.distance_provider, &settings.retry)?;
    let estimator = Estimator::new(VehicleCatalog::standard(), settings.pricing.clone());

    info!("Using distance source '{}'", source.name());

    match cli.command {
        Command::Quote { request } => {
            let text = fs::read_to_string(&request)?;
            let input = ComputeDeliveryEstimation::from_json(&text)?;
            let result = estimator
                .estimate_with_source(&input, &source, &settings.retry)
                .await;
            report(&input, result, cli.json)?;
        }
        Command::Manifest {
            csv,
            pickup,
            delivery,
            priority,
        } => {
            let input = ComputeDeliveryEstimation {
                products: read_manifest_csv(&csv)?,
                pickup: parse_coordinate(&pickup)?,
                delivery: parse_coordinate(&delivery)?,
                priority,
            };
            let result = estimator
                .estimate_with_source(&input, &source, &settings.retry)
                .await;
            report(&input, result, cli.json)?;
        }
        Command::Demo { count, seed } => {
            let span = span!(Level::INFO, "demo", count, seed);
            run_demo(&estimator, &source, &settings, count, seed, cli.json)
                .instrument(span)
                .await?;
        }
    }

    Ok(())
}

async fn run_demo(
    estimator: &Estimator,
    source: &DistanceSource,
    settings: &Settings,
    count: usize,
    seed: u64,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let inputs = generate_random_requests(count, seed, (40.7128, -74.0060));
    let plans = estimator.plan_batch(&inputs);

    let pairs: Vec<_> = plans
        .iter()
        .filter_map(|plan| plan.as_ref().ok())
        .map(|plan| (plan.request.pickup(), plan.request.delivery()))
        .collect();
    let mut distances = lookup_distances(source, &pairs, &settings.retry)
        .await
        .into_iter();

    let mut unfulfillable = 0;
    for (input, plan) in inputs.iter().zip(plans) {
        let result = match plan {
            Ok(plan) => match distances.next() {
                Some(Ok(miles)) => Ok(estimator.finish(plan, miles)),
                Some(Err(e)) => Err(EstimationError::from(e)),
                None => continue,
            },
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            if is_unfulfillable(e) {
                unfulfillable += 1;
            }
        }
        report(input, result, json)?;
    }

    info!(
        "Demo finished: {} requests, {} could not be fulfilled",
        count, unfulfillable
    );
    Ok(())
}

fn report(
    input: &ComputeDeliveryEstimation,
    result: Result<DeliveryEstimationResult, EstimationError>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match result {
        Ok(estimate) if json => println!("{}", serde_json::to_string_pretty(&estimate)?),
        Ok(estimate) => print_estimate(input, &estimate),
        Err(e) if json => println!(
            "{}",
            serde_json::json!({ "error": e.to_string(), "unfulfillable": is_unfulfillable(&e) })
        ),
        Err(e) if is_unfulfillable(&e) => {
            warn!("Request cannot be fulfilled: {}", e);
            println!("{} {}", "CANNOT FULFILL".red().bold(), e);
        }
        Err(e) => {
            warn!("Request rejected: {}", e);
            println!("{} {}", "REJECTED".yellow().bold(), e);
        }
    }
    Ok(())
}

fn print_estimate(input: &ComputeDeliveryEstimation, estimate: &DeliveryEstimationResult) {
    let eta = estimate
        .estimated_delivery_at(Utc::now())
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "{} {} item line(s) -> {} | {:.2} mi | {} | ETA {} ({:.0} min, {})",
        "QUOTE".green().bold(),
        input.products.len(),
        estimate.vehicle_type.to_string().cyan(),
        estimate.distance_miles,
        format!("${:.2}", estimate.price).bold(),
        eta,
        estimate.estimated_minutes,
        estimate.priority
    );
    println!(
        "      load {:.0} in³ / {:.1} lbs at ${:.2}/mi",
        estimate.load.total_volume_cubic_inches,
        estimate.load.total_weight_lbs,
        estimate.price_per_mile
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let c = parse_coordinate("40.7128, -74.006").unwrap();
        assert_eq!(c.latitude, 40.7128);
        assert_eq!(c.longitude, -74.006);
        assert!(parse_coordinate("40.7").is_err());
        assert!(parse_coordinate("north,west").is_err());
    }

    #[test]
    fn test_cli_parses_manifest_args() {
        let cli = Cli::try_parse_from([
            "delivery-estimator",
            "manifest",
            "items.csv",
            "--pickup",
            "40.7,-74.0",
            "--delivery",
            "-33.8,151.2",
            "--priority",
            "express",
        ])
        .unwrap();
        match cli.command {
            Command::Manifest {
                pickup,
                delivery,
                priority,
                ..
            } => {
                assert_eq!(pickup, "40.7,-74.0");
                assert_eq!(delivery, "-33.8,151.2");
                assert_eq!(priority, "express");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_demo_defaults() {
        let cli = Cli::try_parse_from(["delivery-estimator", "demo", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Demo { count, seed } if count == DEMO_REQUEST_COUNT && seed == DEMO_SEED
        ));
    }
}
