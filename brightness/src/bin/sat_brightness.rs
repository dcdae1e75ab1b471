//! Estimate the apparent brightness of a satellite for one observation or a
//! sweep of satellite altitudes.

use std::path::PathBuf;

use brightness::estimator::BrightnessResult;
use brightness::shared_args::SharedBrightnessArgs;
use brightness::{BrightnessEstimator, HorizontalCoordinates, SatelliteModelConfig};
use clap::Parser;
use serde::Serialize;
use shared::sweep::SweepArg;
use shared::units::{AreaExt, LengthExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Estimate satellite brightness for a ground observer")]
struct Args {
    #[command(flatten)]
    shared: SharedBrightnessArgs,

    /// Satellite altitude sweep in degrees (start:stop:step); overrides --sat-alt
    #[arg(long)]
    sat_alt_sweep: Option<SweepArg>,

    /// JSON satellite surface model (defaults to the reference bus)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Row {
    sat_altitude_deg: f64,
    #[serde(flatten)]
    result: BrightnessResult,
}

fn print_table(args: &Args, rows: &[Row]) {
    let shared = &args.shared;
    println!(
        "Height {:.1} km, satellite azimuth {:.1} deg, sun {:.1}/{:.1} deg, {:.1} kW {}",
        shared.height().as_kilometers(),
        shared.sat_az,
        shared.sun_alt,
        shared.sun_az,
        shared.power_kw,
        shared.budget().mode
    );
    println!(
        "{:>10} {:>14} {:>10} {:>12}",
        "alt (deg)", "I (W/m^2)", "AB mag", "area (m^2)"
    );
    for row in rows {
        println!(
            "{:>10.2} {:>14.4e} {:>10.3} {:>12.2}",
            row.sat_altitude_deg,
            row.result.intensity,
            row.result.ab_magnitude,
            row.result.area.as_square_meters()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut estimator = BrightnessEstimator::new(args.shared.reflection_options());
    if let Some(path) = &args.model {
        log::info!("Loading satellite model from {}", path.display());
        estimator = estimator.with_model(SatelliteModelConfig::load_from_file(path)?);
    }

    let altitudes: Vec<f64> = args
        .sat_alt_sweep
        .unwrap_or_else(|| SweepArg::single(args.shared.sat_alt))
        .values()
        .collect();
    let positions: Vec<HorizontalCoordinates> = altitudes
        .iter()
        .map(|alt| HorizontalCoordinates::from_degrees(*alt, args.shared.sat_az))
        .collect();

    let results = estimator.estimate_track(
        args.shared.height(),
        &positions,
        args.shared.sun(),
        args.shared.budget(),
    )?;

    let rows: Vec<Row> = altitudes
        .into_iter()
        .zip(results)
        .map(|(sat_altitude_deg, result)| Row {
            sat_altitude_deg,
            result,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&args, &rows);
    }

    Ok(())
}
