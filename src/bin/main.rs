use cst_airfoil::airfoil::generate::{AirfoilGenerator, Naca4Digit};
use cst_airfoil::algorithms::cosspace;
use cst_airfoil::serialize::AirfoilPoints;
use cst_airfoil::{AirfoilComponent, AirfoilConfig, AirfoilInputs, ConversionError};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fs;

const USAGE: &str = "usage: cst-airfoil <input.json> [--points]\n       cst-airfoil naca <MPTT>";

/// Contents of an input file for computing coordinates
#[derive(Deserialize)]
struct CoordsRequest {
    #[serde(default)]
    config: Option<AirfoilConfig>,

    #[serde(flatten)]
    inputs: AirfoilInputs,

    #[serde(default)]
    precision: Option<u32>,

    #[serde(default)]
    n_coords: Option<usize>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    match args {
        [cmd, digits] if cmd == "naca" => fit_naca(digits),
        [path] => compute(path, false),
        [path, flag] if flag == "--points" => compute(path, true),
        _ => Err(USAGE.into()),
    }
}

fn compute(path: &str, as_points: bool) -> Result<(), Box<dyn Error>> {
    let request: CoordsRequest = serde_json::from_str(&fs::read_to_string(path)?)?;
    let component = AirfoilComponent::new(request.config.unwrap_or_default())?;
    info!("computing coordinates from {path} with {:?}", component.config());

    let coords = component.compute_coords(&request.inputs, request.precision, request.n_coords)?;
    let text = if as_points {
        serde_json::to_string_pretty(&AirfoilPoints::from(&coords))?
    } else {
        serde_json::to_string_pretty(&coords)?
    };
    println!("{text}");

    Ok(())
}

fn fit_naca(digits: &str) -> Result<(), Box<dyn Error>> {
    let naca = Naca4Digit::from_designation(digits).ok_or_else(|| {
        ConversionError::invalid(format!("'{digits}' is not a NACA 4-digit designation"))
    })?;
    let config = AirfoilConfig::default();
    let samples = naca.sample(&cosspace(0.0, 1.0, config.n_coords)?);
    info!("fitting NACA {digits} with {} samples", samples.x.len());

    let inputs = AirfoilComponent::new(config)?.fit_inputs(
        &samples.x,
        &samples.upper,
        &samples.lower,
    )?;
    println!("{}", serde_json::to_string_pretty(&inputs)?);

    Ok(())
}
