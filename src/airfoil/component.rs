use super::convert::{coords_to_cst, cst_to_coords, from_camber_thickness};
use super::AirfoilCoords;
use crate::algorithms::round_to;
use crate::errors::ConversionError;
use log::debug;
use serde::{Deserialize, Serialize};

/// How `AirfoilComponent::compute_coords` rounds its output when a precision is requested
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round the chordwise positions, camber and thickness, then rebuild both surfaces from the
    /// rounded camber and thickness. The surfaces stay consistent with the camber and thickness.
    #[default]
    Derived,

    /// Round each of the five sequences on its own
    Independent,
}

fn default_n() -> usize {
    6
}

fn default_n_coords() -> usize {
    100
}

/// Sizes used by an `AirfoilComponent`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirfoilConfig {
    /// Number of CST coefficients for the camber line
    #[serde(default = "default_n")]
    pub n_ca: usize,

    /// Number of CST coefficients for the thickness distribution
    #[serde(default = "default_n")]
    pub n_th: usize,

    /// Number of chordwise positions to sample when computing coordinates
    #[serde(default = "default_n_coords")]
    pub n_coords: usize,

    #[serde(default)]
    pub rounding: Rounding,
}

impl Default for AirfoilConfig {
    fn default() -> Self {
        AirfoilConfig {
            n_ca: default_n(),
            n_th: default_n(),
            n_coords: default_n_coords(),
            rounding: Rounding::default(),
        }
    }
}

impl AirfoilConfig {
    pub fn new(n_ca: usize, n_th: usize, n_coords: usize) -> Self {
        AirfoilConfig {
            n_ca,
            n_th,
            n_coords,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.n_ca == 0 || self.n_th == 0 {
            return Err(ConversionError::invalid(format!(
                "coefficient counts must be positive, got n_ca={} n_th={}",
                self.n_ca, self.n_th
            )));
        }
        if self.n_coords < 2 {
            return Err(ConversionError::invalid(format!(
                "n_coords must be at least 2, got {}",
                self.n_coords
            )));
        }
        Ok(())
    }

    /// Reads a configuration from JSON. Missing fields take their default values.
    pub fn from_json(text: &str) -> Result<Self, ConversionError> {
        let config: AirfoilConfig = serde_json::from_str(text)
            .map_err(|e| ConversionError::invalid(format!("bad airfoil configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// The values an `AirfoilComponent` computes its coordinates from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirfoilInputs {
    pub a_ca: Vec<f64>,
    pub a_th: Vec<f64>,
    pub t_te: f64,
}

impl AirfoilInputs {
    pub fn new(a_ca: Vec<f64>, a_th: Vec<f64>, t_te: f64) -> Self {
        AirfoilInputs { a_ca, a_th, t_te }
    }
}

/// An airfoil defined by a fixed number of CST coefficients for its camber line and thickness
/// distribution and by a trailing edge thickness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AirfoilComponent {
    config: AirfoilConfig,
}

impl AirfoilComponent {
    pub fn new(config: AirfoilConfig) -> Result<Self, ConversionError> {
        config.validate()?;
        Ok(AirfoilComponent { config })
    }

    pub fn config(&self) -> &AirfoilConfig {
        &self.config
    }

    fn check_inputs(&self, inputs: &AirfoilInputs) -> Result<(), ConversionError> {
        ConversionError::check_len("a_ca", self.config.n_ca, inputs.a_ca.len())?;
        ConversionError::check_len("a_th", self.config.n_th, inputs.a_th.len())
    }

    /// Computes the airfoil coordinates for a set of inputs.
    ///
    /// # Arguments
    ///
    /// * `precision` - if given, the number of decimals to round the output to, following the
    /// configured `Rounding`
    ///
    /// * `n_coords` - if given, replaces the configured number of chordwise positions
    pub fn compute_coords(
        &self,
        inputs: &AirfoilInputs,
        precision: Option<u32>,
        n_coords: Option<usize>,
    ) -> Result<AirfoilCoords, ConversionError> {
        self.check_inputs(inputs)?;

        let n = n_coords.unwrap_or(self.config.n_coords);
        let coords = cst_to_coords(&inputs.a_ca, &inputs.a_th, inputs.t_te, n)?;

        Ok(match precision {
            Some(p) => {
                debug!("rounding {n} coordinates to {p} decimals");
                round_coords(coords, p, self.config.rounding)
            }
            None => coords,
        })
    }

    /// Fits surface samples to inputs with the configured number of coefficients
    pub fn fit_inputs(
        &self,
        x: &[f64],
        y_u: &[f64],
        y_l: &[f64],
    ) -> Result<AirfoilInputs, ConversionError> {
        let af = coords_to_cst(x, y_u, y_l, self.config.n_ca, self.config.n_th)?;
        Ok(AirfoilInputs::new(af.camber, af.thickness, af.te_thickness))
    }
}

fn round_all(values: Vec<f64>, precision: u32) -> Vec<f64> {
    values.into_iter().map(|v| round_to(v, precision)).collect()
}

fn round_coords(coords: AirfoilCoords, precision: u32, rounding: Rounding) -> AirfoilCoords {
    match rounding {
        Rounding::Derived => from_camber_thickness(
            round_all(coords.x, precision),
            round_all(coords.camber, precision),
            round_all(coords.thickness, precision),
        ),
        Rounding::Independent => AirfoilCoords {
            x: round_all(coords.x, precision),
            upper: round_all(coords.upper, precision),
            lower: round_all(coords.lower, precision),
            camber: round_all(coords.camber, precision),
            thickness: round_all(coords.thickness, precision),
        },
    }
}
