use crate::errors::ConversionError;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};

pub mod component;
pub mod convert;
pub mod generate;

pub use convert::{coords_to_cst, cst_to_coords};

/// Upper and lower surface samples taken at shared chordwise positions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSamples {
    pub x: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl SurfaceSamples {
    pub fn new(x: Vec<f64>, upper: Vec<f64>, lower: Vec<f64>) -> SurfaceSamples {
        SurfaceSamples { x, upper, lower }
    }

    pub fn to_cst(&self, n_ca: usize, n_th: usize) -> Result<CstAirfoil, ConversionError> {
        coords_to_cst(&self.x, &self.upper, &self.lower, n_ca, n_th)
    }
}

/// An airfoil described by CST coefficients for its camber line and its thickness
/// distribution, plus the thickness remaining at the trailing edge
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CstAirfoil {
    pub camber: Vec<f64>,
    pub thickness: Vec<f64>,
    pub te_thickness: f64,
}

impl CstAirfoil {
    pub fn new(camber: Vec<f64>, thickness: Vec<f64>, te_thickness: f64) -> CstAirfoil {
        CstAirfoil {
            camber,
            thickness,
            te_thickness,
        }
    }

    pub fn to_coords(&self, n_coords: usize) -> Result<AirfoilCoords, ConversionError> {
        cst_to_coords(&self.camber, &self.thickness, self.te_thickness, n_coords)
    }
}

/// Sampled airfoil coordinates. All five sequences have the same length and share the
/// chordwise positions in `x`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirfoilCoords {
    pub x: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub camber: Vec<f64>,
    pub thickness: Vec<f64>,
}

impl AirfoilCoords {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn upper_points(&self) -> Vec<Point2<f64>> {
        to_points(&self.x, &self.upper)
    }

    pub fn lower_points(&self) -> Vec<Point2<f64>> {
        to_points(&self.x, &self.lower)
    }

    pub fn camber_points(&self) -> Vec<Point2<f64>> {
        to_points(&self.x, &self.camber)
    }

    /// The closed outline running along the upper surface from the leading edge to the
    /// trailing edge and back along the lower surface
    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result = self.upper_points();
        let mut lower = self.lower_points();
        lower.reverse();
        result.append(&mut lower);
        result
    }

    pub fn to_samples(&self) -> SurfaceSamples {
        SurfaceSamples::new(self.x.clone(), self.upper.clone(), self.lower.clone())
    }

    pub fn to_cst(&self, n_ca: usize, n_th: usize) -> Result<CstAirfoil, ConversionError> {
        coords_to_cst(&self.x, &self.upper, &self.lower, n_ca, n_th)
    }
}

fn to_points(x: &[f64], y: &[f64]) -> Vec<Point2<f64>> {
    x.iter().zip(y.iter()).map(|(x, y)| Point2::new(*x, *y)).collect()
}
