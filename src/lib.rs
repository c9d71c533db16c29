//! Conversion between sampled airfoil surfaces and a compact description of the airfoil using
//! Class-Shape-Transformation (CST) coefficients for its camber line and thickness distribution.

pub mod airfoil;
pub mod algorithms;
pub mod cst;
pub mod errors;
pub mod serialize;

pub use airfoil::component::{AirfoilComponent, AirfoilConfig, AirfoilInputs, Rounding};
pub use airfoil::{coords_to_cst, cst_to_coords, AirfoilCoords, CstAirfoil, SurfaceSamples};
pub use errors::ConversionError;
