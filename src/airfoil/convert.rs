//! Conversion between sampled upper/lower surfaces and CST coefficients for the camber line
//! and thickness distribution.

use super::{AirfoilCoords, CstAirfoil};
use crate::algorithms::cosspace;
use crate::cst::{evaluate, fit, Boundary, ClassFunction};
use crate::errors::ConversionError;
use itertools::izip;
use log::debug;

/// Leading edge exponent of the camber line class function
const CAMBER_N1: f64 = 1.0;

fn camber_class() -> ClassFunction {
    ClassFunction::with_leading(CAMBER_N1)
}

/// Fits upper and lower surface samples to CST coefficients.
///
/// The surfaces are split into a camber line, `(y_u + y_l) / 2`, and a thickness distribution,
/// `y_u - y_l`. The camber line is fit with `n_ca` terms and forced to zero at both ends. The
/// thickness distribution is fit with `n_th` terms and free end values; the fitted value at the
/// trailing edge becomes the trailing edge thickness.
///
/// # Arguments
///
/// * `x` - chordwise positions within [0, 1], shared by both surfaces
///
/// * `y_u`, `y_l` - upper and lower surface values, one per entry of `x`
///
/// * `n_ca`, `n_th` - the number of camber and thickness coefficients to fit
pub fn coords_to_cst(
    x: &[f64],
    y_u: &[f64],
    y_l: &[f64],
    n_ca: usize,
    n_th: usize,
) -> Result<CstAirfoil, ConversionError> {
    ConversionError::check_len("upper surface", x.len(), y_u.len())?;
    ConversionError::check_len("lower surface", x.len(), y_l.len())?;

    let camber: Vec<f64> = izip!(y_u, y_l).map(|(u, l)| (u + l) / 2.0).collect();
    let thickness: Vec<f64> = izip!(y_u, y_l).map(|(u, l)| u - l).collect();

    let camber_fit = fit(x, &camber, n_ca, Some(Boundary::ZERO), &camber_class())?;
    let thickness_fit = fit(x, &thickness, n_th, None, &ClassFunction::default())?;

    debug!(
        "converted {} samples to CST, camber residual {:e}, thickness residual {:e}",
        x.len(),
        camber_fit.residual,
        thickness_fit.residual
    );

    Ok(CstAirfoil::new(
        camber_fit.coefficients,
        thickness_fit.coefficients,
        thickness_fit.boundary.trailing,
    ))
}

/// Evaluates CST camber and thickness coefficients on a cosine spaced grid of `n_coords`
/// chordwise positions and rebuilds the upper and lower surfaces from them.
///
/// The thickness is zero at the leading edge and `t_te` at the trailing edge. The surfaces are
/// `camber + thickness / 2` and `camber - thickness / 2`.
pub fn cst_to_coords(
    a_ca: &[f64],
    a_th: &[f64],
    t_te: f64,
    n_coords: usize,
) -> Result<AirfoilCoords, ConversionError> {
    let x = cosspace(0.0, 1.0, n_coords)?;
    let camber = evaluate(&x, a_ca, &camber_class(), &Boundary::ZERO)?;
    let thickness = evaluate(&x, a_th, &ClassFunction::default(), &Boundary::new(0.0, t_te))?;

    Ok(from_camber_thickness(x, camber, thickness))
}

/// Builds the surfaces from a camber line and thickness distribution sampled at `x`
pub(crate) fn from_camber_thickness(
    x: Vec<f64>,
    camber: Vec<f64>,
    thickness: Vec<f64>,
) -> AirfoilCoords {
    let upper = izip!(&camber, &thickness).map(|(c, t)| c + t / 2.0).collect();
    let lower = izip!(&camber, &thickness).map(|(c, t)| c - t / 2.0).collect();

    AirfoilCoords {
        x,
        upper,
        lower,
        camber,
        thickness,
    }
}
