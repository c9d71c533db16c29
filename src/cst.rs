//! Class-Shape-Transformation (CST) curves.
//!
//! A CST curve over the unit interval is the product of a class function, which fixes the
//! behavior at the two ends, and a shape function, which is a Bernstein polynomial expansion
//! weighted by a coefficient vector. A linear term is added so the curve takes prescribed
//! values at x=0 and x=1:
//!
//! ```text
//! y(x) = x^n1 (1 - x)^n2 * sum_i a_i B_{n-1,i}(x) + (1 - x) * leading + x * trailing
//! ```
//!
//! The curve is linear in its coefficients, so fitting one to samples is a linear least
//! squares problem.

use crate::errors::ConversionError;
use itertools::izip;
use log::debug;
use ncollide2d::na::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

pub mod least_squares;

use least_squares::solve_least_squares;

/// The class function `x^n1 * (1 - x)^n2`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassFunction {
    pub n1: f64,
    pub n2: f64,
}

impl Default for ClassFunction {
    /// The round nose, sharp trailing edge class used for thickness distributions
    fn default() -> Self {
        ClassFunction::new(0.5, 1.0)
    }
}

impl ClassFunction {
    pub fn new(n1: f64, n2: f64) -> Self {
        ClassFunction { n1, n2 }
    }

    /// The default class with the leading edge exponent replaced
    pub fn with_leading(n1: f64) -> Self {
        ClassFunction {
            n1,
            ..Default::default()
        }
    }

    pub fn at(&self, x: f64) -> f64 {
        x.powf(self.n1) * (1.0 - x).powf(self.n2)
    }

    fn validate(&self) -> Result<(), ConversionError> {
        if self.n1.is_finite() && self.n2.is_finite() && self.n1 >= 0.0 && self.n2 >= 0.0 {
            Ok(())
        } else {
            Err(ConversionError::invalid(format!(
                "class function exponents must be finite and non-negative, got ({}, {})",
                self.n1, self.n2
            )))
        }
    }
}

/// Values the curve takes at the leading (x=0) and trailing (x=1) ends
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub leading: f64,
    pub trailing: f64,
}

impl Boundary {
    pub const ZERO: Boundary = Boundary {
        leading: 0.0,
        trailing: 0.0,
    };

    pub fn new(leading: f64, trailing: f64) -> Self {
        Boundary { leading, trailing }
    }

    pub fn at(&self, x: f64) -> f64 {
        (1.0 - x) * self.leading + x * self.trailing
    }

    fn validate(&self) -> Result<(), ConversionError> {
        if self.leading.is_finite() && self.trailing.is_finite() {
            Ok(())
        } else {
            Err(ConversionError::invalid(format!(
                "boundary values must be finite, got ({}, {})",
                self.leading, self.trailing
            )))
        }
    }
}

/// The result of fitting a CST curve to a set of samples
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CstFit {
    pub coefficients: Vec<f64>,
    pub boundary: Boundary,

    /// Root mean square of the difference between the fitted curve and the samples
    pub residual: f64,
}

/// Binomial coefficient C(n, k) as a float
fn binomial(n: usize, k: usize) -> f64 {
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// The i-th Bernstein basis polynomial of degree n evaluated at x
pub fn bernstein(n: usize, i: usize, x: f64) -> f64 {
    binomial(n, i) * x.powi(i as i32) * (1.0 - x).powi((n - i) as i32)
}

fn check_grid(x: &[f64]) -> Result<(), ConversionError> {
    match x.iter().find(|v| !(0.0..=1.0).contains(*v)) {
        Some(v) => Err(ConversionError::invalid(format!(
            "parameter values must lie within [0, 1], found {v}"
        ))),
        None => Ok(()),
    }
}

/// Class function times each Bernstein term at every grid point, one row per point. With
/// `free_boundary` two more columns, `1 - x` and `x`, carry the leading and trailing end values.
fn design_matrix(x: &[f64], n: usize, class: &ClassFunction, free_boundary: bool) -> DMatrix<f64> {
    let degree = n - 1;
    let cols = if free_boundary { n + 2 } else { n };
    DMatrix::from_fn(x.len(), cols, |j, i| {
        if i < n {
            class.at(x[j]) * bernstein(degree, i, x[j])
        } else if i == n {
            1.0 - x[j]
        } else {
            x[j]
        }
    })
}

/// Evaluates the CST curve with coefficients `a` at every value of `x`.
pub fn evaluate(
    x: &[f64],
    a: &[f64],
    class: &ClassFunction,
    boundary: &Boundary,
) -> Result<Vec<f64>, ConversionError> {
    if a.is_empty() {
        return Err(ConversionError::invalid(
            "a CST curve needs at least one coefficient",
        ));
    }
    if let Some(v) = a.iter().find(|v| !v.is_finite()) {
        return Err(ConversionError::invalid(format!(
            "CST coefficients must be finite, found {v}"
        )));
    }
    class.validate()?;
    boundary.validate()?;
    check_grid(x)?;

    let degree = a.len() - 1;
    let values = x
        .iter()
        .map(|&xi| {
            let shape: f64 = a
                .iter()
                .enumerate()
                .map(|(i, ai)| ai * bernstein(degree, i, xi))
                .sum();
            class.at(xi) * shape + boundary.at(xi)
        })
        .collect();

    debug!("evaluated {}-term CST curve at {} points", a.len(), x.len());
    Ok(values)
}

/// Fits an `n` term CST curve to the samples `y` taken at `x`.
///
/// With a `boundary` the curve is forced through those end values. Without one the leading and
/// trailing end values are solved for along with the coefficients and returned in the fit.
pub fn fit(
    x: &[f64],
    y: &[f64],
    n: usize,
    boundary: Option<Boundary>,
    class: &ClassFunction,
) -> Result<CstFit, ConversionError> {
    ConversionError::check_len("CST fit samples", x.len(), y.len())?;
    if n == 0 {
        return Err(ConversionError::invalid(
            "a CST fit needs at least one coefficient",
        ));
    }
    if x.is_empty() {
        return Err(ConversionError::invalid("a CST fit needs at least one sample"));
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(ConversionError::invalid("CST fit samples must be finite"));
    }
    class.validate()?;
    check_grid(x)?;
    if let Some(fixed) = &boundary {
        fixed.validate()?;
    }

    let fixed = boundary.unwrap_or(Boundary::ZERO);
    let a = design_matrix(x, n, class, boundary.is_none());
    let b = DVector::from_iterator(
        x.len(),
        izip!(x, y).map(|(xi, yi)| yi - fixed.at(*xi)),
    );

    let beta = solve_least_squares(&a, &b).ok_or_else(|| {
        ConversionError::FitFailed(format!(
            "{} samples do not determine {} CST unknowns",
            x.len(),
            a.ncols()
        ))
    })?;

    let error = &a * &beta - &b;
    let residual = (error.norm_squared() / x.len() as f64).sqrt();
    let boundary = boundary.unwrap_or_else(|| Boundary::new(beta[n], beta[n + 1]));
    debug!(
        "fit {n}-term CST curve to {} samples, rms residual {residual:e}, boundary ({}, {})",
        x.len(),
        boundary.leading,
        boundary.trailing
    );

    Ok(CstFit {
        coefficients: beta.iter().take(n).copied().collect(),
        boundary,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::cosspace;
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use test_case::test_case;

    #[test_case(4, 0, 1.0)]
    #[test_case(4, 1, 4.0)]
    #[test_case(4, 2, 6.0)]
    #[test_case(5, 5, 1.0)]
    #[test_case(10, 3, 120.0)]
    fn test_binomial(n: usize, k: usize, e: f64) {
        assert_relative_eq!(e, binomial(n, k), epsilon = 1e-12);
    }

    #[test]
    fn test_bernstein_partition_of_unity() {
        for &x in &[0.0, 0.1, 0.37, 0.5, 0.9, 1.0] {
            let total: f64 = (0..=6).map(|i| bernstein(6, i, x)).sum();
            assert_relative_eq!(1.0, total, epsilon = 1e-12);
        }
    }

    #[test_case(0.0, 0.0)]
    #[test_case(1.0, 0.0)]
    #[test_case(0.25, 0.375)]
    fn test_default_class_function(x: f64, e: f64) {
        assert_relative_eq!(e, ClassFunction::default().at(x), epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_hits_boundary_values() {
        let x = cosspace(0.0, 1.0, 20).unwrap();
        let b = Boundary::new(0.0, 0.0025);
        let y = evaluate(&x, &[0.2, 0.3, 0.1], &ClassFunction::default(), &b).unwrap();
        assert_eq!(0.0, y[0]);
        assert_relative_eq!(0.0025, y[19], epsilon = 1e-15);
    }

    #[test]
    fn test_evaluate_single_coefficient() {
        // One term makes the shape function constant
        let class = ClassFunction::with_leading(1.0);
        let y = evaluate(&[0.5], &[2.0], &class, &Boundary::ZERO).unwrap();
        assert_relative_eq!(0.5, y[0], epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_rejects_empty_coefficients() {
        let result = evaluate(&[0.0, 1.0], &[], &ClassFunction::default(), &Boundary::ZERO);
        assert!(matches!(result, Err(ConversionError::InvalidArgument(_))));
    }

    #[test]
    fn test_evaluate_rejects_values_outside_unit_interval() {
        let result = evaluate(&[0.0, 1.5], &[1.0], &ClassFunction::default(), &Boundary::ZERO);
        assert!(matches!(result, Err(ConversionError::InvalidArgument(_))));
    }

    #[test]
    fn test_evaluate_rejects_bad_boundary() {
        let b = Boundary::new(0.0, f64::NAN);
        let result = evaluate(&[0.5], &[1.0], &ClassFunction::default(), &b);
        assert!(matches!(result, Err(ConversionError::InvalidArgument(_))));
    }

    #[test]
    fn test_fit_recovers_random_curves() {
        let mut rng = rand::thread_rng();
        let x = cosspace(0.0, 1.0, 80).unwrap();
        for n in 1..9 {
            let a: Vec<f64> = (0..n).map(|_| rng.gen_range(-0.5..0.5)).collect();
            let b = Boundary::new(0.0, rng.gen_range(0.0..0.01));
            let class = ClassFunction::default();
            let y = evaluate(&x, &a, &class, &b).unwrap();

            let result = fit(&x, &y, n, None, &class).unwrap();
            assert_eq!(n, result.coefficients.len());
            assert_relative_eq!(b.leading, result.boundary.leading, epsilon = 1e-9);
            assert_relative_eq!(b.trailing, result.boundary.trailing, epsilon = 1e-9);
            assert!(result.residual < 1e-10);
            for (e, v) in a.iter().zip(result.coefficients.iter()) {
                assert_relative_eq!(*e, *v, epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn test_fit_recovers_curve_on_interior_grid() {
        // The grid stops short of both ends, so the end values must come from the fit
        let x: Vec<f64> = (0..100).map(|i| 0.02 + 0.96 * i as f64 / 99.0).collect();
        let a = [0.17, 0.15, 0.2, 0.16, 0.18, 0.14];
        let class = ClassFunction::default();
        let y = evaluate(&x, &a, &class, &Boundary::new(0.0, 0.0025)).unwrap();

        let result = fit(&x, &y, 6, None, &class).unwrap();
        assert!(result.residual < 1e-10);
        assert_relative_eq!(0.0, result.boundary.leading, epsilon = 1e-8);
        assert_relative_eq!(0.0025, result.boundary.trailing, epsilon = 1e-8);
        for (e, v) in a.iter().zip(result.coefficients.iter()) {
            assert_relative_eq!(*e, *v, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_fit_residual_orthogonal_to_basis() {
        // Least squares leaves a residual orthogonal to every column, the end value columns
        // included, so noise at the last sample is not copied into the trailing value
        let x = cosspace(0.0, 1.0, 60).unwrap();
        let class = ClassFunction::default();
        let clean = evaluate(&x, &[0.2, 0.1, 0.15, 0.12], &class, &Boundary::new(0.0, 0.003)).unwrap();
        let y: Vec<f64> = clean
            .iter()
            .enumerate()
            .map(|(i, v)| v + if i % 2 == 0 { 1e-4 } else { -1e-4 })
            .collect();

        let result = fit(&x, &y, 4, None, &class).unwrap();
        let mut beta = result.coefficients.clone();
        beta.push(result.boundary.leading);
        beta.push(result.boundary.trailing);
        let a = design_matrix(&x, 4, &class, true);
        let r = DVector::from_column_slice(&y) - &a * DVector::from_vec(beta);

        for col in a.column_iter() {
            assert_relative_eq!(0.0, col.dot(&r), epsilon = 1e-10);
        }
        assert!((result.boundary.trailing - y[59]).abs() > 1e-7);
        assert_relative_eq!(0.003, result.boundary.trailing, epsilon = 1e-3);
    }

    #[test]
    fn test_evaluate_rejects_non_finite_coefficients() {
        let class = ClassFunction::default();
        assert!(matches!(
            evaluate(&[0.5], &[0.1, f64::NAN], &class, &Boundary::ZERO),
            Err(ConversionError::InvalidArgument(_))
        ));
        assert!(matches!(
            evaluate(&[0.5], &[f64::INFINITY], &class, &Boundary::ZERO),
            Err(ConversionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_fit_uses_given_boundary() {
        let x = cosspace(0.0, 1.0, 30).unwrap();
        let class = ClassFunction::with_leading(1.0);
        let y = evaluate(&x, &[0.1, 0.05, 0.02], &class, &Boundary::ZERO).unwrap();

        let result = fit(&x, &y, 3, Some(Boundary::ZERO), &class).unwrap();
        assert_eq!(Boundary::ZERO, result.boundary);
        assert_relative_eq!(0.1, result.coefficients[0], epsilon = 1e-9);
        assert_relative_eq!(0.05, result.coefficients[1], epsilon = 1e-9);
        assert_relative_eq!(0.02, result.coefficients[2], epsilon = 1e-9);
    }

    #[test]
    fn test_fit_rejects_mismatched_samples() {
        let result = fit(&[0.0, 0.5, 1.0], &[0.0, 1.0], 2, None, &ClassFunction::default());
        assert!(matches!(result, Err(ConversionError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_fit_rejects_zero_terms() {
        let result = fit(&[0.0, 0.5, 1.0], &[0.0, 1.0, 0.0], 0, None, &ClassFunction::default());
        assert!(matches!(result, Err(ConversionError::InvalidArgument(_))));
    }

    #[test]
    fn test_fit_fails_with_too_few_samples() {
        // Only the interior point carries information about the shape function
        let result = fit(&[0.0, 0.5, 1.0], &[0.0, 0.2, 0.0], 3, None, &ClassFunction::default());
        assert!(matches!(result, Err(ConversionError::FitFailed(_))));
    }
}
