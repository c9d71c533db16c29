use log::trace;
use ncollide2d::na::{DMatrix, DVector};

/// Singular values below this fraction of the largest one are treated as zero
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Solves the linear least squares problem `min |a * beta - b|` using the singular value
/// decomposition of `a`.
///
/// Returns `None` when `a` has fewer independent columns than unknowns, or when the solve
/// does not yield a finite solution.
pub fn solve_least_squares(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = a.clone().svd(true, true);

    let eps = RELATIVE_TOLERANCE * svd.singular_values.max();
    let rank = svd.rank(eps);
    if eps <= 0.0 || rank < a.ncols() {
        trace!("least squares rank {rank} below {} unknowns", a.ncols());
        return None;
    }

    svd.solve(b, eps)
        .ok()
        .filter(|beta| beta.iter().all(|v| v.is_finite()))
}
