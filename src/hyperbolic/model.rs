//! Closed-form quantities of the threshold hyperbolic random graph model.

use std::f64::consts::PI;

use crate::error::ConfigError;

/// Bisection stops once the expected degree is this close to the target.
const DEGREE_TOLERANCE: f64 = 1e-5;
const MAX_BISECTION_STEPS: usize = 200;

/// Expected average degree of a threshold hyperbolic graph with `n` nodes,
/// radial dispersion `alpha` and disk radius `radius`.
pub fn expected_degree(n: f64, alpha: f64, radius: f64) -> f64 {
    let gamma = 2.0 * alpha + 1.0;
    let xi = (gamma - 1.0) / (gamma - 2.0);
    let inv_alpha = 1.0 / alpha;
    let first = (-radius / 2.0).exp();
    let second = (-alpha * radius).exp()
        * (alpha
            * (radius / 2.0)
            * ((PI / 4.0) * inv_alpha * inv_alpha - (PI - 1.0) * inv_alpha + (PI - 2.0))
            - 1.0);
    (2.0 / PI) * xi * xi * n * (first + second)
}

/// Approximate disk radius for `n` nodes and average degree `avg_deg`,
/// without the numerical search of [`target_radius`].
pub fn approximate_radius(n: f64, avg_deg: f64, alpha: f64) -> f64 {
    let shifted = alpha - 0.5;
    2.0 * (n * 2.0 * alpha * alpha / (PI * avg_deg * shifted * shifted)).ln()
}

/// Disk radius at which the expected average degree equals `avg_deg`.
///
/// Bisects [`expected_degree`] on `[r0 / 2, 2 r0]`, where `r0` is the
/// first-order estimate `2 ln(n / v)`.
///
/// # Errors
/// [`ConfigError::UnreachableDegree`] if the degree does not lie inside the
/// bracket, which happens for degrees close to `n` or for `alpha <= 0.5`.
pub fn target_radius(n: usize, avg_deg: f64, alpha: f64) -> Result<f64, ConfigError> {
    #[allow(clippy::cast_precision_loss)]
    let nodes = n as f64;
    let unreachable = || ConfigError::UnreachableDegree {
        nodes: n,
        avg_deg,
        alpha,
    };

    let gamma = 2.0 * alpha + 1.0;
    let xi_inv = (gamma - 2.0) / (gamma - 1.0);
    let v = avg_deg * (PI / 2.0) * xi_inv * xi_inv;
    let estimate = 2.0 * (nodes / v).ln();
    if !estimate.is_finite() || estimate <= 0.0 {
        return Err(unreachable());
    }

    let mut lower = estimate / 2.0;
    let mut upper = estimate * 2.0;
    if expected_degree(nodes, alpha, lower) <= avg_deg
        || expected_degree(nodes, alpha, upper) >= avg_deg
    {
        return Err(unreachable());
    }

    let mut current = (lower + upper) / 2.0;
    for _ in 0..MAX_BISECTION_STEPS {
        current = (lower + upper) / 2.0;
        let degree = expected_degree(nodes, alpha, current);
        if (degree - avg_deg).abs() < DEGREE_TOLERANCE {
            return Ok(current);
        }
        if degree < avg_deg {
            upper = current;
        } else {
            lower = current;
        }
    }

    crate::log::warn!(
        nodes = n,
        avg_deg,
        alpha,
        radius = current,
        "target radius search stopped before reaching the tolerance"
    );
    Ok(current)
}

/// Hyperbolic distance between the points `(r1, phi1)` and `(r2, phi2)` given
/// in polar coordinates.
pub fn hyperbolic_distance(r1: f64, phi1: f64, r2: f64, phi2: f64) -> f64 {
    let cosh = (r1 - r2).cosh() + (1.0 - (phi1 - phi2).cos()) * r1.sinh() * r2.sinh();
    cosh.max(1.0).acosh()
}
