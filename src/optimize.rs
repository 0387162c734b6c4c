/// Bounded scalar maximization
///
/// Brent's bounded method run on -f: golden-section steps, replaced by parabolic
/// interpolation whenever the parabola through the three best points is acceptable.
/// No derivatives are needed, so step-shaped CDFs still work.
/// An objective that fails at a probe aborts the search with its error.

use crate::errors::{PricingError, PricingResult};

/// (3 - sqrt(5)) / 2
const GOLDEN_SECTION: f64 = 0.381_966_011_250_105_1;

/// Stopping rule of the bounded search
#[derive(Debug, Clone, Copy)]
pub struct MaximizeOptions {
    /// Absolute tolerance on the argmax
    pub x_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for MaximizeOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 1e-5,
            max_iterations: 500,
        }
    }
}

/// Location and value of a maximum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Maximum {
    pub x: f64,
    pub value: f64,
    pub iterations: usize,
}

/// Maximize f over [lower, upper]
pub fn maximize_bounded<F>(f: F, lower: f64, upper: f64, options: MaximizeOptions) -> PricingResult<Maximum>
where
    F: Fn(f64) -> PricingResult<f64>,
{
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(PricingError::InvalidParameter {
            name: "upper",
            value: upper,
            reason: "bounds must be finite with lower < upper",
        });
    }

    // everything below minimizes g = -f
    let g = |x: f64| -> PricingResult<f64> {
        let value = f(x)?;
        if value.is_finite() {
            Ok(-value)
        } else {
            Err(PricingError::InvalidParameter { name: "x", value: x, reason: "objective is not finite here" })
        }
    };

    let sqrt_eps = f64::EPSILON.sqrt();
    let (mut a, mut b) = (lower, upper);
    let mut x = a + GOLDEN_SECTION * (b - a);
    let (mut v, mut w) = (x, x);
    let mut fx = g(x)?;
    let (mut fv, mut fw) = (fx, fx);
    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for iteration in 1..=options.max_iterations {
        let midpoint = 0.5 * (a + b);
        let tol1 = sqrt_eps * x.abs() + options.x_tolerance / 3.0;
        let tol2 = 2.0 * tol1;

        if (x - midpoint).abs() <= tol2 - 0.5 * (b - a) {
            return Ok(Maximum { x, value: -fx, iterations: iteration });
        }

        let mut golden = true;
        if e.abs() > tol1 {
            // try a parabola through x, v, w
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let previous_e = e;
            e = d;
            if p.abs() < (0.5 * q * previous_e).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                if (u - a) < tol2 || (b - u) < tol2 {
                    d = if midpoint >= x { tol1 } else { -tol1 };
                }
                golden = false;
            }
        }
        if golden {
            e = if x >= midpoint { a - x } else { b - x };
            d = GOLDEN_SECTION * e;
        }

        // never step by less than tol1; a zero step goes up
        let u = if d.abs() >= tol1 { x + d } else { x + tol1.copysign(d) };
        let fu = g(u)?;

        if fu <= fx {
            if u >= x { a = x; } else { b = x; }
            v = w; fv = fw;
            w = x; fw = fx;
            x = u; fx = fu;
        } else {
            if u < x { a = u; } else { b = u; }
            if fu <= fw || w == x {
                v = w; fv = fw;
                w = u; fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u; fv = fu;
            }
        }
    }

    Err(PricingError::OptimizationNonConvergence {
        iterations: options.max_iterations,
        tolerance: options.x_tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximize_parabola() {
        let max = maximize_bounded(|x| Ok(-(x - 0.3) * (x - 0.3) + 2.0), 0.0, 1.0, MaximizeOptions::default()).unwrap();
        assert!((max.x - 0.3).abs() < 1e-5);
        assert!((max.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_maximum_at_boundary() {
        let max = maximize_bounded(|x| Ok(x), 0.0, 1.0, MaximizeOptions::default()).unwrap();
        assert!(max.x > 1.0 - 1e-4);
        assert!(max.x <= 1.0);
    }

    #[test]
    fn test_uniform_revenue_curve() {
        // p * (1 - p) peaks at 0.5
        let max = maximize_bounded(|p| Ok(p * (1.0 - p)), 0.0, 1.0, MaximizeOptions::default()).unwrap();
        assert!((max.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(matches!(
            maximize_bounded(|x| Ok(x), 1.0, 0.0, MaximizeOptions::default()),
            Err(PricingError::InvalidParameter { .. })
        ));
        assert!(maximize_bounded(|x| Ok(x), 0.0, f64::INFINITY, MaximizeOptions::default()).is_err());
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let options = MaximizeOptions { x_tolerance: 1e-12, max_iterations: 2 };
        assert!(matches!(
            maximize_bounded(|x| Ok((5.0 * x).sin()), 0.0, 1.0, options),
            Err(PricingError::OptimizationNonConvergence { iterations: 2, .. })
        ));
    }

    #[test]
    fn test_non_finite_objective() {
        assert!(maximize_bounded(|_| Ok(f64::NAN), 0.0, 1.0, MaximizeOptions::default()).is_err());
    }

    #[test]
    fn test_objective_error_aborts_search() {
        // increasing objective, so the search must probe above 0.5
        let failing = |x: f64| {
            if x > 0.5 {
                Err(PricingError::OptimizationNonConvergence { iterations: 300, tolerance: 1e-15 })
            } else {
                Ok(x)
            }
        };
        assert!(matches!(
            maximize_bounded(failing, 0.0, 1.0, MaximizeOptions::default()),
            Err(PricingError::OptimizationNonConvergence { iterations: 300, .. })
        ));
    }
}
