/// Numerical special functions backing the distribution CDFs
///
/// The regularized incomplete beta function I_x(a, b) is the CDF of Beta(a, b).
/// It is evaluated with a continued fraction (modified Lentz) after picking the
/// side of the symmetry relation I_x(a, b) = 1 - I_{1-x}(b, a) that converges fast.
/// A continued fraction that has not converged within its iteration cap is an error,
/// never a silently truncated value.

use std::f64::consts::PI;
use crate::errors::{PricingError, PricingResult};

const LANCZOS_G: f64 = 7.0;

/// Iteration cap and convergence threshold of the continued fraction
const CF_MAX_ITERATIONS: usize = 300;
const CF_EPSILON: f64 = 1e-15;

#[allow(clippy::excessive_precision)]
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// ln(Γ(x)) via the Lanczos approximation, with reflection below 0.5
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        return PI.ln() - (PI * x).sin().abs().ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut series = LANCZOS_COEFFS[0];
    for (i, &coeff) in LANCZOS_COEFFS[1..].iter().enumerate() {
        series += coeff / (x + i as f64 + 1.0);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// ln(B(a, b)) = ln Γ(a) + ln Γ(b) - ln Γ(a + b)
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Regularized incomplete beta function I_x(a, b), clamped to [0, 1] outside the support
/// Shape parameters must be positive; callers validate them
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> PricingResult<f64> {
    if x <= 0.0 {
        return Ok(0.0);
    }
    if x >= 1.0 {
        return Ok(1.0);
    }
    if x > (a + 1.0) / (a + b + 2.0) {
        return Ok(1.0 - regularized_incomplete_beta(1.0 - x, b, a)?);
    }

    let ln_front = a * x.ln() + b * (1.0 - x).ln() - ln_beta(a, b);
    let value = ln_front.exp() * beta_continued_fraction(x, a, b, CF_MAX_ITERATIONS)? / a;
    Ok(value.clamp(0.0, 1.0))
}

/// Continued fraction for the incomplete beta function (modified Lentz)
fn beta_continued_fraction(x: f64, a: f64, b: f64, max_iterations: usize) -> PricingResult<f64> {
    const TINY: f64 = 1e-300;

    let guard = |v: f64| if v.abs() < TINY { TINY } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=max_iterations {
        let m = m as f64;
        let m2 = 2.0 * m;

        // even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        h *= d * c;

        // odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < CF_EPSILON {
            return Ok(h);
        }
    }

    Err(PricingError::OptimizationNonConvergence {
        iterations: max_iterations,
        tolerance: CF_EPSILON,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln_gamma_known_values() {
        assert!((ln_gamma(1.0)).abs() < 1e-12);
        assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-12);
        assert!((ln_gamma(0.5) - PI.sqrt().ln()).abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_beta_closed_forms() {
        for &x in &[0.05, 0.3, 0.5, 0.7, 0.95] {
            // Beta(1,1) is uniform
            assert!((regularized_incomplete_beta(x, 1.0, 1.0).unwrap() - x).abs() < 1e-12);
            // Beta(2,1) has CDF x^2
            assert!((regularized_incomplete_beta(x, 2.0, 1.0).unwrap() - x * x).abs() < 1e-12);
            // Beta(2,2) has CDF 3x^2 - 2x^3
            let expected = 3.0 * x * x - 2.0 * x * x * x;
            assert!((regularized_incomplete_beta(x, 2.0, 2.0).unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_incomplete_beta_bounds_and_symmetry() {
        assert_eq!(regularized_incomplete_beta(-0.1, 2.0, 3.0), Ok(0.0));
        assert_eq!(regularized_incomplete_beta(1.5, 2.0, 3.0), Ok(1.0));
        let x = 0.37;
        let lhs = regularized_incomplete_beta(x, 8.0, 2.0).unwrap();
        let rhs = 1.0 - regularized_incomplete_beta(1.0 - x, 2.0, 8.0).unwrap();
        assert!((lhs - rhs).abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_beta_monotone() {
        let mut previous = 0.0;
        for i in 1..100 {
            let value = regularized_incomplete_beta(i as f64 / 100.0, 0.5, 4.0).unwrap();
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_continued_fraction_reports_iteration_cap() {
        assert_eq!(
            beta_continued_fraction(0.3, 2.5, 3.5, 1),
            Err(PricingError::OptimizationNonConvergence { iterations: 1, tolerance: CF_EPSILON })
        );
        assert!(beta_continued_fraction(0.3, 2.5, 3.5, CF_MAX_ITERATIONS).is_ok());
    }
}
