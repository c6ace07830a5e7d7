//! Bessel and Struve functions for the piston radiation integrals.
//!
//! J₁ and Y₁ come from `spec_math` (Cephes port). Struve H₁ has no
//! ecosystem implementation, so it is built here from its power series
//! for small arguments and the Y₁-anchored asymptotic expansion for
//! large ones.

use spec_math::Bessel;
use std::f64::consts::PI;

/// Argument above which the H₁ power series is traded for the
/// asymptotic expansion. At the seam both sides agree to ~2e-7.
const H1_SERIES_LIMIT: f64 = 16.0;

/// Bessel function of the first kind, order 1.
pub fn bessel_j1(x: f64) -> f64 {
    x.bessel_jv(1.0)
}

/// Bessel function of the second kind (Neumann), order 1.
pub fn bessel_y1(x: f64) -> f64 {
    x.bessel_yv(1.0)
}

/// Struve function H₁(x), x ≥ 0.
///
/// Power series (Abramowitz & Stegun 12.1.5) up to x = 16, then
/// H₁(x) = Y₁(x) + (2/π)·(1 + x⁻² − 3x⁻⁴ + 45x⁻⁶), whose error is
/// below 3e-7 at the seam and falls off as x⁻⁸.
pub fn struve_h1(x: f64) -> f64 {
    if x <= H1_SERIES_LIMIT {
        struve_h1_series(x)
    } else {
        struve_h1_asymptotic(x)
    }
}

/// H₁(x) = Σₖ (−1)ᵏ·(x/2)^(2k+2) / (Γ(k+3/2)·Γ(k+5/2))
///
/// Terms are generated by the recurrence
/// tₖ₊₁ = −tₖ·(x/2)² / ((k+3/2)(k+5/2)); the k = 0 term is
/// (x/2)²·8/(3π). The series alternates and converges for all x, but
/// cancellation limits its useful range to moderate arguments.
fn struve_h1_series(x: f64) -> f64 {
    let q = (x / 2.0) * (x / 2.0);
    let mut term = q * 8.0 / (3.0 * PI);
    let mut sum = term;
    for k in 0..200 {
        let k = k as f64;
        term *= -q / ((k + 1.5) * (k + 2.5));
        sum += term;
        if term.abs() < sum.abs() * 1e-17 {
            break;
        }
    }
    sum
}

fn struve_h1_asymptotic(x: f64) -> f64 {
    let inv2 = 1.0 / (x * x);
    bessel_y1(x) + 2.0 / PI * (1.0 + inv2 * (1.0 - inv2 * (3.0 - 45.0 * inv2)))
}
