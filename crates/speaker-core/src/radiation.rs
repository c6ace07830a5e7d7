//! Radiation impedance of a rigid circular piston in an infinite baffle.
//!
//! The normalized resistance and reactance are
//!
//! ```text
//! R₁(ka) = 1 − J₁(2ka)/ka
//! X₁(ka) = H₁(2ka)/ka
//! ```
//!
//! and the mechanical impedance seen by the piston is
//! Z = ρcS·(R₁ + jX₁). Below `KA_ASYMPTOTIC_LIMIT` the closed-form
//! small-argument limits are used instead; the two regimes agree to
//! better than 1e-4 at the switch point.

use crate::constants::{radius_from_area, Air};
use crate::special::{bessel_j1, struve_h1};
use num_complex::Complex64;
use std::f64::consts::PI;

/// ka below which the small-piston asymptotes replace the Bessel and
/// Struve evaluations.
pub const KA_ASYMPTOTIC_LIMIT: f64 = 0.01;

/// Dimensionless wavenumber-radius product ka for a circular opening
/// of the given area. Frequency and area must be positive; the system
/// and sweep validators enforce that before evaluation starts.
pub fn wavenumber_radius(frequency: f64, area: f64, air: &Air) -> f64 {
    debug_assert!(frequency > 0.0 && area > 0.0);
    2.0 * PI * frequency / air.c * radius_from_area(area)
}

/// Normalized piston coefficients `(R₁, X₁)`.
///
/// Small-ka branch: R₁ = (ka)²/2, X₁ = 8ka/(3π), the leading terms of
/// the full expressions.
pub fn piston_coefficients(ka: f64) -> (f64, f64) {
    if ka < KA_ASYMPTOTIC_LIMIT {
        (ka * ka / 2.0, 8.0 * ka / (3.0 * PI))
    } else {
        let x = 2.0 * ka;
        (1.0 - bessel_j1(x) / ka, struve_h1(x) / ka)
    }
}

/// Mechanical radiation impedance ρcS·(R₁ + jX₁) in N·s/m.
pub fn mechanical_impedance(frequency: f64, area: f64, air: &Air) -> Complex64 {
    let ka = wavenumber_radius(frequency, area, air);
    let (r1, x1) = piston_coefficients(ka);
    air.rho_c() * area * Complex64::new(r1, x1)
}

/// Acoustic radiation impedance Z_mech/S² in Pa·s/m³, the form a horn
/// mouth or port opening terminates into.
pub fn acoustic_impedance(frequency: f64, area: f64, air: &Air) -> Complex64 {
    mechanical_impedance(frequency, area, air) / (area * area)
}

/// Reactive air load expressed as an added mass, ρcS·X₁/ω (kg).
///
/// Tends to the textbook (8/3)ρa³ as f → 0.
pub fn added_mass(frequency: f64, area: f64, air: &Air) -> f64 {
    let ka = wavenumber_radius(frequency, area, air);
    let (_, x1) = piston_coefficients(ka);
    air.rho_c() * area * x1 / (2.0 * PI * frequency)
}
