use serde::{Deserialize, Serialize};

/// Reference sound pressure for SPL, 20 µPa.
pub const P_REF: f64 = 2e-5;

/// Ambient air properties used throughout the model.
///
/// The defaults are the fixed reference values most published driver
/// parameters assume (c = 344 m/s, ρ = 1.205 kg/m³ at about 20 °C);
/// [`Air::at_temperature`] derives both from temperature instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Air {
    /// Speed of sound in m/s.
    pub c: f64,
    /// Density in kg/m³.
    pub rho: f64,
}

impl Default for Air {
    fn default() -> Self {
        Self { c: 344.0, rho: 1.205 }
    }
}

impl Air {
    /// Speed of sound and density at `temperature_c` °C, ideal-gas
    /// approximation at standard pressure.
    pub fn at_temperature(temperature_c: f64) -> Self {
        let t_kelvin = temperature_c + 273.15;
        // c = 331.3 * sqrt(T/273.15)
        let c = 331.3 * (t_kelvin / 273.15).sqrt();
        // ρ = p / (R_specific * T), with p = 101325 Pa, R_specific = 287.05 J/(kg·K)
        let rho = 101325.0 / (287.05 * t_kelvin);
        Self { c, rho }
    }

    /// Characteristic acoustic impedance of free air, ρc (Pa·s/m).
    pub fn rho_c(&self) -> f64 {
        self.rho * self.c
    }
}

/// Radius of a circular opening from its area (both SI).
pub fn radius_from_area(area: f64) -> f64 {
    (area / std::f64::consts::PI).sqrt()
}
