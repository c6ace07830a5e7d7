//! Thiele-Small driver model: published mechanical/electrical inputs
//! and the small-signal parameters derived from them.

use crate::constants::Air;
use crate::error::{Result, SpeakerError};
use crate::resonance::{self, ResonanceSolution, SolverConfig};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

fn default_radiation_faces() -> f64 {
    1.0
}

/// Raw driver description, the way a datasheet or measurement rig
/// states it. Validated and resolved into [`DriverParameters`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSpec {
    /// Bare diaphragm + coil mass in kg (no air load).
    pub m_md: f64,
    /// Suspension compliance in m/N.
    pub c_ms: f64,
    /// Suspension mechanical resistance in N·s/m. Zero is a lossless
    /// suspension and makes Q_ms infinite.
    pub r_ms: f64,
    /// Voice-coil DC resistance in Ω.
    pub r_e: f64,
    /// Voice-coil inductance in H.
    pub l_e: f64,
    /// Force factor in T·m.
    pub bl: f64,
    /// Projected diaphragm area in m².
    pub s_d: f64,
    /// Number of diaphragm faces carrying radiation mass in the F_s
    /// solve (0, 1 or 2). Use 0 when `m_md` already includes the air
    /// load, as COMSOL-style reference data does.
    #[serde(default = "default_radiation_faces")]
    pub radiation_faces: f64,
}

impl DriverSpec {
    fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f64, bool, &'static str); 8] = [
            ("m_md", self.m_md, self.m_md > 0.0, "must be positive"),
            ("c_ms", self.c_ms, self.c_ms > 0.0, "must be positive"),
            ("r_ms", self.r_ms, self.r_ms >= 0.0, "must be zero or positive"),
            ("r_e", self.r_e, self.r_e > 0.0, "must be positive"),
            ("l_e", self.l_e, self.l_e >= 0.0, "must be zero or positive"),
            ("bl", self.bl, self.bl > 0.0, "must be positive"),
            ("s_d", self.s_d, self.s_d > 0.0, "must be positive"),
            (
                "radiation_faces",
                self.radiation_faces,
                (0.0..=2.0).contains(&self.radiation_faces),
                "must lie in 0..=2",
            ),
        ];
        for (name, value, ok, constraint) in checks {
            if !(ok && value.is_finite()) {
                return Err(SpeakerError::InvalidDriver {
                    name,
                    value,
                    constraint,
                });
            }
        }
        Ok(())
    }
}

/// Validated driver with its resolved resonance and the derived
/// Thiele-Small parameters.
#[derive(Debug, Clone)]
pub struct DriverParameters {
    pub spec: DriverSpec,
    /// Free-air resonance in Hz (radiation-mass corrected).
    pub f_s: f64,
    /// Total moving mass in kg.
    pub m_ms: f64,
    /// Mechanical quality factor ω_s·M_ms/R_ms; infinite when R_ms is
    /// zero.
    pub q_ms: f64,
    /// Electrical quality factor ω_s·M_ms·R_e/BL².
    pub q_es: f64,
    /// Total quality factor Q_es·Q_ms/(Q_es + Q_ms).
    pub q_ts: f64,
    /// Equivalent compliance volume ρc²·C_ms·S_d² in m³.
    pub v_as: f64,
    pub resonance: ResonanceSolution,
}

impl DriverParameters {
    /// Validate `spec` and resolve F_s/M_ms against the given air.
    pub fn from_spec(spec: DriverSpec, air: &Air, solver: &SolverConfig) -> Result<Self> {
        spec.validate()?;
        let resonance = resonance::solve(
            spec.m_md,
            spec.c_ms,
            spec.s_d,
            spec.radiation_faces,
            air,
            solver,
        );
        let ws = 2.0 * PI * resonance.f_s;
        let q_ms = if spec.r_ms > 0.0 {
            ws * resonance.m_ms / spec.r_ms
        } else {
            f64::INFINITY
        };
        let q_es = ws * resonance.m_ms * spec.r_e / (spec.bl * spec.bl);
        let q_ts = if q_ms.is_finite() {
            q_es * q_ms / (q_es + q_ms)
        } else {
            q_es
        };
        let v_as = air.rho * air.c * air.c * spec.c_ms * spec.s_d * spec.s_d;
        Ok(Self {
            f_s: resonance.f_s,
            m_ms: resonance.m_ms,
            q_ms,
            q_es,
            q_ts,
            v_as,
            resonance,
            spec,
        })
    }

    /// Suspension + moving-mass branch R_ms + j(ωM_ms − 1/(ωC_ms)).
    /// Radiation and enclosure loads are added by the enclosure model.
    pub fn mechanical_impedance(&self, omega: f64) -> Complex64 {
        Complex64::new(
            self.spec.r_ms,
            omega * self.m_ms - 1.0 / (omega * self.spec.c_ms),
        )
    }

    /// Blocked electrical impedance R_e + jωL_e.
    pub fn blocked_impedance(&self, omega: f64) -> Complex64 {
        Complex64::new(self.spec.r_e, omega * self.spec.l_e)
    }
}
