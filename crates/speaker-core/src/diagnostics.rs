//! Design advisories. These flag questionable driver/enclosure
//! pairings without refusing to evaluate them; the model still runs
//! and the caller decides what to do with the warnings.

use crate::constants::{radius_from_area, Air};
use crate::enclosure::{Enclosure, SpeakerSystem};
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

/// Declared vs geometric port tuning deviation that triggers an
/// advisory, in percent.
const PORT_TUNING_TOLERANCE_PERCENT: f64 = 5.0;

/// Horn loading wants an overdamped driver.
const HORN_QTS_LIMIT: f64 = 0.5;

/// A single non-fatal observation about the assembled system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Advisory {
    /// The radiation-mass fixed point hit its round limit; derived
    /// parameters carry the last iterate.
    ResonanceNotConverged { iterations: usize },
    /// Total Q outside the band that suits the chosen alignment.
    QtsOutsideRecommendedRange { q_ts: f64, low: f64, high: f64 },
    /// Driver too resonant to sit behind a compression throat.
    QtsHighForHornLoading { q_ts: f64, limit: f64 },
    /// Declared Helmholtz tuning disagrees with the built port
    /// geometry.
    PortTuningMismatch {
        declared_hz: f64,
        geometric_hz: f64,
        deviation_percent: f64,
    },
    /// Mouth circumference below one wavelength at cutoff; expect
    /// ripple from mouth reflections near the low corner.
    HornMouthUndersized {
        mouth_circumference: f64,
        cutoff_wavelength: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ResonanceNotConverged { iterations } => write!(
                f,
                "free-air resonance solve stopped after {iterations} rounds without \
                 meeting tolerance; parameters use the last iterate"
            ),
            Advisory::QtsOutsideRecommendedRange { q_ts, low, high } => write!(
                f,
                "total Q {q_ts:.3} is outside the {low:.1} to {high:.1} range this \
                 enclosure type works best with"
            ),
            Advisory::QtsHighForHornLoading { q_ts, limit } => write!(
                f,
                "total Q {q_ts:.3} exceeds {limit:.1}; horn loading wants a more \
                 heavily damped driver"
            ),
            Advisory::PortTuningMismatch {
                declared_hz,
                geometric_hz,
                deviation_percent,
            } => write!(
                f,
                "port geometry tunes to {geometric_hz:.1} Hz, {deviation_percent:.1}% \
                 away from the declared {declared_hz:.1} Hz"
            ),
            Advisory::HornMouthUndersized {
                mouth_circumference,
                cutoff_wavelength,
            } => write!(
                f,
                "mouth circumference {mouth_circumference:.2} m is below the {cutoff_wavelength:.2} m \
                 wavelength at cutoff; the low corner will show reflection ripple"
            ),
        }
    }
}

fn check_qts_range(advisories: &mut Vec<Advisory>, q_ts: f64, low: f64, high: f64) {
    if !(low..=high).contains(&q_ts) {
        advisories.push(Advisory::QtsOutsideRecommendedRange { q_ts, low, high });
    }
}

/// Inspect a system and collect everything worth flagging.
pub fn evaluate(system: &SpeakerSystem, air: &Air) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    let driver = &system.driver;

    if !driver.resonance.converged {
        advisories.push(Advisory::ResonanceNotConverged {
            iterations: driver.resonance.iterations,
        });
    }

    match &system.enclosure {
        Enclosure::Sealed(_) => check_qts_range(&mut advisories, driver.q_ts, 0.2, 0.8),
        Enclosure::Ported(ported) => {
            check_qts_range(&mut advisories, driver.q_ts, 0.2, 0.6);
            let geometric = ported.geometric_tuning_frequency(air);
            let deviation =
                100.0 * (geometric - ported.tuning_frequency).abs() / ported.tuning_frequency;
            if deviation > PORT_TUNING_TOLERANCE_PERCENT {
                advisories.push(Advisory::PortTuningMismatch {
                    declared_hz: ported.tuning_frequency,
                    geometric_hz: geometric,
                    deviation_percent: deviation,
                });
            }
        }
        Enclosure::FrontLoadedHorn(flh) => {
            if driver.q_ts > HORN_QTS_LIMIT {
                advisories.push(Advisory::QtsHighForHornLoading {
                    q_ts: driver.q_ts,
                    limit: HORN_QTS_LIMIT,
                });
            }
            let cutoff = flh.horn.cutoff_frequency(air);
            if cutoff > 0.0 {
                let wavelength = air.c / cutoff;
                let circumference = 2.0 * PI * radius_from_area(flh.horn.mouth_area());
                if circumference < wavelength {
                    advisories.push(Advisory::HornMouthUndersized {
                        mouth_circumference: circumference,
                        cutoff_wavelength: wavelength,
                    });
                }
            }
        }
    }

    advisories
}
