//! Log-spaced frequency sweeps.

use crate::constants::Air;
use crate::enclosure::{ResponsePoint, SpeakerSystem};
use crate::error::{Result, SpeakerError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Sweep grid description. The defaults cover the audio band at a
/// resolution that renders smooth impedance peaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Lower edge in Hz.
    pub f_min: f64,
    /// Upper edge in Hz.
    pub f_max: f64,
    /// Number of log-spaced points, both edges included.
    pub points: usize,
    /// Spread the evaluation across the rayon pool.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            f_min: 10.0,
            f_max: 20000.0,
            points: 200,
            parallel: true,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.f_min > 0.0 && self.f_min.is_finite()) {
            return Err(SpeakerError::InvalidSweep(format!(
                "lower edge {} Hz must be positive",
                self.f_min
            )));
        }
        if !(self.f_max > self.f_min && self.f_max.is_finite()) {
            return Err(SpeakerError::InvalidSweep(format!(
                "upper edge {} Hz must exceed the lower edge {} Hz",
                self.f_max, self.f_min
            )));
        }
        if self.points < 2 {
            return Err(SpeakerError::InvalidSweep(format!(
                "{} grid points cannot span a frequency range",
                self.points
            )));
        }
        Ok(())
    }

    /// The evaluation grid, ascending, with exact edges.
    pub fn frequencies(&self) -> Vec<f64> {
        let log_min = self.f_min.ln();
        let step = (self.f_max / self.f_min).ln() / (self.points - 1) as f64;
        (0..self.points)
            .map(|i| {
                // Both edges exact: ln/exp round trips leave residue
                if i == 0 {
                    self.f_min
                } else if i == self.points - 1 {
                    self.f_max
                } else {
                    (log_min + step * i as f64).exp()
                }
            })
            .collect()
    }
}

/// Evaluate a system over the grid. Points come back in ascending
/// frequency order whichever way they were computed.
pub fn frequency_response(
    system: &SpeakerSystem,
    config: &SweepConfig,
    air: &Air,
) -> Result<Vec<ResponsePoint>> {
    config.validate()?;
    let grid = config.frequencies();
    log::debug!(
        "sweeping {} points from {} Hz to {} Hz (parallel: {})",
        grid.len(),
        config.f_min,
        config.f_max,
        config.parallel
    );
    if config.parallel {
        grid.par_iter().map(|&f| system.response_at(f, air)).collect()
    } else {
        grid.iter().map(|&f| system.response_at(f, air)).collect()
    }
}
