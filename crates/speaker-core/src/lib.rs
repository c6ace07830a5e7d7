//! Frequency-domain loudspeaker modelling: Thiele-Small drivers in
//! sealed, ported and front-loaded-horn enclosures, with piston
//! radiation loading and Webster horn-segment transforms.

pub mod constants;
pub mod diagnostics;
pub mod driver;
pub mod enclosure;
pub mod error;
pub mod horn;
pub mod radiation;
pub mod resonance;
pub mod segments;
pub mod special;
pub mod sweep;

use serde::Serialize;

pub use constants::Air;
pub use diagnostics::Advisory;
pub use driver::{DriverParameters, DriverSpec};
pub use enclosure::{
    DriveConditions, Enclosure, FrontLoadedHorn, PortedBox, ResponsePoint, SealedBox,
    SpeakerSystem,
};
pub use error::{Result, SpeakerError};
pub use horn::MultiSegmentHorn;
pub use resonance::SolverConfig;
pub use segments::{HornProfile, HornSegment};
pub use sweep::SweepConfig;

// ---------------------------------------------------------------------------
// One-call pipeline: callers with a driver datasheet and a box in mind
// start here
// ---------------------------------------------------------------------------

/// Results of a full run. `points` ascend in frequency; `advisories`
/// describe the assembly as a whole, not any single point.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    pub advisories: Vec<Advisory>,
    pub points: Vec<ResponsePoint>,
}

/// Run the full pipeline: derive Thiele-Small parameters from the raw
/// driver spec, validate the assembly, collect design advisories, then
/// sweep the response grid.
pub fn simulate(
    driver: DriverSpec,
    enclosure: Enclosure,
    drive: DriveConditions,
    sweep_config: &SweepConfig,
    air: &Air,
) -> Result<SimulationOutput> {
    let parameters = DriverParameters::from_spec(driver, air, &SolverConfig::default())?;
    let system = SpeakerSystem::new(parameters, enclosure, drive, air)?;
    let advisories = diagnostics::evaluate(&system, air);
    let points = sweep::frequency_response(&system, sweep_config, air)?;
    Ok(SimulationOutput { advisories, points })
}
