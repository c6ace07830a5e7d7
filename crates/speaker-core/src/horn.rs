//! Multi-segment horns: a throat-to-mouth stack of [`HornSegment`]s
//! evaluated by propagating the mouth load backwards segment by
//! segment.

use crate::constants::Air;
use crate::error::{Result, SpeakerError};
use crate::segments::HornSegment;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Horn path ordered throat first, mouth last. Each segment's mouth
/// area must equal the next segment's throat area; an area step would
/// need a junction model the plane-wave chain does not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSegmentHorn {
    segments: Vec<HornSegment>,
}

/// Relative mismatch tolerated between adjacent areas.
const JOINT_AREA_TOL: f64 = 1e-9;

/// Mouth load propagated through the whole chain.
#[derive(Debug, Clone, Copy)]
pub struct HornTransfer {
    /// Acoustic impedance at the first segment's throat, Pa·s/m³.
    pub throat_impedance: Complex64,
    /// Complex ratio U_mouth/U_throat across the full chain.
    pub mouth_velocity_ratio: Complex64,
}

impl MultiSegmentHorn {
    pub fn new(segments: Vec<HornSegment>) -> Result<Self> {
        let horn = Self { segments };
        horn.validate()?;
        Ok(horn)
    }

    /// Re-check every segment, for horns built outside [`Self::new`]
    /// (deserialized configurations in particular).
    pub fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(SpeakerError::InvalidSegment {
                index: 0,
                reason: "horn needs at least one segment".into(),
            });
        }
        for (index, segment) in self.segments.iter().enumerate() {
            segment.validate(index)?;
        }
        for (index, pair) in self.segments.windows(2).enumerate() {
            let mouth = pair[0].mouth_area;
            let throat = pair[1].throat_area;
            if (throat - mouth).abs() > JOINT_AREA_TOL * mouth {
                return Err(SpeakerError::InvalidSegment {
                    index: index + 1,
                    reason: format!(
                        "throat area {throat} m² does not continue the previous \
                         mouth area {mouth} m²"
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn segments(&self) -> &[HornSegment] {
        &self.segments
    }

    /// Area at the driving end in m².
    pub fn throat_area(&self) -> f64 {
        self.segments[0].throat_area
    }

    /// Area of the radiating mouth in m².
    pub fn mouth_area(&self) -> f64 {
        self.segments[self.segments.len() - 1].mouth_area
    }

    /// Total axial length in metres.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Total internal air volume in m³.
    pub fn volume(&self) -> f64 {
        self.segments.iter().map(|s| s.volume()).sum()
    }

    /// Highest per-segment cutoff in the chain; the segment with the
    /// steepest flare is the one that limits low-frequency loading.
    pub fn cutoff_frequency(&self, air: &Air) -> f64 {
        self.segments
            .iter()
            .map(|s| s.cutoff_frequency(air))
            .fold(0.0, f64::max)
    }

    /// Propagate `mouth_load` (the radiation impedance at the mouth,
    /// or anything else terminating the chain) back to the throat.
    pub fn throat_transfer(
        &self,
        frequency: f64,
        mouth_load: Complex64,
        air: &Air,
    ) -> HornTransfer {
        let mut impedance = mouth_load;
        let mut velocity_ratio = Complex64::new(1.0, 0.0);
        for segment in self.segments.iter().rev() {
            let t = segment.transfer(frequency, impedance, air);
            impedance = t.throat_impedance;
            velocity_ratio *= t.velocity_ratio;
        }
        HornTransfer {
            throat_impedance: impedance,
            mouth_velocity_ratio: velocity_ratio,
        }
    }
}
