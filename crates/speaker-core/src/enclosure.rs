//! Enclosure models and the electro-mechanical chain that turns a
//! drive voltage into terminal impedance and far-field SPL.
//!
//! All three enclosures share one current policy: with the drive
//! voltage as phase reference, only the in-phase (active) component of
//! coil current produces force, F = BL·Re(I). The resulting diaphragm
//! velocity, port flow or horn mouth flow then radiates as a baffled
//! source, |p| = ρ·f·|U|/r.

use crate::constants::{radius_from_area, Air, P_REF};
use crate::driver::DriverParameters;
use crate::error::{Result, SpeakerError};
use crate::horn::MultiSegmentHorn;
use crate::radiation;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Port end correction as a multiple of port radius: flanged inner end
/// (0.85a) plus free outer end (0.61a).
const PORT_END_CORRECTION: f64 = 1.46;

/// Closed box: the trapped air stiffens the suspension, nothing else
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SealedBox {
    /// Net internal volume in m³.
    pub volume: f64,
}

/// Bass-reflex box with a single cylindrical port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortedBox {
    /// Net internal volume in m³.
    pub volume: f64,
    /// Intended Helmholtz tuning in Hz.
    pub tuning_frequency: f64,
    /// Port cross-section in m².
    pub port_area: f64,
    /// Physical port length in metres. `None` derives the length that
    /// realizes `tuning_frequency`; `Some` is taken as the built
    /// geometry, and a tuning that disagrees with the declared value
    /// surfaces as an advisory, not an error.
    pub port_length: Option<f64>,
}

/// Driver compression-loaded into a horn, rear face in a sealed
/// chamber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontLoadedHorn {
    pub horn: MultiSegmentHorn,
    /// Sealed volume behind the cone in m³; zero leaves the rear face
    /// unloaded (open back).
    pub rear_chamber_volume: f64,
    /// Compression chamber between cone and throat in m³; zero couples
    /// the cone to the throat directly.
    pub throat_chamber_volume: f64,
}

/// Closed set of supported enclosure topologies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Enclosure {
    Sealed(SealedBox),
    Ported(PortedBox),
    FrontLoadedHorn(FrontLoadedHorn),
}

/// Drive voltage and measurement distance for reported SPL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveConditions {
    /// Terminal voltage in V RMS. 2.83 V is the 1 W/8 Ω convention.
    pub voltage_rms: f64,
    /// Far-field measurement distance in metres.
    pub distance: f64,
}

impl Default for DriveConditions {
    fn default() -> Self {
        Self {
            voltage_rms: 2.83,
            distance: 1.0,
        }
    }
}

/// Everything the model reports for one frequency.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponsePoint {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Electrical impedance at the terminals, Ω.
    pub impedance: Complex64,
    /// Far-field SPL in dB re 20 µPa at the drive distance.
    pub spl_db: f64,
    /// RMS diaphragm excursion in metres.
    pub diaphragm_displacement: f64,
    /// RMS coil current in A.
    pub current: f64,
    pub current_phase_deg: f64,
    /// Phase of diaphragm velocity relative to the drive voltage.
    pub velocity_phase_deg: f64,
    /// Phase of the radiated pressure (propagation delay excluded).
    pub pressure_phase_deg: f64,
    /// Acoustic output power over active electrical input power, %.
    pub efficiency_percent: f64,
    /// Active electrical input power V·Re(I) in W.
    pub input_power: f64,
    /// Normalized radiation resistance R₁ of the radiating aperture.
    pub radiation_r1: f64,
    /// Normalized radiation reactance X₁ of the radiating aperture.
    pub radiation_x1: f64,
}

/// A driver mounted in an enclosure under fixed drive conditions.
#[derive(Debug, Clone)]
pub struct SpeakerSystem {
    pub driver: DriverParameters,
    pub enclosure: Enclosure,
    pub drive: DriveConditions,
}

impl SealedBox {
    fn validate(&self) -> Result<()> {
        if !(self.volume > 0.0 && self.volume.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "sealed volume {} m³ must be positive",
                self.volume
            )));
        }
        Ok(())
    }
}

impl PortedBox {
    fn validate(&self, air: &Air) -> Result<()> {
        if !(self.volume > 0.0 && self.volume.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "ported volume {} m³ must be positive",
                self.volume
            )));
        }
        if !(self.tuning_frequency > 0.0 && self.tuning_frequency.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "tuning frequency {} Hz must be positive",
                self.tuning_frequency
            )));
        }
        if !(self.port_area > 0.0 && self.port_area.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "port area {} m² must be positive",
                self.port_area
            )));
        }
        if let Some(length) = self.port_length {
            if !(length > 0.0 && length.is_finite()) {
                return Err(SpeakerError::InvalidEnclosure(format!(
                    "port length {length} m must be positive"
                )));
            }
        } else {
            let derived = self.resolved_port_length(air);
            if derived <= 0.0 {
                return Err(SpeakerError::InvalidEnclosure(format!(
                    "no physical port length reaches {} Hz with a {} m² port \
                     (end correction alone exceeds the required air mass)",
                    self.tuning_frequency, self.port_area
                )));
            }
        }
        Ok(())
    }

    /// Acoustic compliance of the box air, V/(ρc²), in m⁵/N.
    fn acoustic_compliance(&self, air: &Air) -> f64 {
        self.volume / (air.rho * air.c * air.c)
    }

    /// Physical port length in metres: the declared geometry, or the
    /// length that realizes `tuning_frequency` when none was given.
    pub fn resolved_port_length(&self, air: &Air) -> f64 {
        if let Some(length) = self.port_length {
            return length;
        }
        let w_b = 2.0 * PI * self.tuning_frequency;
        let m_ap = 1.0 / (w_b * w_b * self.acoustic_compliance(air));
        m_ap * self.port_area / air.rho - PORT_END_CORRECTION * radius_from_area(self.port_area)
    }

    /// Acoustic port mass ρ·L_eff/S_p in kg/m⁴, end-corrected.
    fn port_mass(&self, air: &Air) -> f64 {
        let l_eff = self.resolved_port_length(air)
            + PORT_END_CORRECTION * radius_from_area(self.port_area);
        air.rho * l_eff / self.port_area
    }

    /// Helmholtz frequency implied by the actual geometry. Matches
    /// `tuning_frequency` exactly when the length is derived.
    pub fn geometric_tuning_frequency(&self, air: &Air) -> f64 {
        1.0 / (2.0 * PI * (self.port_mass(air) * self.acoustic_compliance(air)).sqrt())
    }
}

impl FrontLoadedHorn {
    fn validate(&self) -> Result<()> {
        self.horn.validate()?;
        if !(self.rear_chamber_volume >= 0.0 && self.rear_chamber_volume.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "rear chamber volume {} m³ must be zero or positive",
                self.rear_chamber_volume
            )));
        }
        if !(self.throat_chamber_volume >= 0.0 && self.throat_chamber_volume.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "throat chamber volume {} m³ must be zero or positive",
                self.throat_chamber_volume
            )));
        }
        Ok(())
    }
}

impl Enclosure {
    pub fn validate(&self, air: &Air) -> Result<()> {
        match self {
            Enclosure::Sealed(sealed) => sealed.validate(),
            Enclosure::Ported(ported) => ported.validate(air),
            Enclosure::FrontLoadedHorn(flh) => flh.validate(),
        }
    }
}

impl DriveConditions {
    fn validate(&self) -> Result<()> {
        if !(self.voltage_rms > 0.0 && self.voltage_rms.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "drive voltage {} V must be positive",
                self.voltage_rms
            )));
        }
        if !(self.distance > 0.0 && self.distance.is_finite()) {
            return Err(SpeakerError::InvalidEnclosure(format!(
                "measurement distance {} m must be positive",
                self.distance
            )));
        }
        Ok(())
    }
}

/// Shared electro-mechanical solve for one frequency.
struct ElectroMechanical {
    impedance: Complex64,
    current: Complex64,
    velocity: Complex64,
}

fn electro_chain(
    driver: &DriverParameters,
    z_mech_total: Complex64,
    omega: f64,
    voltage: f64,
) -> ElectroMechanical {
    let bl = driver.spec.bl;
    let impedance = driver.blocked_impedance(omega) + bl * bl / z_mech_total;
    let current = voltage / impedance;
    // Active-current policy: the in-phase component drives the cone
    let force = bl * current.re;
    let velocity = force / z_mech_total;
    ElectroMechanical {
        impedance,
        current,
        velocity,
    }
}

fn spl_db(u_mag: f64, frequency: f64, distance: f64, air: &Air) -> f64 {
    let pressure = air.rho * frequency * u_mag / distance;
    20.0 * (pressure / P_REF).log10()
}

fn wrap_deg(deg: f64) -> f64 {
    if deg > 180.0 {
        deg - 360.0
    } else {
        deg
    }
}

impl SpeakerSystem {
    /// Validate the assembly against the air it will be evaluated in.
    pub fn new(
        driver: DriverParameters,
        enclosure: Enclosure,
        drive: DriveConditions,
        air: &Air,
    ) -> Result<Self> {
        enclosure.validate(air)?;
        drive.validate()?;
        Ok(Self {
            driver,
            enclosure,
            drive,
        })
    }

    /// Full response at one frequency.
    pub fn response_at(&self, frequency: f64, air: &Air) -> Result<ResponsePoint> {
        if !(frequency > 0.0 && frequency.is_finite()) {
            return Err(SpeakerError::InvalidSweep(format!(
                "frequency {frequency} Hz must be positive"
            )));
        }
        Ok(match &self.enclosure {
            Enclosure::Sealed(sealed) => self.sealed_response(sealed, frequency, air),
            Enclosure::Ported(ported) => self.ported_response(ported, frequency, air),
            Enclosure::FrontLoadedHorn(flh) => self.horn_response(flh, frequency, air),
        })
    }

    fn sealed_response(&self, sealed: &SealedBox, frequency: f64, air: &Air) -> ResponsePoint {
        let spec = &self.driver.spec;
        let omega = 2.0 * PI * frequency;
        // Box air in series with the suspension: compliance shrinks by
        // 1 + V_as/V_b
        let c_mb = spec.c_ms / (1.0 + self.driver.v_as / sealed.volume);
        let z_rad = radiation::mechanical_impedance(frequency, spec.s_d, air);
        let z_mech = Complex64::new(
            spec.r_ms,
            omega * self.driver.m_ms - 1.0 / (omega * c_mb),
        ) + z_rad;

        let em = electro_chain(&self.driver, z_mech, omega, self.drive.voltage_rms);
        let u_diaphragm = spec.s_d * em.velocity;
        let acoustic_power = z_rad.re * em.velocity.norm_sqr();
        self.assemble_point(frequency, air, &em, u_diaphragm, spec.s_d, acoustic_power)
    }

    fn ported_response(&self, ported: &PortedBox, frequency: f64, air: &Air) -> ResponsePoint {
        let spec = &self.driver.spec;
        let omega = 2.0 * PI * frequency;

        let c_ab = ported.acoustic_compliance(air);
        let m_ap = ported.port_mass(air);
        // Port loss: radiation resistance of the outer port opening
        // (the reactive part is already inside the end correction)
        let ka_port = radiation::wavenumber_radius(frequency, ported.port_area, air);
        let (r1_port, _) = radiation::piston_coefficients(ka_port);
        let r_ap = air.rho_c() / ported.port_area * r1_port;

        let z_box = Complex64::new(0.0, -1.0 / (omega * c_ab));
        let z_port = Complex64::new(r_ap, omega * m_ap);
        let z_rear_acoustic = z_box * z_port / (z_box + z_port);

        let z_rad = radiation::mechanical_impedance(frequency, spec.s_d, air);
        let z_mech = self.driver.mechanical_impedance(omega)
            + z_rad
            + spec.s_d * spec.s_d * z_rear_acoustic;

        let em = electro_chain(&self.driver, z_mech, omega, self.drive.voltage_rms);
        let u_diaphragm = spec.s_d * em.velocity;
        // Rear flow splits between box compliance and port; the port
        // share re-radiates in antiphase with the cone front
        let u_port = u_diaphragm * z_box / (z_box + z_port);
        let u_net = u_diaphragm - u_port;

        let acoustic_power =
            z_rad.re * em.velocity.norm_sqr() + r_ap * u_port.norm_sqr();
        self.assemble_point(frequency, air, &em, u_net, spec.s_d, acoustic_power)
    }

    fn horn_response(&self, flh: &FrontLoadedHorn, frequency: f64, air: &Air) -> ResponsePoint {
        let spec = &self.driver.spec;
        let omega = 2.0 * PI * frequency;
        let rho_c2 = air.rho * air.c * air.c;

        let mouth_area = flh.horn.mouth_area();
        let mouth_load = radiation::acoustic_impedance(frequency, mouth_area, air);
        let horn = flh.horn.throat_transfer(frequency, mouth_load, air);

        // Optional compression chamber shunts the throat
        let z_front = if flh.throat_chamber_volume > 0.0 {
            let c_atc = flh.throat_chamber_volume / rho_c2;
            let z_chamber = Complex64::new(0.0, -1.0 / (omega * c_atc));
            z_chamber * horn.throat_impedance / (z_chamber + horn.throat_impedance)
        } else {
            horn.throat_impedance
        };
        // Zero rear volume leaves the back of the cone unloaded
        let z_rear = if flh.rear_chamber_volume > 0.0 {
            let c_arc = flh.rear_chamber_volume / rho_c2;
            Complex64::new(0.0, -1.0 / (omega * c_arc))
        } else {
            Complex64::new(0.0, 0.0)
        };

        let z_mech = self.driver.mechanical_impedance(omega)
            + spec.s_d * spec.s_d * (z_front + z_rear);

        let em = electro_chain(&self.driver, z_mech, omega, self.drive.voltage_rms);
        let u_diaphragm = spec.s_d * em.velocity;
        let u_throat = if flh.throat_chamber_volume > 0.0 {
            u_diaphragm * z_front / horn.throat_impedance
        } else {
            u_diaphragm
        };
        let u_mouth = u_throat * horn.mouth_velocity_ratio;

        let acoustic_power = mouth_load.re * u_mouth.norm_sqr();
        self.assemble_point(frequency, air, &em, u_mouth, mouth_area, acoustic_power)
    }

    /// Fold the per-topology quantities into the reported point.
    /// `u_radiating` is whatever volume velocity reaches free air and
    /// `radiating_area` the aperture it leaves through.
    fn assemble_point(
        &self,
        frequency: f64,
        air: &Air,
        em: &ElectroMechanical,
        u_radiating: Complex64,
        radiating_area: f64,
        acoustic_power: f64,
    ) -> ResponsePoint {
        let omega = 2.0 * PI * frequency;
        let input_power = self.drive.voltage_rms * em.current.re;
        let ka = radiation::wavenumber_radius(frequency, radiating_area, air);
        let (r1, x1) = radiation::piston_coefficients(ka);
        ResponsePoint {
            frequency,
            impedance: em.impedance,
            spl_db: spl_db(u_radiating.norm(), frequency, self.drive.distance, air),
            diaphragm_displacement: em.velocity.norm() / omega,
            current: em.current.norm(),
            current_phase_deg: em.current.arg().to_degrees(),
            velocity_phase_deg: em.velocity.arg().to_degrees(),
            pressure_phase_deg: wrap_deg(u_radiating.arg().to_degrees() + 90.0),
            efficiency_percent: 100.0 * acoustic_power / input_power,
            input_power,
            radiation_r1: r1,
            radiation_x1: x1,
        }
    }
}
