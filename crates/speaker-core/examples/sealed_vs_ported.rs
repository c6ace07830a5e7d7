//! Side-by-side comparison of one woofer in a sealed and a ported box.
//!
//! Prints SPL and impedance magnitude over the bass range for both
//! alignments, plus any design advisories.
//!
//! Run with:
//!   cargo run -p speaker-core --example sealed_vs_ported

use speaker_core::{
    diagnostics, sweep, Air, DriveConditions, DriverParameters, DriverSpec, Enclosure, PortedBox,
    SealedBox, SolverConfig, SpeakerSystem, SweepConfig,
};

fn main() -> speaker_core::Result<()> {
    let air = Air::default();

    // 1. An 8" woofer from its datasheet mechanical parameters.
    let spec = DriverSpec {
        m_md: 0.0287,
        c_ms: 1.465e-4,
        r_ms: 2.90,
        r_e: 5.3,
        l_e: 0.45e-3,
        bl: 10.4,
        s_d: 0.022,
        radiation_faces: 1.0,
    };
    let driver = DriverParameters::from_spec(spec, &air, &SolverConfig::default())?;
    println!("=== Driver ===");
    println!(
        "Fs = {:.1} Hz  Qts = {:.3}  Vas = {:.1} L  Mms = {:.1} g",
        driver.f_s,
        driver.q_ts,
        driver.v_as * 1000.0,
        driver.m_ms * 1000.0
    );

    // 2. Two 20-litre boxes: one sealed, one tuned to 55 Hz.
    let sealed = SpeakerSystem::new(
        driver.clone(),
        Enclosure::Sealed(SealedBox { volume: 0.020 }),
        DriveConditions::default(),
        &air,
    )?;
    let ported = SpeakerSystem::new(
        driver,
        Enclosure::Ported(PortedBox {
            volume: 0.020,
            tuning_frequency: 55.0,
            port_area: 0.0030,
            port_length: None,
        }),
        DriveConditions::default(),
        &air,
    )?;
    if let Enclosure::Ported(boxed) = &ported.enclosure {
        println!(
            "Port: {:.0} cm² x {:.1} cm for {:.0} Hz tuning",
            boxed.port_area * 1e4,
            boxed.resolved_port_length(&air) * 100.0,
            boxed.tuning_frequency
        );
    }

    // 3. Sweep the bass range and tabulate.
    let config = SweepConfig {
        f_min: 20.0,
        f_max: 400.0,
        points: 25,
        parallel: true,
    };
    let sealed_points = sweep::frequency_response(&sealed, &config, &air)?;
    let ported_points = sweep::frequency_response(&ported, &config, &air)?;

    println!("\n  f / Hz   sealed SPL   ported SPL   sealed |Ze|   ported |Ze|");
    for (a, b) in sealed_points.iter().zip(&ported_points) {
        println!(
            "  {:6.1}   {:7.1} dB   {:7.1} dB   {:8.2} ohm  {:8.2} ohm",
            a.frequency,
            a.spl_db,
            b.spl_db,
            a.impedance.norm(),
            b.impedance.norm()
        );
    }

    // 4. Anything the model thinks is questionable about either box.
    for (name, system) in [("sealed", &sealed), ("ported", &ported)] {
        for advisory in diagnostics::evaluate(system, &air) {
            println!("\nadvisory ({name}): {advisory}");
        }
    }
    Ok(())
}
