//! Ballpit entry point
//!
//! Headless runner: loads a scenario (or scatters a random one), drives the
//! fixed-step loop for a number of ticks and prints the final state as JSON.
//!
//! Usage: `ballpit [scenario.json] [ticks]`

use std::process::ExitCode;

use ballpit::consts::TICK_RATE;
use ballpit::renderer::Highlights;
use ballpit::sim::{CollisionKind, Simulation};
use ballpit::{ConfigError, SimConfig};

/// Ticks to run when none are given (10 seconds at the host rate)
const DEFAULT_TICKS: u64 = 10 * TICK_RATE as u64;

/// Seed for the default scatter scenario and the highlight colors
const DEFAULT_SEED: u64 = 0x5eed;

fn load_config(path: Option<&str>) -> Result<SimConfig, ConfigError> {
    match path {
        Some(path) => SimConfig::load(path),
        None => {
            log::info!("No scenario given, scattering 10 bodies (seed {DEFAULT_SEED})");
            SimConfig::scatter(DEFAULT_SEED, 10, 20.0, 6.0, 800.0, 600.0)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let ticks = match args.get(1).map(|s| s.parse::<u64>()) {
        None => DEFAULT_TICKS,
        Some(Ok(ticks)) => ticks,
        Some(Err(e)) => {
            log::error!("Invalid tick count {:?}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut highlights = Highlights::new(DEFAULT_SEED, sim.bodies().len());

    let energy = sim.total_kinetic_energy();
    let (mut boundary_hits, mut pair_hits, mut degenerate, mut overruns) = (0, 0, 0, 0);

    for _ in 0..ticks {
        sim.update();
        for event in sim.events() {
            match event.kind {
                CollisionKind::Boundary { .. } => boundary_hits += 1,
                CollisionKind::Pair { .. } => pair_hits += 1,
                CollisionKind::Degenerate { .. } => degenerate += 1,
                CollisionKind::Overrun { .. } => overruns += 1,
            }
        }
        // A real host would upload these once per frame
        highlights.apply(sim.events());
    }

    let flashing = highlights
        .instances(&sim.snapshot())
        .iter()
        .filter(|i| i.flash > 0.0)
        .count();

    log::info!(
        "Ran {} ticks ({:.1}s at {} Hz)",
        sim.time_ticks(),
        sim.time_ticks() as f64 / TICK_RATE as f64,
        TICK_RATE
    );
    log::info!(
        "{} boundary hits, {} pair events, {} degenerate, {} overruns",
        boundary_hits,
        pair_hits,
        degenerate,
        overruns
    );
    log::info!(
        "Kinetic energy {:.6} -> {:.6}, {} bodies still flashing",
        energy,
        sim.total_kinetic_energy(),
        flashing
    );

    match serde_json::to_string_pretty(&sim.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}
