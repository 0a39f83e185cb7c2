//! Berek entry point
//!
//! Headless driver: runs the simulation against a jittery synthetic frame
//! clock with a scripted input timeline, then prints the last frame.
//!
//! Usage: `berek [config.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use berek::Config;
use berek::platform::{Bindings, InputState, Key};
use berek::renderer::AsciiRenderer;
use berek::sim::{Level, Simulation};

/// Seed for frame-time jitter
const JITTER_SEED: u64 = 0x6265_7265;
/// Nominal display refresh interval (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Frame time noise (ms either way)
const JITTER_MS: f64 = 6.0;
/// Length of the run (ms)
const RUN_MS: f64 = 4000.0;

/// (start ms, end ms, key) - key held for the window
const SCRIPT: &[(f64, f64, Key)] = &[
    (200.0, 1400.0, Key::LeftArrow),
    (900.0, 1150.0, Key::UpArrow),
    (500.0, 2200.0, Key::D),
    (1800.0, 2000.0, Key::W),
    (2600.0, 3000.0, Key::RightArrow),
];

fn main() {
    env_logger::init();
    log::info!("Berek (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), berek::ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut sim = Simulation::new(&config, Level::default_level())?;
    let mut input = InputState::new(Bindings::from_table(&config.bindings)?);
    let mut renderer = AsciiRenderer::new();
    let mut rng = Pcg32::seed_from_u64(JITTER_SEED);

    let mut now = 0.0;
    let mut next_report = 1000.0;
    sim.resume(now);

    while now < RUN_MS {
        now += (FRAME_MS + rng.random_range(-JITTER_MS..JITTER_MS)).max(0.0);
        apply_script(&mut input, now);
        sim.frame(now, &input, &mut renderer);

        if now >= next_report {
            next_report += 1000.0;
            let stats = sim.stats();
            for entity in sim.entities() {
                log::info!(
                    "t={:.0}ms {} pos=({:.1}, {:.1}) airborne={}",
                    now,
                    entity.player(),
                    entity.position.x,
                    entity.position.y,
                    entity.airborne
                );
            }
            log::info!(
                "ticks={} fps={:.1} acc={:.2}ms",
                stats.total_ticks,
                stats.fps,
                stats.accumulator_ms
            );
        }
    }

    // Let go of everything and show where the bodies settle
    input.release_all();
    let settled = sim.frame(now + FRAME_MS, &input, &mut renderer);
    log::debug!("Final frame ran {settled} ticks with no input");

    println!("{}", renderer.last_frame());
    println!(
        "{} frames, {} ticks",
        renderer.frames(),
        sim.stats().total_ticks
    );
    Ok(())
}

/// Press or release scripted keys for this instant
fn apply_script(input: &mut InputState, now: f64) {
    for &(start, end, key) in SCRIPT {
        if (start..end).contains(&now) {
            input.key_down(key.code());
        } else {
            input.key_up(key.code());
        }
    }
}
