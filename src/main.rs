//! Quasar Pro headless driver
//!
//! Runs the ship physics with a seeded autopilot and logs the energy budget.
//!
//! Usage: `quasar-pro [ticks] [seed] [settings.json]`

use std::path::PathBuf;
use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use quasar_pro::consts::BASE_HULL_POINTS;
use quasar_pro::persistence::ShipStore;
use quasar_pro::persistence::ship_store::DEFAULT_ID_PREFIX;
use quasar_pro::ships::ShipModel;
use quasar_pro::sim::{ShipBody, ThrustCommand, advance, golden_value, hub_position, hub_ring_scale};
use quasar_pro::{Settings, SimError, StoreError};

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_SEED: u64 = 12345;
const DEFAULT_SETTINGS: &str = "quasar_settings.json";
/// Golden hubs sampled at startup
const HUB_COUNT: u32 = 5;

#[derive(Error, Debug)]
enum RunError {
    #[error("Simulation failed: {0}")]
    Sim(#[from] SimError),

    #[error("Configuration failed: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Usage(String),
}

fn parse_arg(arg: Option<String>, default: u64, what: &str) -> Result<u64, RunError> {
    match arg {
        Some(s) => s
            .parse()
            .map_err(|_| RunError::Usage(format!("{what} must be an integer, got '{s}'"))),
        None => Ok(default),
    }
}

fn run() -> Result<(), RunError> {
    let mut args = std::env::args().skip(1);
    let ticks = parse_arg(args.next(), DEFAULT_TICKS, "ticks")?;
    let seed = parse_arg(args.next(), DEFAULT_SEED, "seed")?;
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS));

    let settings = Settings::load_or_default(&settings_path)?;

    let mut hangar = ShipStore::new();
    hangar.seed_defaults();
    let config = hangar
        .get(&format!("{DEFAULT_ID_PREFIX}{}", ShipModel::Interceptor))
        .cloned()
        .unwrap_or_else(|| ShipModel::Interceptor.base_config());
    let thrust = config.effective_thrust(&settings.calibration);
    log::info!(
        "Flying {} (thrust {thrust}, hull {}, friction {})",
        config.model.display_name(),
        config.max_health(BASE_HULL_POINTS),
        settings.physics.friction.value()
    );

    for n in 0..HUB_COUNT {
        let n = f64::from(n);
        let pos = hub_position(n, settings.physics.world_size)?;
        log::info!(
            "Hub {n}: O_n={:+.6} at ({:.1}, {:.1}) ring x{:.3}",
            golden_value(n)?,
            pos.x,
            pos.y,
            hub_ring_scale(n)?
        );
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut ship = ShipBody::spawn(settings.physics.world_size);
    let mut symplectic_total = 0.0;
    let mut metric_total = 0.0;
    let mut dissipative_ticks = 0u64;

    for _ in 0..ticks {
        let input = ThrustCommand {
            forward: rng.random_bool(0.6),
            reverse: rng.random_bool(0.1),
            turn_left: rng.random_bool(0.2),
            turn_right: rng.random_bool(0.2),
        };
        // Stand-in for the collision system
        if rng.random_range(0..200) == 0 {
            ship.hit.strike(settings.physics.hit_timer_ticks);
            log::debug!("Hit at tick {}", ship.time_ticks);
        }

        let record = advance(&mut ship, &input, thrust, &settings)?;
        symplectic_total += record.symplectic;
        metric_total += record.metric;
        if !record.is_conservative() {
            dissipative_ticks += 1;
        }
    }

    log::info!(
        "After {} ticks: pos=({:.1}, {:.1}) speed={:.3}",
        ship.time_ticks,
        ship.position.x,
        ship.position.y,
        ship.speed()
    );
    log::info!(
        "Energy: symplectic={symplectic_total:.3} metric={metric_total:.3} ({dissipative_ticks} dissipative ticks)"
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            if matches!(e, RunError::Usage(_)) {
                eprintln!("usage: quasar-pro [ticks] [seed] [settings.json]");
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
