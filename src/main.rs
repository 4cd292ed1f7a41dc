//! Infection Arena entry point
//!
//! Usage: `infection-arena [duel|skirmish|melee|settings.json]`

use std::path::Path;
use std::process::ExitCode;

use infection_arena::renderer;
use infection_arena::sim::{CancelToken, EngineConfig, SimulationEngine, initializer_for};
use infection_arena::{Preset, Result, Settings};

fn load_settings(arg: Option<String>) -> Result<Settings> {
    let settings = match arg {
        None => Settings::default(),
        Some(arg) => match Preset::from_str(&arg) {
            Some(preset) => Settings::from_preset(preset),
            None => Settings::load(Path::new(&arg))?,
        },
    };
    settings.validate()?;
    Ok(settings)
}

fn run(arg: Option<String>) -> Result<()> {
    let settings = load_settings(arg)?;
    log::info!(
        "Infection Arena starting: {} preset, {} particles, {} players",
        settings.preset.as_str(),
        settings.particle_count,
        settings.players
    );

    let particles = initializer_for(&settings).populate(&settings)?;
    let mut engine = SimulationEngine::new(particles, EngineConfig::from_settings(&settings))?;
    let mut out = renderer::from_settings(&settings);

    engine.run(&mut out, &CancelToken::new())?;

    let census = engine.census();
    match census.leader(settings.neutral_color) {
        Some((color, count)) if settings.players > 0 => {
            log::info!("Leader: {} with {} particles", color, count)
        }
        _ => log::info!("Finished at t={:.3}", engine.time()),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
