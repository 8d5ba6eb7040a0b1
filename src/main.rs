//! Space Dodger headless driver
//!
//! Runs the autopilot for a fixed number of frames and logs each finished run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use space_dodger::sim::{Craft, GameEvent};
use space_dodger::{
    BestRecords, JsonFileStore, QualityPreset, ScoreStore, Session, Settings, Tuning, format_km,
};

#[derive(Parser, Debug)]
#[command(name = "space-dodger")]
#[command(about = "Headless autopilot run of Space Dodger")]
struct Args {
    /// Frames to simulate (60 per second)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Balance overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Player preferences (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Best-records file; kept in memory when absent
    #[arg(long)]
    store: Option<PathBuf>,
    /// Overrides the quality preset from the settings file
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality '{s}' (low, medium, high)"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    let store: Box<dyn ScoreStore> = match &args.store {
        Some(path) => {
            let store = JsonFileStore::open(path);
            log::info!("Best records kept in {}", store.path().display());
            Box::new(store)
        }
        None => Box::new(BestRecords::default()),
    };

    log::info!("Space Dodger (headless) starting, {} ticks", args.ticks);
    let mut session = Session::new(args.seed, tuning, settings, store);
    for craft in Craft::ALL {
        session.craft_loaded(craft, true);
    }

    let mut runs = 0;
    for _ in 0..args.ticks {
        let frame = session.tick_autopilot();
        for event in &frame.events {
            if let GameEvent::GameOver(summary) = event {
                runs += 1;
                log::info!(
                    "Run {}: score {}, {}, {} destroyed, level {}",
                    runs,
                    summary.score,
                    format_km(summary.distance),
                    summary.destroyed,
                    summary.level
                );
            }
        }
    }

    let hud = session.hud();
    log::info!(
        "Finished in {:?}: {} runs, current score {}, {}, best {}",
        session.state().phase,
        runs,
        hud.score,
        hud.distance,
        session.best().display()
    );
    ExitCode::SUCCESS
}
