//! `terra`: run the sculpting sandbox headless with a scripted gesture.

use std::process::ExitCode;

use clap::Parser;
use terra_app::script::ScriptSummary;
use terra_app::{AppError, PlatformDirs, Session, default_script, run_script};
use terra_config::{CliArgs, Config};
use terra_persist::{DirStore, KeyValueStore, clear_saved_camera, clear_saved_heights};
use tracing::{error, info};

const DEFAULT_FRAMES: u32 = 240;
const FRAME_DT: f64 = 1.0 / 60.0;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve() {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve platform directories: {e}");
            return ExitCode::FAILURE;
        }
    };
    let dirs = match args.config.clone() {
        Some(config_dir) => dirs.with_config_dir(config_dir),
        None => dirs,
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create sandbox directories: {e}");
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    terra_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match run(&args, &config, &dirs) {
        Ok(summary) => {
            info!(
                frames = summary.frames,
                strokes = summary.strokes,
                applied = summary.applied,
                height_saves = summary.height_saves,
                camera_saves = summary.camera_saves,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "terra failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs, config: &Config, dirs: &PlatformDirs) -> Result<ScriptSummary, AppError> {
    let store: Option<Box<dyn KeyValueStore>> = if config.persistence.enabled {
        let save_dir = config
            .persistence
            .save_dir
            .clone()
            .unwrap_or_else(|| dirs.data_dir.clone());
        let mut store = DirStore::new(save_dir);
        if args.reset {
            clear_saved_heights(&mut store);
            clear_saved_camera(&mut store);
            info!(dir = %store.dir().display(), "cleared saved state");
        }
        Some(Box::new(store))
    } else {
        None
    };

    let mut session = Session::new(config, store)?;
    let frames = args.frames.unwrap_or(DEFAULT_FRAMES);
    let summary = run_script(&mut session, &default_script(), frames, FRAME_DT);
    session.shutdown();
    Ok(summary)
}
