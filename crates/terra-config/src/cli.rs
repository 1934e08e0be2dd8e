//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Headless terrain sandbox.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terra", about = "Sculptable quad-sphere terrain sandbox")]
pub struct CliArgs {
    /// Planet radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Quads per cube-face edge.
    #[arg(long)]
    pub segments: Option<u32>,

    /// Brush radius.
    #[arg(long)]
    pub sculpt_radius: Option<f64>,

    /// Height change per stroke at the brush center.
    #[arg(long)]
    pub sculpt_strength: Option<f64>,

    /// Strokes per second while sculpting.
    #[arg(long)]
    pub sculpt_rate: Option<f64>,

    /// Directory for saved terrain and camera.
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Disable loading and saving terrain.
    #[arg(long)]
    pub no_persist: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Discard saved terrain and camera before starting.
    #[arg(long)]
    pub reset: bool,

    /// Number of simulated frames to run.
    #[arg(long)]
    pub frames: Option<u32>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.planet.radius = radius;
        }
        if let Some(segments) = args.segments {
            self.planet.segments = segments;
        }
        if let Some(radius) = args.sculpt_radius {
            self.sculpt.radius = radius;
        }
        if let Some(strength) = args.sculpt_strength {
            self.sculpt.strength = strength;
        }
        if let Some(rate) = args.sculpt_rate {
            self.sculpt.rate_hz = rate;
        }
        if let Some(ref dir) = args.save_dir {
            self.persistence.save_dir = Some(dir.clone());
        }
        if args.no_persist {
            self.persistence.enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            segments: Some(16),
            sculpt_strength: Some(1.0),
            no_persist: true,
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.planet.segments, 16);
        assert_eq!(config.sculpt.strength, 1.0);
        assert!(!config.persistence.enabled);
        // Non-overridden fields retain defaults
        assert_eq!(config.planet.radius, 60.0);
        assert_eq!(config.sculpt.radius, 3.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "terra",
            "--radius",
            "80",
            "--save-dir",
            "/tmp/saves",
            "--reset",
            "--frames",
            "120",
        ])
        .unwrap();
        assert_eq!(args.radius, Some(80.0));
        assert_eq!(args.save_dir, Some(PathBuf::from("/tmp/saves")));
        assert!(args.reset);
        assert_eq!(args.frames, Some(120));
        assert!(!args.no_persist);
    }
}
