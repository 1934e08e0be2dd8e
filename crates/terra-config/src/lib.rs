//! Runtime settings for the terrain sandbox.
//!
//! Settings persist to disk as a RON file, tolerate missing and unknown
//! fields, and can be overridden from the command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, Config, DebugConfig, PersistenceConfig, PlanetConfig, SculptConfig,
    default_config_dir,
};
pub use error::ConfigError;
