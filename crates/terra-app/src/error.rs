//! Application error type.

use terra_config::ConfigError;
use terra_net::TransportError;
use terra_planet::MeshError;

/// Anything that stops the session from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build planet: {0}")]
    Mesh(#[from] MeshError),

    #[error("action transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}
