//! Errors from reading, writing and checking `config.ron`.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read sandbox config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("could not write sandbox config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file exists but is not valid RON for [`Config`](crate::Config).
    #[error("malformed sandbox config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("could not serialize sandbox config: {0}")]
    SerializeError(#[source] ron::Error),

    /// Values parsed but describe an unusable planet or brush.
    #[error("invalid config: {0}")]
    Invalid(String),
}
