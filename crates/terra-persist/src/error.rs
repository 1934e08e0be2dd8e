//! Persistence error types.

/// Errors raised while encoding, decoding or storing saved state.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Failed to read a stored value.
    #[error("failed to read {key}: {source}")]
    ReadError {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write or remove a stored value.
    #[error("failed to write {key}: {source}")]
    WriteError {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot name a stored entry.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// Stored text is not valid JSON for the expected shape.
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Height data is not valid base64.
    #[error("malformed height data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Payload was written by an unknown format version.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),

    /// Decoded byte count is not a whole number of `f32` values.
    #[error("height data is {0} bytes, not a multiple of 4")]
    MisalignedData(usize),

    /// Decoded value count disagrees with the declared length.
    #[error("payload declares {expected} heights but holds {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
