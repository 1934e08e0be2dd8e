//! Height buffer codec and save slot.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::FORMAT_VERSION;
use crate::error::PersistError;
use crate::store::KeyValueStore;

/// Storage key of the saved height field.
pub const HEIGHTS_KEY: &str = "earth-heights-v1";

/// Serialized height field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightsPayload {
    pub version: u32,
    /// Number of `f32` values in `data`.
    pub length: usize,
    /// Base64 of the little-endian `f32` bytes.
    pub data: String,
}

/// Pack heights into a payload.
pub fn encode_heights(heights: &[f32]) -> HeightsPayload {
    let bytes: Vec<u8> = heights.iter().flat_map(|h| h.to_le_bytes()).collect();
    HeightsPayload {
        version: FORMAT_VERSION,
        length: heights.len(),
        data: STANDARD.encode(bytes),
    }
}

/// Unpack a payload, checking version, encoding and declared length.
pub fn decode_heights(payload: &HeightsPayload) -> Result<Vec<f32>, PersistError> {
    if payload.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(payload.version));
    }
    let bytes = STANDARD.decode(&payload.data)?;
    if bytes.len() % 4 != 0 {
        return Err(PersistError::MisalignedData(bytes.len()));
    }
    let heights: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    if heights.len() != payload.length {
        return Err(PersistError::LengthMismatch {
            expected: payload.length,
            actual: heights.len(),
        });
    }
    Ok(heights)
}

/// Write heights to `store`. Failures are logged, never raised.
pub fn save_heights(store: &mut dyn KeyValueStore, heights: &[f32]) {
    let result = serde_json::to_string(&encode_heights(heights))
        .map_err(PersistError::from)
        .and_then(|json| store.set(HEIGHTS_KEY, &json));
    match result {
        Ok(()) => debug!(count = heights.len(), "saved heights"),
        Err(err) => warn!(%err, "failed to save heights"),
    }
}

/// Read saved heights, or `None` when absent or unreadable.
pub fn load_heights(store: &dyn KeyValueStore) -> Option<Vec<f32>> {
    let result = store.get(HEIGHTS_KEY).and_then(|raw| match raw {
        Some(json) => {
            let payload: HeightsPayload = serde_json::from_str(&json)?;
            decode_heights(&payload).map(Some)
        }
        None => Ok(None),
    });
    match result {
        Ok(heights) => heights,
        Err(err) => {
            warn!(%err, "failed to load heights");
            None
        }
    }
}

/// Forget the saved heights.
pub fn clear_saved_heights(store: &mut dyn KeyValueStore) {
    if let Err(err) = store.remove(HEIGHTS_KEY) {
        warn!(%err, "failed to clear saved heights");
    }
}
