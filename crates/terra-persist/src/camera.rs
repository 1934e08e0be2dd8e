//! Camera pose save slot.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::FORMAT_VERSION;
use crate::error::PersistError;
use crate::store::KeyValueStore;

/// Storage key of the saved camera pose.
pub const CAMERA_KEY: &str = "camera-state-v1";

/// Camera position and orbit target in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub version: u32,
    pub position: [f64; 3],
    pub target: [f64; 3],
}

impl CameraState {
    pub fn new(position: [f64; 3], target: [f64; 3]) -> Self {
        Self {
            version: FORMAT_VERSION,
            position,
            target,
        }
    }
}

/// Write the camera pose. Failures are logged, never raised.
pub fn save_camera(store: &mut dyn KeyValueStore, state: &CameraState) {
    let result = serde_json::to_string(state)
        .map_err(PersistError::from)
        .and_then(|json| store.set(CAMERA_KEY, &json));
    match result {
        Ok(()) => debug!(position = ?state.position, "saved camera"),
        Err(err) => warn!(%err, "failed to save camera"),
    }
}

/// Read the saved camera pose. Unknown versions and unreadable entries are
/// treated as absent.
pub fn load_camera(store: &dyn KeyValueStore) -> Option<CameraState> {
    let raw = match store.get(CAMERA_KEY) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(%err, "failed to load camera");
            return None;
        }
    };
    match serde_json::from_str::<CameraState>(&raw) {
        Ok(state) if state.version == FORMAT_VERSION => Some(state),
        Ok(state) => {
            warn!(version = state.version, "ignoring saved camera");
            None
        }
        Err(err) => {
            warn!(%err, "failed to load camera");
            None
        }
    }
}

/// Forget the saved camera pose.
pub fn clear_saved_camera(store: &mut dyn KeyValueStore) {
    if let Err(err) = store.remove(CAMERA_KEY) {
        warn!(%err, "failed to clear saved camera");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DirStore, MemoryStore};

    #[test]
    fn test_camera_round_trip() {
        let mut store = MemoryStore::new();
        let state = CameraState::new([0.0, 40.0, 160.0], [0.0, 0.0, 0.0]);
        save_camera(&mut store, &state);
        assert_eq!(load_camera(&store), Some(state));
        clear_saved_camera(&mut store);
        assert_eq!(load_camera(&store), None);
    }

    #[test]
    fn test_wrong_version_is_ignored() {
        let mut store = MemoryStore::new();
        store
            .set(
                CAMERA_KEY,
                r#"{"version":2,"position":[1,2,3],"target":[0,0,0]}"#,
            )
            .unwrap();
        assert_eq!(load_camera(&store), None);
    }

    #[test]
    fn test_missing_fields_are_ignored() {
        let mut store = MemoryStore::new();
        store.set(CAMERA_KEY, r#"{"version":1}"#).unwrap();
        assert_eq!(load_camera(&store), None);
    }

    #[test]
    fn test_camera_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::new(dir.path());
        let state = CameraState::new([1.5, -2.0, 90.0], [0.0, 1.0, 0.0]);
        save_camera(&mut store, &state);
        let reopened = DirStore::new(dir.path());
        assert_eq!(load_camera(&reopened), Some(state));
    }
}
