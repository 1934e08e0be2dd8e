//! Saving and restoring sculpted terrain and the camera pose.
//!
//! Heights are stored as a small JSON wrapper around the base64 encoding of
//! the raw little-endian `f32` buffer. Everything goes through a
//! [`KeyValueStore`], so the same code targets a directory on disk or an
//! in-memory map.

mod camera;
mod debounce;
mod error;
mod heights;
mod store;

pub use camera::{CAMERA_KEY, CameraState, clear_saved_camera, load_camera, save_camera};
pub use debounce::Debouncer;
pub use error::PersistError;
pub use heights::{
    HEIGHTS_KEY, HeightsPayload, clear_saved_heights, decode_heights, encode_heights,
    load_heights, save_heights,
};
pub use store::{DirStore, KeyValueStore, MemoryStore};

/// Format version written into every payload.
pub const FORMAT_VERSION: u32 = 1;
