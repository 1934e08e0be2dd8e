//! Headless driver for the sculptable planet: owns the planet, camera,
//! action layer, sky and save slots, and advances them frame by frame.

pub mod camera;
pub mod error;
pub mod limiter;
pub mod platform;
pub mod script;
pub mod session;

pub use camera::OrbitCamera;
pub use error::AppError;
pub use limiter::SculptLimiter;
pub use platform::PlatformDirs;
pub use script::{ScriptStep, ScriptSummary, StepKind, default_script, run_script};
pub use session::{FrameReport, Session};
