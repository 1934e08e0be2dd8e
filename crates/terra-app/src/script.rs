//! Scripted input for headless runs.

use glam::DVec2;
use terra_planet::SculptDirection;
use tracing::debug;

use crate::session::Session;

/// One input held over a range of frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepKind {
    /// Hold a sculpt gesture, dragging the pointer from `from` to `to`.
    Sculpt {
        from: DVec2,
        to: DVec2,
        direction: SculptDirection,
    },
    /// Orbit the camera by this much per frame.
    Orbit { yaw: f64, pitch: f64 },
    /// Scale the camera distance once at the start of the step.
    Zoom { factor: f64 },
}

/// An input active on frames `start..end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptStep {
    pub start: u32,
    pub end: u32,
    pub kind: StepKind,
}

/// Totals gathered while running a script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub frames: u32,
    pub strokes: usize,
    pub applied: usize,
    pub height_saves: usize,
    pub camera_saves: usize,
    pub underwater_frames: usize,
}

/// Raise a ridge, look around, then carve a trench.
pub fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep {
            start: 10,
            end: 70,
            kind: StepKind::Sculpt {
                from: DVec2::new(-0.2, 0.0),
                to: DVec2::new(0.2, 0.1),
                direction: SculptDirection::Raise,
            },
        },
        ScriptStep {
            start: 80,
            end: 140,
            kind: StepKind::Orbit {
                yaw: 0.01,
                pitch: 0.002,
            },
        },
        ScriptStep {
            start: 140,
            end: 141,
            kind: StepKind::Zoom { factor: 0.9 },
        },
        ScriptStep {
            start: 150,
            end: 210,
            kind: StepKind::Sculpt {
                from: DVec2::new(0.0, -0.2),
                to: DVec2::new(0.05, 0.2),
                direction: SculptDirection::Lower,
            },
        },
    ]
}

/// Drive `session` for `frames` frames of `dt` seconds each.
pub fn run_script(session: &mut Session, steps: &[ScriptStep], frames: u32, dt: f64) -> ScriptSummary {
    let mut summary = ScriptSummary {
        frames,
        ..ScriptSummary::default()
    };

    for frame in 0..frames {
        let time = frame as f64 * dt;
        for step in steps {
            apply_step(session, step, frame, time);
        }

        let report = session.frame(time, dt);
        summary.strokes += report.dispatched as usize;
        summary.applied += report.applied;
        summary.height_saves += report.saved_heights as usize;
        summary.camera_saves += report.saved_camera as usize;
        summary.underwater_frames += report.underwater as usize;
    }

    debug!(?summary, "script finished");
    summary
}

fn apply_step(session: &mut Session, step: &ScriptStep, frame: u32, time: f64) {
    if frame < step.start || frame > step.end {
        return;
    }
    match step.kind {
        StepKind::Sculpt { from, to, direction } => {
            let span = step.end.saturating_sub(step.start).max(1) as f64;
            let t = (frame - step.start) as f64 / span;
            let ndc = from.lerp(to, t);
            if frame == step.start {
                session.press(ndc, direction, time);
            } else if frame == step.end {
                session.release();
            } else {
                session.move_pointer(ndc);
            }
        }
        StepKind::Orbit { yaw, pitch } => {
            if frame < step.end {
                session.orbit_camera(yaw, pitch);
            }
        }
        StepKind::Zoom { factor } => {
            if frame == step.start {
                session.zoom_camera(factor);
            }
        }
    }
}
