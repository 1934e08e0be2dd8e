//! One running sandbox: planet, camera, action layer, sky and saves.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use glam::{DVec2, DVec3};
use terra_config::Config;
use terra_net::{Action, ActionLayer, LocalLoopbackTransport, SculptAction};
use terra_persist::{
    CameraState, Debouncer, KeyValueStore, load_camera, load_heights, save_camera, save_heights,
};
use terra_planet::{
    DisplacedIntersection, HeightRange, Planet, PlanetParams, SculptDirection, SculptSettings,
};
use terra_space::{CelestialSystem, Starfield, StarfieldParams};
use tracing::{debug, info, warn};

use crate::camera::OrbitCamera;
use crate::error::AppError;
use crate::limiter::SculptLimiter;

/// What happened during one [`Session::frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Surface under the pointer.
    pub hit: Option<DisplacedIntersection>,
    /// Height of `hit` above the base sphere.
    pub altitude: Option<f64>,
    /// Whether `hit` lies below the water level.
    pub underwater: bool,
    /// A sculpt action was sent this frame.
    pub dispatched: bool,
    /// Actions applied to the planet this frame.
    pub applied: usize,
    pub saved_heights: bool,
    pub saved_camera: bool,
}

/// The sandbox state, advanced by [`frame`](Self::frame).
pub struct Session {
    planet: Planet,
    actions: ActionLayer<LocalLoopbackTransport>,
    sky: CelestialSystem,
    starfield: Starfield,
    camera: OrbitCamera,
    limiter: SculptLimiter,
    pointer: DVec2,
    gesture: Option<SculptDirection>,
    store: Option<Box<dyn KeyValueStore>>,
    heights_save: Debouncer,
    camera_save: Debouncer,
    heights_dirty: Rc<Cell<bool>>,
    camera_dirty: bool,
    water_level: f64,
}

impl Session {
    /// Build the planet from `config` and restore saved state from `store`.
    ///
    /// Saved heights are only applied when their count matches the planet.
    pub fn new(config: &Config, store: Option<Box<dyn KeyValueStore>>) -> Result<Self, AppError> {
        config.validate()?;
        let params = PlanetParams {
            radius: config.planet.radius,
            segments: config.planet.segments,
            range: HeightRange::new(config.planet.min_height, config.planet.max_height),
            sculpt: SculptSettings {
                radius: config.sculpt.radius,
                strength: config.sculpt.strength,
            },
        };
        let mut planet = Planet::new(params)?;
        let mut camera = OrbitCamera::default();

        if let Some(store) = store.as_deref() {
            restore(store, &mut planet, &mut camera);
        }

        // Registered after restoring so loading does not schedule a save.
        let heights_dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&heights_dirty);
        planet.on_heights_changed(move || flag.set(true));

        let actions = ActionLayer::new(LocalLoopbackTransport::new(), None)?;
        let starfield = Starfield::generate(&StarfieldParams::default());
        info!(
            client_id = actions.client_id(),
            stars = starfield.stars.len(),
            "session started"
        );

        Ok(Self {
            planet,
            actions,
            sky: CelestialSystem::new(),
            starfield,
            camera,
            limiter: SculptLimiter::new(config.sculpt.rate_hz),
            pointer: DVec2::ZERO,
            gesture: None,
            store,
            heights_save: Debouncer::new(Duration::from_millis(
                config.persistence.heights_debounce_ms,
            )),
            camera_save: Debouncer::new(Duration::from_millis(
                config.persistence.camera_debounce_ms,
            )),
            heights_dirty,
            camera_dirty: false,
            water_level: config.planet.water_level as f64,
        })
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn sky(&self) -> &CelestialSystem {
        &self.sky
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn client_id(&self) -> &str {
        self.actions.client_id()
    }

    pub fn is_sculpting(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a sculpt gesture at `ndc`. A stroke is sent straight away when
    /// the pointer is over the planet; either way the stroke clock restarts.
    pub fn press(&mut self, ndc: DVec2, direction: SculptDirection, time: f64) {
        self.pointer = ndc;
        self.gesture = Some(direction);
        if let Some(hit) = self.pick() {
            self.dispatch(direction, hit.point);
        }
        self.limiter.mark(time);
    }

    pub fn move_pointer(&mut self, ndc: DVec2) {
        self.pointer = ndc;
    }

    /// End the current sculpt gesture.
    pub fn release(&mut self) {
        self.gesture = None;
    }

    pub fn orbit_camera(&mut self, yaw: f64, pitch: f64) {
        self.camera.orbit(yaw, pitch);
        self.camera_dirty = true;
    }

    pub fn zoom_camera(&mut self, factor: f64) {
        self.camera.zoom(factor);
        self.camera_dirty = true;
    }

    /// Advance one frame. `time` is seconds since the session started and
    /// `dt` the time since the previous frame.
    pub fn frame(&mut self, time: f64, dt: f64) -> FrameReport {
        let mut report = FrameReport::default();

        let hit = self.pick();
        if let Some(hit) = hit {
            let altitude = self.altitude(hit.point);
            report.altitude = Some(altitude);
            report.underwater = altitude < self.water_level;
        }
        report.hit = hit;

        if let (Some(direction), Some(hit)) = (self.gesture, hit)
            && self.limiter.ready(time)
        {
            report.dispatched = self.dispatch(direction, hit.point);
            self.limiter.mark(time);
        }

        report.applied = self.actions.pump(&mut self.planet);
        self.sky.update(dt);

        let now = Duration::try_from_secs_f64(time).unwrap_or_default();
        if self.heights_dirty.replace(false) {
            self.heights_save.schedule(now);
        }
        if std::mem::take(&mut self.camera_dirty) {
            self.camera_save.schedule(now);
        }
        if self.heights_save.fire(now) {
            report.saved_heights = self.save_heights();
        }
        if self.camera_save.fire(now) {
            report.saved_camera = self.save_camera();
        }
        report
    }

    /// Write heights and camera immediately, cancelling pending saves.
    pub fn flush(&mut self) {
        self.heights_save.cancel();
        self.camera_save.cancel();
        self.save_heights();
        self.save_camera();
    }

    /// Disconnect the action layer and flush saves.
    pub fn shutdown(&mut self) {
        self.release();
        self.actions.shutdown();
        self.flush();
        debug!("session shut down");
    }

    fn pick(&self) -> Option<DisplacedIntersection> {
        self.planet.intersect(&self.camera.ray_through(self.pointer))
    }

    fn altitude(&self, world_point: DVec3) -> f64 {
        let local = self.planet.transform().inverse().transform_point3(world_point);
        local.length() - self.planet.mesh().radius()
    }

    fn dispatch(&mut self, direction: SculptDirection, point: DVec3) -> bool {
        let action = Action::Sculpt(SculptAction::new(direction, point));
        match self.actions.dispatch_local(action) {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "failed to dispatch sculpt");
                false
            }
        }
    }

    fn save_heights(&mut self) -> bool {
        let Some(store) = self.store.as_deref_mut() else {
            return false;
        };
        save_heights(store, self.planet.heights());
        true
    }

    fn save_camera(&mut self) -> bool {
        let Some(store) = self.store.as_deref_mut() else {
            return false;
        };
        let state = CameraState::new(
            self.camera.position.to_array(),
            self.camera.target.to_array(),
        );
        save_camera(store, &state);
        true
    }
}

fn restore(store: &dyn KeyValueStore, planet: &mut Planet, camera: &mut OrbitCamera) {
    if let Some(saved) = load_heights(store) {
        if saved.len() == planet.heights().len() {
            planet.set_heights(&saved);
            info!(count = saved.len(), "restored saved terrain");
        } else {
            warn!(
                saved = saved.len(),
                expected = planet.heights().len(),
                "ignoring saved terrain for a different mesh"
            );
        }
    }
    if let Some(state) = load_camera(store) {
        camera.position = DVec3::from_array(state.position);
        camera.target = DVec3::from_array(state.target);
        debug!(position = ?camera.position, "restored camera");
    }
}
