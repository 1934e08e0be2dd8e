//! Client-side action dispatch.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use terra_planet::Planet;
use tracing::{debug, warn};

use crate::actions::{Action, ActionEnvelope, apply_action};
use crate::transport::{ActionTransport, LocalLoopbackTransport, TransportError};

const CLIENT_ID_LEN: usize = 10;
const CLIENT_ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Random lowercase alphanumeric client id.
pub fn generate_client_id() -> String {
    let mut rng = rand::rng();
    (0..CLIENT_ID_LEN)
        .map(|_| CLIENT_ID_CHARS[rng.random_range(0..CLIENT_ID_CHARS.len())] as char)
        .collect()
}

/// Stamps local actions, sends them, and applies whatever the transport
/// delivers back.
#[derive(Debug)]
pub struct ActionLayer<T: ActionTransport = LocalLoopbackTransport> {
    transport: T,
    client_id: String,
    seq: u64,
}

impl<T: ActionTransport> ActionLayer<T> {
    /// Connect `transport` and identify as `client_id`, or a random id.
    pub fn new(mut transport: T, client_id: Option<String>) -> Result<Self, TransportError> {
        transport.connect()?;
        let client_id = client_id.unwrap_or_else(generate_client_id);
        debug!(%client_id, "action layer connected");
        Ok(Self {
            transport,
            client_id,
            seq: 0,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Wrap `action` in the next envelope and send it. Returns the envelope id.
    pub fn dispatch_local(&mut self, action: Action) -> Result<String, TransportError> {
        let envelope = self.wrap(action);
        let id = envelope.id.clone();
        self.transport.send(envelope)?;
        Ok(id)
    }

    /// Apply every delivered envelope to `planet`, in arrival order. Returns
    /// the number of envelopes applied.
    pub fn pump(&mut self, planet: &mut Planet) -> usize {
        let envelopes = self.transport.poll();
        for envelope in &envelopes {
            if !apply_action(planet, &envelope.action) {
                debug!(id = %envelope.id, "action left terrain unchanged");
            }
        }
        envelopes.len()
    }

    /// Disconnect the transport. Later dispatches fail.
    pub fn shutdown(&mut self) {
        self.transport.disconnect();
    }

    fn wrap(&mut self, action: Action) -> ActionEnvelope {
        self.seq += 1;
        let time_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_else(|err| {
                warn!(%err, "system clock before epoch");
                0
            });
        ActionEnvelope {
            id: format!("{}:{}", self.client_id, self.seq),
            client_id: self.client_id.clone(),
            time_ms,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::SculptAction;
    use glam::DVec3;
    use terra_planet::{PlanetParams, SculptDirection};

    fn raise_at(point: DVec3) -> Action {
        Action::Sculpt(SculptAction::new(SculptDirection::Raise, point))
    }

    fn flat_planet() -> Planet {
        let mut planet = Planet::new(PlanetParams {
            segments: 16,
            ..PlanetParams::default()
        })
        .unwrap();
        let zeros = vec![0.0; planet.heights().len()];
        planet.set_heights(&zeros);
        planet
    }

    #[test]
    fn test_generated_client_id_shape() {
        let id = generate_client_id();
        assert_eq!(id.len(), 10);
        assert!(id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_envelope_ids_are_sequential() {
        let mut layer =
            ActionLayer::new(LocalLoopbackTransport::new(), Some("me".to_string())).unwrap();
        let first = layer.dispatch_local(raise_at(DVec3::Z)).unwrap();
        let second = layer.dispatch_local(raise_at(DVec3::Z)).unwrap();
        assert_eq!(first, "me:1");
        assert_eq!(second, "me:2");
        assert_eq!(layer.client_id(), "me");
    }

    #[test]
    fn test_dispatch_then_pump_applies_once() {
        let mut planet = flat_planet();
        let mut layer = ActionLayer::new(LocalLoopbackTransport::new(), None).unwrap();
        layer
            .dispatch_local(raise_at(DVec3::new(0.0, 0.0, 60.0)))
            .unwrap();

        assert!(planet.heights().iter().all(|&h| h == 0.0));

        assert_eq!(layer.pump(&mut planet), 1);
        let peak = planet.heights().iter().cloned().fold(f32::MIN, f32::max);
        assert!((peak - 0.25).abs() < 1e-6);
        assert_eq!(layer.pump(&mut planet), 0);
    }

    #[test]
    fn test_pump_applies_in_dispatch_order() {
        let mut planet = flat_planet();
        let mut layer = ActionLayer::new(LocalLoopbackTransport::new(), None).unwrap();
        let point = DVec3::new(0.0, 60.0, 0.0);
        layer.dispatch_local(raise_at(point)).unwrap();
        layer
            .dispatch_local(Action::Sculpt(SculptAction::new(SculptDirection::Lower, point)))
            .unwrap();
        assert_eq!(layer.pump(&mut planet), 2);
        assert!(planet.heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_shutdown_stops_delivery() {
        let mut planet = flat_planet();
        let mut layer = ActionLayer::new(LocalLoopbackTransport::new(), None).unwrap();
        layer.dispatch_local(raise_at(DVec3::X * 60.0)).unwrap();
        layer.shutdown();
        assert_eq!(layer.pump(&mut planet), 0);
        assert!(layer.dispatch_local(raise_at(DVec3::X * 60.0)).is_err());
        assert!(planet.heights().iter().all(|&h| h == 0.0));
    }
}
