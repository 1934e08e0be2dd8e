//! Action messages and their effect on the planet.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use terra_planet::{Planet, SculptDirection};

use crate::transport::TransportError;

/// Wire form of a sculpt direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionDirection {
    Up,
    Down,
}

impl From<ActionDirection> for SculptDirection {
    fn from(direction: ActionDirection) -> Self {
        match direction {
            ActionDirection::Up => SculptDirection::Raise,
            ActionDirection::Down => SculptDirection::Lower,
        }
    }
}

impl From<SculptDirection> for ActionDirection {
    fn from(direction: SculptDirection) -> Self {
        match direction {
            SculptDirection::Raise => ActionDirection::Up,
            SculptDirection::Lower => ActionDirection::Down,
        }
    }
}

/// One brush stroke at a world-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SculptAction {
    pub direction: ActionDirection,
    pub position: [f64; 3],
}

impl SculptAction {
    pub fn new(direction: SculptDirection, position: DVec3) -> Self {
        Self {
            direction: direction.into(),
            position: position.to_array(),
        }
    }
}

/// Every edit a client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Sculpt(SculptAction),
}

/// An action stamped with its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEnvelope {
    /// `<client_id>:<sequence>`, unique per client.
    pub id: String,
    pub client_id: String,
    /// Wall-clock send time in milliseconds since the Unix epoch.
    #[serde(rename = "time")]
    pub time_ms: u64,
    pub action: Action,
}

impl ActionEnvelope {
    pub fn to_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Apply `action` to `planet`. Returns whether any height changed.
pub fn apply_action(planet: &mut Planet, action: &Action) -> bool {
    match action {
        Action::Sculpt(sculpt) => planet.sculpt_at(
            DVec3::from_array(sculpt.position),
            sculpt.direction.into(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_planet::PlanetParams;

    fn envelope() -> ActionEnvelope {
        ActionEnvelope {
            id: "abc:1".to_string(),
            client_id: "abc".to_string(),
            time_ms: 1_700_000_000_000,
            action: Action::Sculpt(SculptAction {
                direction: ActionDirection::Down,
                position: [1.0, 2.0, 60.0],
            }),
        }
    }

    #[test]
    fn test_wire_format() {
        let json: serde_json::Value = serde_json::from_str(&envelope().to_json().unwrap()).unwrap();
        assert_eq!(json["id"], "abc:1");
        assert_eq!(json["clientId"], "abc");
        assert_eq!(json["time"], 1_700_000_000_000u64);
        assert_eq!(json["action"]["type"], "sculpt");
        assert_eq!(json["action"]["direction"], "down");
        assert_eq!(json["action"]["position"][2], 60.0);
    }

    #[test]
    fn test_json_round_trip() {
        let env = envelope();
        let back = ActionEnvelope::from_json(&env.to_json().unwrap()).unwrap();
        assert_eq!(back, env);
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let json = r#"{"id":"a:1","clientId":"a","time":0,"action":{"type":"paint"}}"#;
        assert!(matches!(
            ActionEnvelope::from_json(json),
            Err(TransportError::Codec(_))
        ));
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(SculptDirection::from(ActionDirection::Up), SculptDirection::Raise);
        assert_eq!(SculptDirection::from(ActionDirection::Down), SculptDirection::Lower);
        assert_eq!(ActionDirection::from(SculptDirection::Lower), ActionDirection::Down);
    }

    #[test]
    fn test_apply_action_sculpts_planet() {
        let mut planet = Planet::new(PlanetParams {
            segments: 16,
            ..PlanetParams::default()
        })
        .unwrap();
        let flat = vec![0.0; planet.heights().len()];
        planet.set_heights(&flat);
        let before = planet.heights().to_vec();
        let action = Action::Sculpt(SculptAction::new(
            SculptDirection::Lower,
            DVec3::new(0.0, 0.0, 60.0),
        ));
        assert!(apply_action(&mut planet, &action));
        let lowered = planet
            .heights()
            .iter()
            .zip(&before)
            .filter(|(after, before)| after < before)
            .count();
        assert!(lowered > 0);
    }

    #[test]
    fn test_apply_action_ignores_non_finite_position() {
        let mut planet = Planet::new(PlanetParams {
            segments: 4,
            ..PlanetParams::default()
        })
        .unwrap();
        let action = Action::Sculpt(SculptAction {
            direction: ActionDirection::Up,
            position: [f64::NAN, 0.0, 0.0],
        });
        assert!(!apply_action(&mut planet, &action));
    }
}
