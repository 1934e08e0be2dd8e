//! Action layer: every interactive edit is wrapped in an envelope, sent over a
//! transport, and applied to the planet when it comes back. Running locally,
//! the loopback transport echoes envelopes straight back; a networked
//! transport can slot in behind the same trait.

mod actions;
mod layer;
mod transport;

pub use actions::{Action, ActionDirection, ActionEnvelope, SculptAction, apply_action};
pub use layer::{ActionLayer, generate_client_id};
pub use transport::{ActionTransport, LocalLoopbackTransport, TransportError};
