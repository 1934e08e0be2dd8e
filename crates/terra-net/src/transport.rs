//! Envelope transports.

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::trace;

use crate::actions::ActionEnvelope;

/// Errors raised by transports and the envelope codec.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport is not connected.
    #[error("transport not connected")]
    NotConnected,

    /// The peer end of the channel is gone.
    #[error("transport channel closed")]
    ChannelClosed,

    /// An envelope could not be encoded or decoded.
    #[error("malformed envelope: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Moves envelopes between clients.
///
/// Transports are polled from the frame loop; `poll` never blocks.
pub trait ActionTransport {
    fn connect(&mut self) -> Result<(), TransportError>;

    /// Drop the connection and anything still queued for delivery.
    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    fn send(&mut self, envelope: ActionEnvelope) -> Result<(), TransportError>;

    /// Take every envelope received since the last poll, in arrival order.
    fn poll(&mut self) -> Vec<ActionEnvelope>;
}

/// Echoes every sent envelope back to the same client.
#[derive(Debug)]
pub struct LocalLoopbackTransport {
    tx: Sender<ActionEnvelope>,
    rx: Receiver<ActionEnvelope>,
    connected: bool,
}

impl LocalLoopbackTransport {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            connected: false,
        }
    }
}

impl Default for LocalLoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionTransport for LocalLoopbackTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) {
        self.connected = false;
        let dropped = self.rx.try_iter().count();
        if dropped > 0 {
            trace!(dropped, "discarded queued envelopes");
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, envelope: ActionEnvelope) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        self.tx
            .send(envelope)
            .map_err(|_| TransportError::ChannelClosed)
    }

    fn poll(&mut self) -> Vec<ActionEnvelope> {
        if !self.connected {
            return Vec::new();
        }
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, ActionDirection, SculptAction};

    fn envelope(seq: u32) -> ActionEnvelope {
        ActionEnvelope {
            id: format!("c:{seq}"),
            client_id: "c".to_string(),
            time_ms: 0,
            action: Action::Sculpt(SculptAction {
                direction: ActionDirection::Up,
                position: [0.0, 0.0, 60.0],
            }),
        }
    }

    #[test]
    fn test_loopback_echoes_in_order() {
        let mut transport = LocalLoopbackTransport::new();
        transport.connect().unwrap();
        transport.send(envelope(1)).unwrap();
        transport.send(envelope(2)).unwrap();
        let ids: Vec<String> = transport.poll().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["c:1", "c:2"]);
        assert!(transport.poll().is_empty());
    }

    #[test]
    fn test_send_requires_connection() {
        let mut transport = LocalLoopbackTransport::new();
        assert!(matches!(
            transport.send(envelope(1)),
            Err(TransportError::NotConnected)
        ));
    }

    #[test]
    fn test_disconnect_drops_pending() {
        let mut transport = LocalLoopbackTransport::new();
        transport.connect().unwrap();
        transport.send(envelope(1)).unwrap();
        transport.disconnect();
        assert!(!transport.is_connected());
        assert!(transport.poll().is_empty());
        transport.connect().unwrap();
        assert!(transport.poll().is_empty());
    }
}
