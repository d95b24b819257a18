//! Serialises room commands and delivers their results.

use parking_lot::Mutex;

use crate::room::{ClientEvent, RoomError, RoomRegistry};
use crate::util::id::{new_connection_id, ConnectionId};
use crate::ws::gateway::{EventSender, Gateway};

/// Owns the registry and the gateway. Each command applies and delivers
/// under one lock, so every room sees a single ordered stream of events.
#[derive(Default)]
pub struct Hub {
    registry: Mutex<RoomRegistry>,
    gateway: Gateway,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, tx: EventSender) -> ConnectionId {
        let id = new_connection_id();
        self.gateway.register(id.clone(), tx);
        tracing::debug!(conn = %id, "connection registered");
        id
    }

    pub fn handle(&self, conn: &ConnectionId, event: ClientEvent) -> Result<(), RoomError> {
        let mut registry = self.registry.lock();
        if let ClientEvent::JoinRoom { room_id, .. } = &event {
            self.gateway.subscribe(room_id, conn);
        }
        match registry.apply(conn, event) {
            Ok(outbound) => {
                self.gateway.deliver(outbound);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(%conn, error = %err, "command ignored");
                Err(err)
            }
        }
    }

    pub fn disconnect(&self, conn: &ConnectionId) {
        let mut registry = self.registry.lock();
        let outbound = registry.disconnect(conn);
        self.gateway.unregister(conn);
        self.gateway.deliver(outbound);
        tracing::debug!(%conn, rooms = registry.len(), "connection closed");
    }

    pub fn room_count(&self) -> usize {
        self.registry.lock().len()
    }
}
