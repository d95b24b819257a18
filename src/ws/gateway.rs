//! Fan-out of server events to live connections.

use std::collections::HashSet;

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::room::{Outbound, ServerEvent, Target};
use crate::util::id::ConnectionId;

pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Per-connection senders plus room subscriptions. A connection is
/// subscribed to a room once it joins it and stays subscribed until it
/// disconnects.
#[derive(Default)]
pub struct Gateway {
    connections: DashMap<ConnectionId, EventSender>,
    rooms: DashMap<String, HashSet<ConnectionId>>,
}

impl Gateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: ConnectionId, tx: EventSender) {
        self.connections.insert(id, tx);
    }

    /// Forget the connection and all of its room subscriptions.
    pub fn unregister(&self, id: &ConnectionId) {
        self.connections.remove(id);
        self.rooms.retain(|_, members| {
            members.remove(id);
            !members.is_empty()
        });
    }

    pub fn subscribe(&self, room_id: &str, id: &ConnectionId) {
        self.rooms.entry(room_id.to_string()).or_default().insert(id.clone());
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn send_to(&self, id: &ConnectionId, event: ServerEvent) {
        if let Some(tx) = self.connections.get(id) {
            // Receiver gone means the socket is closing; disconnect cleans up.
            let _ = tx.send(event);
        }
    }

    pub fn broadcast(&self, room_id: &str, event: &ServerEvent) {
        let Some(members) = self.rooms.get(room_id).map(|m| m.clone()) else { return };
        for id in &members {
            self.send_to(id, event.clone());
        }
    }

    pub fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { target, event } in outbound {
            match target {
                Target::Connection(id) => self.send_to(&id, event),
                Target::Room(room_id) => self.broadcast(&room_id, &event),
            }
        }
    }
}
