//! Registry of rooms and the command dispatcher.
//!
//! Every operation mutates room state and returns the events to deliver, in
//! order. Nothing here touches a socket; the `ws` layer hands the returned
//! [`Outbound`] list to the gateway.

use std::collections::HashMap;

use super::card::Card;
use super::event::{ClientEvent, Outbound, ServerEvent};
use super::model::{Room, User};
use super::stats;
use crate::util::id::ConnectionId;

/// Why an operation did nothing. Never sent to clients; the protocol stays
/// silent and these only reach the logs and tests.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("room not found")]
    RoomNotFound,
    #[error("user not in room")]
    UserNotFound,
    #[error("not the room admin")]
    Unauthorized,
    #[error("connection already joined this room")]
    AlreadyJoined,
}

pub type RoomResult = Result<Vec<Outbound>, RoomError>;

/// Rooms by id. A room exists from its first join until its last member
/// leaves.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self { rooms: HashMap::new() }
    }

    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get_or_create(&mut self, room_id: &str) -> &mut Room {
        self.rooms.entry(room_id.to_string()).or_insert_with(|| {
            tracing::info!(%room_id, "room created");
            Room::new(room_id)
        })
    }

    /// Drop the room if nobody is left in it. Returns whether it was removed.
    pub fn remove_if_empty(&mut self, room_id: &str) -> bool {
        let empty = self.rooms.get(room_id).is_some_and(|r| r.users.is_empty());
        if empty {
            self.rooms.remove(room_id);
            tracing::info!(%room_id, "room closed");
        }
        empty
    }

    /// Route one inbound event from `conn`.
    pub fn apply(&mut self, conn: &ConnectionId, event: ClientEvent) -> RoomResult {
        match event {
            ClientEvent::JoinRoom { room_id, name } => self.join(&room_id, conn, name),
            ClientEvent::SelectCard { room_id, card, card_index } => {
                self.select_card(&room_id, conn, card, card_index)
            }
            ClientEvent::Clear { room_id } => self.clear(&room_id, conn),
            ClientEvent::ShowResults { room_id, use_index_mode, ignored_indices } => {
                self.show_results(&room_id, conn, use_index_mode, &ignored_indices)
            }
            ClientEvent::ChangeCardSet { room_id, card_set_index } => {
                self.change_card_set(&room_id, conn, card_set_index)
            }
            ClientEvent::Ping => Ok(vec![Outbound::to_connection(conn, ServerEvent::Pong)]),
        }
    }

    pub fn join(&mut self, room_id: &str, conn: &ConnectionId, name: String) -> RoomResult {
        if self.rooms.get(room_id).is_some_and(|r| r.contains(conn)) {
            return Err(RoomError::AlreadyJoined);
        }
        let room = self.get_or_create(room_id);
        tracing::info!(%room_id, %conn, %name, "user joined");
        room.users.push(User::new(conn.clone(), name.clone()));

        let mut out = Vec::new();
        if room.admin_id.is_none() {
            out.extend(room.elect_admin(Some(conn.clone())));
        } else {
            out.push(room.user_list());
        }
        if let Some(card_set_index) = room.card_set_index {
            out.push(Outbound::to_connection(conn, ServerEvent::ChangeCardSet { card_set_index }));
        }
        if room.show_results {
            out.push(Outbound::to_connection(conn, ServerEvent::ShowStats { stats: room.stats.clone() }));
            out.push(Outbound::to_connection(conn, ServerEvent::ShowResults));
        }
        if let Some(admin) = &room.admin_id {
            out.push(Outbound::to_connection(
                admin,
                ServerEvent::LogMessage { message: format!("User \"{name}\" joined") },
            ));
        }
        Ok(out)
    }

    pub fn select_card(
        &mut self,
        room_id: &str,
        conn: &ConnectionId,
        card: Option<Card>,
        card_index: Option<usize>,
    ) -> RoomResult {
        let room = self.rooms.get_mut(room_id).ok_or(RoomError::RoomNotFound)?;
        let admin = room.admin_id.clone();
        let user = room.user_mut(conn).ok_or(RoomError::UserNotFound)?;

        let shown = card.as_ref().map(Card::to_string).unwrap_or_default();
        let mut out = Vec::new();
        if let Some(admin) = &admin {
            out.push(Outbound::to_connection(
                admin,
                ServerEvent::LogMessage {
                    message: format!("User \"{}\" selected: \"{}\"", user.name, shown),
                },
            ));
        }
        user.select(card, card_index);
        out.push(room.user_list());
        Ok(out)
    }

    pub fn show_results(
        &mut self,
        room_id: &str,
        conn: &ConnectionId,
        use_index_mode: bool,
        ignored_indices: &[usize],
    ) -> RoomResult {
        let room = self.admin_room(room_id, conn)?;
        room.show_results = true;
        let sample = room.sample(use_index_mode, ignored_indices);
        room.stats = stats::compute(&sample);
        tracing::info!(%room_id, samples = sample.len(), use_index_mode, "results revealed");

        Ok(vec![
            Outbound::to_room(room_id, ServerEvent::ShowResults),
            room.user_list(),
            Outbound::to_room(room_id, ServerEvent::ShowStats { stats: room.stats.clone() }),
        ])
    }

    pub fn change_card_set(
        &mut self,
        room_id: &str,
        conn: &ConnectionId,
        card_set_index: usize,
    ) -> RoomResult {
        let room = self.admin_room(room_id, conn)?;
        room.card_set_index = Some(card_set_index);
        tracing::info!(%room_id, card_set_index, "card set changed");
        Ok(vec![Outbound::to_room(room_id, ServerEvent::ChangeCardSet { card_set_index })])
    }

    pub fn clear(&mut self, room_id: &str, conn: &ConnectionId) -> RoomResult {
        let room = self.admin_room(room_id, conn)?;
        room.users.iter_mut().for_each(User::clear_selection);
        room.show_results = false;
        room.stats = None;
        tracing::info!(%room_id, "round cleared");

        Ok(vec![
            Outbound::to_room(room_id, ServerEvent::Clear),
            room.user_list(),
            Outbound::to_room(room_id, ServerEvent::ShowStats { stats: None }),
        ])
    }

    /// Remove `conn` from every room it is in, handing the admin role to the
    /// earliest remaining member where needed. Calling it again for the same
    /// connection yields no events.
    pub fn disconnect(&mut self, conn: &ConnectionId) -> Vec<Outbound> {
        let mut affected: Vec<String> = self
            .rooms
            .iter()
            .filter(|(_, room)| room.contains(conn))
            .map(|(id, _)| id.clone())
            .collect();
        affected.sort();

        let mut out = Vec::new();
        for room_id in affected {
            let Some(room) = self.rooms.get_mut(&room_id) else { continue };
            let was_admin = room.is_admin(conn);
            room.remove_user(conn);
            tracing::info!(%room_id, %conn, was_admin, "user left");

            if self.remove_if_empty(&room_id) {
                continue;
            }
            let Some(room) = self.rooms.get_mut(&room_id) else { continue };
            if was_admin {
                let successor = room.successor();
                out.extend(room.elect_admin(successor));
            } else {
                out.push(room.user_list());
            }
        }
        out
    }

    fn admin_room(&mut self, room_id: &str, conn: &ConnectionId) -> Result<&mut Room, RoomError> {
        let room = self.rooms.get_mut(room_id).ok_or(RoomError::RoomNotFound)?;
        if !room.is_admin(conn) {
            return Err(RoomError::Unauthorized);
        }
        Ok(room)
    }
}
