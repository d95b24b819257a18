//! Inbound commands, outbound events and their addressing.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::stats::Stats;
use crate::util::id::ConnectionId;

/// Messages a connection may send.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom {
        room_id: String,
        name: String,
    },
    SelectCard {
        room_id: String,
        #[serde(default)]
        card: Option<Card>,
        #[serde(default)]
        card_index: Option<usize>,
    },
    Clear {
        room_id: String,
    },
    ShowResults {
        room_id: String,
        #[serde(default)]
        use_index_mode: bool,
        #[serde(default)]
        ignored_indices: Vec<usize>,
    },
    ChangeCardSet {
        room_id: String,
        card_set_index: usize,
    },
    Ping,
}

/// Messages pushed to connections.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    UserList { users: Vec<UserView> },
    Admin,
    LogMessage { message: String },
    ChangeCardSet { card_set_index: usize },
    ShowResults,
    ShowStats { stats: Option<Stats> },
    Clear,
    Pong,
    Error { message: String },
}

/// One row of the user list as seen by clients. Selections stay hidden
/// until the room reveals.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserView {
    pub id: ConnectionId,
    pub name: String,
    pub is_admin: bool,
    pub has_selected: bool,
    pub card: Option<Card>,
    pub card_index: Option<usize>,
}

/// Where an outbound event goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Connection(ConnectionId),
    Room(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub target: Target,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn to_connection(id: &ConnectionId, event: ServerEvent) -> Self {
        Self { target: Target::Connection(id.clone()), event }
    }

    pub fn to_room(room_id: &str, event: ServerEvent) -> Self {
        Self { target: Target::Room(room_id.to_string()), event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn client_frames_parse() {
        let ev: ClientEvent = serde_json::from_str(
            r#"{"type":"select_card","room_id":"r1","card":"?","card_index":7}"#,
        )
        .unwrap();
        assert_eq!(
            ev,
            ClientEvent::SelectCard {
                room_id: "r1".into(),
                card: Some(Card::Symbolic("?".into())),
                card_index: Some(7),
            }
        );

        let ev: ClientEvent =
            serde_json::from_str(r#"{"type":"show_results","room_id":"r1"}"#).unwrap();
        assert_eq!(
            ev,
            ClientEvent::ShowResults {
                room_id: "r1".into(),
                use_index_mode: false,
                ignored_indices: vec![],
            }
        );
    }

    #[test]
    fn server_frames_are_tagged() {
        let json = serde_json::to_value(ServerEvent::ShowStats { stats: None }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "show_stats", "stats": null}));
        let json = serde_json::to_value(ServerEvent::Admin).unwrap();
        assert_eq!(json, serde_json::json!({"type": "admin"}));
    }
}
