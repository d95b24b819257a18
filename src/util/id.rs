//! ID utilities (ULID connection ids).

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Opaque identifier of one live WebSocket connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a fresh connection id. Full 26-char ULID, so ids never repeat
/// for the lifetime of the process.
pub fn new_connection_id() -> ConnectionId {
    ConnectionId(Ulid::new().to_string())
}
