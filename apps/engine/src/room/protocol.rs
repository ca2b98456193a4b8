//! JSON wire messages exchanged with a room.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::cards_parsing::CardDescriptor;
use crate::domain::player_view::{PlayerListView, StateView};
use crate::errors::ErrorCode;

/// Player actions, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMsg {
    StartGame,
    /// Kept raw so a non-integer can be reported as such.
    Announce { announcement: Value },
    PlayCard(CardDescriptor),
    ChooseTrump { color: String },
}

/// Messages sent to players, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    State(StateView),
    Player(PlayerListView),
    Message { msg: String },
    Error { code: ErrorCode, msg: String },
}

impl ServerMsg {
    pub fn to_line(&self) -> String {
        // Views and strings always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Outbound message to be delivered by the host's transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    ToPlayer { name: String, line: String },
    Broadcast { line: String },
}
