use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{spawn_room, OutboundMessage, RoomHandle};
use crate::config::engine::EngineConfig;
use crate::error::AppError;

/// Independent rooms keyed by id. Rooms share nothing but the config.
pub struct RoomRegistry {
    rooms: DashMap<String, RoomHandle>,
    config: EngineConfig,
    root: CancellationToken,
}

impl RoomRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rooms: DashMap::new(),
            config,
            root: CancellationToken::new(),
        }
    }

    /// Open a new room. The receiver carries all of the room's outbound traffic.
    pub fn open(
        &self,
        room_id: &str,
    ) -> Result<(RoomHandle, UnboundedReceiver<OutboundMessage>), AppError> {
        match self.rooms.entry(room_id.to_string()) {
            Entry::Occupied(_) => Err(AppError::RoomExists {
                room_id: room_id.to_string(),
            }),
            Entry::Vacant(slot) => {
                let (handle, out_rx) = spawn_room(room_id, self.config.clone(), &self.root);
                slot.insert(handle.clone());
                info!(room_id, "Room registered");
                Ok((handle, out_rx))
            }
        }
    }

    pub fn get(&self, room_id: &str) -> Option<RoomHandle> {
        self.rooms.get(room_id).map(|h| h.value().clone())
    }

    /// Close and forget a room. Returns whether it existed.
    pub fn close(&self, room_id: &str) -> bool {
        match self.rooms.remove(room_id) {
            Some((_, handle)) => {
                handle.close();
                info!(room_id, "Room unregistered");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Close every room.
    pub fn shutdown(&self) {
        self.root.cancel();
        self.rooms.clear();
    }
}
