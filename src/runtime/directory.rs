//! Named rooms, one session each.
//!
//! A room's session is spawned by the first `join` and torn down when the
//! last connection that joined through the directory is gone. Rooms are
//! fully independent; nothing is shared between their sessions.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tracing::info;

use super::worker::{Connection, SessionHandle};
use crate::core::config::SessionConfig;
use crate::core::error::SessionError;
use crate::core::rng::SessionRng;
use crate::core::seat::ConnectionId;

struct Room {
    handle: SessionHandle,
    /// Connections handed out and not yet dropped, refused ones included.
    reserved: usize,
}

type Rooms = DashMap<String, Room>;

/// Directory of live rooms.
#[derive(Clone)]
pub struct SessionDirectory {
    config: SessionConfig,
    rooms: Arc<Rooms>,
}

impl std::fmt::Debug for SessionDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDirectory")
            .field("rooms", &self.rooms.len())
            .finish()
    }
}

impl SessionDirectory {
    /// Create a directory whose rooms all use `config`.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            rooms: Arc::new(DashMap::new()),
        }
    }

    /// Join a room under a fresh connection id, creating the room if needed.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn join(&self, room: &str) -> Result<Connection, SessionError> {
        self.join_as(room, ConnectionId::random()).await
    }

    /// Join a room under a given connection id.
    pub async fn join_as(&self, room: &str, connection: ConnectionId) -> Result<Connection, SessionError> {
        let handle = {
            let mut entry = self.rooms.entry(room.to_owned()).or_insert_with(|| {
                info!(room, "session created");
                Room {
                    handle: SessionHandle::spawn(self.config.clone(), SessionRng::from_entropy()),
                    reserved: 0,
                }
            });
            entry.reserved += 1;
            entry.handle.clone()
        };

        let ticket = RoomTicket {
            rooms: Arc::downgrade(&self.rooms),
            room: room.to_owned(),
        };
        let mut connection = handle.connect(connection).await?;
        connection.attach_ticket(ticket);
        Ok(connection)
    }

    /// Whether a room currently exists.
    #[must_use]
    pub fn contains(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    /// Number of live rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Check if no rooms are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Keeps a room alive while the owning connection exists.
///
/// Dropping the last ticket of a room removes it from the directory.
pub(crate) struct RoomTicket {
    rooms: Weak<Rooms>,
    room: String,
}

impl std::fmt::Debug for RoomTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomTicket").field("room", &self.room).finish()
    }
}

impl Drop for RoomTicket {
    fn drop(&mut self) {
        let Some(rooms) = self.rooms.upgrade() else {
            return;
        };
        if let Some(mut entry) = rooms.get_mut(&self.room) {
            entry.reserved = entry.reserved.saturating_sub(1);
        }
        if rooms.remove_if(&self.room, |_, r| r.reserved == 0).is_some() {
            info!(room = %self.room, "session torn down");
        }
    }
}
