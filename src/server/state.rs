// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the world room actor. Used to share state
//! between HTTP/WebSocket handlers and the actor system.

use actix::Addr;

use crate::server::world_room::server::WorldRoom;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the world room actor (player table, movement,
    /// teleports, moderation gate).
    pub world_room: Addr<WorldRoom>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(world_room: Addr<WorldRoom>) -> Self {
        AppState { world_room }
    }
}
