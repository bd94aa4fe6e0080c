// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - The world room actor (movement, teleports, moderation gate)
//! - WebSocket event/error payload helpers

pub mod router;
pub mod state;
pub mod world_room;
pub mod ws_event;
