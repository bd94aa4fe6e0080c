//! The world room: one actor owning all mutable world state, plus the
//! per-connection WebSocket session actors and the messages between
//! them.

pub mod messages;
pub mod server;
pub mod session;
