//! HTTP and WebSocket routing configuration.
//!
//! Defines the world endpoint. The connection lifecycle and command
//! dispatch are handled by the session actor behind it.

use actix_web::web;

use crate::server::world_room::session::ws_world;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/world").to(ws_world));
}
