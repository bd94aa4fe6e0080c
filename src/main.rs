//! Main entry point for the backend server.
//!
//! Loads the tile map (fatal on failure: the server must not run
//! without a valid map), starts the world room actor and launches the
//! HTTP server with the world WebSocket endpoint.

use std::sync::Arc;

use actix::Actor;
use actix_web::{App, HttpServer, web};
use log::{error, info};

use crate::game::map::TileMap;
use crate::server::world_room::server::WorldRoom;

pub mod config;
mod game;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    let map = match TileMap::load(config::world::MAP_FILE) {
        Ok(map) => Arc::new(map),
        Err(err) => {
            error!("[Main] Cannot load map '{}': {}", config::world::MAP_FILE, err);
            return Err(std::io::Error::other(err.to_string()));
        }
    };

    // Start the world room actor (player table, movement, teleports).
    let world_room = WorldRoom::new(Arc::clone(&map)).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(world_room));

    info!("[Main] Listening on {}:{}", config::world::BIND_ADDR.0, config::world::BIND_ADDR.1);
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(config::world::BIND_ADDR)?
    .run()
    .await
}
