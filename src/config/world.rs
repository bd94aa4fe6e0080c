/// World configuration constants.
///
/// This module defines the map geometry parameters and the server
/// endpoint settings.
/// Size of one grid cell in world units. All world coordinates are
/// quantized to multiples of this value.
pub const CELL_SIZE: i32 = 10;

/// Path of the tile classification file loaded at startup.
/// Produced offline from map art; the server never regenerates it.
pub const MAP_FILE: &str = "grid.json";

/// Address and port the HTTP/WebSocket server binds to.
pub const BIND_ADDR: (&str, u16) = ("127.0.0.1", 8080);

/// Maximum number of concurrent sessions in the world room.
pub const MAX_CLIENTS: usize = 500;

/// Usernames longer than this are truncated at connect time.
pub const MAX_USERNAME_LENGTH: usize = 100;
