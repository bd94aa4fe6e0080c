use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::world::CELL_SIZE;

/// A world-space coordinate pair. Always a non-negative multiple of
/// `CELL_SIZE`, bounded to the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn cell(&self) -> Cell {
        Cell {
            x: (self.x / CELL_SIZE) as usize,
            y: (self.y / CELL_SIZE) as usize,
        }
    }
}

/// One unit of the map grid (`CELL_SIZE` world units per cell).
/// Indexed into the tile matrix as `[y][x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn position(&self) -> Position {
        Position {
            x: self.x as i32 * CELL_SIZE,
            y: self.y as i32 * CELL_SIZE,
        }
    }
}

/// Quantized compass label attached to every waypoint.
/// `Front` is +y, `Back` is -y, `Right` is +x, `Left` is -x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Front,
    Back,
    Left,
    Right,
    Rest,
}

/// One point of a trajectory: position, facing and the world-unit
/// magnitude of the segment leading into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub steps: i32,
}

impl Waypoint {
    pub fn new(x: i32, y: i32, direction: Direction, steps: i32) -> Self {
        Self { x, y, direction, steps }
    }
}

/// Ordered waypoint sequence. Replaced wholesale on every accepted
/// move, never partially mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointPath {
    pub waypoints: Vec<Waypoint>,
}

impl WaypointPath {
    pub fn new() -> Self {
        Self { waypoints: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// A player entity as published to clients. Position and the two path
/// representations are owned exclusively by the player's command
/// stream inside the world room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub uuid: Uuid,
    pub name: String,
    pub connected: bool,
    pub x: i32,
    pub y: i32,
    /// Tile classification of the cell the player stands on.
    pub zone: u8,
    /// Extended (interpolated) trajectory, used for client animation.
    pub path: WaypointPath,
    /// Raw coarse trajectory, one waypoint per grid cell.
    pub full_path: WaypointPath,
    /// Monotonic counter guarding against stale path resolutions.
    #[serde(skip)]
    pub move_seq: u64,
}

impl Player {
    pub fn new(uuid: Uuid, name: String, pos: Position, zone: u8) -> Self {
        Self {
            uuid,
            name,
            connected: true,
            x: pos.x,
            y: pos.y,
            zone,
            path: WaypointPath::new(),
            full_path: WaypointPath::new(),
            move_seq: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }
}
