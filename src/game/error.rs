//! Error taxonomy for the movement subsystem.
//!
//! Per-request errors are handled inside the world room and converted
//! into a client-only `illegalMove` event; they never leave a player's
//! authoritative state partially updated. Map errors are fatal at
//! startup.

use thiserror::Error;

/// Rejection reasons for a single move or teleport request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    /// A request coordinate is NaN or infinite.
    #[error("coordinate is not a finite number")]
    InvalidCoordinate,

    /// Requested travel exceeds the anti-cheat distance ceiling.
    #[error("travel distance {distance} cells exceeds limit of {limit}")]
    DistanceExceeded { distance: u32, limit: u32 },

    /// The pathfinder found no walkable route to the target.
    #[error("no walkable path to target")]
    NoPath,

    /// The pathfinder produced a degenerate (empty) path.
    #[error("empty path")]
    EmptyPath,

    /// The direction classifier received a non-axis-aligned delta.
    /// Precondition violation by the pathfinder or rectifier, treated
    /// as an internal fault.
    #[error("invalid movement delta ({dx}, {dy})")]
    InvalidDelta { dx: i32, dy: i32 },

    /// The requested zone has no reachable cell within the sampling
    /// budget.
    #[error("zone has no reachable cell")]
    ZoneUnreachable,

    /// The teleport request named a zone label that does not exist.
    #[error("unknown zone label '{0}'")]
    UnknownZone(String),
}

impl MoveError {
    /// Stable code string delivered to clients in rejection events.
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::InvalidCoordinate => "INVALID_COORDINATE",
            MoveError::DistanceExceeded { .. } => "DISTANCE_EXCEEDED",
            MoveError::NoPath => "NO_PATH",
            MoveError::EmptyPath => "EMPTY_PATH",
            MoveError::InvalidDelta { .. } => "INVALID_DELTA",
            MoveError::ZoneUnreachable => "ZONE_UNREACHABLE",
            MoveError::UnknownZone(_) => "UNKNOWN_ZONE",
        }
    }
}

/// Startup failures while loading the tile map. All of these abort the
/// process: the server must not serve without a valid map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse map file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("map matrix is empty")]
    Empty,

    #[error("map matrix is not rectangular: row {row} has {got} columns, expected {expected}")]
    NotRectangular { row: usize, got: usize, expected: usize },

    #[error("unknown tile classification {value} at ({x}, {y})")]
    UnknownTile { value: u8, x: usize, y: usize },
}
