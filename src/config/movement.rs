/// Movement configuration constants.
///
/// Parameters of move validation, path simplification/expansion and
/// zone teleportation.
/// Maximum Manhattan distance (in cells) a single move may travel.
/// Requests above this are rejected before pathfinding runs.
pub const MAX_TRAVEL_CELLS: u32 = 150;

/// Tile classes the pathfinder treats as traversable.
/// 0 = neutral, 2..5 = the colored zones; obstacles (1) are excluded.
pub const WALKABLE_TILES: [u8; 5] = [0, 2, 3, 4, 5];

/// Index step used when down-sampling a raw path into waypoints.
/// 1 means every cell of the raw path becomes a waypoint.
pub const SIMPLIFICATION_STRIDE: usize = 1;

/// Number of interpolated sub-waypoints emitted between two waypoints.
pub const EXPANSION_SUBSTEPS: i32 = 4;

/// World-unit advance of each interpolated sub-waypoint.
pub const EXPANSION_INCREMENT: i32 = 2;

/// Attempt cap for teleport rejection sampling before falling back to
/// the precomputed per-zone cell index.
pub const TELEPORT_MAX_ATTEMPTS: u32 = 1024;
