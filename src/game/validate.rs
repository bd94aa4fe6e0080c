//! Move request validation.
//!
//! Quantizes and clamps a raw movement request, enforces the
//! maximum-travel-distance anti-cheat rule and decides whether the
//! pathfinder should run at all. Map legality is not checked here;
//! it is decided by the pathfinder's tile allow-list.

use serde::{Deserialize, Serialize};

use crate::config::movement::MAX_TRAVEL_CELLS;
use crate::config::world::CELL_SIZE;
use crate::game::error::MoveError;
use crate::game::map::TileMap;
use crate::game::types::{Cell, Position};

/// A raw "go" request as received from the client. Origin fields are
/// optional and default per-field to the player's authoritative
/// position, which permits chained moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub origin_x: Option<f64>,
    #[serde(default)]
    pub origin_y: Option<f64>,
}

/// A normalized request ready for the pathfinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    pub origin: Position,
    pub target: Position,
    pub origin_cell: Cell,
    pub target_cell: Cell,
}

/// Manhattan distance between two cells.
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    (a.x.abs_diff(b.x) + a.y.abs_diff(b.y)) as u32
}

/// Quantize a raw coordinate to the cell grid and clamp it into the
/// map's world bounds. Clamping happens in the f64 domain: a huge
/// well-formed coordinate must saturate to the map edge, not overflow
/// the integer cast.
fn quantize(value: f64, max: i32) -> i32 {
    let max_cell = (max / CELL_SIZE - 1) as f64;
    let cell = (value / CELL_SIZE as f64).round().clamp(0.0, max_cell);
    cell as i32 * CELL_SIZE
}

/// Validate a move request against the player's authoritative
/// position.
///
/// The distance check runs before any pathfinding: the cheap rejection
/// is the primary anti-teleport-hack control. It is anchored on the
/// server's authoritative position, so a falsified client origin
/// cannot launder a long-distance jump: the claimed origin itself must
/// be within the ceiling of where the server last saw the player.
pub fn validate(
    request: &MoveRequest,
    authoritative: Position,
    map: &TileMap,
) -> Result<ValidatedMove, MoveError> {
    let finite = request.x.is_finite()
        && request.y.is_finite()
        && request.origin_x.is_none_or(f64::is_finite)
        && request.origin_y.is_none_or(f64::is_finite);
    if !finite {
        return Err(MoveError::InvalidCoordinate);
    }

    let target = Position {
        x: quantize(request.x, map.max_x()),
        y: quantize(request.y, map.max_y()),
    };
    let origin = Position {
        x: quantize(request.origin_x.unwrap_or(authoritative.x as f64), map.max_x()),
        y: quantize(request.origin_y.unwrap_or(authoritative.y as f64), map.max_y()),
    };

    let origin_cell = origin.cell();
    let target_cell = target.cell();
    let auth_cell = authoritative.cell();

    let distance = manhattan(origin_cell, target_cell);
    if distance > MAX_TRAVEL_CELLS {
        return Err(MoveError::DistanceExceeded { distance, limit: MAX_TRAVEL_CELLS });
    }
    let drift = manhattan(auth_cell, origin_cell);
    if drift > MAX_TRAVEL_CELLS {
        return Err(MoveError::DistanceExceeded { distance: drift, limit: MAX_TRAVEL_CELLS });
    }

    Ok(ValidatedMove { origin, target, origin_cell, target_cell })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::TileMap;

    fn open_map(cells: usize) -> TileMap {
        TileMap::from_matrix(vec![vec![0; cells]; cells]).unwrap()
    }

    fn request(x: f64, y: f64) -> MoveRequest {
        MoveRequest { x, y, origin_x: None, origin_y: None }
    }

    #[test]
    fn test_target_is_quantized_to_grid() {
        let map = open_map(500);
        let origin = Position { x: 0, y: 0 };
        let v = validate(&request(123.0, 987.0), origin, &map).unwrap();
        assert_eq!(v.target, Position { x: 120, y: 990 });
        assert_eq!(v.target.x % 10, 0);
        assert_eq!(v.target.y % 10, 0);
    }

    #[test]
    fn test_target_is_clamped_into_map_bounds() {
        let map = open_map(500);
        let origin = Position { x: 4990, y: 400 };
        let v = validate(&request(999999.0, -50.0), origin, &map).unwrap();
        assert_eq!(v.target, Position { x: 4990, y: 0 });
    }

    #[test]
    fn test_huge_coordinate_saturates_to_map_edge() {
        let map = open_map(500);
        let auth = Position { x: 4990, y: 0 };
        let v = validate(&request(1e300, 0.0), auth, &map).unwrap();
        assert_eq!(v.target, Position { x: 4990, y: 0 });
        let v = validate(&request(-1e300, 0.0), auth, &map);
        assert!(matches!(v, Err(MoveError::DistanceExceeded { .. })));
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let map = open_map(500);
        let auth = Position { x: 100, y: 100 };
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = validate(&request(bad, 100.0), auth, &map).unwrap_err();
            assert_eq!(err, MoveError::InvalidCoordinate);
        }
        let req = MoveRequest { x: 100.0, y: 100.0, origin_x: Some(f64::NAN), origin_y: None };
        assert_eq!(validate(&req, auth, &map).unwrap_err(), MoveError::InvalidCoordinate);
    }

    #[test]
    fn test_origin_defaults_to_authoritative_position() {
        let map = open_map(500);
        let auth = Position { x: 200, y: 300 };
        let v = validate(&request(250.0, 300.0), auth, &map).unwrap();
        assert_eq!(v.origin, auth);
        assert_eq!(v.origin_cell, Cell { x: 20, y: 30 });
    }

    #[test]
    fn test_origin_fields_default_individually() {
        let map = open_map(500);
        let auth = Position { x: 200, y: 300 };
        let req = MoveRequest { x: 250.0, y: 300.0, origin_x: Some(100.0), origin_y: None };
        let v = validate(&req, auth, &map).unwrap();
        assert_eq!(v.origin, Position { x: 100, y: 300 });
    }

    #[test]
    fn test_rejects_travel_beyond_ceiling() {
        let map = open_map(500);
        let origin = Position { x: 0, y: 0 };
        // 151 cells along x.
        let err = validate(&request(1510.0, 0.0), origin, &map).unwrap_err();
        assert_eq!(err, MoveError::DistanceExceeded { distance: 151, limit: MAX_TRAVEL_CELLS });
    }

    #[test]
    fn test_accepts_travel_at_ceiling() {
        let map = open_map(500);
        let origin = Position { x: 0, y: 0 };
        assert!(validate(&request(1500.0, 0.0), origin, &map).is_ok());
    }

    #[test]
    fn test_rejects_falsified_origin_far_from_authoritative() {
        let map = open_map(500);
        let auth = Position { x: 0, y: 0 };
        // The claimed origin sits next to the target, but 300 cells
        // away from where the server last saw the player.
        let req = MoveRequest {
            x: 3010.0,
            y: 0.0,
            origin_x: Some(3000.0),
            origin_y: Some(0.0),
        };
        let err = validate(&req, auth, &map).unwrap_err();
        assert!(matches!(err, MoveError::DistanceExceeded { .. }));
    }

    #[test]
    fn test_zero_distance_request_is_valid() {
        let map = open_map(500);
        let auth = Position { x: 100, y: 100 };
        let v = validate(&request(100.0, 100.0), auth, &map).unwrap();
        assert_eq!(v.origin_cell, v.target_cell);
    }
}
