//! Trajectory synthesis.
//!
//! Converts a raw cell path from the pathfinder into the waypoint
//! trajectories published to clients: the coarse full path (one
//! waypoint per grid cell), the simplified path (stride down-sampled,
//! direction-classified) and the extended path (sub-waypoint
//! interpolated for smooth client tweening between authoritative
//! waypoints).

use crate::config::movement::{EXPANSION_INCREMENT, EXPANSION_SUBSTEPS};
use crate::config::world::CELL_SIZE;
use crate::game::error::MoveError;
use crate::game::types::{Cell, Direction, Position, Waypoint, WaypointPath};

/// Result of a successful synthesis. `final_position` is the last
/// waypoint of the simplified path and becomes the player's new
/// authoritative position.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedPath {
    pub full: WaypointPath,
    pub simplified: WaypointPath,
    pub extended: WaypointPath,
    pub final_position: Position,
}

/// Classify a movement delta into one of the four axis-aligned
/// directions, or `Rest` for no movement.
///
/// Diagonal deltas are not a valid input: the pathfinder's cardinal
/// adjacency (or the rectification pass) must have eliminated them.
/// The classifier fails closed instead of silently mis-labeling.
pub fn classify_direction(dx: i32, dy: i32) -> Result<Direction, MoveError> {
    match (dx.signum(), dy.signum()) {
        (0, 0) => Ok(Direction::Rest),
        (1, 0) => Ok(Direction::Right),
        (-1, 0) => Ok(Direction::Left),
        (0, 1) => Ok(Direction::Front),
        (0, -1) => Ok(Direction::Back),
        _ => Err(MoveError::InvalidDelta { dx, dy }),
    }
}

/// Synthesize the three trajectory representations from a raw cell
/// path.
///
/// The simplified walk visits index `stride`, `2*stride`, ... and
/// always ends on the final index, comparing each visited point
/// against `index - stride` (clamped to 0). When a stride jump crosses
/// a corner the delta is diagonal; the non-dominant axis of the
/// visited point is snapped to the reference before classification
/// (ties prefer the x axis).
pub fn synthesize(raw: &[Cell], stride: usize) -> Result<SynthesizedPath, MoveError> {
    if raw.is_empty() {
        return Err(MoveError::EmptyPath);
    }
    let stride = stride.max(1);

    let mut full = WaypointPath::new();
    for cell in raw {
        let pos = cell.position();
        full.waypoints.push(Waypoint::new(pos.x, pos.y, Direction::Rest, CELL_SIZE));
    }

    let last = full.len() - 1;
    let mut simplified = WaypointPath::new();
    let mut index = stride.min(last);
    loop {
        let prev = index.saturating_sub(stride);
        let reference = full.waypoints[prev];
        let mut x = full.waypoints[index].x;
        let mut y = full.waypoints[index].y;
        let mut dx = x - reference.x;
        let mut dy = y - reference.y;
        if dx != 0 && dy != 0 {
            // Rectify a diagonal stride delta onto its dominant axis.
            if dx.abs() >= dy.abs() {
                y = reference.y;
                dy = 0;
            } else {
                x = reference.x;
                dx = 0;
            }
        }
        let direction = classify_direction(dx, dy)?;
        let steps = dx.abs().max(dy.abs());
        simplified.waypoints.push(Waypoint::new(x, y, direction, steps));

        if index == last {
            break;
        }
        index = (index + stride).min(last);
    }

    let extended = if raw.len() == 1 {
        // Zero-distance move: the single rest waypoint stands alone.
        simplified.clone()
    } else {
        let anchor = Waypoint::new(
            full.waypoints[0].x,
            full.waypoints[0].y,
            Direction::Rest,
            0,
        );
        expand(anchor, &simplified)
    };
    let tail = simplified.waypoints[simplified.len() - 1];
    let final_position = Position { x: tail.x, y: tail.y };

    Ok(SynthesizedPath { full, simplified, extended, final_position })
}

/// Expansion pass over the origin-anchored simplified path: between
/// each adjacent waypoint pair, emit the first waypoint followed by
/// `EXPANSION_SUBSTEPS` interpolated sub-waypoints advancing
/// `EXPANSION_INCREMENT` world units each along the *next* waypoint's
/// direction. The origin anchor makes the tween start at the player's
/// current position; the final waypoint itself is not re-emitted, the
/// client reaches it through the last sub-waypoint run.
fn expand(anchor: Waypoint, simplified: &WaypointPath) -> WaypointPath {
    let mut anchored = Vec::with_capacity(simplified.len() + 1);
    anchored.push(anchor);
    anchored.extend_from_slice(&simplified.waypoints);

    let mut extended = WaypointPath::new();
    for pair in anchored.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        extended.waypoints.push(current);
        for k in 1..=EXPANSION_SUBSTEPS {
            let mut point = Waypoint::new(current.x, current.y, next.direction, next.steps);
            let advance = EXPANSION_INCREMENT * k;
            match next.direction {
                Direction::Front => point.y += advance,
                Direction::Back => point.y -= advance,
                Direction::Right => point.x += advance,
                Direction::Left => point.x -= advance,
                Direction::Rest => {}
            }
            extended.waypoints.push(point);
        }
    }
    extended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(points: &[(usize, usize)]) -> Vec<Cell> {
        points.iter().map(|&(x, y)| Cell { x, y }).collect()
    }

    #[test]
    fn test_empty_raw_path_is_rejected() {
        assert_eq!(synthesize(&[], 1).unwrap_err(), MoveError::EmptyPath);
    }

    #[test]
    fn test_single_cell_path_is_a_rest_waypoint() {
        let out = synthesize(&cells(&[(3, 4)]), 1).unwrap();
        assert_eq!(out.simplified.len(), 1);
        let wp = out.simplified.waypoints[0];
        assert_eq!((wp.x, wp.y), (30, 40));
        assert_eq!(wp.direction, Direction::Rest);
        assert_eq!(wp.steps, 0);
        // No expansion for a zero-distance move.
        assert_eq!(out.extended, out.simplified);
        assert_eq!(out.final_position, Position { x: 30, y: 40 });
    }

    #[test]
    fn test_straight_corridor_yields_two_right_waypoints() {
        let out = synthesize(&cells(&[(0, 0), (1, 0), (2, 0)]), 1).unwrap();
        assert_eq!(out.simplified.len(), 2);
        for wp in &out.simplified.waypoints {
            assert_eq!(wp.direction, Direction::Right);
            assert_eq!(wp.steps, 10);
        }
        assert_eq!(out.final_position, Position { x: 20, y: 0 });
    }

    #[test]
    fn test_full_path_scales_cells_by_ten() {
        let out = synthesize(&cells(&[(0, 0), (1, 0), (1, 1)]), 1).unwrap();
        assert!(!out.full.is_empty());
        let coords: Vec<(i32, i32)> =
            out.full.waypoints.iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(coords, vec![(0, 0), (10, 0), (10, 10)]);
        // Scaling a waypoint back down recovers the original cell.
        for (wp, cell) in out.full.waypoints.iter().zip(cells(&[(0, 0), (1, 0), (1, 1)])) {
            assert_eq!((wp.x / 10) as usize, cell.x);
            assert_eq!((wp.y / 10) as usize, cell.y);
        }
    }

    #[test]
    fn test_direction_classification_per_axis() {
        let out = synthesize(&cells(&[(1, 1), (2, 1), (2, 2), (1, 2), (1, 1)]), 1).unwrap();
        let dirs: Vec<Direction> =
            out.simplified.waypoints.iter().map(|w| w.direction).collect();
        assert_eq!(
            dirs,
            vec![Direction::Right, Direction::Front, Direction::Left, Direction::Back]
        );
    }

    #[test]
    fn test_final_waypoint_matches_last_raw_cell() {
        let raw = cells(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]);
        let out = synthesize(&raw, 1).unwrap();
        assert_eq!(out.final_position, Position { x: 20, y: 20 });
        let tail = out.simplified.waypoints[out.simplified.len() - 1];
        assert_eq!((tail.x, tail.y), (20, 20));
    }

    #[test]
    fn test_stride_two_downsamples_straight_path() {
        let raw = cells(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        let out = synthesize(&raw, 2).unwrap();
        assert_eq!(out.simplified.len(), 2);
        for wp in &out.simplified.waypoints {
            assert_eq!(wp.direction, Direction::Right);
            assert_eq!(wp.steps, 20);
        }
        assert_eq!(out.final_position, Position { x: 40, y: 0 });
    }

    #[test]
    fn test_stride_over_corner_is_rectified() {
        // Stride 2 jumps straight from (0,0) to (1,1): the diagonal
        // delta snaps onto the x axis (tie prefers x).
        let raw = cells(&[(0, 0), (1, 0), (1, 1)]);
        let out = synthesize(&raw, 2).unwrap();
        assert_eq!(out.simplified.len(), 1);
        let wp = out.simplified.waypoints[0];
        assert_eq!((wp.x, wp.y), (10, 0));
        assert_eq!(wp.direction, Direction::Right);
        assert_eq!(wp.steps, 10);
    }

    #[test]
    fn test_expansion_interpolates_along_next_direction() {
        let out = synthesize(&cells(&[(0, 0), (1, 0), (2, 0)]), 1).unwrap();
        // Origin anchor + two waypoints -> two pairs, each a waypoint
        // plus 4 substeps.
        assert_eq!(out.extended.len(), 10);
        let xs: Vec<i32> = out.extended.waypoints.iter().map(|w| w.x).collect();
        assert_eq!(xs, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
        assert_eq!(out.extended.waypoints[0].direction, Direction::Rest);
        assert!(
            out.extended.waypoints[1..]
                .iter()
                .all(|w| w.direction == Direction::Right && w.y == 0)
        );
    }

    #[test]
    fn test_expansion_starts_at_origin_for_single_segment_move() {
        // A one-cell move still gets a tween from the origin.
        let out = synthesize(&cells(&[(0, 0), (1, 0)]), 1).unwrap();
        assert_eq!(out.simplified.len(), 1);
        assert_eq!(out.extended.len(), 5);
        let xs: Vec<i32> = out.extended.waypoints.iter().map(|w| w.x).collect();
        assert_eq!(xs, vec![0, 2, 4, 6, 8]);
        assert!(
            out.extended.waypoints[1..]
                .iter()
                .all(|w| w.direction == Direction::Right)
        );
        assert_eq!(out.final_position, Position { x: 10, y: 0 });
    }

    #[test]
    fn test_expansion_turns_at_corners() {
        let out = synthesize(&cells(&[(0, 0), (1, 0), (1, 1)]), 1).unwrap();
        // Anchor + right substeps, then the right waypoint + front
        // substeps.
        assert_eq!(out.extended.len(), 10);
        let coords: Vec<(i32, i32)> =
            out.extended.waypoints.iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(
            coords,
            vec![
                (0, 0),
                (2, 0),
                (4, 0),
                (6, 0),
                (8, 0),
                (10, 0),
                (10, 2),
                (10, 4),
                (10, 6),
                (10, 8),
            ]
        );
        assert!(
            out.extended.waypoints[6..]
                .iter()
                .all(|w| w.direction == Direction::Front)
        );
    }

    #[test]
    fn test_classifier_fails_closed_on_diagonal_delta() {
        let err = classify_direction(10, -10).unwrap_err();
        assert_eq!(err, MoveError::InvalidDelta { dx: 10, dy: -10 });
    }

    #[test]
    fn test_classifier_sign_pattern() {
        assert_eq!(classify_direction(0, 0).unwrap(), Direction::Rest);
        assert_eq!(classify_direction(30, 0).unwrap(), Direction::Right);
        assert_eq!(classify_direction(-10, 0).unwrap(), Direction::Left);
        assert_eq!(classify_direction(0, 20).unwrap(), Direction::Front);
        assert_eq!(classify_direction(0, -10).unwrap(), Direction::Back);
    }
}
