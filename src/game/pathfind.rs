//! Grid pathfinding behind the `PathOracle` contract.
//!
//! The solver is a pluggable seam: the world room only depends on the
//! trait, so the search algorithm can change without touching the
//! move pipeline. The default implementation runs A* over an immutable
//! map snapshot with cardinal adjacency only, which guarantees the
//! axis-aligned steps the path synthesizer's direction classifier
//! requires.

use std::sync::Arc;

use pathfinding::prelude::astar;

use crate::game::map::TileMap;
use crate::game::types::Cell;
use crate::game::validate::manhattan;

/// Contract of the pathfinding solver.
///
/// Returns `None` when no route exists. A zero-length route (target
/// equals origin) is valid and returns the single origin cell, so
/// callers can distinguish "no route" from "already there".
pub trait PathOracle: Send + Sync {
    fn find_path(&self, origin: Cell, target: Cell) -> Option<Vec<Cell>>;
}

/// A* solver over a shared immutable map snapshot. Traversability is
/// decided by the configured tile allow-list, not hard-coded, so
/// different rooms can vary their walkability policy.
pub struct GridSolver {
    map: Arc<TileMap>,
    allowed: Vec<u8>,
}

impl GridSolver {
    pub fn new(map: Arc<TileMap>, allowed: &[u8]) -> Self {
        Self { map, allowed: allowed.to_vec() }
    }

    fn walkable(&self, cell: Cell) -> bool {
        self.map.is_walkable(cell, &self.allowed)
    }

    /// Cardinal neighbors only. Diagonal adjacency would hand the
    /// synthesizer deltas its classifier must reject.
    fn neighbors(&self, cell: Cell) -> Vec<(Cell, u32)> {
        let mut out = Vec::with_capacity(4);
        if cell.x > 0 {
            out.push(Cell { x: cell.x - 1, y: cell.y });
        }
        if cell.y > 0 {
            out.push(Cell { x: cell.x, y: cell.y - 1 });
        }
        out.push(Cell { x: cell.x + 1, y: cell.y });
        out.push(Cell { x: cell.x, y: cell.y + 1 });
        out.retain(|c| self.walkable(*c));
        out.into_iter().map(|c| (c, 1)).collect()
    }
}

impl PathOracle for GridSolver {
    fn find_path(&self, origin: Cell, target: Cell) -> Option<Vec<Cell>> {
        if !self.walkable(origin) || !self.walkable(target) {
            return None;
        }
        if origin == target {
            return Some(vec![origin]);
        }
        astar(
            &origin,
            |c| self.neighbors(*c),
            |c| manhattan(*c, target),
            |c| *c == target,
        )
        .map(|(path, _cost)| path)
    }
}
