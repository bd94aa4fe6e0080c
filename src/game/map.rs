//! Tile classification map.
//!
//! Loaded once at startup from a JSON file produced offline from map
//! art, immutable afterwards. Answers walkability and zone queries for
//! the validator, the pathfinder and the teleporter.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::config::world::CELL_SIZE;
use crate::game::error::MapError;
use crate::game::types::Cell;

/// Tile classification values as stored in the map file.
/// 0 = neutral, 1 = obstacle, 2..5 = the named zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Neutral,
    Obstacle,
    Yellow,
    Red,
    Green,
    Blue,
}

impl Tile {
    pub fn from_raw(value: u8) -> Option<Tile> {
        match value {
            0 => Some(Tile::Neutral),
            1 => Some(Tile::Obstacle),
            2 => Some(Tile::Yellow),
            3 => Some(Tile::Red),
            4 => Some(Tile::Green),
            5 => Some(Tile::Blue),
            _ => None,
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Tile::Neutral => 0,
            Tile::Obstacle => 1,
            Tile::Yellow => 2,
            Tile::Red => 3,
            Tile::Green => 4,
            Tile::Blue => 5,
        }
    }

    /// Resolve a symbolic zone label from a teleport request.
    /// Only the four colored zones are valid teleport targets.
    pub fn from_zone_label(label: &str) -> Option<Tile> {
        match label {
            "yellow" => Some(Tile::Yellow),
            "red" => Some(Tile::Red),
            "green" => Some(Tile::Green),
            "blue" => Some(Tile::Blue),
            _ => None,
        }
    }
}

/// On-disk map format: a single `data` field holding the tile matrix.
#[derive(Deserialize)]
struct MapFile {
    data: Vec<Vec<u8>>,
}

/// Immutable rectangular grid of tile classifications, indexed
/// `[y][x]`, plus a per-zone cell index built at load time so zone
/// sampling always terminates.
#[derive(Debug, Clone)]
pub struct TileMap {
    tiles: Vec<Vec<Tile>>,
    rows: usize,
    cols: usize,
    zone_index: HashMap<Tile, Vec<Cell>>,
}

impl TileMap {
    /// Load the map from its JSON file. Any failure here is fatal to
    /// the caller: the server must not run without a valid map.
    pub fn load(path: impl AsRef<Path>) -> Result<TileMap, MapError> {
        let raw = fs::read_to_string(path)?;
        let file: MapFile = serde_json::from_str(&raw)?;
        let map = TileMap::from_matrix(file.data)?;
        info!(
            "[TileMap] Loaded {}x{} cells ({} zone-indexed)",
            map.cols,
            map.rows,
            map.zone_index.values().map(Vec::len).sum::<usize>()
        );
        Ok(map)
    }

    pub fn from_matrix(matrix: Vec<Vec<u8>>) -> Result<TileMap, MapError> {
        if matrix.is_empty() || matrix[0].is_empty() {
            return Err(MapError::Empty);
        }
        let cols = matrix[0].len();
        let mut tiles = Vec::with_capacity(matrix.len());
        let mut zone_index: HashMap<Tile, Vec<Cell>> = HashMap::new();
        for (y, row) in matrix.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MapError::NotRectangular { row: y, got: row.len(), expected: cols });
            }
            let mut tile_row = Vec::with_capacity(cols);
            for (x, value) in row.into_iter().enumerate() {
                let tile = Tile::from_raw(value)
                    .ok_or(MapError::UnknownTile { value, x, y })?;
                if !matches!(tile, Tile::Neutral | Tile::Obstacle) {
                    zone_index.entry(tile).or_default().push(Cell { x, y });
                }
                tile_row.push(tile);
            }
            tiles.push(tile_row);
        }
        let rows = tiles.len();
        Ok(TileMap { tiles, rows, cols, zone_index })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Exclusive upper bound of world-space x coordinates.
    pub fn max_x(&self) -> i32 {
        self.cols as i32 * CELL_SIZE
    }

    /// Exclusive upper bound of world-space y coordinates.
    pub fn max_y(&self) -> i32 {
        self.rows as i32 * CELL_SIZE
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.tiles.get(cell.y).and_then(|row| row.get(cell.x)).copied()
    }

    /// Whether the cell's classification is in the given allow-list.
    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, cell: Cell, allowed: &[u8]) -> bool {
        self.tile(cell)
            .map(|t| allowed.contains(&t.raw()))
            .unwrap_or(false)
    }

    /// All cells carrying the given zone classification.
    pub fn cells_of(&self, zone: Tile) -> &[Cell] {
        self.zone_index.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }
}
