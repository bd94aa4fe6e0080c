//! Zone teleportation.
//!
//! Rejection-samples a random walkable coordinate inside a requested
//! zone for instant relocation. Sampling is bounded: after the attempt
//! cap it falls back to the per-zone cell index built at map load, so
//! a missing or vanishingly small zone can never hang the room.

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::config::movement::TELEPORT_MAX_ATTEMPTS;
use crate::game::error::MoveError;
use crate::game::map::{Tile, TileMap};
use crate::game::types::{Cell, Position};

/// Result of an accepted teleport: the resolved zone classification
/// and the sampled landing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teleported {
    pub zone: Tile,
    pub position: Position,
}

/// Teleport to a random cell of the zone named by `label`.
pub fn teleport(map: &TileMap, label: &str) -> Result<Teleported, MoveError> {
    let zone = Tile::from_zone_label(label)
        .ok_or_else(|| MoveError::UnknownZone(label.to_string()))?;
    let position = sample_zone(map, zone)?;
    Ok(Teleported { zone, position })
}

/// Sample a random grid-quantized position whose tile carries the
/// given zone classification.
pub fn sample_zone(map: &TileMap, zone: Tile) -> Result<Position, MoveError> {
    let mut rng = rand::rng();
    for _ in 0..TELEPORT_MAX_ATTEMPTS {
        let cell = Cell {
            x: rng.random_range(0..map.cols()),
            y: rng.random_range(0..map.rows()),
        };
        if map.tile(cell) == Some(zone) {
            return Ok(cell.position());
        }
    }
    // The zone is tiny or absent; the index settles it either way.
    map.cells_of(zone)
        .iter()
        .choose(&mut rng)
        .map(|c| c.position())
        .ok_or(MoveError::ZoneUnreachable)
}
