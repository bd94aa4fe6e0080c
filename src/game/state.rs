//! Authoritative world state: the player table and the movement
//! mutations applied to it.
//!
//! The world room actor owns one `WorldState` and is its only writer,
//! so these methods never see concurrent mutation. Deferred path
//! resolutions re-enter through `resolve_move`, which is guarded by
//! the per-player move sequence number: a resolution carrying an old
//! sequence number was superseded by a newer command and is discarded.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use uuid::Uuid;

use crate::config::movement::SIMPLIFICATION_STRIDE;
use crate::game::error::MoveError;
use crate::game::map::{Tile, TileMap};
use crate::game::synthesize::synthesize;
use crate::game::teleport::{Teleported, sample_zone};
use crate::game::types::{Cell, Player, Position, WaypointPath};

/// Result of applying a deferred path resolution.
#[derive(Debug, PartialEq)]
pub enum MoveOutcome {
    /// Position, zone and both path representations were published.
    Applied,
    /// The resolution was superseded (or the player left) and was
    /// discarded without touching state.
    Stale,
    /// The move was rejected; state is unchanged.
    Rejected(MoveError),
}

pub struct WorldState {
    map: Arc<TileMap>,
    players: HashMap<Uuid, Player>,
}

impl WorldState {
    pub fn new(map: Arc<TileMap>) -> Self {
        Self { map, players: HashMap::new() }
    }

    /// Spawn a new player at a random green-zone cell.
    pub fn spawn_player(&mut self, uuid: Uuid, name: String) -> Position {
        let (position, zone) = match sample_zone(&self.map, Tile::Green) {
            Ok(pos) => (pos, Tile::Green.raw()),
            Err(_) => {
                warn!("[WorldState] No green zone on this map, spawning at origin");
                (Position { x: 0, y: 0 }, 0)
            }
        };
        self.players.insert(uuid, Player::new(uuid, name, position, zone));
        position
    }

    pub fn remove_player(&mut self, uuid: &Uuid) -> Option<Player> {
        self.players.remove(uuid)
    }

    pub fn position(&self, uuid: &Uuid) -> Option<Position> {
        self.players.get(uuid).map(Player::position)
    }

    /// Snapshot of the player table for a state broadcast.
    pub fn players(&self) -> Vec<Player> {
        self.players.values().cloned().collect()
    }

    /// Begin a move: bump and return the player's sequence number.
    /// Any in-flight path resolution is superseded from this point on.
    pub fn begin_move(&mut self, uuid: &Uuid) -> Option<u64> {
        let player = self.players.get_mut(uuid)?;
        player.move_seq += 1;
        Some(player.move_seq)
    }

    /// Apply a deferred `find_path` result. Position, zone and both
    /// path representations are published together; a stale or
    /// rejected resolution changes none of them.
    pub fn resolve_move(
        &mut self,
        uuid: &Uuid,
        seq: u64,
        raw: Option<Vec<Cell>>,
    ) -> MoveOutcome {
        let Some(player) = self.players.get(uuid) else {
            return MoveOutcome::Stale;
        };
        if player.move_seq != seq {
            return MoveOutcome::Stale;
        }

        let Some(raw) = raw else {
            return MoveOutcome::Rejected(MoveError::NoPath);
        };
        let synthesized = match synthesize(&raw, SIMPLIFICATION_STRIDE) {
            Ok(out) => out,
            Err(err) => return MoveOutcome::Rejected(err),
        };

        let zone = self
            .map
            .tile(synthesized.final_position.cell())
            .map(Tile::raw)
            .unwrap_or(0);

        let Some(player) = self.players.get_mut(uuid) else {
            return MoveOutcome::Stale;
        };
        player.x = synthesized.final_position.x;
        player.y = synthesized.final_position.y;
        player.zone = zone;
        player.path = synthesized.extended;
        player.full_path = synthesized.full;
        MoveOutcome::Applied
    }

    /// Apply an accepted teleport: overwrite position and zone, clear
    /// both paths and supersede any in-flight path computation.
    pub fn apply_teleport(&mut self, uuid: &Uuid, outcome: Teleported) {
        if let Some(player) = self.players.get_mut(uuid) {
            player.move_seq += 1;
            player.x = outcome.position.x;
            player.y = outcome.position.y;
            player.zone = outcome.zone.raw();
            player.path = WaypointPath::new();
            player.full_path = WaypointPath::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(matrix: Vec<Vec<u8>>) -> WorldState {
        WorldState::new(Arc::new(TileMap::from_matrix(matrix).unwrap()))
    }

    fn corridor(state: &mut WorldState) -> Uuid {
        let uuid = Uuid::new_v4();
        state.spawn_player(uuid, "walker".to_string());
        uuid
    }

    fn raw_path() -> Vec<Cell> {
        vec![Cell { x: 0, y: 0 }, Cell { x: 1, y: 0 }, Cell { x: 2, y: 0 }]
    }

    #[test]
    fn test_spawn_lands_in_green_zone() {
        let mut matrix = vec![vec![0u8; 20]; 20];
        matrix[5][7] = 4;
        let mut state = world(matrix);
        let uuid = Uuid::new_v4();
        let pos = state.spawn_player(uuid, "newcomer".to_string());
        assert_eq!(pos, Position { x: 70, y: 50 });
        assert_eq!(state.position(&uuid), Some(pos));
    }

    #[test]
    fn test_resolution_with_current_seq_is_applied() {
        let mut state = world(vec![vec![0u8; 10]; 10]);
        let uuid = corridor(&mut state);
        let seq = state.begin_move(&uuid).unwrap();

        assert_eq!(state.resolve_move(&uuid, seq, Some(raw_path())), MoveOutcome::Applied);
        assert_eq!(state.position(&uuid), Some(Position { x: 20, y: 0 }));
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let mut state = world(vec![vec![0u8; 10]; 10]);
        let uuid = corridor(&mut state);
        let before = state.position(&uuid).unwrap();

        // Two commands in flight: the first resolution arrives late.
        let old_seq = state.begin_move(&uuid).unwrap();
        let _new_seq = state.begin_move(&uuid).unwrap();

        assert_eq!(state.resolve_move(&uuid, old_seq, Some(raw_path())), MoveOutcome::Stale);
        // Position and paths are untouched by the superseded result.
        assert_eq!(state.position(&uuid), Some(before));
        let player = &state.players()[0];
        assert!(player.path.is_empty());
        assert!(player.full_path.is_empty());
    }

    #[test]
    fn test_teleport_supersedes_inflight_path() {
        let mut matrix = vec![vec![0u8; 10]; 10];
        matrix[9][9] = 3;
        let mut state = world(matrix);
        let uuid = corridor(&mut state);

        let seq = state.begin_move(&uuid).unwrap();
        state.apply_teleport(
            &uuid,
            Teleported { zone: Tile::Red, position: Position { x: 90, y: 90 } },
        );

        // The walk resolves after the teleport: it must not win.
        assert_eq!(state.resolve_move(&uuid, seq, Some(raw_path())), MoveOutcome::Stale);
        assert_eq!(state.position(&uuid), Some(Position { x: 90, y: 90 }));
    }

    #[test]
    fn test_no_path_rejection_leaves_state_unchanged() {
        let mut state = world(vec![vec![0u8; 10]; 10]);
        let uuid = corridor(&mut state);
        let before = state.position(&uuid).unwrap();

        let seq = state.begin_move(&uuid).unwrap();
        assert_eq!(
            state.resolve_move(&uuid, seq, None),
            MoveOutcome::Rejected(MoveError::NoPath)
        );
        assert_eq!(state.position(&uuid), Some(before));
    }

    #[test]
    fn test_resolution_for_departed_player_is_discarded() {
        let mut state = world(vec![vec![0u8; 10]; 10]);
        let uuid = corridor(&mut state);
        let seq = state.begin_move(&uuid).unwrap();
        state.remove_player(&uuid);

        assert_eq!(state.resolve_move(&uuid, seq, Some(raw_path())), MoveOutcome::Stale);
    }
}
