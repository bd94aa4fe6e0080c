//! Game logic root module.
//!
//! Pure movement logic, independent of the actix layer:
//! - Tile map loading and queries
//! - Move request validation (quantization, anti-cheat distance check)
//! - Grid pathfinding behind the `PathOracle` contract
//! - Trajectory synthesis (simplification, direction classification,
//!   interpolation)
//! - Zone teleportation
//! - The authoritative player table and its mutation rules

pub mod error;
pub mod map;
pub mod pathfind;
pub mod state;
pub mod synthesize;
pub mod teleport;
pub mod types;
pub mod validate;
