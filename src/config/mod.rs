/// Main configuration module.
///
/// Re-exports submodules for world and movement configuration.
pub mod movement;
pub mod world;
