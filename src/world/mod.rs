//! World module - tile-grid level and its inhabitants
//!
//! - Immutable tile map shared by movement and the raycaster
//! - RON level files
//! - Zombie and bullet actors, wave progression

mod actor;
mod grid;
mod level;
mod tilemap;

pub use actor::*;
pub use grid::*;
pub use level::*;
pub use tilemap::*;
