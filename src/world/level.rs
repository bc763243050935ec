//! Level loading
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! A level is a grid of tile codes plus the player start and zombie spawn
//! cells, all in tile coordinates.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tilemap::{TileCode, TileMap, WallQuery};

/// Built-in arena used when no level file is given
const DEFAULT_LEVEL: &str = include_str!("../../assets/levels/kino.ron");

/// Error type for level loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("level has no tiles")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("player start ({0}, {1}) is not an open tile")]
    BlockedStart(u32, u32),
    #[error("spawn point ({0}, {1}) is not an open tile")]
    BlockedSpawn(u32, u32),
}

/// Level file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    /// Row-major tile codes, `tiles[y][x]`
    pub tiles: Vec<Vec<TileCode>>,
    /// Player spawn cell
    pub player_start: (u32, u32),
    /// Cells zombies may appear in
    #[serde(default)]
    pub spawn_points: Vec<(u32, u32)>,
}

impl Level {
    /// The embedded default arena
    pub fn builtin() -> Result<Self, LevelError> {
        load_level_from_str(DEFAULT_LEVEL)
    }

    /// Build the tile map at the given scale, checking start and spawn cells
    pub fn build_map(&self, tile_size: f32) -> Result<TileMap, LevelError> {
        let map = TileMap::from_rows(&self.tiles, tile_size)?;

        let (sx, sy) = self.player_start;
        if map.tile_at(sx as i32, sy as i32) != 0 {
            return Err(LevelError::BlockedStart(sx, sy));
        }
        for &(px, py) in &self.spawn_points {
            if map.tile_at(px as i32, py as i32) != 0 {
                return Err(LevelError::BlockedSpawn(px, py));
            }
        }

        Ok(map)
    }

    /// Spawn cells as signed grid coordinates
    pub fn spawn_cells(&self) -> Vec<(i32, i32)> {
        self.spawn_points
            .iter()
            .map(|&(x, y)| (x as i32, y as i32))
            .collect()
    }
}

/// Load a level from a RON file
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, LevelError> {
    let contents = fs::read_to_string(path)?;
    load_level_from_str(&contents)
}

/// Load a level from a RON string (for embedded levels or testing)
pub fn load_level_from_str(s: &str) -> Result<Level, LevelError> {
    let level: Level = ron::from_str(s)?;
    if level.tiles.is_empty() {
        return Err(LevelError::Empty);
    }
    Ok(level)
}
