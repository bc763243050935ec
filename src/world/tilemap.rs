//! Static tile grid
//!
//! Fixed width x height array of tile codes. `0` is open floor, any other
//! code is a wall whose value picks its render style. Everything outside the
//! grid reads as a wall, so neither rays nor actors can leave the map.

use super::LevelError;

/// Raw tile code stored in the grid
pub type TileCode = u8;

/// Open floor
pub const OPEN: TileCode = 0;

/// Code reported for any cell outside the grid
pub const BOUNDARY_WALL: TileCode = 1;

/// Point queries against solid geometry.
///
/// Player movement, actor movement and ray termination all go through
/// `is_wall`, so they always agree on what is solid.
pub trait WallQuery {
    /// True if the world-space point lies in a wall cell (or off the map)
    fn is_wall(&self, x: f32, y: f32) -> bool;

    /// Raw code of a grid cell, `BOUNDARY_WALL` when out of range
    fn tile_at(&self, grid_x: i32, grid_y: i32) -> TileCode;
}

/// Immutable tile grid with its world-space scale
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: f32,
    tiles: Vec<TileCode>,
}

impl TileMap {
    /// Build from row-major rows; all rows must share the first row's width
    pub fn from_rows(rows: &[Vec<TileCode>], tile_size: f32) -> Result<Self, LevelError> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 {
            return Err(LevelError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(LevelError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            tiles.extend_from_slice(cells);
        }

        Ok(Self {
            width,
            height: rows.len(),
            tile_size,
            tiles,
        })
    }

    /// Open room with a one-tile solid border
    #[cfg(test)]
    pub fn bordered(width: usize, height: usize, tile_size: f32) -> Self {
        let mut tiles = vec![OPEN; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    tiles[y * width + x] = BOUNDARY_WALL;
                }
            }
        }
        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    /// Copy of this map with one cell replaced
    #[cfg(test)]
    pub fn with_tile(mut self, grid_x: usize, grid_y: usize, code: TileCode) -> Self {
        if grid_x < self.width && grid_y < self.height {
            self.tiles[grid_y * self.width + grid_x] = code;
        }
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Grid cell containing a world-space point (floor division by tile size)
    pub fn cell_of(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.tile_size).floor() as i32,
            (y / self.tile_size).floor() as i32,
        )
    }

    /// World-space center of a grid cell
    pub fn cell_center(&self, grid_x: i32, grid_y: i32) -> (f32, f32) {
        (
            (grid_x as f32 + 0.5) * self.tile_size,
            (grid_y as f32 + 0.5) * self.tile_size,
        )
    }

    pub fn in_bounds(&self, grid_x: i32, grid_y: i32) -> bool {
        grid_x >= 0
            && grid_y >= 0
            && (grid_x as usize) < self.width
            && (grid_y as usize) < self.height
    }

    /// All open cells, row-major
    pub fn open_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, code)| **code == OPEN)
            .map(move |(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
    }
}

impl WallQuery for TileMap {
    fn is_wall(&self, x: f32, y: f32) -> bool {
        let (gx, gy) = self.cell_of(x, y);
        self.tile_at(gx, gy) != OPEN
    }

    fn tile_at(&self, grid_x: i32, grid_y: i32) -> TileCode {
        if self.in_bounds(grid_x, grid_y) {
            self.tiles[grid_y as usize * self.width + grid_x as usize]
        } else {
            BOUNDARY_WALL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bordered_layout() {
        let map = TileMap::bordered(20, 15, 64.0);
        assert_eq!(map.tile_at(0, 0), BOUNDARY_WALL);
        assert_eq!(map.tile_at(19, 7), BOUNDARY_WALL);
        assert_eq!(map.tile_at(3, 3), OPEN);
        assert!(!map.is_wall(3.0 * 64.0, 3.0 * 64.0));
        assert!(map.is_wall(19.0 * 64.0, 3.0 * 64.0));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let map = TileMap::bordered(20, 15, 64.0);
        assert!(map.is_wall(-10.0, -10.0));
        assert!(map.is_wall(6400.0, 6400.0));
        assert_eq!(map.tile_at(-1, 5), BOUNDARY_WALL);
        assert_eq!(map.tile_at(5, 15), BOUNDARY_WALL);
    }

    #[test]
    fn test_negative_fraction_floors_outside() {
        // -0.5 floors to cell -1, not cell 0
        let map = TileMap::from_rows(&[vec![0, 0], vec![0, 0]], 1.0).unwrap();
        assert!(!map.is_wall(0.5, 0.5));
        assert!(map.is_wall(-0.5, 0.5));
    }

    #[test]
    fn test_wall_style_codes_preserved() {
        let map = TileMap::bordered(5, 5, 64.0).with_tile(2, 2, 3);
        assert_eq!(map.tile_at(2, 2), 3);
        assert!(map.is_wall(2.5 * 64.0, 2.5 * 64.0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![1, 1, 1], vec![1, 0]];
        assert!(matches!(
            TileMap::from_rows(&rows, 64.0),
            Err(LevelError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(TileMap::from_rows(&[], 64.0), Err(LevelError::Empty)));
    }

    #[test]
    fn test_open_cells() {
        let map = TileMap::bordered(4, 3, 1.0);
        let open: Vec<_> = map.open_cells().collect();
        assert_eq!(open, vec![(1, 1), (2, 1)]);
    }

    proptest! {
        #[test]
        fn prop_is_wall_is_stable(x in -200.0f32..1500.0, y in -200.0f32..1100.0) {
            let map = TileMap::bordered(20, 15, 64.0).with_tile(7, 7, 2);
            let first = map.is_wall(x, y);
            for _ in 0..4 {
                prop_assert_eq!(map.is_wall(x, y), first);
            }
        }

        #[test]
        fn prop_outside_grid_is_wall(gx in -50i32..70, gy in -50i32..70) {
            let map = TileMap::bordered(20, 15, 64.0);
            if !map.in_bounds(gx, gy) {
                prop_assert_eq!(map.tile_at(gx, gy), BOUNDARY_WALL);
                let (cx, cy) = map.cell_center(gx, gy);
                prop_assert!(map.is_wall(cx, cy));
            }
        }
    }
}
