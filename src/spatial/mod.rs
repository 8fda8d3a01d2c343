//! Grid coordinates and the static lookup tables built from a level document.

mod collision;
mod index;
mod stairs;

pub use collision::CollisionIndex;
pub use index::{ChunkCoord, GridIndex};
pub use stairs::DepthTransitionIndex;

use macroquad::prelude::*;

/// Side length of one grid cell in world pixels.
pub const PIXELS_PER_UNIT: i32 = 32;

/// Side length of one spatial bucket, in grid cells.
pub const CHUNK_CELLS: i32 = 16;

/// Unique slot of a placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    /// Cell column.
    pub x: i32,
    /// Cell row.
    pub y: i32,
    /// Global layer counter; higher draws later.
    pub layer: u32,
    /// Floor.
    pub depth: i32,
}

impl GridKey {
    /// Key for `cell` on `layer` of floor `depth`.
    #[inline]
    pub fn new(cell: IVec2, layer: u32, depth: i32) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            layer,
            depth,
        }
    }

    /// The grid cell, without layer or depth.
    #[inline]
    pub fn cell(self) -> IVec2 {
        ivec2(self.x, self.y)
    }
}

/// A grid cell on a particular floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    /// Cell column.
    pub x: i32,
    /// Cell row.
    pub y: i32,
    /// Floor.
    pub depth: i32,
}

impl CellKey {
    /// Key for `cell` on floor `depth`.
    #[inline]
    pub fn new(cell: IVec2, depth: i32) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            depth,
        }
    }
}

/// Converts a world pixel position to the grid cell containing it.
///
/// Rounds toward negative infinity, so `(-1, -1)` lands in cell `(-1, -1)`.
#[inline]
pub fn world_to_grid(p: Vec2) -> IVec2 {
    let ppu = PIXELS_PER_UNIT as f32;
    ivec2((p.x / ppu).floor() as i32, (p.y / ppu).floor() as i32)
}

/// Top-left world pixel of a grid cell.
#[inline]
pub fn grid_to_world(cell: IVec2) -> Vec2 {
    let ppu = PIXELS_PER_UNIT as f32;
    vec2(cell.x as f32 * ppu, cell.y as f32 * ppu)
}

/// World pixel rectangle covered by a grid cell.
#[inline]
pub fn tile_bounds(cell: IVec2) -> Rect {
    let origin = grid_to_world(cell);
    let size = PIXELS_PER_UNIT as f32;
    Rect::new(origin.x, origin.y, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_grid_floors_negative_positions() {
        assert_eq!(world_to_grid(vec2(-1.0, -1.0)), ivec2(-1, -1));
        assert_eq!(world_to_grid(vec2(-32.0, -33.0)), ivec2(-1, -2));
        assert_eq!(world_to_grid(vec2(-0.5, 0.5)), ivec2(-1, 0));
    }

    #[test]
    fn world_to_grid_floors_positive_positions() {
        assert_eq!(world_to_grid(vec2(0.0, 0.0)), ivec2(0, 0));
        assert_eq!(world_to_grid(vec2(31.9, 32.0)), ivec2(0, 1));
        assert_eq!(world_to_grid(vec2(100.0, 64.0)), ivec2(3, 2));
    }

    #[test]
    fn tile_bounds_cover_one_cell() {
        assert_eq!(tile_bounds(ivec2(2, -1)), Rect::new(64.0, -32.0, 32.0, 32.0));
        assert_eq!(world_to_grid(grid_to_world(ivec2(-3, 7))), ivec2(-3, 7));
    }

    #[test]
    fn far_cells_do_not_overflow() {
        let far = grid_to_world(ivec2(i32::MAX, i32::MIN));
        assert!(far.x > 0.0 && far.y < 0.0);
        let cell = world_to_grid(vec2(1.0e12, -1.0e12));
        assert_eq!(tile_bounds(cell).w, 32.0);
    }

    #[test]
    fn keys_compare_every_component() {
        let a = GridKey::new(ivec2(1, 2), 0, 0);
        assert_ne!(a, GridKey::new(ivec2(1, 2), 1, 0));
        assert_ne!(a, GridKey::new(ivec2(1, 2), 0, 1));
        assert_eq!(a.cell(), ivec2(1, 2));
        assert_ne!(CellKey::new(ivec2(1, 2), 0), CellKey::new(ivec2(1, 2), -1));
    }
}
