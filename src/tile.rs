use crate::spatial::{tile_bounds, GridKey};
use crate::sprite::{SpriteRegion, SpriteSheet};
use macroquad::prelude::*;

/// One rendered grid cell on a given layer and floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Grid cell.
    pub position: IVec2,
    /// Global layer counter at placement time.
    pub layer: u32,
    /// Floor.
    pub depth: i32,
    /// Source rectangle in the shared sheet.
    pub sprite: SpriteRegion,
}

impl Tile {
    /// A tile on `layer` of floor `depth`.
    pub fn new(position: IVec2, layer: u32, depth: i32, sprite: SpriteRegion) -> Self {
        Self {
            position,
            layer,
            depth,
            sprite,
        }
    }

    /// Index key: cell, layer and depth.
    #[inline]
    pub fn key(&self) -> GridKey {
        GridKey::new(self.position, self.layer, self.depth)
    }

    /// World pixel rectangle covered by the tile.
    #[inline]
    pub fn bounds(&self) -> Rect {
        tile_bounds(self.position)
    }

    /// Draws the tile at its cell.
    pub fn draw(&self, sheet: &SpriteSheet) {
        sheet.draw(&self.sprite, self.position);
    }
}
