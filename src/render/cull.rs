use crate::spatial::{world_to_grid, ChunkCoord, CHUNK_CELLS};
use crate::tile::Tile;
use macroquad::prelude::*;

/// Strict overlap test; rectangles that only share an edge do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Chunk coordinates touched by a world-space view rectangle, row-major.
pub fn visible_chunk_coords_rect(view: Rect) -> Vec<ChunkCoord> {
    let min = world_to_grid(vec2(view.x, view.y));
    let max = world_to_grid(vec2(view.x + view.w, view.y + view.h));

    let mut cx_min = min.x.div_euclid(CHUNK_CELLS);
    let mut cy_min = min.y.div_euclid(CHUNK_CELLS);
    let mut cx_max = max.x.div_euclid(CHUNK_CELLS);
    let mut cy_max = max.y.div_euclid(CHUNK_CELLS);

    if cx_min > cx_max {
        std::mem::swap(&mut cx_min, &mut cx_max);
    }
    if cy_min > cy_max {
        std::mem::swap(&mut cy_min, &mut cy_max);
    }

    let mut coords = Vec::new();
    for cy in cy_min..=cy_max {
        for cx in cx_min..=cx_max {
            coords.push(ChunkCoord { x: cx, y: cy });
        }
    }
    coords
}

/// Orders tiles for compositing: by depth, then layer counter, then row-major
/// cell so equal-layer tiles always draw in the same order.
pub fn sort_for_drawing(tiles: &mut [&Tile]) {
    tiles.sort_unstable_by_key(|t| (t.depth, t.layer, t.position.y, t.position.x));
}

/// Camera rectangle in world pixels for a camera centred on `target`.
pub fn camera_bounds(target: Vec2, zoom: f32, screen: Vec2) -> Rect {
    let size = screen / zoom;
    Rect::new(target.x - size.x / 2.0, target.y - size.y / 2.0, size.x, size.y)
}
