use crate::render::cull::{intersects, visible_chunk_coords_rect};
use crate::spatial::{GridKey, CHUNK_CELLS};
use crate::tile::Tile;
use macroquad::prelude::*;
use std::collections::{HashMap, HashSet};

/// Coordinate of a `CHUNK_CELLS`-square bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

/// Chunk containing `cell`; negative cells round down.
#[inline]
pub fn cell_to_chunk(cell: IVec2) -> ChunkCoord {
    ChunkCoord {
        x: cell.x.div_euclid(CHUNK_CELLS),
        y: cell.y.div_euclid(CHUNK_CELLS),
    }
}

/// Every placed tile, keyed by `(x, y, layer, depth)` and bucketed by chunk.
#[derive(Debug, Default)]
pub struct GridIndex {
    tiles: HashMap<GridKey, Tile>,
    cells: HashSet<IVec2>,
    buckets: HashMap<ChunkCoord, Vec<GridKey>>,
}

impl GridIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `tile` under its own key. Returns `false`, leaving the
    /// existing tile in place, when the key is already taken.
    pub fn insert(&mut self, tile: Tile) -> bool {
        let key = tile.key();
        if self.tiles.contains_key(&key) {
            return false;
        }
        let cell = key.cell();
        self.cells.insert(cell);
        self.buckets
            .entry(cell_to_chunk(cell))
            .or_insert_with(Vec::new)
            .push(key);
        self.tiles.insert(key, tile);
        true
    }

    /// Tile stored under `key`.
    pub fn get(&self, key: &GridKey) -> Option<&Tile> {
        self.tiles.get(key)
    }

    /// Whether any tile, on any layer or depth, occupies `cell`.
    #[inline]
    pub fn contains_cell(&self, cell: IVec2) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile has been inserted.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Tiles on `depth` whose bounds intersect `view` (world pixels).
    /// Iteration order is unspecified.
    pub fn visible<'g>(&'g self, view: Rect, depth: i32) -> impl Iterator<Item = &'g Tile> + 'g {
        visible_chunk_coords_rect(view)
            .into_iter()
            .filter_map(move |cc| self.buckets.get(&cc))
            .flatten()
            .filter_map(move |key| self.tiles.get(key))
            .filter(move |tile| tile.depth == depth && intersects(&tile.bounds(), &view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SpriteRegion;

    fn tile(x: i32, y: i32, layer: u32, depth: i32, src_x: f32) -> Tile {
        Tile::new(ivec2(x, y), layer, depth, SpriteRegion::from_pixels(vec2(src_x, 0.0)))
    }

    #[test]
    fn first_insert_wins() {
        let mut index = GridIndex::new();
        assert!(index.insert(tile(1, 1, 0, 0, 0.0)));
        assert!(!index.insert(tile(1, 1, 0, 0, 64.0)));

        let kept = index.get(&GridKey::new(ivec2(1, 1), 0, 0)).expect("tile");
        assert_eq!(kept.sprite, SpriteRegion::from_pixels(vec2(0.0, 0.0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn layer_and_depth_are_part_of_the_key() {
        let mut index = GridIndex::new();
        assert!(index.insert(tile(1, 1, 0, 0, 0.0)));
        assert!(index.insert(tile(1, 1, 1, 0, 0.0)));
        assert!(index.insert(tile(1, 1, 0, 1, 0.0)));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn contains_cell_ignores_layer_and_depth() {
        let mut index = GridIndex::new();
        index.insert(tile(-3, 4, 7, -2, 0.0));
        assert!(index.contains_cell(ivec2(-3, 4)));
        assert!(!index.contains_cell(ivec2(4, -3)));
    }

    #[test]
    fn visible_filters_by_view_and_depth() {
        let mut index = GridIndex::new();
        index.insert(tile(0, 0, 0, 0, 0.0));
        index.insert(tile(1, 0, 0, 1, 0.0));
        index.insert(tile(40, 40, 0, 0, 0.0)); // different chunk, outside the view
        index.insert(tile(-1, -1, 0, 0, 0.0));

        let view = Rect::new(-16.0, -16.0, 80.0, 40.0);
        let mut cells: Vec<IVec2> = index.visible(view, 0).map(|t| t.position).collect();
        cells.sort_by_key(|c| (c.y, c.x));
        assert_eq!(cells, vec![ivec2(-1, -1), ivec2(0, 0)]);

        let deeper: Vec<IVec2> = index.visible(view, 1).map(|t| t.position).collect();
        assert_eq!(deeper, vec![ivec2(1, 0)]);
    }

    #[test]
    fn visible_spans_multiple_chunks() {
        let mut index = GridIndex::new();
        index.insert(tile(CHUNK_CELLS - 1, 0, 0, 0, 0.0));
        index.insert(tile(CHUNK_CELLS, 0, 0, 0, 0.0));

        let x = ((CHUNK_CELLS - 1) * 32) as f32;
        let view = Rect::new(x + 8.0, 8.0, 40.0, 8.0);
        assert_eq!(index.visible(view, 0).count(), 2);
    }
}
