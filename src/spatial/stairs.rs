use crate::spatial::CellKey;
use macroquad::prelude::*;
use std::collections::HashMap;

/// Stairs: cells that shift the active depth by a signed delta.
#[derive(Debug, Default)]
pub struct DepthTransitionIndex {
    deltas: HashMap<CellKey, i32>,
}

impl DepthTransitionIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins.
    pub(crate) fn insert(&mut self, cell: IVec2, depth: i32, delta: i32) {
        self.deltas.insert(CellKey::new(cell, depth), delta);
    }

    /// Depth delta of the stairs at `cell` on floor `depth`, if any.
    #[inline]
    pub fn delta_at(&self, cell: IVec2, depth: i32) -> Option<i32> {
        self.deltas.get(&CellKey::new(cell, depth)).copied()
    }

    /// Number of distinct cells.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Whether the index holds no cells.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_entries_replace_earlier_ones() {
        let mut stairs = DepthTransitionIndex::new();
        stairs.insert(ivec2(4, 4), 0, 1);
        stairs.insert(ivec2(4, 4), 0, 2);
        stairs.insert(ivec2(4, 4), 1, -1);

        assert_eq!(stairs.delta_at(ivec2(4, 4), 0), Some(2));
        assert_eq!(stairs.delta_at(ivec2(4, 4), 1), Some(-1));
        assert_eq!(stairs.delta_at(ivec2(4, 4), 2), None);
        assert_eq!(stairs.len(), 2);
    }
}
