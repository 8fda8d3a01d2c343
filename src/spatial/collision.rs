use crate::spatial::CellKey;
use macroquad::prelude::*;
use std::collections::HashSet;

/// Cells marked impassable by `Collider` entities.
#[derive(Debug, Default)]
pub struct CollisionIndex {
    blocked: HashSet<CellKey>,
}

impl CollisionIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, cell: IVec2, depth: i32) {
        self.blocked.insert(CellKey::new(cell, depth));
    }

    /// Whether `cell` on floor `depth` holds a collider.
    #[inline]
    pub fn is_blocked(&self, cell: IVec2, depth: i32) -> bool {
        self.blocked.contains(&CellKey::new(cell, depth))
    }

    /// Number of distinct cells.
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether the index holds no cells.
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}
