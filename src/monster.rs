use crate::render::cull::intersects;
use crate::spatial::tile_bounds;
use crate::sprite::{SpriteRegion, SpriteSheet};
use macroquad::prelude::*;

/// Everything needed to create a monster, emitted while the world is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterSpawn {
    /// Grid cell.
    pub position: IVec2,
    /// Floor.
    pub depth: i32,
    /// Source rectangle in the shared sheet.
    pub sprite: SpriteRegion,
    /// Damage dealt per hit.
    pub strength: f32,
    /// Starting health.
    pub health: f32,
}

/// Receives monster spawns during world construction.
pub trait MonsterRegistry {
    /// Takes ownership of one spawn.
    fn register(&mut self, spawn: MonsterSpawn);
}

impl MonsterRegistry for Vec<MonsterSpawn> {
    fn register(&mut self, spawn: MonsterSpawn) {
        self.push(spawn);
    }
}

/// A live monster.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct Monster {
    pub position: IVec2,
    pub depth: i32,
    pub sprite: SpriteRegion,
    pub strength: f32,
    health: f32,
}

impl Monster {
    /// A monster at full starting health.
    pub fn from_spawn(spawn: MonsterSpawn) -> Self {
        Self {
            position: spawn.position,
            depth: spawn.depth,
            sprite: spawn.sprite,
            strength: spawn.strength,
            health: spawn.health,
        }
    }

    /// Remaining health; zero or below means dead.
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Applies `damage`; returns `true` once health reaches zero.
    pub fn take_damage(&mut self, damage: f32) -> bool {
        self.health -= damage;
        self.health <= 0.0
    }
}

/// Owns every live monster and tracks which floor is shown.
#[derive(Debug, Default)]
pub struct MonsterManager {
    monsters: Vec<Monster>,
    active_depth: i32,
}

impl MonsterRegistry for MonsterManager {
    fn register(&mut self, spawn: MonsterSpawn) {
        self.monsters.push(Monster::from_spawn(spawn));
    }
}

impl MonsterManager {
    /// A manager with no monsters, showing floor 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live monsters on every floor.
    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    /// Whether every monster is dead.
    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Floor whose monsters are drawn.
    pub fn active_depth(&self) -> i32 {
        self.active_depth
    }

    /// Switches the drawn floor.
    pub fn set_active_depth(&mut self, depth: i32) {
        self.active_depth = depth;
    }

    /// Monster on `cell` of floor `depth`.
    pub fn monster_at(&self, cell: IVec2, depth: i32) -> Option<&Monster> {
        self.monsters
            .iter()
            .find(|m| m.position == cell && m.depth == depth)
    }

    /// Damages the monster on `cell`. `None` when nothing is there,
    /// otherwise whether the hit killed (and removed) it.
    pub fn attack(&mut self, cell: IVec2, depth: i32, damage: f32) -> Option<bool> {
        let idx = self
            .monsters
            .iter()
            .position(|m| m.position == cell && m.depth == depth)?;
        let killed = self.monsters[idx].take_damage(damage);
        if killed {
            let dead = self.monsters.remove(idx);
            log::info!("monster at {} (depth {}) killed", dead.position, dead.depth);
        }
        Some(killed)
    }

    /// Removes and returns the monster on `cell` of floor `depth`.
    pub fn remove(&mut self, cell: IVec2, depth: i32) -> Option<Monster> {
        let idx = self
            .monsters
            .iter()
            .position(|m| m.position == cell && m.depth == depth)?;
        Some(self.monsters.remove(idx))
    }

    /// Monsters on the active floor.
    pub fn active(&self) -> impl Iterator<Item = &Monster> {
        let depth = self.active_depth;
        self.monsters.iter().filter(move |m| m.depth == depth)
    }

    /// Draws active monsters that overlap `view`.
    pub fn draw(&self, sheet: &SpriteSheet, view: Rect) {
        for m in self.active() {
            if intersects(&tile_bounds(m.position), &view) {
                sheet.draw(&m.sprite, m.position);
            }
        }
    }
}
