use crate::monster::MonsterManager;
use crate::sprite::{SpriteRegion, SpriteSheet};
use crate::world::World;
use macroquad::prelude::*;

/// One of the four grid steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset; `Up` is negative y.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => ivec2(0, -1),
            Direction::Down => ivec2(0, 1),
            Direction::Left => ivec2(-1, 0),
            Direction::Right => ivec2(1, 0),
        }
    }
}

/// Result of [`Player::try_step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The player moved onto the target cell.
    Moved,
    /// A collider is in the way.
    Blocked,
    /// A monster was hit instead of moving.
    Attacked {
        /// Whether the hit killed it.
        killed: bool,
    },
}

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    /// Grid cell.
    pub position: IVec2,
    /// Floor the player is on.
    pub depth: i32,
    /// Damage dealt per hit.
    pub strength: f32,
    /// Source rectangle in the shared sheet.
    pub sprite: SpriteRegion,
}

impl Player {
    /// A player on floor 0.
    pub fn new(position: IVec2, strength: f32, sprite: SpriteRegion) -> Self {
        Self {
            position,
            depth: 0,
            strength,
            sprite,
        }
    }

    /// Steps one cell in `dir`. A monster on the target cell is attacked
    /// instead; the player stays put in that case.
    pub fn try_step(
        &mut self,
        dir: Direction,
        world: &World,
        monsters: &mut MonsterManager,
    ) -> StepOutcome {
        let target = self.position + dir.offset();

        if let Some(killed) = monsters.attack(target, self.depth, self.strength) {
            return StepOutcome::Attacked { killed };
        }
        if world.check_collision(target, self.depth) {
            return StepOutcome::Blocked;
        }

        self.position = target;
        StepOutcome::Moved
    }

    /// Uses stairs under the player. Returns `true` when the floor changed.
    pub fn interact(&mut self, world: &mut World, monsters: &mut MonsterManager) -> bool {
        let depth = world.change_level(self.position, self.depth);
        if depth == self.depth {
            return false;
        }
        self.depth = depth;
        monsters.set_active_depth(depth);
        true
    }

    /// Draws the player at its cell.
    pub fn draw(&self, sheet: &SpriteSheet) {
        sheet.draw(&self.sprite, self.position);
    }
}
