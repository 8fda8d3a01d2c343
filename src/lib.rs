#![warn(missing_docs)]

//! Multi-floor tile world for a small Macroquad rogue-like, built from LDtk
//! level exports.

mod entity;
mod error;
mod ir_world;
mod loader {
    pub mod json_loader;
}
mod monster;
mod player;
mod render;
mod spatial;
mod sprite;
mod tile;
mod world;

pub use entity::{EntityKind, MonsterFields};
pub use error::{Result, WorldError};
pub use ir_world::{FieldValue, Fields, IrEntity, IrGridTile, IrLayer, IrLevel, IrWorld};
pub use loader::json_loader::{decode_world_file_to_ir, decode_world_str};
pub use monster::{Monster, MonsterManager, MonsterRegistry, MonsterSpawn};
pub use player::{Direction, Player, StepOutcome};
pub use render::camera_bounds;
pub use spatial::{
    grid_to_world, tile_bounds, world_to_grid, CellKey, CollisionIndex, DepthTransitionIndex,
    GridIndex, GridKey, PIXELS_PER_UNIT,
};
pub use sprite::{SpriteRegion, SpriteSheet};
pub use tile::Tile;
pub use world::World;
