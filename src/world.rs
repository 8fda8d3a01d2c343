use crate::entity::{classify, EntityKind};
use crate::error::WorldError;
use crate::ir_world::IrWorld;
use crate::loader::json_loader::{decode_world_file_to_ir, decode_world_str};
use crate::monster::{MonsterRegistry, MonsterSpawn};
use crate::render::cull::sort_for_drawing;
use crate::spatial::{world_to_grid, CollisionIndex, DepthTransitionIndex, GridIndex};
use crate::sprite::{SpriteRegion, SpriteSheet};
use crate::tile::Tile;
use macroquad::prelude::*;
use std::path::Path;

/// The static dungeon: every floor's tiles, colliders and stairs, plus the
/// floor currently in play.
#[derive(Debug)]
pub struct World {
    tiles: GridIndex,
    collisions: CollisionIndex,
    stairs: DepthTransitionIndex,
    current_depth: i32,
}

impl World {
    /// Loads an LDtk file and builds the world from it.
    pub fn load(
        path: impl AsRef<Path>,
        monsters: &mut impl MonsterRegistry,
    ) -> Result<Self, WorldError> {
        let ir = decode_world_file_to_ir(path)?;
        Self::from_ir(ir, monsters)
    }

    /// Builds the world from an LDtk document held in memory.
    pub fn from_json_str(
        json: &str,
        monsters: &mut impl MonsterRegistry,
    ) -> Result<Self, WorldError> {
        let ir = decode_world_str(json)?;
        Self::from_ir(ir, monsters)
    }

    /// Builds every index in a single pass over `ir`.
    ///
    /// Levels are walked in document order and their layers in reverse, so the
    /// layer listed first in the editor gets the highest layer counter and
    /// draws on top. Monster spawns reach `monsters` only once the whole
    /// document has been accepted.
    pub fn from_ir(ir: IrWorld, monsters: &mut impl MonsterRegistry) -> Result<Self, WorldError> {
        let mut tiles = GridIndex::new();
        let mut collisions = CollisionIndex::new();
        let mut stairs = DepthTransitionIndex::new();
        let mut spawns: Vec<MonsterSpawn> = Vec::new();
        let mut layer_number = 0u32;

        for level in &ir.levels {
            for layer in level.layers.iter().rev() {
                for t in &layer.tiles {
                    let cell = world_to_grid(level.offset + t.px);
                    let tile = Tile::new(
                        cell,
                        layer_number,
                        level.depth,
                        SpriteRegion::from_pixels(t.src),
                    );
                    if !tiles.insert(tile) {
                        log::trace!(
                            "dropping duplicate tile at {} (layer {}, depth {})",
                            cell,
                            layer_number,
                            level.depth
                        );
                    }
                }

                for entity in &layer.entities {
                    let cell = world_to_grid(level.offset + entity.px);
                    match classify(entity, &level.identifier)? {
                        EntityKind::Collider => collisions.insert(cell, level.depth),
                        EntityKind::DepthChange { delta } => {
                            stairs.insert(cell, level.depth, delta)
                        }
                        EntityKind::Monster(fields) => spawns.push(MonsterSpawn {
                            position: cell,
                            depth: level.depth,
                            sprite: SpriteRegion::from_cell(fields.sprite_cell),
                            strength: fields.strength,
                            health: fields.health,
                        }),
                        EntityKind::Unknown => log::debug!(
                            "skipping unknown entity '{}' in level '{}'",
                            entity.identifier,
                            level.identifier
                        ),
                    }
                }

                layer_number += 1;
            }
        }

        log::info!(
            "world built: {} levels, {} tiles, {} colliders, {} stairs, {} monsters",
            ir.levels.len(),
            tiles.len(),
            collisions.len(),
            stairs.len(),
            spawns.len()
        );

        for spawn in spawns {
            monsters.register(spawn);
        }

        Ok(Self {
            tiles,
            collisions,
            stairs,
            current_depth: 0,
        })
    }

    /// Whether moving onto `cell` at `depth` is blocked. Cells with no tile on
    /// any layer or floor are off the map and always blocked.
    pub fn check_collision(&self, cell: IVec2, depth: i32) -> bool {
        if !self.tiles.contains_cell(cell) {
            return true;
        }
        self.collisions.is_blocked(cell, depth)
    }

    /// Uses the stairs on `cell` at `depth`, if any. Returns the new current
    /// depth, or `depth` unchanged when there are no stairs. Callers pass the
    /// result on to anything that tracks the active floor.
    pub fn change_level(&mut self, cell: IVec2, depth: i32) -> i32 {
        match self.stairs.delta_at(cell, depth) {
            Some(delta) => {
                self.current_depth = self.current_depth.saturating_add(delta);
                log::info!(
                    "stairs at {} moved from depth {} to {}",
                    cell,
                    depth,
                    self.current_depth
                );
                self.current_depth
            }
            None => depth,
        }
    }

    /// Floor reached by the last successful `change_level`.
    pub fn current_depth(&self) -> i32 {
        self.current_depth
    }

    /// Tiles on `depth` overlapping `camera`, in drawing order.
    pub fn visible_tiles(&self, camera: Rect, depth: i32) -> Vec<&Tile> {
        let mut visible: Vec<&Tile> = self.tiles.visible(camera, depth).collect();
        sort_for_drawing(&mut visible);
        visible
    }

    /// Draws the current floor's tiles that fall inside `camera`.
    pub fn draw(&self, sheet: &SpriteSheet, camera: Rect) {
        for tile in self.visible_tiles(camera, self.current_depth) {
            tile.draw(sheet);
        }
    }

    /// The tile index.
    pub fn tiles(&self) -> &GridIndex {
        &self.tiles
    }

    /// The collision index.
    pub fn collisions(&self) -> &CollisionIndex {
        &self.collisions
    }

    /// The depth-transition index.
    pub fn stairs(&self) -> &DepthTransitionIndex {
        &self.stairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir_world::{FieldValue, Fields, IrEntity, IrGridTile, IrLayer, IrLevel};
    use crate::spatial::GridKey;

    fn level(depth: i32, offset: Vec2, layers: Vec<IrLayer>) -> IrLevel {
        IrLevel {
            identifier: format!("Level_{depth}"),
            offset,
            size: vec2(256.0, 256.0),
            depth,
            layers,
        }
    }

    fn tiles_layer(name: &str, tiles: &[(f32, f32, f32)]) -> IrLayer {
        IrLayer {
            identifier: name.to_owned(),
            tiles: tiles
                .iter()
                .map(|&(x, y, src)| IrGridTile {
                    src: vec2(src, 0.0),
                    px: vec2(x, y),
                })
                .collect(),
            entities: Vec::new(),
        }
    }

    fn entity(identifier: &str, x: f32, y: f32, fields: &[(&str, FieldValue)]) -> IrEntity {
        let mut f = Fields::new();
        for (name, value) in fields {
            f.insert(*name, value.clone());
        }
        IrEntity {
            identifier: identifier.to_owned(),
            px: vec2(x, y),
            fields: f,
        }
    }

    fn entities_layer(entities: Vec<IrEntity>) -> IrLayer {
        IrLayer {
            identifier: "Entities".to_owned(),
            tiles: Vec::new(),
            entities,
        }
    }

    #[test]
    fn layers_are_numbered_in_reverse_across_levels() {
        let ir = IrWorld {
            levels: vec![
                level(
                    0,
                    Vec2::ZERO,
                    vec![
                        tiles_layer("Top", &[(0.0, 0.0, 32.0)]),
                        tiles_layer("Bottom", &[(0.0, 0.0, 0.0)]),
                    ],
                ),
                level(1, Vec2::ZERO, vec![tiles_layer("Only", &[(0.0, 0.0, 64.0)])]),
            ],
        };
        let world = World::from_ir(ir, &mut Vec::<MonsterSpawn>::new()).unwrap();

        let bottom = world.tiles().get(&GridKey::new(ivec2(0, 0), 0, 0)).unwrap();
        let top = world.tiles().get(&GridKey::new(ivec2(0, 0), 1, 0)).unwrap();
        let deeper = world.tiles().get(&GridKey::new(ivec2(0, 0), 2, 1)).unwrap();
        assert_eq!(bottom.sprite.source.x, 0.0);
        assert_eq!(top.sprite.source.x, 32.0);
        assert_eq!(deeper.sprite.source.x, 64.0);

        let drawn: Vec<u32> = world
            .visible_tiles(Rect::new(0.0, 0.0, 32.0, 32.0), 0)
            .iter()
            .map(|t| t.layer)
            .collect();
        assert_eq!(drawn, vec![0, 1]);
    }

    #[test]
    fn level_offsets_and_negative_positions_floor() {
        let ir = IrWorld {
            levels: vec![level(
                0,
                vec2(-64.0, 32.0),
                vec![tiles_layer("Floor", &[(63.0, 0.0, 0.0), (0.0, -1.0, 0.0)])],
            )],
        };
        let world = World::from_ir(ir, &mut Vec::<MonsterSpawn>::new()).unwrap();

        assert!(world.tiles().contains_cell(ivec2(-1, 1)));
        assert!(world.tiles().contains_cell(ivec2(-2, 0)));
        assert_eq!(world.tiles().len(), 2);
    }

    #[test]
    fn entities_populate_their_indices() {
        let ir = IrWorld {
            levels: vec![level(
                2,
                Vec2::ZERO,
                vec![
                    entities_layer(vec![
                        entity("Collider", 40.0, 8.0, &[]),
                        entity("DepthChange", 64.0, 64.0, &[("Delta", FieldValue::Int(-2))]),
                        entity(
                            "Monster",
                            96.0,
                            32.0,
                            &[
                                ("SpriteX", FieldValue::Int(3)),
                                ("SpriteY", FieldValue::Int(1)),
                                ("Strength", FieldValue::Float(1.5)),
                                ("Health", FieldValue::Int(5)),
                            ],
                        ),
                        entity("Torch", 0.0, 0.0, &[]),
                    ]),
                    tiles_layer("Floor", &[(32.0, 0.0, 0.0)]),
                ],
            )],
        };
        let mut spawns: Vec<MonsterSpawn> = Vec::new();
        let world = World::from_ir(ir, &mut spawns).unwrap();

        assert!(world.collisions().is_blocked(ivec2(1, 0), 2));
        assert_eq!(world.stairs().delta_at(ivec2(2, 2), 2), Some(-2));
        assert_eq!(
            spawns,
            vec![MonsterSpawn {
                position: ivec2(3, 1),
                depth: 2,
                sprite: SpriteRegion::from_cell(ivec2(3, 1)),
                strength: 1.5,
                health: 5.0,
            }]
        );
    }

    #[test]
    fn failed_builds_register_no_monsters() {
        let ir = IrWorld {
            levels: vec![level(
                0,
                Vec2::ZERO,
                vec![entities_layer(vec![
                    entity(
                        "Monster",
                        0.0,
                        0.0,
                        &[
                            ("SpriteX", FieldValue::Int(0)),
                            ("SpriteY", FieldValue::Int(0)),
                            ("Strength", FieldValue::Int(1)),
                            ("Health", FieldValue::Int(1)),
                        ],
                    ),
                    entity("DepthChange", 0.0, 0.0, &[]),
                ])],
            )],
        };
        let mut spawns: Vec<MonsterSpawn> = Vec::new();
        let err = World::from_ir(ir, &mut spawns).unwrap_err();
        assert!(matches!(err, WorldError::MissingField { .. }));
        assert!(spawns.is_empty());
    }

    #[test]
    fn change_level_only_applies_matching_stairs() {
        let ir = IrWorld {
            levels: vec![level(
                0,
                Vec2::ZERO,
                vec![
                    entities_layer(vec![entity(
                        "DepthChange",
                        0.0,
                        0.0,
                        &[("Delta", FieldValue::Int(1))],
                    )]),
                    tiles_layer("Floor", &[(0.0, 0.0, 0.0)]),
                ],
            )],
        };
        let mut world = World::from_ir(ir, &mut Vec::<MonsterSpawn>::new()).unwrap();

        assert_eq!(world.current_depth(), 0);
        assert_eq!(world.change_level(ivec2(3, 3), 0), 0);
        let depth = world.change_level(ivec2(0, 0), 0);
        assert_eq!(depth, 1);
        assert_eq!(world.current_depth(), 1);
        // no stairs on (0, 0) at depth 1
        assert_eq!(world.change_level(ivec2(0, 0), depth), 1);
        assert_eq!(world.current_depth(), 1);
    }

    #[test]
    fn change_level_saturates_at_the_depth_limits() {
        let ir = IrWorld {
            levels: vec![level(
                0,
                Vec2::ZERO,
                vec![entities_layer(vec![entity(
                    "DepthChange",
                    0.0,
                    0.0,
                    &[("Delta", FieldValue::Int(i64::from(i32::MAX)))],
                )])],
            )],
        };
        let mut world = World::from_ir(ir, &mut Vec::<MonsterSpawn>::new()).unwrap();

        assert_eq!(world.change_level(ivec2(0, 0), 0), i32::MAX);
        assert_eq!(world.change_level(ivec2(0, 0), 0), i32::MAX);
        assert_eq!(world.current_depth(), i32::MAX);
    }
}
