//! Typed views over the entity kinds the game understands.
//!
//! Fields are looked up by identifier and checked for type while the world is
//! built, so a badly authored entity stops the load with a message naming the
//! entity, level and field.

use crate::error::WorldError;
use crate::ir_world::{FieldValue, Fields, IrEntity};
use crate::spatial::PIXELS_PER_UNIT;
use macroquad::prelude::*;

/// Marks its cell as impassable.
pub const COLLIDER: &str = "Collider";
/// Stairs between floors.
pub const DEPTH_CHANGE: &str = "DepthChange";
/// Monster spawn point.
pub const MONSTER: &str = "Monster";

/// `DepthChange` field holding the signed depth delta.
pub const FIELD_DELTA: &str = "Delta";
/// `Monster` sprite-sheet column.
pub const FIELD_SPRITE_X: &str = "SpriteX";
/// `Monster` sprite-sheet row.
pub const FIELD_SPRITE_Y: &str = "SpriteY";
/// `Monster` attack strength.
pub const FIELD_STRENGTH: &str = "Strength";
/// `Monster` starting health.
pub const FIELD_HEALTH: &str = "Health";

/// What an entity placement means to the world builder.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// Blocks movement into its cell.
    Collider,
    /// Stairs that move the player `delta` floors.
    DepthChange {
        /// Signed floor change.
        delta: i32,
    },
    /// A monster to spawn.
    Monster(MonsterFields),
    /// Any identifier the game does not know; skipped by the builder.
    Unknown,
}

/// Validated `Monster` fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterFields {
    /// Column and row in the sprite sheet, in cells.
    pub sprite_cell: IVec2,
    /// Damage dealt per hit.
    pub strength: f32,
    /// Starting health.
    pub health: f32,
}

struct FieldReader<'a> {
    entity: &'a str,
    level: &'a str,
    fields: &'a Fields,
}

impl FieldReader<'_> {
    fn value(&self, field: &'static str) -> Result<&FieldValue, WorldError> {
        match self.fields.get(field) {
            Some(FieldValue::Null) | None => Err(WorldError::MissingField {
                entity: self.entity.to_owned(),
                level: self.level.to_owned(),
                field,
            }),
            Some(v) => Ok(v),
        }
    }

    fn mistyped(&self, field: &'static str, expected: &'static str) -> WorldError {
        WorldError::FieldType {
            entity: self.entity.to_owned(),
            level: self.level.to_owned(),
            field,
            expected,
        }
    }

    fn int(&self, field: &'static str) -> Result<i32, WorldError> {
        self.value(field)?;
        self.fields
            .get_i32(field)
            .ok_or_else(|| self.mistyped(field, "a 32-bit integer"))
    }

    /// A sprite-sheet cell index; its pixel offset must fit in an `i32`.
    fn sprite_cell(&self, field: &'static str) -> Result<i32, WorldError> {
        let v = self.int(field)?;
        if v < 0 || v.checked_mul(PIXELS_PER_UNIT).is_none() {
            return Err(self.mistyped(field, "a non-negative sprite-sheet cell index"));
        }
        Ok(v)
    }

    fn float(&self, field: &'static str) -> Result<f32, WorldError> {
        self.value(field)?;
        self.fields
            .get_f32(field)
            .ok_or_else(|| self.mistyped(field, "a number"))
    }
}

/// Classifies `entity`, validating the fields its kind requires.
pub fn classify(entity: &IrEntity, level: &str) -> Result<EntityKind, WorldError> {
    let reader = FieldReader {
        entity: &entity.identifier,
        level,
        fields: &entity.fields,
    };

    Ok(match entity.identifier.as_str() {
        COLLIDER => EntityKind::Collider,
        DEPTH_CHANGE => EntityKind::DepthChange {
            delta: reader.int(FIELD_DELTA)?,
        },
        MONSTER => EntityKind::Monster(MonsterFields {
            sprite_cell: ivec2(
                reader.sprite_cell(FIELD_SPRITE_X)?,
                reader.sprite_cell(FIELD_SPRITE_Y)?,
            ),
            strength: reader.float(FIELD_STRENGTH)?,
            health: reader.float(FIELD_HEALTH)?,
        }),
        _ => EntityKind::Unknown,
    })
}
