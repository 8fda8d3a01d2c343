// src/ir_world.rs
use macroquad::prelude::*;

/// Canonical, format-agnostic level document.
#[derive(Debug, Clone, Default)]
pub struct IrWorld {
    /// Levels in build order (array order).
    pub levels: Vec<IrLevel>,
}

/// One dungeon level placed in world space.
#[derive(Debug, Clone)]
pub struct IrLevel {
    /// Editor name, used in error messages.
    pub identifier: String,
    /// World pixel offset of the level's top-left corner.
    pub offset: Vec2,
    /// Pixel dimensions.
    pub size: Vec2,
    /// Dungeon floor the level belongs to.
    pub depth: i32,
    /// Editor order: the first listed draws on top.
    pub layers: Vec<IrLayer>,
}

impl IrLevel {
    /// World-space pixel rectangle covered by this level.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.size.x, self.size.y)
    }
}

/// A layer's placed tiles and entities.
#[derive(Debug, Clone, Default)]
pub struct IrLayer {
    /// Editor name.
    pub identifier: String,
    /// Hand-placed tiles.
    pub tiles: Vec<IrGridTile>,
    /// Entity placements.
    pub entities: Vec<IrEntity>,
}

/// A tile placed by the editor, in level-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrGridTile {
    /// Pixel coordinate inside the tile atlas.
    pub src: Vec2,
    /// Level-local pixel position.
    pub px: Vec2,
}

/// An entity placement, in level-local pixels.
#[derive(Debug, Clone)]
pub struct IrEntity {
    /// Entity kind, e.g. `Collider`.
    pub identifier: String,
    /// Level-local pixel position.
    pub px: Vec2,
    /// Field values by identifier.
    pub fields: Fields,
}

/// Typed entity field value.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum FieldValue {
    Int(i64),
    Float(f32),
    Bool(bool),
    String(String),
    Null,
}

/// Entity fields in document order, addressable by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    /// An empty field list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field; lookups return the first entry with a given name.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.entries.push((name.into(), value));
    }

    /// Raw value of `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Integer value of `name`.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value of `name`, if it fits in an `i32`.
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_i64(name).and_then(|v| i32::try_from(v).ok())
    }

    /// Floats, with integers widened.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Boolean value of `name`.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String value of `name`.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}
