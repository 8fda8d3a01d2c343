// src/loader/json_loader.rs
use crate::error::WorldError;
use crate::ir_world::*;
use macroquad::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonWorld {
    levels: Vec<JsonLevel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonLevel {
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    world_x: f32,
    #[serde(default)]
    world_y: f32,
    #[serde(default)]
    world_depth: i32,
    #[serde(default)]
    px_wid: f32,
    #[serde(default)]
    px_hei: f32,
    // null when the project saves levels to separate files
    #[serde(default)]
    layer_instances: Option<Vec<JsonLayer>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonLayer {
    #[serde(default, rename = "__identifier")]
    identifier: String,
    #[serde(default)]
    grid_tiles: Vec<JsonTile>,
    #[serde(default)]
    entity_instances: Vec<JsonEntity>,
}

#[derive(Deserialize)]
struct JsonTile {
    px: [f32; 2],
    src: [f32; 2],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntity {
    #[serde(rename = "__identifier")]
    identifier: String,
    px: [f32; 2],
    #[serde(default)]
    field_instances: Vec<JsonField>,
}

#[derive(Deserialize)]
struct JsonField {
    #[serde(rename = "__identifier")]
    identifier: String,
    #[serde(default, rename = "__type")]
    kind: Option<String>,
    #[serde(default, rename = "__value")]
    value: JsonValue,
}

fn json_field_to_ir(field: JsonField) -> Option<(String, FieldValue)> {
    let JsonField {
        identifier,
        kind,
        value,
    } = field;

    if value.is_null() {
        return Some((identifier, FieldValue::Null));
    }

    // a value that does not match its declared type is kept as whatever it
    // is, so entity validation can report it as mistyped
    let parsed = match kind.as_deref() {
        Some("Int") => value.as_i64().map(FieldValue::Int),
        Some("Float") => value.as_f64().map(|n| FieldValue::Float(n as f32)),
        Some("Bool") => value.as_bool().map(FieldValue::Bool),
        Some("String") | Some("Multilines") | Some("Color") | Some("FilePath") => {
            value.as_str().map(|s| FieldValue::String(s.to_owned()))
        }
        Some(k) if k.starts_with("LocalEnum.") || k.starts_with("ExternEnum.") => {
            value.as_str().map(|s| FieldValue::String(s.to_owned()))
        }
        // Points, entity refs and arrays are not used by any known entity
        Some(_) => return None,
        None => None,
    };

    parsed
        .or_else(|| infer_value(&value))
        .map(|value| (identifier, value))
}

fn infer_value(value: &JsonValue) -> Option<FieldValue> {
    if let Some(v) = value.as_bool() {
        Some(FieldValue::Bool(v))
    } else if let Some(v) = value.as_i64() {
        Some(FieldValue::Int(v))
    } else if let Some(v) = value.as_f64() {
        Some(FieldValue::Float(v as f32))
    } else {
        value.as_str().map(|s| FieldValue::String(s.to_owned()))
    }
}

fn fields_from_json(fields: Vec<JsonField>) -> Fields {
    let mut out = Fields::new();
    for f in fields {
        if let Some((name, value)) = json_field_to_ir(f) {
            out.insert(name, value);
        }
    }
    out
}

fn entity_to_ir(entity: JsonEntity) -> IrEntity {
    IrEntity {
        identifier: entity.identifier,
        px: vec2(entity.px[0], entity.px[1]),
        fields: fields_from_json(entity.field_instances),
    }
}

fn layer_to_ir(layer: JsonLayer) -> IrLayer {
    IrLayer {
        identifier: layer.identifier,
        tiles: layer
            .grid_tiles
            .into_iter()
            .map(|t| IrGridTile {
                src: vec2(t.src[0], t.src[1]),
                px: vec2(t.px[0], t.px[1]),
            })
            .collect(),
        entities: layer.entity_instances.into_iter().map(entity_to_ir).collect(),
    }
}

fn world_to_ir(j: JsonWorld) -> Result<IrWorld, WorldError> {
    let mut levels = Vec::with_capacity(j.levels.len());
    for l in j.levels {
        let Some(layers) = l.layer_instances else {
            return Err(WorldError::InvalidWorld(format!(
                "level '{}' has no layer instances (external level files are not supported)",
                l.identifier
            )));
        };
        levels.push(IrLevel {
            identifier: l.identifier,
            offset: vec2(l.world_x, l.world_y),
            size: vec2(l.px_wid, l.px_hei),
            depth: l.world_depth,
            layers: layers.into_iter().map(layer_to_ir).collect(),
        });
    }
    Ok(IrWorld { levels })
}

/// Decodes an LDtk document held in memory.
pub fn decode_world_str(txt: &str) -> Result<IrWorld, WorldError> {
    let j: JsonWorld = serde_json::from_str(txt).map_err(|source| WorldError::Json {
        path: PathBuf::from("<memory>"),
        source,
    })?;
    world_to_ir(j)
}

/// Reads and decodes an LDtk document (`.ldtk` or `.json`) from disk.
pub fn decode_world_file_to_ir(path: impl AsRef<Path>) -> Result<IrWorld, WorldError> {
    let p = path.as_ref();
    match p.extension().and_then(|e| e.to_str()) {
        Some("ldtk") | Some("json") => {}
        _ => return Err(WorldError::UnsupportedFormat(p.display().to_string())),
    }

    let txt = std::fs::read_to_string(p).map_err(|source| WorldError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let j: JsonWorld = serde_json::from_str(&txt).map_err(|source| WorldError::Json {
        path: p.to_path_buf(),
        source,
    })?;

    world_to_ir(j)
}
