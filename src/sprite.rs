use crate::spatial::{grid_to_world, PIXELS_PER_UNIT};
use anyhow::Context;
use macroquad::prelude::*;

/// A cell-sized region of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRegion {
    /// Source rectangle in sheet pixels.
    pub source: Rect,
}

impl SpriteRegion {
    /// Region whose top-left corner sits at pixel `src` in the sheet.
    pub fn from_pixels(src: Vec2) -> Self {
        let size = PIXELS_PER_UNIT as f32;
        Self {
            source: Rect::new(src.x, src.y, size, size),
        }
    }

    /// Region at grid cell `cell` of the sheet.
    pub fn from_cell(cell: IVec2) -> Self {
        Self::from_pixels(grid_to_world(cell))
    }
}

/// A texture shared by every sprite cut from it.
pub struct SpriteSheet {
    tex: Texture2D,
}

impl SpriteSheet {
    /// Loads a sheet with nearest-neighbour filtering.
    pub async fn load(path: &str) -> anyhow::Result<Self> {
        let tex: Texture2D = load_texture(path)
            .await
            .with_context(|| format!("Loading texture {}", path))?;
        tex.set_filter(FilterMode::Nearest);
        Ok(Self { tex })
    }

    /// Draws `region` with its top-left corner on grid cell `cell`.
    pub fn draw(&self, region: &SpriteRegion, cell: IVec2) {
        let world = grid_to_world(cell);
        draw_texture_ex(
            &self.tex,
            world.x,
            world.y,
            WHITE,
            DrawTextureParams {
                source: Some(region.source),
                ..Default::default()
            },
        );
    }
}
