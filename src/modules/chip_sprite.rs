/*
The poker chip image. Loaded and scaled once at startup, then drawn at
every screen element whose image has been set.

If the file cannot be loaded the sprite is empty and nothing is drawn;
the animation itself still runs.
*/

use crate::modules::frame_driver::ChipLane;
use macroquad::prelude::*;
use std::path::Path;

pub struct ChipSprite {
    texture: Option<Texture2D>,
    /// Side of the square the image is fitted into
    bounds: f32,
    size: Vec2,
}

impl ChipSprite {
    pub async fn load(path: &Path, bounds: f32) -> Self {
        let texture = match load_texture(&path.to_string_lossy()).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Linear);
                log::info!(
                    "Loaded chip image {} ({}x{})",
                    path.display(),
                    texture.width(),
                    texture.height()
                );
                Some(texture)
            }
            Err(e) => {
                log::warn!("Could not load chip image {}: {:?}", path.display(), e);
                None
            }
        };
        let size = texture
            .as_ref()
            .map(|t| fit_size(t.size(), bounds))
            .unwrap_or(Vec2::ZERO);
        Self { texture, bounds, size }
    }

    pub fn is_loaded(&self) -> bool {
        self.texture.is_some()
    }

    /// Draw every lane whose image has been set.
    pub fn draw(&self, lanes: &[ChipLane]) {
        let Some(texture) = &self.texture else {
            return;
        };
        let offset = draw_offset(self.size, self.bounds);
        for lane in lanes.iter().filter(|lane| lane.screen.image_set) {
            let pos = lane.screen.position + offset;
            draw_texture_ex(
                texture,
                pos.x,
                pos.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(self.size),
                    ..Default::default()
                },
            );
        }
    }
}

/// Largest size with the texture's aspect ratio that fits a `bounds` square.
pub fn fit_size(texture_size: Vec2, bounds: f32) -> Vec2 {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (bounds / texture_size.x).min(bounds / texture_size.y);
    texture_size * scale
}

/// Offset that keeps a fitted image's bottom edge on the bottom of its square.
pub fn draw_offset(size: Vec2, bounds: f32) -> Vec2 {
    vec2(0.0, (bounds - size.y).max(0.0))
}
