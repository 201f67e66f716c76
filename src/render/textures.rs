use raylib::prelude::*;
use std::collections::HashMap;

use crate::core::Rect;

/// Images used by the drive level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Car,
    Obstacle,
}

impl Sprite {
    /// Flat colour drawn when the image is missing.
    pub fn fallback(self) -> Color {
        match self {
            Sprite::Car => Color::new(40, 120, 230, 255),
            Sprite::Obstacle => Color::new(220, 70, 50, 255),
        }
    }
}

pub struct TextureManager {
    textures: HashMap<Sprite, Texture2D>,
}

impl TextureManager {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread) -> Self {
        let mut tm = Self { textures: HashMap::new() };

        // First file found per sprite wins.
        let candidates: &[(&str, Sprite)] = &[
            ("Textures/car.png", Sprite::Car),
            ("assets/car.png", Sprite::Car),
            ("Textures/obstacle.png", Sprite::Obstacle),
            ("assets/obstacle.png", Sprite::Obstacle),
        ];

        for &(path, sprite) in candidates {
            if tm.textures.contains_key(&sprite) {
                continue;
            }
            match rl.load_texture(thread, path) {
                Ok(tex) => {
                    log::debug!("Loaded {path}");
                    tm.textures.insert(sprite, tex);
                }
                Err(e) => log::debug!("No texture at {path}: {e:?}"),
            }
        }
        for sprite in [Sprite::Car, Sprite::Obstacle] {
            if !tm.textures.contains_key(&sprite) {
                log::warn!("{sprite:?} texture missing, drawing a plain rectangle");
            }
        }
        tm
    }

    pub fn has(&self, sprite: Sprite) -> bool { self.textures.contains_key(&sprite) }

    /// Stretches the sprite over `dest`, or fills it with the fallback colour.
    pub fn draw(&self, d: &mut RaylibDrawHandle, sprite: Sprite, dest: Rect) {
        match self.textures.get(&sprite) {
            Some(tex) => {
                let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
                let dst = Rectangle::new(dest.x, dest.y, dest.w, dest.h);
                d.draw_texture_pro(tex, src, dst, Vector2::zero(), 0.0, Color::WHITE);
            }
            None => {
                d.draw_rectangle(dest.x as i32, dest.y as i32, dest.w as i32, dest.h as i32, sprite.fallback());
            }
        }
    }
}
