//! Drawing for every screen.
//!
//! Re-exports:
//! - `layout`: menu and settings row placement, mouse hit-testing
//! - `textures`: drive sprites with solid-colour fallbacks
//! - `screens`: intro, menu, pre-level and settings screens
//! - `levels`: the three playable levels

pub mod layout;
pub mod levels;
pub mod screens;
pub mod textures;

use raylib::prelude::*;

use crate::core::app::App;
use crate::core::state::GameState;
use textures::TextureManager;

pub const BACKGROUND: Color = Color::new(12, 12, 18, 255);
const HINT_SIZE: i32 = 20;
const HINT_MARGIN: i32 = 10;

/// Draws `text` horizontally centred on `cx`.
pub fn draw_centered(d: &mut RaylibDrawHandle, text: &str, cx: f32, y: i32, size: i32, color: Color) {
    let x = layout::centered_x(cx, d.measure_text(text, size));
    d.draw_text(text, x, y, size, color);
}

pub fn with_alpha(c: Color, alpha: f32) -> Color {
    Color::new(c.r, c.g, c.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

pub fn draw_frame(d: &mut RaylibDrawHandle, app: &App, textures: &TextureManager, screen: (i32, i32)) {
    d.clear_background(BACKGROUND);

    match app.state() {
        GameState::Introduction => screens::draw_intro(d, app.intro(), screen),
        GameState::Menu => screens::draw_menu(d, app.menu(), screen),
        GameState::PreLevel(level) => screens::draw_pre_level(d, level, screen),
        GameState::Playing(level) => levels::draw_level(d, app, level, textures, screen),
        GameState::Settings => screens::draw_settings(d, app, screen),
        GameState::Exit => {}
    }

    if app.state().shows_settings_hint() {
        let hint = "F1 - Settings";
        let x = screen.0 - d.measure_text(hint, HINT_SIZE) - HINT_MARGIN;
        d.draw_text(hint, x, HINT_MARGIN, HINT_SIZE, Color::LIGHTGRAY);
    }
}
