use raylib::prelude::*;

use super::layout::{self, MENU_ITEM_SIZE, SETTINGS_ROW_SIZE};
use super::{draw_centered, with_alpha};
use crate::core::app::App;
use crate::core::intro::{INTRO_LINES, Intro, LineStyle, TITLE, line_style};
use crate::core::menu::{MENU_OPTIONS, Menu};
use crate::core::settings::SETTINGS_ROWS;
use crate::core::state::Level;

const INTRO_LINE_GAP: i32 = 42;

fn intro_style(style: LineStyle) -> (i32, Color) {
    match style {
        LineStyle::Header => (48, Color::GOLD),
        LineStyle::Level => (26, Color::SKYBLUE),
        LineStyle::Closing => (28, Color::new(200, 170, 255, 255)),
        LineStyle::Body => (24, Color::RAYWHITE),
    }
}

pub fn draw_intro(d: &mut RaylibDrawHandle, intro: &Intro, screen: (i32, i32)) {
    let cx = screen.0 as f32 / 2.0;
    let top = (screen.1 - INTRO_LINES.len() as i32 * INTRO_LINE_GAP) / 2 - 40;

    for (i, line) in INTRO_LINES.iter().enumerate() {
        let alpha = intro.line_alpha(i);
        if line.is_empty() || alpha <= 0.0 {
            continue;
        }
        let (size, color) = intro_style(line_style(i));
        draw_centered(d, line, cx, top + i as i32 * INTRO_LINE_GAP, size, with_alpha(color, alpha));
    }

    if intro.prompt_visible() {
        let pulse = intro.prompt_pulse();
        let y = screen.1 - 140;
        draw_centered(d, "Press ENTER or SPACE to continue", cx, y, 30, with_alpha(Color::WHITE, pulse));
        draw_centered(d, "ESC - Skip to Menu", cx, y + 50, 20, Color::GRAY);
    }
}

pub fn draw_menu(d: &mut RaylibDrawHandle, menu: &Menu, screen: (i32, i32)) {
    let cx = screen.0 as f32 / 2.0;
    draw_centered(d, TITLE, cx, screen.1 / 4 - 50, 100, Color::RAYWHITE);

    let rects = layout::menu_items(screen, &|t: &str, size| d.measure_text(t, size));
    for (i, (label, r)) in MENU_OPTIONS.iter().zip(&rects).enumerate() {
        let color = if i == menu.selected { Color::YELLOW } else { Color::WHITE };
        d.draw_text(label, r.x as i32, r.y as i32, MENU_ITEM_SIZE, color);
    }
    if let Some(r) = rects.get(menu.selected) {
        d.draw_circle_v(Vector2::new(r.x - 30.0, r.y + r.h / 2.0), 10.0, Color::YELLOW);
    }

    draw_centered(d, "W/S or arrows to choose, ENTER to select", cx, screen.1 - 60, 20, Color::GRAY);
}

pub fn draw_pre_level(d: &mut RaylibDrawHandle, level: Level, screen: (i32, i32)) {
    let cx = screen.0 as f32 / 2.0;
    let mut y = screen.1 / 4;
    draw_centered(d, level.title(), cx, y, 60, Color::GOLD);
    y += 120;
    for line in level.controls() {
        draw_centered(d, line, cx, y, 30, Color::RAYWHITE);
        y += 45;
    }
    draw_centered(d, "Press ENTER to start level", cx, screen.1 - 160, 36, Color::YELLOW);
    draw_centered(d, "M / ESC - Back to Menu", cx, screen.1 - 100, 20, Color::GRAY);
}

pub fn draw_settings(d: &mut RaylibDrawHandle, app: &App, screen: (i32, i32)) {
    d.draw_text("Settings", 100, 80, 70, Color::RAYWHITE);

    let selected = app.settings_screen().selected;
    let rects = layout::settings_rows(app, &|t: &str, size| d.measure_text(t, size));
    for (i, (row, r)) in SETTINGS_ROWS.iter().zip(&rects).enumerate() {
        let color = if i == selected { Color::YELLOW } else { Color::WHITE };
        d.draw_text(&row.label(app.settings()), r.x as i32, r.y as i32, SETTINGS_ROW_SIZE, color);
    }

    d.draw_text(
        "W/S select   A/D or click change   ENTER toggle   ESC back",
        100,
        screen.1 - 80,
        20,
        Color::GRAY,
    );
}
