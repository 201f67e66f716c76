use raylib::prelude::*;

use super::textures::{Sprite, TextureManager};
use super::{draw_centered, with_alpha};
use crate::core::app::App;
use crate::core::dark_maze::DarkMaze;
use crate::core::drive::{Drive, Horn, PX_PER_METER, GOAL_METERS, LANES, Phase};
use crate::core::fast_lines::FastLines;
use crate::core::maze::{BOTTOM, LEFT, RIGHT, TOP};
use crate::core::state::Level;

pub const FAST_LINES_SIZE: i32 = 30;
const FAST_LINES_GAP: i32 = 40;

const DASH_LEN: f32 = 40.0;
const DASH_PERIOD: f32 = 80.0;

pub fn draw_level(d: &mut RaylibDrawHandle, app: &App, level: Level, textures: &TextureManager, screen: (i32, i32)) {
    match level {
        Level::FastLines => {
            if let Some(game) = app.fast_lines() {
                draw_fast_lines(d, game, screen);
            }
        }
        Level::DarkMaze => {
            if let Some(maze) = app.dark_maze() {
                draw_maze(d, maze, app.settings().wall_brightness(), screen);
            }
        }
        Level::SilentDrive => {
            if let Some(drive) = app.drive() {
                draw_drive(d, drive, textures, screen);
            }
        }
    }
}

/// Width of one scrolling message tile.
pub fn scroll_width(rl: &RaylibHandle, app: &App) -> f32 {
    app.fast_lines()
        .map(|g| rl.measure_text(&g.message(), FAST_LINES_SIZE) as f32)
        .unwrap_or(0.0)
}

fn draw_fast_lines(d: &mut RaylibDrawHandle, game: &FastLines, screen: (i32, i32)) {
    let msg = game.message();
    let w = d.measure_text(&msg, FAST_LINES_SIZE).max(1) as f32;
    let lines = (screen.1 / FAST_LINES_GAP + 1) as usize;

    for line in 0..lines {
        let y = line as i32 * FAST_LINES_GAP + (FAST_LINES_GAP - FAST_LINES_SIZE) / 2;
        let color = if line % 2 == 0 { Color::RAYWHITE } else { Color::LIGHTGRAY };
        let mut x = game.line_offset(line);
        while x < screen.0 as f32 {
            d.draw_text(&msg, x as i32, y, FAST_LINES_SIZE, color);
            x += w;
        }
    }
}

fn draw_maze(d: &mut RaylibDrawHandle, level: &DarkMaze, brightness: u8, screen: (i32, i32)) {
    let maze = level.maze();
    let cs = maze.cell_size();
    let wall = Color::new(brightness, brightness, brightness, 255);

    let (ex, ey) = maze.exit_cell();
    d.draw_rectangle((ex as f32 * cs) as i32, (ey as f32 * cs) as i32, cs as i32, cs as i32, Color::GREEN);

    for y in 0..maze.rows() {
        for x in 0..maze.cols() {
            let walls = maze.cell(x, y).walls;
            let (x0, y0) = (x as f32 * cs, y as f32 * cs);
            let (x1, y1) = (x0 + cs, y0 + cs);
            let mut line = |a: (f32, f32), b: (f32, f32)| {
                d.draw_line_ex(Vector2::new(a.0, a.1), Vector2::new(b.0, b.1), 2.0, wall);
            };
            if walls[TOP] { line((x0, y0), (x1, y0)); }
            if walls[RIGHT] { line((x1, y0), (x1, y1)); }
            if walls[BOTTOM] { line((x0, y1), (x1, y1)); }
            if walls[LEFT] { line((x0, y0), (x0, y1)); }
        }
    }

    let (px, py) = maze.player_pos();
    d.draw_circle_v(Vector2::new(px, py), maze.player_radius(), Color::RED);

    if maze.is_at_exit() {
        let cx = screen.0 as f32 / 2.0;
        let cy = screen.1 / 2;
        d.draw_rectangle(0, cy - 50, screen.0, 100, with_alpha(Color::BLACK, 0.7));
        draw_centered(d, "You Win! Press ENTER for next level", cx, cy - 20, 40, Color::GREEN);
    }
}

fn draw_drive(d: &mut RaylibDrawHandle, drive: &Drive, textures: &TextureManager, screen: (i32, i32)) {
    let (sw, sh) = screen;
    let left = drive.road_left();
    let right = drive.road_right();

    d.draw_rectangle(0, 0, sw, sh, Color::new(30, 70, 30, 255));
    d.draw_rectangle(left as i32, 0, (right - left) as i32, sh, Color::new(55, 55, 60, 255));
    d.draw_rectangle(left as i32 - 6, 0, 6, sh, Color::RAYWHITE);
    d.draw_rectangle(right as i32, 0, 6, sh, Color::RAYWHITE);

    // Lane dashes scroll with distance travelled.
    let shift = drive.scroll_px().rem_euclid(DASH_PERIOD);
    for lane in 1..LANES {
        let x = left + (right - left) * lane as f32 / LANES as f32;
        let mut y = shift - DASH_PERIOD;
        while y < sh as f32 {
            d.draw_rectangle(x as i32 - 2, y as i32, 4, DASH_LEN as i32, Color::LIGHTGRAY);
            y += DASH_PERIOD;
        }
    }

    for o in drive.obstacles() {
        let r = o.rect();
        textures.draw(d, Sprite::Obstacle, r);
        if o.horn == Some(Horn::Sounded) {
            d.draw_rectangle_lines(r.x as i32 - 2, r.y as i32 - 2, r.w as i32 + 4, r.h as i32 + 4, Color::YELLOW);
        }
    }

    let car = drive.car_rect();
    textures.draw(d, Sprite::Car, car);
    if !textures.has(Sprite::Car) {
        // Windscreen so the player can tell which way is forward.
        d.draw_rectangle(car.x as i32 + 8, car.y as i32 + 14, car.w as i32 - 16, 16, Color::SKYBLUE);
    }

    draw_drive_hud(d, drive, screen);

    let cx = sw as f32 / 2.0;
    let cy = sh / 2;
    match drive.phase() {
        Phase::Driving => {}
        Phase::Crashed => {
            d.draw_rectangle(0, 0, sw, sh, with_alpha(Color::MAROON, 0.45));
            draw_centered(d, "CRASH!", cx, cy - 60, 80, Color::WHITE);
            draw_centered(d, "Press R to restart, M for menu", cx, cy + 40, 30, Color::RAYWHITE);
        }
        Phase::Finished => {
            d.draw_rectangle(0, 0, sw, sh, with_alpha(Color::BLACK, 0.6));
            draw_centered(d, "You made it.", cx, cy - 60, 70, Color::GOLD);
            draw_centered(d, "Press ENTER to return to the menu", cx, cy + 40, 30, Color::RAYWHITE);
        }
    }
}

fn draw_drive_hud(d: &mut RaylibDrawHandle, drive: &Drive, screen: (i32, i32)) {
    let kmh = drive.speed() / PX_PER_METER * 3.6;
    d.draw_text(&format!("Speed: {kmh:.0} km/h"), 20, 20, 24, Color::RAYWHITE);
    d.draw_text(&format!("Distance: {:.0} / {GOAL_METERS:.0} m", drive.distance()), 20, 52, 24, Color::RAYWHITE);
    d.draw_text(&format!("Passed: {}", drive.passed()), 20, 84, 24, Color::RAYWHITE);

    let bar_w = 300;
    let y = screen.1 - 40;
    d.draw_rectangle(20, y, bar_w, 16, Color::DARKGRAY);
    d.draw_rectangle(20, y, (bar_w as f32 * drive.progress()) as i32, 16, Color::GREEN);
}
