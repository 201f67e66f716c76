//! Core game types and logic (no window or audio device needed).
//!
//! Re-exports:
//! - `input`: key snapshot and edge detection
//! - `state`: screen states and level metadata
//! - `maze`: maze generation, collision and movement
//! - `intro`, `menu`, `settings`: non-gameplay screens
//! - `fast_lines`, `dark_maze`, `drive`: the three levels
//! - `app`: the state machine tying them together

pub mod app;
pub mod dark_maze;
pub mod drive;
pub mod fast_lines;
pub mod input;
pub mod intro;
pub mod maze;
pub mod menu;
pub mod settings;
pub mod state;

/// Sound the game logic asks the audio layer to play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Hover,
    Select,
    Back,
    Error,
    Horn,
    Crash,
}

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self { Self { x, y, w, h } }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    pub fn overlaps(&self, o: &Rect) -> bool {
        self.x < o.x + o.w && o.x < self.x + self.w && self.y < o.y + o.h && o.y < self.y + self.h
    }

    pub fn shrunk(&self, by: f32) -> Rect {
        Rect { x: self.x + by, y: self.y + by, w: (self.w - 2.0 * by).max(0.0), h: (self.h - 2.0 * by).max(0.0) }
    }
}
