//! Setting Puzzles - a fullscreen arcade menu with three small levels.
//!
//! Modules:
//! - `core`: game logic and the screen state machine (no window needed)
//! - `render`: raylib drawing and menu layout
//! - `audio_manager`: rodio navigation sounds, music and drive effects

pub mod audio_manager;
pub mod core;
pub mod render;

pub use crate::core::app::App;
pub use crate::core::settings::Settings;
pub use crate::core::state::{GameState, Level};
