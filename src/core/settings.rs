//! Game settings, their JSON file, and the settings screen.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::input::{InputFrame, Key};
use crate::core::Cue;

/// Frame limits offered in the settings screen; 0 means unlimited.
pub const FRAMERATE_OPTIONS: [u32; 6] = [0, 30, 60, 120, 144, 240];

/// Virtual resolutions the maze is sized from.
pub const MAZE_SIZE_OPTIONS: [(u32, u32); 5] = [
    (800, 600),
    (1280, 720),
    (1600, 900),
    (1920, 1080),
    (2560, 1440),
];

pub const GAMMA_MIN: f32 = 0.5;
pub const GAMMA_MAX: f32 = 2.0;
const GAMMA_STEP: f32 = 0.1;
const VOLUME_STEP: f32 = 10.0;

pub const DEFAULT_PATH: &str = "settings.json";
pub const PATH_ENV: &str = "SETTING_PUZZLES_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub vsync: bool,
    /// Index into [`FRAMERATE_OPTIONS`].
    pub framerate_index: usize,
    /// Index into [`MAZE_SIZE_OPTIONS`].
    pub maze_size_index: usize,
    /// Wall brightness for the dark maze.
    pub gamma: f32,
    /// 0 - 100
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync: false,
            framerate_index: 2,
            maze_size_index: 1,
            gamma: 1.0,
            music_volume: 100.0,
        }
    }
}

impl Settings {
    pub fn framerate(&self) -> u32 { FRAMERATE_OPTIONS[self.framerate_index] }

    pub fn maze_resolution(&self) -> (u32, u32) { MAZE_SIZE_OPTIONS[self.maze_size_index] }

    /// Navigation cue volume, 0 - 100.
    pub fn cue_volume(&self) -> f32 { self.music_volume * 0.8 }

    /// Grey level for maze walls.
    pub fn wall_brightness(&self) -> u8 {
        ((self.gamma / 2.0) * 255.0).clamp(0.0, 255.0) as u8
    }

    /// Brings hand-edited or stale values back into range.
    pub fn sanitize(&mut self) {
        self.framerate_index = self.framerate_index.min(FRAMERATE_OPTIONS.len() - 1);
        self.maze_size_index = self.maze_size_index.min(MAZE_SIZE_OPTIONS.len() - 1);
        self.gamma = if self.gamma.is_finite() { self.gamma.clamp(GAMMA_MIN, GAMMA_MAX) } else { 1.0 };
        self.music_volume = if self.music_volume.is_finite() { self.music_volume.clamp(0.0, 100.0) } else { 100.0 };
    }

    /// Settings path, honouring the override environment variable.
    pub fn path() -> PathBuf {
        std::env::var_os(PATH_ENV).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_PATH))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let mut s: Settings =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        s.sanitize();
        Ok(s)
    }

    /// Loads settings, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(s) => {
                log::info!("Loaded settings from {}", path.display());
                s
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    /// Writes to a temporary file then renames over `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("renaming onto {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Display options as last pushed to the window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AppliedDisplay {
    vsync: bool,
    framerate: u32,
}

/// Display options that differ from what the window currently uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayChange {
    pub vsync: Option<bool>,
    pub framerate: Option<u32>,
}

impl AppliedDisplay {
    pub fn new(settings: &Settings) -> Self {
        Self { vsync: settings.vsync, framerate: settings.framerate() }
    }

    /// Records `settings` as applied and returns what changed since last time.
    pub fn sync(&mut self, settings: &Settings) -> DisplayChange {
        let next = Self::new(settings);
        let change = DisplayChange {
            vsync: (next.vsync != self.vsync).then_some(next.vsync),
            framerate: (next.framerate != self.framerate).then_some(next.framerate),
        };
        *self = next;
        change
    }
}

/// Rows of the settings screen, top to bottom.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettingsRow {
    VSync,
    Framerate,
    MazeSize,
    Brightness,
    MusicVolume,
    Back,
}

pub const SETTINGS_ROWS: [SettingsRow; 6] = [
    SettingsRow::VSync,
    SettingsRow::Framerate,
    SettingsRow::MazeSize,
    SettingsRow::Brightness,
    SettingsRow::MusicVolume,
    SettingsRow::Back,
];

impl SettingsRow {
    pub fn label(self, s: &Settings) -> String {
        match self {
            SettingsRow::VSync => format!("VSync: {}", if s.vsync { "On" } else { "Off" }),
            SettingsRow::Framerate => match s.framerate() {
                0 => "Framerate Limit: Unlimited".to_string(),
                fps => format!("Framerate Limit: {fps}"),
            },
            SettingsRow::MazeSize => {
                let (w, h) = s.maze_resolution();
                format!("Maze Size: {w}x{h}")
            }
            SettingsRow::Brightness => format!("Brightness: {:.1}", s.gamma),
            SettingsRow::MusicVolume => format!("Music Volume: {:.0}", s.music_volume),
            SettingsRow::Back => "Back".to_string(),
        }
    }
}

/// What the settings screen asks the state machine to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    Changed,
    /// Maze size changed; the maze must be rebuilt.
    MazeResized,
    Close,
}

#[derive(Debug, Default)]
pub struct SettingsScreen {
    pub selected: usize,
}

impl SettingsScreen {
    pub fn row(&self) -> SettingsRow { SETTINGS_ROWS[self.selected] }

    pub fn update(&mut self, input: &InputFrame, settings: &mut Settings, cues: &mut Vec<Cue>) -> SettingsAction {
        if input.pressed(Key::Escape) {
            cues.push(Cue::Back);
            return SettingsAction::Close;
        }

        if let Some(i) = input.hover.filter(|i| *i < SETTINGS_ROWS.len()) {
            if i != self.selected {
                self.selected = i;
                cues.push(Cue::Hover);
            }
        }

        let n = SETTINGS_ROWS.len();
        if input.pressed_any(&[Key::Letter('W'), Key::Up]) {
            self.selected = (self.selected + n - 1) % n;
            cues.push(Cue::Hover);
        }
        if input.pressed_any(&[Key::Letter('S'), Key::Down]) {
            self.selected = (self.selected + 1) % n;
            cues.push(Cue::Hover);
        }

        let mut action = SettingsAction::None;
        if input.pressed_any(&[Key::Letter('A'), Key::Left]) || input.right_click {
            action = self.adjust(settings, -1, cues);
        }
        if input.pressed_any(&[Key::Letter('D'), Key::Right]) {
            action = self.adjust(settings, 1, cues);
        }
        if input.pressed(Key::Enter) || input.left_click {
            match self.row() {
                SettingsRow::Back => {
                    cues.push(Cue::Back);
                    return SettingsAction::Close;
                }
                SettingsRow::VSync if input.pressed(Key::Enter) => {
                    settings.vsync = !settings.vsync;
                    cues.push(Cue::Select);
                    action = SettingsAction::Changed;
                }
                _ if input.left_click => action = self.adjust(settings, 1, cues),
                _ => {}
            }
        }
        action
    }

    /// Steps the selected row's value by `dir` (-1 or 1).
    fn adjust(&self, s: &mut Settings, dir: i32, cues: &mut Vec<Cue>) -> SettingsAction {
        let stepped = match self.row() {
            SettingsRow::VSync => {
                s.vsync = !s.vsync;
                true
            }
            SettingsRow::Framerate => step_index(&mut s.framerate_index, FRAMERATE_OPTIONS.len(), dir),
            SettingsRow::MazeSize => step_index(&mut s.maze_size_index, MAZE_SIZE_OPTIONS.len(), dir),
            SettingsRow::Brightness => step_value(&mut s.gamma, GAMMA_STEP * dir as f32, GAMMA_MIN, GAMMA_MAX),
            SettingsRow::MusicVolume => step_value(&mut s.music_volume, VOLUME_STEP * dir as f32, 0.0, 100.0),
            SettingsRow::Back => false,
        };
        if !stepped {
            cues.push(Cue::Error);
            return SettingsAction::None;
        }
        cues.push(Cue::Hover);
        if self.row() == SettingsRow::MazeSize { SettingsAction::MazeResized } else { SettingsAction::Changed }
    }
}

fn step_index(idx: &mut usize, len: usize, dir: i32) -> bool {
    let next = *idx as i64 + dir as i64;
    if next < 0 || next >= len as i64 { return false; }
    *idx = next as usize;
    true
}

fn step_value(v: &mut f32, delta: f32, lo: f32, hi: f32) -> bool {
    let next = ((*v + delta) * 10.0).round() / 10.0;
    if next < lo - f32::EPSILON || next > hi + f32::EPSILON { return false; }
    *v = next.clamp(lo, hi);
    true
}
