//! Screen states and level metadata.

/// The three playable levels, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    FastLines,
    DarkMaze,
    SilentDrive,
}

impl Level {
    pub fn title(self) -> &'static str {
        match self {
            Level::FastLines => "Level 1: Fast Lines",
            Level::DarkMaze => "Level 2: Dark Maze",
            Level::SilentDrive => "Level 3: A Silent Drive",
        }
    }

    /// Control lines shown on the pre-level screen.
    pub fn controls(self) -> &'static [&'static str] {
        match self {
            Level::FastLines => &[
                "Controls:",
                "Press the key shown in the lines",
                "Esc - Back to level intro",
                "M - Return to Menu",
                "F1 - Open Settings",
            ],
            Level::DarkMaze => &[
                "Controls:",
                "W/A/S/D - Move",
                "Enter - Next level (when at exit)",
                "Esc - Back to level intro",
                "M - Return to Menu",
                "F1 - Open Settings",
            ],
            Level::SilentDrive => &[
                "Controls:",
                "A/D - Steer",
                "W/S - Speed up/slow down",
                "R - Restart (when game over)",
                "Esc - Back to level intro",
                "M - Return to Menu",
                "F1 - Open Settings",
            ],
        }
    }

    pub fn next(self) -> Option<Level> {
        match self {
            Level::FastLines => Some(Level::DarkMaze),
            Level::DarkMaze => Some(Level::SilentDrive),
            Level::SilentDrive => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Introduction,
    Menu,
    PreLevel(Level),
    Playing(Level),
    Settings,
    Exit,
}

pub const MENU_TRACK: &str = "Sounds/PiecebyPiece.mp3";
pub const LEVEL_TRACK: &str = "Sounds/PiecebyPiece2.mp3";

impl GameState {
    /// Background music wanted while this state is active.
    pub fn music_track(self) -> &'static str {
        match self {
            GameState::Playing(_) => LEVEL_TRACK,
            _ => MENU_TRACK,
        }
    }

    /// Whether the "F1 - Settings" hint is drawn.
    pub fn shows_settings_hint(self) -> bool {
        !matches!(self, GameState::Settings | GameState::Introduction | GameState::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_chain_in_order() {
        assert_eq!(Level::FastLines.next(), Some(Level::DarkMaze));
        assert_eq!(Level::DarkMaze.next(), Some(Level::SilentDrive));
        assert_eq!(Level::SilentDrive.next(), None);
    }

    #[test]
    fn gameplay_uses_level_track() {
        assert_eq!(GameState::Playing(Level::DarkMaze).music_track(), LEVEL_TRACK);
        assert_eq!(GameState::PreLevel(Level::DarkMaze).music_track(), MENU_TRACK);
        assert_eq!(GameState::Introduction.music_track(), MENU_TRACK);
    }

    #[test]
    fn controls_start_with_header() {
        for lvl in [Level::FastLines, Level::DarkMaze, Level::SilentDrive] {
            assert_eq!(lvl.controls()[0], "Controls:");
        }
    }

    #[test]
    fn every_level_lists_escape_and_menu_keys() {
        for lvl in [Level::FastLines, Level::DarkMaze, Level::SilentDrive] {
            let controls = lvl.controls();
            assert!(controls.contains(&"Esc - Back to level intro"), "{lvl:?}");
            assert!(controls.contains(&"M - Return to Menu"), "{lvl:?}");
        }
    }
}
