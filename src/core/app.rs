//! The screen state machine.
//!
//! One handler runs per frame. Handlers read the shared [`InputFrame`], may
//! switch state, and push [`Cue`]s for the audio layer.
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::Cue;
use crate::core::dark_maze::DarkMaze;
use crate::core::drive::{Drive, DriveEvent, Phase};
use crate::core::fast_lines::{self, FastLines, Outcome};
use crate::core::input::{InputFrame, Key};
use crate::core::intro::Intro;
use crate::core::menu::{Menu, MenuChoice};
use crate::core::settings::{Settings, SettingsAction, SettingsScreen};
use crate::core::state::{GameState, Level};

/// Side effects of one frame that the shell has to carry out.
#[derive(Debug, Default)]
pub struct FrameResult {
    pub cues: Vec<Cue>,
    /// Display-related settings changed and must be re-applied.
    pub settings_changed: bool,
    /// The settings screen was left; time to persist.
    pub settings_closed: bool,
}

pub struct App {
    state: GameState,
    /// Where the settings screen returns to.
    return_to: GameState,
    screen: (i32, i32),
    settings: Settings,
    rng: StdRng,
    intro: Intro,
    menu: Menu,
    settings_screen: SettingsScreen,
    fast_lines: Option<FastLines>,
    scroll_width: f32,
    dark_maze: Option<DarkMaze>,
    maze_dirty: bool,
    drive: Option<Drive>,
}

impl App {
    pub fn new(settings: Settings, screen: (i32, i32), seed: u64) -> Self {
        Self {
            state: GameState::Introduction,
            return_to: GameState::Menu,
            screen,
            settings,
            rng: StdRng::seed_from_u64(seed),
            intro: Intro::default(),
            menu: Menu::default(),
            settings_screen: SettingsScreen::default(),
            fast_lines: None,
            scroll_width: 0.0,
            dark_maze: None,
            maze_dirty: false,
            drive: None,
        }
    }

    pub fn state(&self) -> GameState { self.state }
    pub fn settings(&self) -> &Settings { &self.settings }
    pub fn intro(&self) -> &Intro { &self.intro }
    pub fn menu(&self) -> &Menu { &self.menu }
    pub fn settings_screen(&self) -> &SettingsScreen { &self.settings_screen }
    pub fn fast_lines(&self) -> Option<&FastLines> { self.fast_lines.as_ref() }
    pub fn dark_maze(&self) -> Option<&DarkMaze> { self.dark_maze.as_ref() }
    pub fn drive(&self) -> Option<&Drive> { self.drive.as_ref() }
    pub fn is_running(&self) -> bool { self.state != GameState::Exit }

    pub fn set_screen(&mut self, screen: (i32, i32)) { self.screen = screen; }

    /// Pixel width of one "NextLevel = X " tile, measured by the renderer.
    pub fn set_scroll_width(&mut self, px: f32) { self.scroll_width = px; }

    fn go(&mut self, next: GameState) {
        if next != self.state {
            log::debug!("{:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    pub fn update(&mut self, input: &InputFrame, dt: f32) -> FrameResult {
        let mut out = FrameResult::default();

        if input.pressed(Key::F1) && !matches!(self.state, GameState::Settings | GameState::Exit) {
            self.open_settings(&mut out);
            return out;
        }

        match self.state {
            GameState::Introduction => self.update_intro(input, dt, &mut out),
            GameState::Menu => self.update_menu(input, &mut out),
            GameState::PreLevel(level) => self.update_pre_level(level, input, &mut out),
            GameState::Playing(level) => self.update_playing(level, input, dt, &mut out),
            GameState::Settings => self.update_settings(input, &mut out),
            GameState::Exit => {}
        }
        out
    }

    fn open_settings(&mut self, out: &mut FrameResult) {
        self.return_to = self.state;
        out.cues.push(Cue::Select);
        self.go(GameState::Settings);
    }

    fn update_intro(&mut self, input: &InputFrame, dt: f32, out: &mut FrameResult) {
        self.intro.tick(dt);
        if input.pressed_any(&[Key::Enter, Key::Space]) {
            out.cues.push(Cue::Select);
            self.go(GameState::Menu);
        } else if input.pressed(Key::Escape) {
            out.cues.push(Cue::Back);
            self.go(GameState::Menu);
        }
    }

    fn update_menu(&mut self, input: &InputFrame, out: &mut FrameResult) {
        match self.menu.update(input, &mut out.cues) {
            Some(MenuChoice::Start) => self.go(GameState::PreLevel(Level::FastLines)),
            Some(MenuChoice::Settings) => {
                self.return_to = GameState::Menu;
                self.go(GameState::Settings);
            }
            Some(MenuChoice::Exit) => self.go(GameState::Exit),
            None => {}
        }
    }

    fn update_pre_level(&mut self, level: Level, input: &InputFrame, out: &mut FrameResult) {
        if input.pressed(Key::Enter) {
            out.cues.push(Cue::Select);
            self.start_level(level);
        } else if input.pressed_any(&[Key::Letter('M'), Key::Escape]) {
            out.cues.push(Cue::Back);
            self.go(GameState::Menu);
        }
    }

    /// Fresh state for `level`, then switch to it.
    fn start_level(&mut self, level: Level) {
        match level {
            Level::FastLines => self.fast_lines = Some(FastLines::new(&mut self.rng)),
            Level::DarkMaze => {
                self.dark_maze = Some(DarkMaze::new(self.settings.maze_resolution(), self.screen, &mut self.rng));
                self.maze_dirty = false;
            }
            Level::SilentDrive => self.drive = Some(Drive::new(self.screen)),
        }
        self.go(GameState::Playing(level));
    }

    /// Pre-level screen of the level after `from`, or the menu after the last one.
    fn advance(&mut self, from: Level) {
        match from.next() {
            Some(next) => self.go(GameState::PreLevel(next)),
            None => self.go(GameState::Menu),
        }
    }

    fn update_playing(&mut self, level: Level, input: &InputFrame, dt: f32, out: &mut FrameResult) {
        if input.pressed(Key::Letter('M')) {
            out.cues.push(Cue::Back);
            self.go(GameState::Menu);
            return;
        }
        if input.pressed(Key::Escape) {
            out.cues.push(Cue::Back);
            self.go(GameState::PreLevel(level));
            return;
        }
        match level {
            Level::FastLines => self.play_fast_lines(input, dt, out),
            Level::DarkMaze => self.play_dark_maze(input, dt, out),
            Level::SilentDrive => self.play_drive(input, dt, out),
        }
    }

    fn play_fast_lines(&mut self, input: &InputFrame, dt: f32, out: &mut FrameResult) {
        let speed = fast_lines::scroll_speed(self.settings.framerate());
        let width = self.scroll_width;
        let game = self.fast_lines.get_or_insert_with(|| FastLines::new(&mut self.rng));
        game.scroll(dt, speed, width);
        match game.handle_keys(input) {
            Outcome::Cleared => {
                out.cues.push(Cue::Select);
                self.advance(Level::FastLines);
            }
            Outcome::Miss => out.cues.push(Cue::Error),
            Outcome::Playing => {}
        }
    }

    fn play_dark_maze(&mut self, input: &InputFrame, dt: f32, out: &mut FrameResult) {
        let resolution = self.settings.maze_resolution();
        match self.dark_maze.as_mut() {
            Some(level) if !self.maze_dirty => level.ensure_size(resolution, self.screen, &mut self.rng),
            _ => {
                self.dark_maze = Some(DarkMaze::new(resolution, self.screen, &mut self.rng));
                self.maze_dirty = false;
            }
        }
        let Some(level) = self.dark_maze.as_mut() else { return };
        level.update(input, dt);
        if level.wants_next_level(input) {
            out.cues.push(Cue::Select);
            self.advance(Level::DarkMaze);
        }
    }

    fn play_drive(&mut self, input: &InputFrame, dt: f32, out: &mut FrameResult) {
        let screen = self.screen;
        let drive = self.drive.get_or_insert_with(|| Drive::new(screen));
        match drive.phase() {
            Phase::Crashed => {
                if input.pressed(Key::Letter('R')) {
                    out.cues.push(Cue::Select);
                    drive.restart();
                }
            }
            Phase::Finished => {
                if input.pressed(Key::Enter) {
                    out.cues.push(Cue::Select);
                    self.advance(Level::SilentDrive);
                }
            }
            Phase::Driving => {
                for event in drive.update(input, dt, &mut self.rng) {
                    match event {
                        DriveEvent::Horn => out.cues.push(Cue::Horn),
                        DriveEvent::Crash => out.cues.push(Cue::Crash),
                        DriveEvent::Finished => out.cues.push(Cue::Select),
                    }
                }
            }
        }
    }

    fn update_settings(&mut self, input: &InputFrame, out: &mut FrameResult) {
        match self.settings_screen.update(input, &mut self.settings, &mut out.cues) {
            SettingsAction::None => {}
            SettingsAction::Changed => out.settings_changed = true,
            SettingsAction::MazeResized => {
                out.settings_changed = true;
                self.maze_dirty = true;
            }
            SettingsAction::Close => {
                out.settings_closed = true;
                let back = self.return_to;
                self.go(back);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: (i32, i32) = (1280, 720);

    fn app() -> App { App::new(Settings::default(), SCREEN, 7) }

    fn press(app: &mut App, keys: &[Key]) -> FrameResult {
        app.update(&InputFrame::with_pressed(keys), 1.0 / 60.0)
    }

    fn to_level(app: &mut App, level: Level) {
        app.go(GameState::PreLevel(level));
        press(app, &[Key::Enter]);
        assert_eq!(app.state(), GameState::Playing(level));
    }

    #[test]
    fn starts_on_introduction() {
        assert_eq!(app().state(), GameState::Introduction);
    }

    #[test]
    fn intro_enter_and_escape_reach_menu() {
        let mut a = app();
        let r = press(&mut a, &[Key::Space]);
        assert_eq!(a.state(), GameState::Menu);
        assert_eq!(r.cues, vec![Cue::Select]);

        let mut a = app();
        let r = press(&mut a, &[Key::Escape]);
        assert_eq!(a.state(), GameState::Menu);
        assert_eq!(r.cues, vec![Cue::Back]);
    }

    #[test]
    fn menu_start_goes_to_first_pre_level() {
        let mut a = app();
        press(&mut a, &[Key::Enter]);
        press(&mut a, &[Key::Enter]);
        assert_eq!(a.state(), GameState::PreLevel(Level::FastLines));
    }

    #[test]
    fn menu_exit_stops_running() {
        let mut a = app();
        a.go(GameState::Menu);
        press(&mut a, &[Key::Letter('W')]);
        press(&mut a, &[Key::Enter]);
        assert!(!a.is_running());
    }

    #[test]
    fn held_enter_does_not_skip_pre_level() {
        let mut a = app();
        a.go(GameState::Menu);
        press(&mut a, &[Key::Enter]);
        a.update(&InputFrame::with_held(&[Key::Enter]), 0.016);
        assert_eq!(a.state(), GameState::PreLevel(Level::FastLines));
    }

    #[test]
    fn f1_returns_to_where_it_was_opened() {
        let mut a = app();
        to_level(&mut a, Level::DarkMaze);
        let before = a.dark_maze().map(|m| m.maze().player_pos());
        press(&mut a, &[Key::F1]);
        assert_eq!(a.state(), GameState::Settings);
        let r = press(&mut a, &[Key::Escape]);
        assert!(r.settings_closed);
        assert_eq!(a.state(), GameState::Playing(Level::DarkMaze));
        assert_eq!(a.dark_maze().map(|m| m.maze().player_pos()), before);
    }

    #[test]
    fn settings_from_menu_returns_to_menu() {
        let mut a = app();
        a.go(GameState::Menu);
        press(&mut a, &[Key::Letter('S')]);
        press(&mut a, &[Key::Enter]);
        assert_eq!(a.state(), GameState::Settings);
        press(&mut a, &[Key::Escape]);
        assert_eq!(a.state(), GameState::Menu);
    }

    #[test]
    fn fast_lines_target_clears_level() {
        let mut a = app();
        to_level(&mut a, Level::FastLines);
        let target = a.fast_lines().map(|g| g.target()).unwrap();
        let r = press(&mut a, &[Key::Letter(target)]);
        assert_eq!(a.state(), GameState::PreLevel(Level::DarkMaze));
        assert_eq!(r.cues, vec![Cue::Select]);
    }

    #[test]
    fn wrong_letter_plays_error() {
        let mut a = app();
        to_level(&mut a, Level::FastLines);
        let target = a.fast_lines().map(|g| g.target()).unwrap();
        let wrong = if target == 'Q' { 'Z' } else { 'Q' };
        let r = press(&mut a, &[Key::Letter(wrong)]);
        assert_eq!(r.cues, vec![Cue::Error]);
        assert_eq!(a.state(), GameState::Playing(Level::FastLines));
    }

    #[test]
    fn escape_and_m_leave_levels() {
        let mut a = app();
        to_level(&mut a, Level::SilentDrive);
        press(&mut a, &[Key::Escape]);
        assert_eq!(a.state(), GameState::PreLevel(Level::SilentDrive));
        press(&mut a, &[Key::Enter]);
        press(&mut a, &[Key::Letter('M')]);
        assert_eq!(a.state(), GameState::Menu);
    }

    #[test]
    fn pre_level_escape_goes_to_menu() {
        let mut a = app();
        a.go(GameState::PreLevel(Level::DarkMaze));
        press(&mut a, &[Key::Escape]);
        assert_eq!(a.state(), GameState::Menu);
    }

    #[test]
    fn maze_resize_in_settings_rebuilds_maze() {
        let mut a = app();
        to_level(&mut a, Level::DarkMaze);
        assert_eq!(a.dark_maze().map(|m| m.maze().cols()), Some(32));
        press(&mut a, &[Key::F1]);
        a.settings_screen.selected = 2;
        let r = press(&mut a, &[Key::Letter('A')]);
        assert!(r.settings_changed);
        press(&mut a, &[Key::Escape]);
        a.update(&InputFrame::default(), 0.016);
        assert_eq!(a.dark_maze().map(|m| m.maze().cols()), Some(20));
    }

    #[test]
    fn entering_maze_gives_a_fresh_one() {
        let mut a = app();
        to_level(&mut a, Level::DarkMaze);
        for _ in 0..30 {
            a.update(&InputFrame::with_held(&[Key::Letter('D'), Key::Letter('S')]), 1.0 / 60.0);
        }
        press(&mut a, &[Key::Escape]);
        press(&mut a, &[Key::Enter]);
        assert_eq!(a.dark_maze().map(|m| m.maze().player_cell()), Some((0, 0)));
    }

    #[test]
    fn drive_r_does_nothing_while_driving() {
        let mut a = app();
        to_level(&mut a, Level::SilentDrive);
        let r = press(&mut a, &[Key::Letter('R')]);
        assert!(r.cues.is_empty());
        assert_eq!(a.drive().map(|d| d.phase()), Some(Phase::Driving));
    }

    #[test]
    fn drive_crash_then_r_restarts() {
        let mut a = app();
        to_level(&mut a, Level::SilentDrive);
        if let Some(d) = a.drive.as_mut() { d.block_car(); }
        let r = a.update(&InputFrame::default(), 1.0 / 60.0);
        assert_eq!(r.cues, vec![Cue::Crash]);
        assert_eq!(a.drive().map(|d| d.phase()), Some(Phase::Crashed));

        let r = press(&mut a, &[Key::Letter('R')]);
        assert_eq!(r.cues, vec![Cue::Select]);
        assert_eq!(a.drive().map(|d| d.phase()), Some(Phase::Driving));
        assert_eq!(a.drive().map(|d| d.obstacles().len()), Some(0));
        assert_eq!(a.state(), GameState::Playing(Level::SilentDrive));
    }

    #[test]
    fn drive_finish_then_enter_goes_to_menu() {
        let mut a = app();
        to_level(&mut a, Level::SilentDrive);
        if let Some(d) = a.drive.as_mut() { d.set_distance(crate::core::drive::GOAL_METERS - 0.01); }
        let r = a.update(&InputFrame::default(), 1.0 / 60.0);
        assert_eq!(r.cues, vec![Cue::Select]);
        assert_eq!(a.drive().map(|d| d.phase()), Some(Phase::Finished));

        let r = press(&mut a, &[Key::Enter]);
        assert_eq!(r.cues, vec![Cue::Select]);
        assert_eq!(a.state(), GameState::Menu);
    }

    #[test]
    fn maze_exit_and_enter_reaches_drive_intro() {
        let mut a = app();
        to_level(&mut a, Level::DarkMaze);
        let r = press(&mut a, &[Key::Enter]);
        assert!(r.cues.is_empty());
        assert_eq!(a.state(), GameState::Playing(Level::DarkMaze));

        if let Some(level) = a.dark_maze.as_mut() {
            let exit = level.maze().exit_cell();
            level.maze_mut().place_player(exit);
        }
        let r = press(&mut a, &[Key::Enter]);
        assert_eq!(r.cues, vec![Cue::Select]);
        assert_eq!(a.state(), GameState::PreLevel(Level::SilentDrive));
    }

    #[test]
    fn pre_level_m_goes_to_menu() {
        let mut a = app();
        a.go(GameState::PreLevel(Level::SilentDrive));
        let r = press(&mut a, &[Key::Letter('M')]);
        assert_eq!(r.cues, vec![Cue::Back]);
        assert_eq!(a.state(), GameState::Menu);
    }

    #[test]
    fn f1_plays_select() {
        let mut a = app();
        a.go(GameState::Menu);
        let r = press(&mut a, &[Key::F1]);
        assert_eq!(r.cues, vec![Cue::Select]);
        assert_eq!(a.state(), GameState::Settings);
    }

    #[test]
    fn f1_ignored_inside_settings() {
        let mut a = app();
        press(&mut a, &[Key::F1]);
        press(&mut a, &[Key::F1]);
        press(&mut a, &[Key::Escape]);
        assert_eq!(a.state(), GameState::Introduction);
    }
}
