//! Introduction screen timing.

pub const TITLE: &str = "/Setting Puzzles/";

pub const INTRO_LINES: [&str; 14] = [
    "Welcome to Setting Puzzles",
    "",
    "A journey through three unique challenges that explore",
    "the boundaries between settings and gameplay.",
    "",
    "Each level presents a different perspective on how",
    "configuration options can become part of the experience.",
    "",
    "Level 1: Text flows and speed - where reading becomes reactive",
    "Level 2: Navigation through space - where paths define possibility",
    "Level 3: A drive with choices - where silence speaks volumes",
    "",
    "This is not just a game with settings,",
    "but an exploration of settings as narrative.",
];

const LINE_DELAY: f32 = 0.3;
const FADE_RATE: f32 = 2.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Header,
    Level,
    Closing,
    Body,
}

pub fn line_style(i: usize) -> LineStyle {
    if i == 0 {
        LineStyle::Header
    } else if INTRO_LINES[i].starts_with("Level") {
        LineStyle::Level
    } else if i >= INTRO_LINES.len() - 2 {
        LineStyle::Closing
    } else {
        LineStyle::Body
    }
}

#[derive(Debug, Default)]
pub struct Intro {
    pub elapsed: f32,
}

impl Intro {
    pub fn tick(&mut self, dt: f32) { self.elapsed += dt; }

    /// Opacity of line `i`, 0 - 1.
    pub fn line_alpha(&self, i: usize) -> f32 {
        ((self.elapsed - i as f32 * LINE_DELAY) * FADE_RATE).clamp(0.0, 1.0)
    }

    pub fn prompt_visible(&self) -> bool {
        self.elapsed > INTRO_LINES.len() as f32 * LINE_DELAY + 1.0
    }

    pub fn prompt_pulse(&self) -> f32 { (self.elapsed * 3.0).sin() * 0.3 + 0.7 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_fade_in_one_after_another() {
        let mut intro = Intro::default();
        intro.tick(0.25);
        assert!((intro.line_alpha(0) - 0.5).abs() < 1e-5);
        assert_eq!(intro.line_alpha(1), 0.0);
        intro.tick(1.0);
        assert_eq!(intro.line_alpha(0), 1.0);
        assert!(intro.line_alpha(4) > 0.0);
    }

    #[test]
    fn prompt_waits_for_all_lines() {
        let mut intro = Intro::default();
        intro.tick(5.1);
        assert!(!intro.prompt_visible());
        intro.tick(0.2);
        assert!(intro.prompt_visible());
        let p = intro.prompt_pulse();
        assert!((0.4..=1.0).contains(&p));
    }

    #[test]
    fn styles() {
        assert_eq!(line_style(0), LineStyle::Header);
        assert_eq!(line_style(8), LineStyle::Level);
        assert_eq!(line_style(13), LineStyle::Closing);
        assert_eq!(line_style(2), LineStyle::Body);
    }
}
