//! Level 1: lines of "NextLevel = X" scroll across the screen in alternating
//! directions; pressing X clears the level.
use rand::Rng;

use crate::core::input::{InputFrame, Key};

/// Letters that already mean something while playing.
pub const RESERVED: [char; 1] = ['M'];

const BASE_SPEED: f32 = 1000.0;

pub fn candidate_keys() -> Vec<char> {
    ('A'..='Z').filter(|c| !RESERVED.contains(c)).collect()
}

/// Scroll speed in px/s for a framerate limit (0 = unlimited).
pub fn scroll_speed(framerate: u32) -> f32 {
    if framerate > 0 { BASE_SPEED / (100.0 / framerate as f32) } else { BASE_SPEED * 2.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    /// A letter other than the target went down.
    Miss,
    Cleared,
}

#[derive(Debug)]
pub struct FastLines {
    target: char,
    /// Start of right-to-left lines.
    left_offset: f32,
    /// Start of left-to-right lines.
    right_offset: f32,
}

impl FastLines {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let keys = candidate_keys();
        Self {
            target: keys[rng.gen_range(0..keys.len())],
            left_offset: 0.0,
            right_offset: 0.0,
        }
    }

    pub fn target(&self) -> char { self.target }

    pub fn message(&self) -> String { format!("NextLevel = {} ", self.target) }

    /// Tiling start for screen line `line`: even lines scroll left, odd lines right.
    pub fn line_offset(&self, line: usize) -> f32 {
        if line % 2 == 1 { self.right_offset } else { self.left_offset }
    }

    /// Advances both scroll offsets, keeping them in `(-text_width, 0]`.
    pub fn scroll(&mut self, dt: f32, speed: f32, text_width: f32) {
        if text_width <= 0.0 { return; }
        let d = speed * dt;
        self.left_offset = (self.left_offset - d).rem_euclid(text_width);
        if self.left_offset > 0.0 { self.left_offset -= text_width; }
        self.right_offset = (self.right_offset + d).rem_euclid(text_width);
        if self.right_offset > 0.0 { self.right_offset -= text_width; }
    }

    pub fn handle_keys(&self, input: &InputFrame) -> Outcome {
        if input.pressed(Key::Letter(self.target)) {
            return Outcome::Cleared;
        }
        let missed = input
            .pressed
            .iter()
            .filter_map(Key::letter)
            .any(|c| !RESERVED.contains(&c));
        if missed { Outcome::Miss } else { Outcome::Playing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn target_is_never_reserved() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let t = FastLines::new(&mut rng).target();
            assert!(t.is_ascii_uppercase());
            assert_ne!(t, 'M');
        }
    }

    #[test]
    fn speed_tracks_framerate() {
        assert_eq!(scroll_speed(60), 600.0);
        assert_eq!(scroll_speed(0), 2000.0);
        assert_eq!(scroll_speed(240), 2400.0);
    }

    #[test]
    fn target_press_clears_and_other_letters_miss() {
        let game = FastLines::new(&mut StdRng::seed_from_u64(1));
        let t = game.target();
        assert_eq!(game.handle_keys(&InputFrame::with_pressed(&[Key::Letter(t)])), Outcome::Cleared);
        let other = if t == 'A' { 'B' } else { 'A' };
        assert_eq!(game.handle_keys(&InputFrame::with_pressed(&[Key::Letter(other)])), Outcome::Miss);
        assert_eq!(game.handle_keys(&InputFrame::with_pressed(&[Key::Letter('M')])), Outcome::Playing);
        assert_eq!(game.handle_keys(&InputFrame::with_held(&[Key::Letter(t)])), Outcome::Playing);
    }

    #[test]
    fn message_shows_target() {
        let game = FastLines::new(&mut StdRng::seed_from_u64(3));
        assert_eq!(game.message(), format!("NextLevel = {} ", game.target()));
    }

    proptest! {
        #[test]
        fn offsets_stay_within_one_tile(steps in proptest::collection::vec(0.0f32..0.5, 1..100), width in 10.0f32..500.0) {
            let mut game = FastLines::new(&mut StdRng::seed_from_u64(0));
            for dt in steps {
                game.scroll(dt, 1200.0, width);
                for line in 0..2 {
                    let o = game.line_offset(line);
                    prop_assert!(o <= 0.0 && o > -width - 1e-3);
                }
            }
        }
    }
}
