//! Keyboard/mouse snapshot and edge detection.
//!
//! The shell samples raw "is down" state once per frame into a [`RawInput`];
//! [`InputTracker`] diffs it against the previous frame so handlers only ask
//! `pressed(key)` and never keep their own latch flags.

/// Keys the game reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Letter(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
    F1,
}

impl Key {
    /// Every key the shell needs to poll.
    pub fn all() -> impl Iterator<Item = Key> {
        ('A'..='Z')
            .map(Key::Letter)
            .chain([Key::Up, Key::Down, Key::Left, Key::Right, Key::Enter, Key::Space, Key::Escape, Key::F1])
    }

    fn bit(self) -> u64 {
        let idx = match self {
            Key::Letter(c) => {
                let c = c.to_ascii_uppercase();
                if !c.is_ascii_uppercase() { return 0; }
                c as u32 - 'A' as u32
            }
            Key::Up => 26,
            Key::Down => 27,
            Key::Left => 28,
            Key::Right => 29,
            Key::Enter => 30,
            Key::Space => 31,
            Key::Escape => 32,
            Key::F1 => 33,
        };
        1u64 << idx
    }

    /// The letter for a `Letter` key.
    pub fn letter(self) -> Option<char> {
        match self {
            Key::Letter(c) => Some(c.to_ascii_uppercase()),
            _ => None,
        }
    }
}

/// Set of keys packed into a bitmask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet(u64);

impl KeySet {
    pub fn insert(&mut self, key: Key) { self.0 |= key.bit(); }
    pub fn contains(&self, key: Key) -> bool { let b = key.bit(); b != 0 && self.0 & b != 0 }
    fn difference(self, other: KeySet) -> KeySet { KeySet(self.0 & !other.0) }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::all().filter(|k| self.contains(*k))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::default();
        for k in iter { set.insert(k); }
        set
    }
}

/// What the shell samples from the window each frame.
#[derive(Copy, Clone, Debug, Default)]
pub struct RawInput {
    pub held: KeySet,
    pub mouse: (f32, f32),
    pub mouse_left: bool,
    pub mouse_right: bool,
}

/// Per-frame input handed to the game logic.
#[derive(Copy, Clone, Debug, Default)]
pub struct InputFrame {
    pub held: KeySet,
    pub pressed: KeySet,
    pub mouse: (f32, f32),
    pub left_click: bool,
    pub right_click: bool,
    /// Index of the menu row under the mouse, filled in by the layout code.
    pub hover: Option<usize>,
}

impl InputFrame {
    pub fn held(&self, key: Key) -> bool { self.held.contains(key) }
    pub fn pressed(&self, key: Key) -> bool { self.pressed.contains(key) }
    pub fn pressed_any(&self, keys: &[Key]) -> bool { keys.iter().any(|k| self.pressed(*k)) }
    pub fn held_any(&self, keys: &[Key]) -> bool { keys.iter().any(|k| self.held(*k)) }

    /// Frame where exactly `keys` went down this frame.
    pub fn with_pressed(keys: &[Key]) -> Self {
        let set: KeySet = keys.iter().copied().collect();
        Self { held: set, pressed: set, ..Default::default() }
    }

    /// Frame where `keys` are held but were already down last frame.
    pub fn with_held(keys: &[Key]) -> Self {
        Self { held: keys.iter().copied().collect(), ..Default::default() }
    }
}

/// Turns successive [`RawInput`] samples into edge-aware [`InputFrame`]s.
#[derive(Debug, Default)]
pub struct InputTracker {
    last: RawInput,
}

impl InputTracker {
    pub fn new() -> Self { Self::default() }

    pub fn update(&mut self, raw: RawInput) -> InputFrame {
        let frame = InputFrame {
            held: raw.held,
            pressed: raw.held.difference(self.last.held),
            mouse: raw.mouse,
            left_click: raw.mouse_left && !self.last.mouse_left,
            right_click: raw.mouse_right && !self.last.mouse_right,
            hover: None,
        };
        self.last = raw;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(keys: &[Key]) -> RawInput {
        RawInput { held: keys.iter().copied().collect(), ..Default::default() }
    }

    #[test]
    fn press_fires_once_while_held() {
        let mut t = InputTracker::new();
        assert!(t.update(raw(&[Key::Enter])).pressed(Key::Enter));
        let f = t.update(raw(&[Key::Enter]));
        assert!(!f.pressed(Key::Enter));
        assert!(f.held(Key::Enter));
        assert!(!t.update(raw(&[])).held(Key::Enter));
        assert!(t.update(raw(&[Key::Enter])).pressed(Key::Enter));
    }

    #[test]
    fn mouse_clicks_are_edges() {
        let mut t = InputTracker::new();
        let down = RawInput { mouse_left: true, ..Default::default() };
        assert!(t.update(down).left_click);
        assert!(!t.update(down).left_click);
        assert!(!t.update(RawInput::default()).left_click);
    }

    #[test]
    fn letters_are_case_insensitive() {
        let set: KeySet = [Key::Letter('q')].into_iter().collect();
        assert!(set.contains(Key::Letter('Q')));
        assert!(!set.contains(Key::Letter('W')));
        assert!(!KeySet::default().contains(Key::Letter('1')));
    }

    #[test]
    fn every_key_has_a_distinct_bit() {
        let keys: Vec<Key> = Key::all().collect();
        assert_eq!(keys.len(), 34);
        let set: KeySet = keys.iter().copied().collect();
        assert_eq!(set.iter().count(), 34);
    }
}
