//! Main menu selection.
use crate::core::Cue;
use crate::core::input::{InputFrame, Key};

pub const MENU_OPTIONS: [&str; 3] = ["Start", "Settings", "Exit"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Settings,
    Exit,
}

#[derive(Debug, Default)]
pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn choice(&self) -> MenuChoice {
        match self.selected {
            0 => MenuChoice::Start,
            1 => MenuChoice::Settings,
            _ => MenuChoice::Exit,
        }
    }

    /// Handles navigation; returns a choice once one is activated.
    pub fn update(&mut self, input: &InputFrame, cues: &mut Vec<Cue>) -> Option<MenuChoice> {
        let n = MENU_OPTIONS.len();

        if let Some(i) = input.hover.filter(|i| *i < n) {
            if i != self.selected {
                self.selected = i;
                cues.push(Cue::Hover);
            }
        }
        if input.pressed_any(&[Key::Letter('W'), Key::Up]) {
            self.selected = (self.selected + n - 1) % n;
            cues.push(Cue::Hover);
        }
        if input.pressed_any(&[Key::Letter('S'), Key::Down]) {
            self.selected = (self.selected + 1) % n;
            cues.push(Cue::Hover);
        }

        // Clicks only count over an item, Enter always does.
        let clicked = input.left_click && input.hover.is_some();
        if clicked || input.pressed(Key::Enter) {
            cues.push(Cue::Select);
            return Some(self.choice());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_wraps_both_ways() {
        let mut m = Menu::default();
        let mut cues = Vec::new();
        m.update(&InputFrame::with_pressed(&[Key::Letter('W')]), &mut cues);
        assert_eq!(m.choice(), MenuChoice::Exit);
        m.update(&InputFrame::with_pressed(&[Key::Letter('S')]), &mut cues);
        assert_eq!(m.choice(), MenuChoice::Start);
        assert_eq!(cues, vec![Cue::Hover, Cue::Hover]);
    }

    #[test]
    fn hover_only_cues_on_change() {
        let mut m = Menu::default();
        let mut cues = Vec::new();
        let over_first = InputFrame { hover: Some(0), ..Default::default() };
        m.update(&over_first, &mut cues);
        assert!(cues.is_empty());
        let over_second = InputFrame { hover: Some(1), ..Default::default() };
        m.update(&over_second, &mut cues);
        m.update(&over_second, &mut cues);
        assert_eq!(cues, vec![Cue::Hover]);
        assert_eq!(m.choice(), MenuChoice::Settings);
    }

    #[test]
    fn enter_activates_selection() {
        let mut m = Menu { selected: 2 };
        let mut cues = Vec::new();
        assert_eq!(m.update(&InputFrame::with_pressed(&[Key::Enter]), &mut cues), Some(MenuChoice::Exit));
        assert_eq!(cues, vec![Cue::Select]);
    }

    #[test]
    fn click_outside_items_is_ignored() {
        let mut m = Menu::default();
        let mut cues = Vec::new();
        let click = InputFrame { left_click: true, ..Default::default() };
        assert_eq!(m.update(&click, &mut cues), None);
        let click_on = InputFrame { left_click: true, hover: Some(0), ..Default::default() };
        assert_eq!(m.update(&click_on, &mut cues), Some(MenuChoice::Start));
    }

    #[test]
    fn holding_enter_does_not_repeat() {
        let mut m = Menu::default();
        let mut cues = Vec::new();
        assert_eq!(m.update(&InputFrame::with_held(&[Key::Enter]), &mut cues), None);
    }
}
