//! Where menu rows sit on screen, shared by drawing and mouse hit-testing.
//!
//! Text measurement is passed in so the layout can be checked without a window.
use crate::core::Rect;
use crate::core::app::App;
use crate::core::menu::MENU_OPTIONS;
use crate::core::settings::SETTINGS_ROWS;
use crate::core::state::GameState;

pub const MENU_ITEM_SIZE: i32 = 50;
const MENU_ITEM_GAP: f32 = 80.0;
pub const SETTINGS_ROW_SIZE: i32 = 40;
const SETTINGS_LEFT: f32 = 100.0;
const SETTINGS_TOP: f32 = 200.0;
const SETTINGS_GAP: f32 = 60.0;

/// Menu entries centred horizontally, starting at mid-screen.
pub fn menu_items(screen: (i32, i32), measure: &impl Fn(&str, i32) -> i32) -> Vec<Rect> {
    let cx = screen.0 as f32 / 2.0;
    let cy = screen.1 as f32 / 2.0;
    MENU_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let w = measure(label, MENU_ITEM_SIZE) as f32;
            let h = MENU_ITEM_SIZE as f32;
            Rect::new(cx - w / 2.0, cy + i as f32 * MENU_ITEM_GAP - h / 2.0, w, h)
        })
        .collect()
}

/// Settings rows, left aligned.
pub fn settings_rows(app: &App, measure: &impl Fn(&str, i32) -> i32) -> Vec<Rect> {
    SETTINGS_ROWS
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let w = measure(&row.label(app.settings()), SETTINGS_ROW_SIZE) as f32;
            Rect::new(SETTINGS_LEFT, SETTINGS_TOP + i as f32 * SETTINGS_GAP, w, SETTINGS_ROW_SIZE as f32)
        })
        .collect()
}

/// Index of the row under the mouse on screens that have rows.
pub fn hit_test(app: &App, screen: (i32, i32), mouse: (f32, f32), measure: &impl Fn(&str, i32) -> i32) -> Option<usize> {
    let rows = match app.state() {
        GameState::Menu => menu_items(screen, measure),
        GameState::Settings => settings_rows(app, measure),
        _ => return None,
    };
    rows.iter().position(|r| r.contains(mouse.0, mouse.1))
}

/// Top-left corner that centres text of width `w` on `(cx, y)`.
pub fn centered_x(cx: f32, w: i32) -> i32 { (cx - w as f32 / 2.0) as i32 }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputFrame, Key};
    use crate::core::settings::Settings;

    // Fixed-pitch stand-in for the real font.
    fn mono(text: &str, size: i32) -> i32 { text.len() as i32 * size / 2 }

    #[test]
    fn menu_items_are_stacked_and_centred() {
        let rects = menu_items((1000, 800), &mono);
        assert_eq!(rects.len(), 3);
        for r in &rects {
            assert!((r.x + r.w / 2.0 - 500.0).abs() < 1e-3);
        }
        assert!(rects[1].y - rects[0].y == 80.0);
    }

    #[test]
    fn hit_test_only_on_row_screens() {
        let mut app = App::new(Settings::default(), (1000, 800), 1);
        assert_eq!(hit_test(&app, (1000, 800), (500.0, 400.0), &mono), None);
        app.update(&InputFrame::with_pressed(&[Key::Enter]), 0.0);
        assert_eq!(hit_test(&app, (1000, 800), (500.0, 400.0), &mono), Some(0));
        assert_eq!(hit_test(&app, (1000, 800), (500.0, 480.0), &mono), Some(1));
        assert_eq!(hit_test(&app, (1000, 800), (10.0, 10.0), &mono), None);
    }

    #[test]
    fn settings_rows_hit() {
        let mut app = App::new(Settings::default(), (1000, 800), 1);
        app.update(&InputFrame::with_pressed(&[Key::F1]), 0.0);
        assert_eq!(hit_test(&app, (1000, 800), (110.0, 210.0), &mono), Some(0));
        assert_eq!(hit_test(&app, (1000, 800), (110.0, 200.0 + 5.0 * 60.0 + 5.0), &mono), Some(5));
    }
}
