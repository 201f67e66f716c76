use env_logger::Env;
use raylib::prelude::*;

use setting_puzzles::audio_manager::AudioManager;
use setting_puzzles::core::input::{InputTracker, Key, KeySet, RawInput};
use setting_puzzles::core::settings::{AppliedDisplay, DisplayChange};
use setting_puzzles::render::draw_frame;
use setting_puzzles::render::layout;
use setting_puzzles::render::levels::scroll_width;
use setting_puzzles::render::textures::TextureManager;
use setting_puzzles::{App, Settings};

fn raylib_key(key: Key) -> Option<KeyboardKey> {
    use KeyboardKey::*;
    Some(match key {
        Key::Letter(c) => match c.to_ascii_uppercase() {
            'A' => KEY_A, 'B' => KEY_B, 'C' => KEY_C, 'D' => KEY_D, 'E' => KEY_E,
            'F' => KEY_F, 'G' => KEY_G, 'H' => KEY_H, 'I' => KEY_I, 'J' => KEY_J,
            'K' => KEY_K, 'L' => KEY_L, 'M' => KEY_M, 'N' => KEY_N, 'O' => KEY_O,
            'P' => KEY_P, 'Q' => KEY_Q, 'R' => KEY_R, 'S' => KEY_S, 'T' => KEY_T,
            'U' => KEY_U, 'V' => KEY_V, 'W' => KEY_W, 'X' => KEY_X, 'Y' => KEY_Y,
            'Z' => KEY_Z,
            _ => return None,
        },
        Key::Up => KEY_UP,
        Key::Down => KEY_DOWN,
        Key::Left => KEY_LEFT,
        Key::Right => KEY_RIGHT,
        Key::Enter => KEY_ENTER,
        Key::Space => KEY_SPACE,
        Key::Escape => KEY_ESCAPE,
        Key::F1 => KEY_F1,
    })
}

fn poll_input(rl: &RaylibHandle) -> RawInput {
    let held: KeySet = Key::all()
        .filter(|k| raylib_key(*k).is_some_and(|rk| rl.is_key_down(rk)))
        .collect();
    let m = rl.get_mouse_position();
    RawInput {
        held,
        mouse: (m.x, m.y),
        mouse_left: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
        mouse_right: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_RIGHT),
    }
}

fn apply_display(rl: &mut RaylibHandle, change: DisplayChange) {
    if let Some(fps) = change.framerate {
        rl.set_target_fps(fps);
        log::debug!("Frame limit {fps}");
    }
    if let Some(on) = change.vsync {
        let flag = WindowState::default().set_vsync_hint(true);
        if on {
            rl.set_window_state(flag);
        } else {
            rl.clear_window_state(flag);
        }
        log::info!("VSync {}", if on { "on" } else { "off" });
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings_path = Settings::path();
    let settings = Settings::load_or_default(&settings_path);

    let mut builder = raylib::init();
    builder.size(0, 0).title("Setting Puzzles").fullscreen();
    if settings.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_exit_key(None);
    rl.set_target_fps(settings.framerate());

    let textures = TextureManager::new(&mut rl, &thread);

    let mut audio = AudioManager::new();
    if let Some(a) = audio.as_mut() {
        a.load_sounds();
        a.apply_settings(&settings);
    }

    let mut display = AppliedDisplay::new(&settings);
    let screen = (rl.get_screen_width(), rl.get_screen_height());
    log::info!("Window {}x{}", screen.0, screen.1);
    let mut app = App::new(settings, screen, rand::random());
    let mut tracker = InputTracker::new();

    while app.is_running() && !rl.window_should_close() {
        let screen = (rl.get_screen_width(), rl.get_screen_height());
        let dt = rl.get_frame_time();

        let mut input = tracker.update(poll_input(&rl));
        input.hover = layout::hit_test(&app, screen, input.mouse, &|t: &str, size| rl.measure_text(t, size));

        app.set_screen(screen);
        app.set_scroll_width(scroll_width(&rl, &app));
        let result = app.update(&input, dt);

        if let Some(a) = audio.as_mut() {
            for cue in &result.cues {
                a.play(*cue);
            }
        }

        if result.settings_changed {
            apply_display(&mut rl, display.sync(app.settings()));
            if let Some(a) = audio.as_mut() {
                a.apply_settings(app.settings());
            }
        }
        if result.settings_closed {
            if let Err(e) = app.settings().save(&settings_path) {
                log::error!("Could not save settings: {e:#}");
            }
        }

        if let Some(a) = audio.as_mut() {
            a.sync_music(app.state().music_track());
        }

        let mut d = rl.begin_drawing(&thread);
        draw_frame(&mut d, &app, &textures, screen);
    }

    log::info!("Bye");
}
