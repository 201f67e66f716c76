//! Navigation cues, drive effects and background music over rodio.
//!
//! Missing files or a missing output device only cost sound: every call
//! silently does nothing for audio that failed to load.
use std::collections::HashMap;
use std::io::{BufReader, Cursor};
use std::sync::Arc;
use std::{fs::File, io::Read};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::core::Cue;
use crate::core::settings::Settings;

const CUE_FILES: &[(Cue, &str)] = &[
    (Cue::Hover, "Sounds/UI_Hover.ogg"),
    (Cue::Select, "Sounds/UI_Select.ogg"),
    (Cue::Back, "Sounds/UI_Back.ogg"),
    (Cue::Error, "Sounds/UI_Error.ogg"),
    (Cue::Horn, "Sounds/Horn.ogg"),
    (Cue::Crash, "Sounds/Crash.ogg"),
];

fn load_bytes(path: &str) -> Option<Vec<u8>> {
    let mut f = File::open(path).ok()?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).ok()?;
    Some(buf)
}

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds: HashMap<Cue, Arc<Vec<u8>>>,
    /// One sink per cue so replaying a cue restarts it.
    playing: HashMap<Cue, Sink>,
    music: Option<Sink>,
    track: Option<String>,
    cue_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    /// `None` when no output device is available.
    pub fn new() -> Option<Self> {
        let (_stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("No audio output ({e}), running silent");
                return None;
            }
        };
        Some(Self {
            _stream,
            handle,
            sounds: HashMap::new(),
            playing: HashMap::new(),
            music: None,
            track: None,
            cue_volume: 0.8,
            music_volume: 1.0,
        })
    }

    /// Loads every cue file; returns whether all of them were found.
    pub fn load_sounds(&mut self) -> bool {
        let mut all = true;
        for &(cue, path) in CUE_FILES {
            match load_bytes(path) {
                Some(bytes) => {
                    self.sounds.insert(cue, Arc::new(bytes));
                }
                None => {
                    log::warn!("Could not load {path}, {cue:?} will be silent");
                    all = false;
                }
            }
        }
        all
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.cue_volume = settings.cue_volume() / 100.0;
        self.music_volume = settings.music_volume / 100.0;
        for sink in self.playing.values() {
            sink.set_volume(self.cue_volume);
        }
        if let Some(sink) = &self.music {
            sink.set_volume(self.music_volume);
        }
    }

    pub fn play(&mut self, cue: Cue) {
        let Some(data) = self.sounds.get(&cue).cloned() else { return };
        if let Some(old) = self.playing.remove(&cue) {
            old.stop();
        }
        match Decoder::new(BufReader::new(Cursor::new(data.as_ref().clone()))) {
            Ok(dec) => {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.set_volume(self.cue_volume);
                    sink.append(dec);
                    self.playing.insert(cue, sink);
                }
            }
            Err(e) => log::warn!("Cannot decode {cue:?}: {e}"),
        }
    }

    /// Switches the looping background track when `path` differs from the
    /// current one. A track that fails to load is not retried every frame.
    pub fn sync_music(&mut self, path: &str) {
        if self.track.as_deref() == Some(path) {
            return;
        }
        if let Some(old) = self.music.take() {
            old.stop();
        }
        self.track = Some(path.to_string());

        let Some(bytes) = load_bytes(path) else {
            log::warn!("Failed to load {path}");
            return;
        };
        match Decoder::new_looped(Cursor::new(bytes)) {
            Ok(dec) => {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.set_volume(self.music_volume);
                    sink.append(dec);
                    self.music = Some(sink);
                    log::debug!("Playing {path}");
                }
            }
            Err(e) => log::warn!("Cannot decode {path}: {e}"),
        }
    }
}
