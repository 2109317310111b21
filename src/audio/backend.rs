use raylib::prelude::*;

use crate::audio::controller::Playback;
use crate::error::AudioError;

/// Music stream played through the raylib audio device. A missing stream
/// rejects every play attempt, so the controller degrades to "paused".
pub struct MusicPlayback<'aud> {
    music: Option<Music<'aud>>,
    volume: f32,
    started: bool,
}

impl<'aud> MusicPlayback<'aud> {
    pub fn new(music: Option<Music<'aud>>, volume: f32) -> Self {
        Self {
            music,
            volume: volume.clamp(0.0, 1.0),
            started: false,
        }
    }

    /// Feed the stream buffers; call once per frame.
    pub fn pump(&mut self) {
        if let Some(music) = self.music.as_mut() {
            music.update_stream();
        }
    }
}

impl Playback for MusicPlayback<'_> {
    fn play(&mut self, muted: bool) -> Result<(), AudioError> {
        let music = self.music.as_mut().ok_or(AudioError::NoStream)?;
        music.set_volume(if muted { 0.0 } else { self.volume });
        if self.started {
            music.resume_stream();
        } else {
            music.play_stream();
            self.started = true;
        }

        if music.is_stream_playing() {
            Ok(())
        } else {
            music.set_volume(0.0);
            Err(AudioError::PlaybackRejected("stream did not start".to_string()))
        }
    }

    fn pause(&mut self) {
        if let Some(music) = self.music.as_mut() {
            music.pause_stream();
        }
    }

    fn mute(&mut self) {
        if let Some(music) = self.music.as_mut() {
            music.set_volume(0.0);
        }
    }
}
