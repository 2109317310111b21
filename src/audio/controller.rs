use crate::audio::icon::{Glyph, IconMorph};
use crate::error::AudioError;

/// The one music stream the show plays.
pub trait Playback {
    /// Start or resume playback. On `Err` the stream may be left in any
    /// mute state; the controller reconciles it.
    fn play(&mut self, muted: bool) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn mute(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Unstarted,
    MutedPlaying,
    UnmutedPlaying,
    Paused,
}

/// Play/pause/mute state machine with its icon kept in step.
pub struct AudioController {
    state: AudioState,
    // One-shot "first interaction" listener
    armed: bool,
    icon: IconMorph,
}

impl AudioController {
    pub fn new() -> Self {
        Self {
            state: AudioState::Unstarted,
            armed: false,
            icon: IconMorph::new(Glyph::Play),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> AudioState {
        self.state
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn icon(&self) -> &IconMorph {
        &self.icon
    }

    /// Try muted autoplay, then wait for the first interaction to unmute.
    /// Without autoplay the stream stays untouched until that interaction.
    pub fn start(&mut self, backend: &mut impl Playback, autoplay: bool) {
        if self.state != AudioState::Unstarted {
            return;
        }
        self.armed = true;
        if !autoplay {
            self.icon.set(Glyph::Play);
            return;
        }

        match backend.play(true) {
            Ok(()) => {
                tracing::info!("Muted autoplay successful");
                self.state = AudioState::MutedPlaying;
                self.icon.set(Glyph::Pause);
            }
            Err(e) => {
                tracing::info!("Muted autoplay failed: {}", e);
                backend.pause();
                self.state = AudioState::Paused;
                self.icon.set(Glyph::Play);
            }
        }
    }

    /// Called for any click or gesture. Only the first one after `start`
    /// does anything. Returns whether it was consumed.
    pub fn first_interaction(&mut self, backend: &mut impl Playback) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        tracing::info!("First user interaction detected, attempting to unmute audio");
        self.play_unmuted(backend);
        true
    }

    /// The music button.
    pub fn toggle(&mut self, backend: &mut impl Playback) {
        self.armed = false;
        match self.state {
            AudioState::UnmutedPlaying => {
                backend.mute();
                backend.pause();
                self.state = AudioState::Paused;
                self.icon.morph_to(Glyph::Play);
                tracing::info!("Audio paused");
            }
            _ => self.play_unmuted(backend),
        }
    }

    fn play_unmuted(&mut self, backend: &mut impl Playback) {
        match backend.play(false) {
            Ok(()) => {
                self.state = AudioState::UnmutedPlaying;
                self.icon.morph_to(Glyph::Pause);
                tracing::info!("Audio playing (unmuted)");
            }
            Err(e) => {
                tracing::info!("Unmuted playback failed: {}", e);
                backend.mute();
                if self.state != AudioState::MutedPlaying {
                    backend.pause();
                    self.state = AudioState::Paused;
                }
                self.icon.morph_to(Glyph::Play);
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.icon.update(dt);
    }
}

impl Default for AudioController {
    fn default() -> Self {
        Self::new()
    }
}
