//! Background music: the play/pause/mute state machine, the morphing icon on
//! the music button, and the raylib stream it drives.

mod backend;
mod controller;
mod icon;

pub use backend::MusicPlayback;
pub use controller::{AudioController, AudioState, Playback};
