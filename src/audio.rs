//! Audio playback module
//!
//! This module drives the platform audio primitive (rodio) from a dedicated
//! thread:
//! - `AudioPlayer`: single-track playback control over a rodio `Sink`
//! - `AudioHandle`: non-blocking control interface for the widget
//! - `events`: commands, events and shared playback state
//! - `thread`: the audio thread itself

pub mod events;
mod handle;
mod player;
mod thread;

pub use events::{
    AudioCommand, AudioCommandReceiver, AudioCommandSender, AudioEvent, AudioEventReceiver,
    SharedPlaybackState, audio_command_channel, audio_event_channel,
};
pub use handle::AudioHandle;
pub use player::{AudioPlayer, PlaybackInfo, PlaybackStatus};
pub use thread::{AudioThreadHandle, spawn_audio_thread};
