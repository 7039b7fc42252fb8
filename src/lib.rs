//! Chime - a single-track audio playback widget core
//! Wires a playback state machine around rodio for embedding in any UI
//!
//! The embedder spawns the audio thread once, builds a `PlaybackWidget` over
//! the returned handle, and drives it from its event loop:
//!
//! ```no_run
//! use chime::{PlaybackWidget, audio::spawn_audio_thread};
//!
//! let mut audio = spawn_audio_thread().expect("audio output available");
//! let mut event_rx = audio.take_event_rx().expect("event receiver");
//! let mut widget = PlaybackWidget::new(audio.handle.clone());
//!
//! widget.play();
//! widget.set_volume("80");
//!
//! // in the embedder's event loop: call widget.tick() periodically and
//! // drain events into the widget
//! while let Ok(event) = event_rx.try_recv() {
//!     widget.handle_audio_event(event);
//! }
//! println!("{} ({:.1}%)", widget.elapsed_display(), widget.progress());
//! ```

pub mod audio;
pub mod widget;

/// Relative path of the bundled track the widget plays by default
pub const BUNDLED_TRACK: &str = "assets/track.wav";

pub use audio::{AudioEvent, AudioHandle, spawn_audio_thread};
pub use widget::{PlaybackPhase, PlaybackWidget, TrackTime};
