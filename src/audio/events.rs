//! Audio thread communication types
//!
//! This module provides commands and events for the audio thread architecture:
//! - `AudioCommand` - Commands sent from the widget to the audio thread
//! - `AudioEvent` - Events sent from the audio thread back to the widget
//! - `SharedPlaybackState` - Thread-safe state for non-blocking reads
//!
//! ## Architecture
//! ```text
//! Widget (AudioHandle) --[AudioCommand]--> Audio Thread (AudioPlayer)
//! Widget              <--[AudioEvent]---- Audio Thread
//! Widget              <--[SharedState]--- Audio Thread (non-blocking reads)
//! ```
//!
//! Both channels are created once, when the audio thread is spawned. Replaying
//! the track reuses the same channels, so repeated plays never accumulate
//! duplicate subscriptions on the handle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use super::player::{PlaybackInfo, PlaybackStatus};

// ============ Commands (Widget -> Audio Thread) ============

/// Commands sent from the widget to the audio thread
///
/// All commands are processed asynchronously - the caller sends and returns
/// immediately. Results are communicated back via `AudioEvent`.
#[derive(Debug)]
pub enum AudioCommand {
    /// (Re)load the track and start playback from the beginning
    Play { path: PathBuf },
    /// Pause playback
    Pause,
    /// Resume paused playback
    Resume,
    /// Stop playback and reset the playback cursor to zero
    Stop,
    /// Seek to position
    Seek { position: Duration },
    /// Set volume (0.0 - 1.0)
    SetVolume { volume: f32 },
    /// Set the mute flag (does not alter the configured volume)
    SetMuted { muted: bool },
    /// Periodic tick for position sync
    Tick,
}

// ============ Events (Audio Thread -> Widget) ============

/// Events emitted by the audio thread
///
/// These events notify the widget of state changes and operation results.
/// The embedder should drain them in its event loop and feed them to
/// `PlaybackWidget::handle_audio_event`.
#[derive(Debug, Clone)]
pub enum AudioEvent {
    /// Playback started for the track
    Started { path: PathBuf },
    /// Playback paused
    Paused { position: Duration },
    /// Playback resumed
    Resumed,
    /// Playback stopped, cursor reset to zero
    Stopped,
    /// Playback position advanced (sent on every tick while a track is loaded)
    PositionChanged {
        position: Duration,
        duration: Duration,
    },
    /// Seek completed successfully
    SeekComplete { position: Duration },
    /// Seek failed
    SeekFailed { error: String },
    /// Playback finished (track ended on its own)
    Finished,
    /// Error occurred
    Error { message: String },
}

// ============ Shared State ============

/// Inner state protected by RwLock
#[derive(Debug, Clone)]
struct PlaybackStateInner {
    /// Current playback status
    status: PlaybackStatus,
    /// Current playback position
    position: Duration,
    /// Total track duration (zero until the track is loaded)
    duration: Duration,
    /// Volume (0.0 - 1.0)
    volume: f32,
    /// Mute flag, independent of volume
    muted: bool,
    /// Currently loaded track path
    current_path: Option<PathBuf>,
}

impl Default for PlaybackStateInner {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume: 1.0,
            muted: false,
            current_path: None,
        }
    }
}

/// Thread-safe shared playback state
///
/// The widget reads this without blocking.
/// The audio thread updates it after each operation.
#[derive(Clone)]
pub struct SharedPlaybackState {
    inner: Arc<RwLock<PlaybackStateInner>>,
}

impl std::fmt::Debug for SharedPlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SharedPlaybackState")
            .field("status", &inner.status)
            .field("position", &inner.position)
            .field("duration", &inner.duration)
            .field("volume", &inner.volume)
            .field("muted", &inner.muted)
            .finish()
    }
}

impl Default for SharedPlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedPlaybackState {
    /// Create new shared state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PlaybackStateInner::default())),
        }
    }

    /// Get current playback info
    pub fn get_info(&self) -> PlaybackInfo {
        let inner = self.inner.read();
        PlaybackInfo {
            status: inner.status,
            position: inner.position,
            duration: inner.duration,
            volume: inner.volume,
            muted: inner.muted,
        }
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        self.inner.read().status == PlaybackStatus::Playing
    }

    /// Check if stopped
    pub fn is_stopped(&self) -> bool {
        self.inner.read().status == PlaybackStatus::Stopped
    }

    /// Get current position
    pub fn position(&self) -> Duration {
        self.inner.read().position
    }

    /// Get track duration (zero until known)
    pub fn duration(&self) -> Duration {
        self.inner.read().duration
    }

    /// Get currently loaded track path
    pub fn current_path(&self) -> Option<PathBuf> {
        self.inner.read().current_path.clone()
    }

    // ---- Update methods (called by audio thread) ----

    /// Update status
    pub fn set_status(&self, status: PlaybackStatus) {
        self.inner.write().status = status;
    }

    /// Update position
    pub fn set_position(&self, position: Duration) {
        self.inner.write().position = position;
    }

    /// Update duration
    pub fn set_duration(&self, duration: Duration) {
        self.inner.write().duration = duration;
    }

    /// Update volume
    pub fn set_volume(&self, volume: f32) {
        self.inner.write().volume = volume;
    }

    /// Update mute flag
    pub fn set_muted(&self, muted: bool) {
        self.inner.write().muted = muted;
    }

    /// Update current track path
    pub fn set_current_path(&self, path: Option<PathBuf>) {
        self.inner.write().current_path = path;
    }

    /// Update from PlaybackInfo
    pub fn update_from_info(&self, info: &PlaybackInfo) {
        let mut inner = self.inner.write();
        inner.status = info.status;
        inner.position = info.position;
        inner.duration = info.duration;
        inner.volume = info.volume;
        inner.muted = info.muted;
    }
}

// ============ Channel Types ============

/// Sender for audio commands (held by AudioHandle)
pub type AudioCommandSender = tokio::sync::mpsc::UnboundedSender<AudioCommand>;

/// Receiver for audio commands (held by audio thread)
pub type AudioCommandReceiver = tokio::sync::mpsc::UnboundedReceiver<AudioCommand>;

/// Sender for audio events (held by audio thread)
pub type AudioEventSender = tokio::sync::mpsc::UnboundedSender<AudioEvent>;

/// Receiver for audio events (held by the embedder)
pub type AudioEventReceiver = tokio::sync::mpsc::UnboundedReceiver<AudioEvent>;

/// Create a new audio command channel
pub fn audio_command_channel() -> (AudioCommandSender, AudioCommandReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Create a new audio event channel
pub fn audio_event_channel() -> (AudioEventSender, AudioEventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}
