//! Audio handle for non-blocking audio control
//!
//! `AudioHandle` provides a non-blocking interface to control audio playback.
//! All methods send commands to the audio thread and return immediately.
//! State is read from `SharedPlaybackState` without blocking.

use std::path::PathBuf;
use std::time::Duration;

use super::events::{AudioCommand, AudioCommandSender, SharedPlaybackState};
use super::player::PlaybackInfo;

/// Handle for controlling audio from the widget
///
/// All methods are non-blocking - they send commands to the audio thread
/// and return immediately. Results are communicated via `AudioEvent`.
///
/// State queries (get_info, is_playing, etc.) read from shared state
/// without blocking, even if the audio thread is busy.
#[derive(Clone)]
pub struct AudioHandle {
    command_tx: AudioCommandSender,
    state: SharedPlaybackState,
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("state", &self.state)
            .finish()
    }
}

impl AudioHandle {
    /// Create a new audio handle
    pub fn new(command_tx: AudioCommandSender, state: SharedPlaybackState) -> Self {
        Self { command_tx, state }
    }

    // ============ Playback Control ============

    /// (Re)load the track and start playback from the beginning
    ///
    /// Sends Play command to the audio thread and returns immediately; the
    /// audible start is asynchronous. Listen for `AudioEvent::Started` to
    /// know when playback begins.
    pub fn play(&self, path: PathBuf) {
        let _ = self.command_tx.send(AudioCommand::Play { path });
    }

    /// Pause playback
    pub fn pause(&self) {
        let _ = self.command_tx.send(AudioCommand::Pause);
    }

    /// Resume playback
    pub fn resume(&self) {
        let _ = self.command_tx.send(AudioCommand::Resume);
    }

    /// Stop playback and reset the playback cursor to zero
    pub fn stop(&self) {
        let _ = self.command_tx.send(AudioCommand::Stop);
    }

    /// Seek to position
    ///
    /// Sends Seek command and returns immediately.
    /// Listen for `AudioEvent::SeekComplete` or `AudioEvent::SeekFailed`.
    ///
    /// The shared state position is updated immediately to the target, so
    /// reads show the target position while the seek is in flight.
    pub fn seek(&self, position: Duration) {
        self.state.set_position(position);
        let _ = self.command_tx.send(AudioCommand::Seek { position });
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&self, volume: f32) {
        let _ = self.command_tx.send(AudioCommand::SetVolume { volume });
    }

    /// Set the mute flag
    ///
    /// Independent of volume; the configured volume is restored on unmute.
    pub fn set_muted(&self, muted: bool) {
        let _ = self.command_tx.send(AudioCommand::SetMuted { muted });
    }

    /// Tick handler - syncs position and emits `AudioEvent::PositionChanged`
    pub fn tick(&self) {
        let _ = self.command_tx.send(AudioCommand::Tick);
    }

    // ============ State Queries (non-blocking reads) ============

    /// Get current playback info
    ///
    /// Reads from shared state, does not communicate with the audio thread.
    pub fn get_info(&self) -> PlaybackInfo {
        self.state.get_info()
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Get current position
    pub fn position(&self) -> Duration {
        self.state.position()
    }

    /// Get track duration (zero until the track is loaded)
    pub fn duration(&self) -> Duration {
        self.state.duration()
    }

    /// Check if player has no loaded audio
    pub fn is_empty(&self) -> bool {
        self.state.current_path().is_none() && self.state.is_stopped()
    }
}
