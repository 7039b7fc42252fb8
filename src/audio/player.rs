//! Audio player using rodio
//!
//! This wraps the platform audio primitive (`OutputStream` + `Sink`) behind
//! the capability set the widget needs: load + play, pause, resume, stop with
//! cursor reset, seek, position/duration queries, normalized volume, and a
//! mute flag.
//!
//! The `Sink` has no native mute, so muting is implemented as an effective
//! volume of zero while the configured volume is kept in `PlayerState`.
//! Unmuting restores the configured volume unchanged.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source, mixer::Mixer};

/// Playback status as seen by the audio thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

/// Current playback info
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    pub status: PlaybackStatus,
    pub position: Duration,
    pub duration: Duration,
    pub volume: f32,
    pub muted: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume: 1.0,
            muted: false,
        }
    }
}

/// Audio player state (shared between threads)
struct PlayerState {
    status: PlaybackStatus,
    duration: Duration,
    volume: f32,
    muted: bool,
    paused_position: Option<Duration>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            duration: Duration::ZERO,
            volume: 1.0,
            muted: false,
            paused_position: None,
        }
    }
}

/// Compute the volume actually applied to the sink
///
/// The configured volume is preserved across mute/unmute cycles.
fn effective_volume(volume: f32, muted: bool) -> f32 {
    if muted { 0.0 } else { volume }
}

/// Single-track audio player
///
/// Owns the output stream and at most one sink. Starting playback always
/// reloads the track from disk, so `play` is re-entrant from any status.
pub struct AudioPlayer {
    _stream: OutputStream,
    mixer: Arc<Mixer>,
    current_sink: Option<Sink>,
    current_path: Option<PathBuf>,
    state: Arc<Mutex<PlayerState>>,
}

impl AudioPlayer {
    /// Create a new audio player on the default output device
    pub fn new() -> Result<Self, String> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("Failed to create audio output: {}", e))?;
        let mixer = stream.mixer().clone();

        Ok(Self {
            _stream: stream,
            mixer: Arc::new(mixer),
            current_sink: None,
            current_path: None,
            state: Arc::new(Mutex::new(PlayerState::default())),
        })
    }

    /// Get current volume with the mute flag applied
    fn get_effective_volume(&self) -> f32 {
        let state = self.state.lock().unwrap();
        effective_volume(state.volume, state.muted)
    }

    /// Play a file from the beginning
    ///
    /// Stops any current playback first; the previous sink and its cursor are
    /// discarded, so calling this on an already-loaded track restarts it.
    pub fn play(&mut self, path: PathBuf) -> Result<(), String> {
        self.stop();

        // Open file and decode
        let file = File::open(&path).map_err(|e| format!("Failed to open file: {}", e))?;
        let reader = BufReader::new(file);
        let source = Decoder::new(reader).map_err(|e| format!("Failed to decode audio: {}", e))?;
        let duration = source.total_duration().unwrap_or(Duration::ZERO);

        // Create sink and start playing
        let sink = Sink::connect_new(&self.mixer);
        sink.append(source);
        sink.set_volume(self.get_effective_volume());

        {
            let mut state = self.state.lock().unwrap();
            state.status = PlaybackStatus::Playing;
            state.duration = duration;
            state.paused_position = None;
        }

        self.current_sink = Some(sink);
        self.current_path = Some(path);

        tracing::info!("Playing audio, duration: {:?}", duration);
        Ok(())
    }

    /// Pause playback
    ///
    /// No-op when nothing is loaded.
    pub fn pause(&mut self) {
        if let Some(sink) = self.current_sink.as_ref() {
            let current_pos = sink.get_pos();
            sink.pause();
            let mut state = self.state.lock().unwrap();
            state.status = PlaybackStatus::Paused;
            state.paused_position = Some(current_pos);
        }
    }

    /// Resume playback
    ///
    /// No-op when nothing is loaded.
    pub fn resume(&mut self) {
        if let Some(sink) = &self.current_sink {
            sink.set_volume(self.get_effective_volume());
            sink.play();
            let mut state = self.state.lock().unwrap();
            state.status = PlaybackStatus::Playing;
            state.paused_position = None;
        }
    }

    /// Stop playback and reset the playback cursor to zero
    ///
    /// The sink is dropped; the next `play` reloads the track from the start.
    pub fn stop(&mut self) {
        if let Some(sink) = self.current_sink.take() {
            sink.stop();
        }
        let mut state = self.state.lock().unwrap();
        state.status = PlaybackStatus::Stopped;
        state.paused_position = None;
    }

    /// Set volume (0.0 to 1.0)
    ///
    /// The configured volume is stored even while muted; it is applied to the
    /// sink once unmuted.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        {
            let mut state = self.state.lock().unwrap();
            state.volume = volume;
        }

        if let Some(sink) = &self.current_sink {
            sink.set_volume(self.get_effective_volume());
        }
    }

    /// Set the mute flag
    ///
    /// Does not alter the configured volume.
    pub fn set_muted(&mut self, muted: bool) {
        {
            let mut state = self.state.lock().unwrap();
            state.muted = muted;
        }

        if let Some(sink) = &self.current_sink {
            sink.set_volume(self.get_effective_volume());
        }
    }

    /// Seek to position
    pub fn seek(&mut self, position: Duration) -> Result<(), String> {
        let Some(sink) = self.current_sink.as_mut() else {
            return Err("No audio loaded".to_string());
        };

        sink.try_seek(position)
            .map_err(|e| format!("Seek not supported for this format: {:?}", e))?;

        let mut state = self.state.lock().unwrap();
        if state.status == PlaybackStatus::Paused {
            state.paused_position = Some(position);
        }
        tracing::debug!("Seek to {:?} successful", position);
        Ok(())
    }

    /// Get current playback info
    pub fn get_info(&self) -> PlaybackInfo {
        let state = self.state.lock().unwrap();

        let position = if let Some(sink) = &self.current_sink {
            if state.status == PlaybackStatus::Paused {
                state.paused_position.unwrap_or_else(|| sink.get_pos())
            } else {
                sink.get_pos()
            }
        } else {
            Duration::ZERO
        };

        let status = if let Some(sink) = &self.current_sink {
            if sink.empty() && state.status == PlaybackStatus::Playing {
                PlaybackStatus::Stopped
            } else {
                state.status
            }
        } else {
            state.status
        };

        PlaybackInfo {
            status,
            position,
            duration: state.duration,
            volume: state.volume,
            muted: state.muted,
        }
    }

    /// Check if playback finished
    ///
    /// Returns true if:
    /// 1. Sink is empty (normal completion)
    /// 2. Position >= duration (for formats where sink.empty() may not work correctly)
    /// 3. No sink loaded
    pub fn is_finished(&self) -> bool {
        if let Some(sink) = &self.current_sink {
            if sink.empty() {
                return true;
            }

            // Additional check: position >= duration, with a 500ms margin for
            // timing inaccuracies
            let state = self.state.lock().unwrap();
            if state.status == PlaybackStatus::Playing && state.duration.as_secs_f32() > 0.0 {
                let position = sink.get_pos();
                if position.as_secs_f32() >= state.duration.as_secs_f32() - 0.5 {
                    return true;
                }
            }

            false
        } else {
            true
        }
    }

    /// Check if player has no loaded audio
    pub fn is_empty(&self) -> bool {
        self.current_sink.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume_mute_independence() {
        assert_eq!(effective_volume(0.4, false), 0.4);
        assert_eq!(effective_volume(0.4, true), 0.0);
        // unmuting restores the configured volume unchanged
        assert_eq!(effective_volume(0.4, false), 0.4);
    }
}
