//! Playback widget state machine
//!
//! `PlaybackWidget` is the embedder-facing component: it owns an
//! `AudioHandle` bound to one fixed track, translates user actions into
//! audio commands, and folds `AudioEvent`s back into display state (phase,
//! elapsed time, progress fraction).

use std::path::PathBuf;
use std::time::Duration;

use crate::audio::{AudioEvent, AudioHandle};

use super::time::TrackTime;

/// Playback phase of the widget
///
/// A single tagged state; "playing while paused" is unrepresentable.
/// `Stopped` covers both an explicit stop and a track that ended on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Nothing has been played yet
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
}

/// Percentage of the track completed, in `[0.0, 100.0]`
///
/// Returns 0.0 while the duration is unknown (track not yet loaded) rather
/// than a NaN from the division.
pub fn progress_percent(position: Duration, duration: Duration) -> f32 {
    let total = duration.as_secs_f64();
    if total <= 0.0 {
        return 0.0;
    }
    ((position.as_secs_f64() / total) * 100.0).clamp(0.0, 100.0) as f32
}

/// Playback controls and display state for one fixed track
///
/// User actions go out as commands on the `AudioHandle` and return
/// immediately; playback itself starts asynchronously on the audio thread.
/// The phase is updated optimistically on each action and confirmed by the
/// corresponding event.
#[derive(Debug)]
pub struct PlaybackWidget {
    audio: AudioHandle,
    track: PathBuf,
    phase: PlaybackPhase,
    elapsed: TrackTime,
    progress: f32,
    volume: u8,
    muted: bool,
}

impl PlaybackWidget {
    /// Create a widget bound to the bundled track
    pub fn new(audio: AudioHandle) -> Self {
        Self::with_track(audio, PathBuf::from(crate::BUNDLED_TRACK))
    }

    /// Create a widget bound to a specific track
    pub fn with_track(audio: AudioHandle, track: PathBuf) -> Self {
        Self {
            audio,
            track,
            phase: PlaybackPhase::Idle,
            elapsed: TrackTime::default(),
            progress: 0.0,
            volume: 100,
            muted: false,
        }
    }

    // ============ User Actions ============

    /// Start playback from the beginning
    ///
    /// Re-entrant from any phase: the track is reloaded and the display
    /// resets for the fresh run. Audible playback starts asynchronously;
    /// `AudioEvent::Started` confirms it.
    pub fn play(&mut self) {
        self.audio.play(self.track.clone());
        self.phase = PlaybackPhase::Playing;
        self.elapsed = TrackTime::default();
        self.progress = 0.0;
    }

    /// Pause playback
    ///
    /// No-op unless currently playing.
    pub fn pause(&mut self) {
        if self.phase != PlaybackPhase::Playing {
            return;
        }
        self.audio.pause();
        self.phase = PlaybackPhase::Paused;
    }

    /// Resume paused playback
    ///
    /// No-op unless currently paused.
    pub fn resume(&mut self) {
        if self.phase != PlaybackPhase::Paused {
            return;
        }
        self.audio.resume();
        self.phase = PlaybackPhase::Playing;
    }

    /// Stop playback, resetting the playback cursor to zero
    ///
    /// The displayed time and progress reset along with the cursor, so the
    /// display stays coherent with what a subsequent play will do.
    pub fn stop(&mut self) {
        self.audio.stop();
        self.phase = PlaybackPhase::Stopped;
        self.elapsed = TrackTime::default();
        self.progress = 0.0;
    }

    /// Set volume from the control's raw value
    ///
    /// Parses an integer percentage; out-of-range values are clamped to
    /// `[0, 100]` and non-numeric input is ignored. Never unmutes.
    pub fn set_volume(&mut self, raw: &str) {
        let parsed: i64 = match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Ignoring non-numeric volume input: {:?}", raw);
                return;
            }
        };

        self.volume = parsed.clamp(0, 100) as u8;
        self.audio.set_volume(self.volume as f32 / 100.0);
    }

    /// Toggle the mute flag
    ///
    /// The stored volume is untouched; unmuting restores it.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.audio.set_muted(self.muted);
    }

    /// Seek to a position within the track
    pub fn seek(&self, position: Duration) {
        self.audio.seek(position);
    }

    /// Pump the audio thread's position sync
    ///
    /// The embedder calls this at its own cadence; each tick produces an
    /// `AudioEvent::PositionChanged` while a track is loaded.
    pub fn tick(&self) {
        self.audio.tick();
    }

    // ============ Event Handling ============

    /// Fold an audio thread event into display state
    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::Started { path } => {
                tracing::debug!("AudioEvent::Started: {:?}", path);
                self.phase = PlaybackPhase::Playing;
            }
            AudioEvent::Paused { position } => {
                tracing::debug!("AudioEvent::Paused at {:?}", position);
                self.phase = PlaybackPhase::Paused;
            }
            AudioEvent::Resumed => {
                tracing::debug!("AudioEvent::Resumed");
                self.phase = PlaybackPhase::Playing;
            }
            AudioEvent::Stopped => {
                tracing::debug!("AudioEvent::Stopped");
                self.phase = PlaybackPhase::Stopped;
            }
            AudioEvent::PositionChanged { position, duration } => {
                self.elapsed = TrackTime::from_position(position);
                self.progress = progress_percent(position, duration);
            }
            AudioEvent::SeekComplete { position } => {
                tracing::debug!("AudioEvent::SeekComplete at {:?}", position);
            }
            AudioEvent::SeekFailed { error } => {
                tracing::warn!("Seek failed: {}", error);
            }
            AudioEvent::Finished => {
                tracing::info!("Track finished");
                // Display time and progress keep their final values
                self.phase = PlaybackPhase::Stopped;
            }
            AudioEvent::Error { message } => {
                tracing::warn!("Audio error: {}", message);
            }
        }
    }

    // ============ Display State ============

    /// Current playback phase
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Elapsed playback time
    pub fn elapsed(&self) -> TrackTime {
        self.elapsed
    }

    /// Elapsed time rendered as `MM:SS`
    pub fn elapsed_display(&self) -> String {
        self.elapsed.to_string()
    }

    /// Percentage of the track completed, in `[0.0, 100.0]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Volume as presented to the user (0 - 100)
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Path of the track this widget is bound to
    pub fn track(&self) -> &PathBuf {
        &self.track
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{
        AudioCommand, AudioCommandReceiver, SharedPlaybackState, audio_command_channel,
    };

    /// Widget wired to a bare command channel, no audio thread behind it
    fn widget() -> (PlaybackWidget, AudioCommandReceiver) {
        let _ = tracing_subscriber::fmt::try_init();
        let (command_tx, command_rx) = audio_command_channel();
        let handle = AudioHandle::new(command_tx, SharedPlaybackState::new());
        let widget = PlaybackWidget::with_track(handle, PathBuf::from("assets/track.wav"));
        (widget, command_rx)
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_starts_idle() {
        let (widget, _rx) = widget();
        assert_eq!(widget.phase(), PlaybackPhase::Idle);
        assert_eq!(widget.elapsed_display(), "00:00");
        assert_eq!(widget.progress(), 0.0);
        assert_eq!(widget.volume(), 100);
        assert!(!widget.is_muted());
    }

    #[test]
    fn test_play_pause_resume_transitions() {
        let (mut widget, mut rx) = widget();

        widget.play();
        assert_eq!(widget.phase(), PlaybackPhase::Playing);
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Play { .. })));

        widget.pause();
        assert_eq!(widget.phase(), PlaybackPhase::Paused);
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Pause)));

        widget.resume();
        assert_eq!(widget.phase(), PlaybackPhase::Playing);
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Resume)));
    }

    #[test]
    fn test_pause_twice_is_noop() {
        let (mut widget, mut rx) = widget();

        widget.play();
        widget.pause();
        widget.pause();

        assert_eq!(widget.phase(), PlaybackPhase::Paused);
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Play { .. })));
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Pause)));
        // second pause sent nothing
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_pause_while_idle_is_noop() {
        let (mut widget, mut rx) = widget();

        widget.pause();
        assert_eq!(widget.phase(), PlaybackPhase::Idle);
        assert!(rx.try_recv().is_err());

        widget.resume();
        assert_eq!(widget.phase(), PlaybackPhase::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_play_is_reentrant() {
        let (mut widget, mut rx) = widget();

        widget.play();
        widget.pause();
        widget.play();
        assert_eq!(widget.phase(), PlaybackPhase::Playing);

        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Play { .. })));
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Pause)));
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Play { .. })));
    }

    #[test]
    fn test_stop_resets_display() {
        let (mut widget, mut rx) = widget();

        widget.play();
        widget.handle_audio_event(AudioEvent::PositionChanged {
            position: secs(30),
            duration: secs(120),
        });
        assert_eq!(widget.elapsed_display(), "00:30");
        assert_eq!(widget.progress(), 25.0);

        widget.stop();
        assert_eq!(widget.phase(), PlaybackPhase::Stopped);
        assert_eq!(widget.elapsed_display(), "00:00");
        assert_eq!(widget.progress(), 0.0);

        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Play { .. })));
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Stop)));
    }

    #[test]
    fn test_finished_transitions_to_stopped_and_keeps_display() {
        let (mut widget, _rx) = widget();

        widget.play();
        widget.handle_audio_event(AudioEvent::PositionChanged {
            position: secs(120),
            duration: secs(120),
        });
        widget.handle_audio_event(AudioEvent::Finished);

        assert_eq!(widget.phase(), PlaybackPhase::Stopped);
        // ended playback keeps the final display values
        assert_eq!(widget.elapsed_display(), "02:00");
        assert_eq!(widget.progress(), 100.0);

        // a stray duplicate leaves the phase where it is
        widget.handle_audio_event(AudioEvent::Finished);
        assert_eq!(widget.phase(), PlaybackPhase::Stopped);
    }

    #[test]
    fn test_position_event_updates_time_and_progress() {
        let (mut widget, _rx) = widget();

        widget.play();
        widget.handle_audio_event(AudioEvent::PositionChanged {
            position: secs(65),
            duration: secs(200),
        });

        assert_eq!(widget.elapsed(), TrackTime::new(1, 5));
        assert_eq!(widget.elapsed_display(), "01:05");
        assert!((widget.progress() - 32.5).abs() < 1e-4);
    }

    #[test]
    fn test_progress_with_unknown_duration_is_zero() {
        let (mut widget, _rx) = widget();

        widget.play();
        widget.handle_audio_event(AudioEvent::PositionChanged {
            position: secs(5),
            duration: Duration::ZERO,
        });

        assert_eq!(widget.progress(), 0.0);
        assert!(widget.progress().is_finite());
        // the time display still advances
        assert_eq!(widget.elapsed_display(), "00:05");
    }

    #[test]
    fn test_progress_is_clamped_to_hundred() {
        assert_eq!(progress_percent(secs(130), secs(120)), 100.0);
        assert_eq!(progress_percent(Duration::ZERO, secs(120)), 0.0);
    }

    #[test]
    fn test_set_volume_parses_and_clamps() {
        let (mut widget, mut rx) = widget();

        widget.set_volume("50");
        assert_eq!(widget.volume(), 50);
        match rx.try_recv() {
            Ok(AudioCommand::SetVolume { volume }) => assert_eq!(volume, 0.5),
            other => panic!("expected SetVolume, got {:?}", other),
        }

        widget.set_volume("150");
        assert_eq!(widget.volume(), 100);
        match rx.try_recv() {
            Ok(AudioCommand::SetVolume { volume }) => assert_eq!(volume, 1.0),
            other => panic!("expected SetVolume, got {:?}", other),
        }

        widget.set_volume("-3");
        assert_eq!(widget.volume(), 0);
        match rx.try_recv() {
            Ok(AudioCommand::SetVolume { volume }) => assert_eq!(volume, 0.0),
            other => panic!("expected SetVolume, got {:?}", other),
        }
    }

    #[test]
    fn test_set_volume_ignores_junk() {
        let (mut widget, mut rx) = widget();

        widget.set_volume("50");
        let _ = rx.try_recv();

        widget.set_volume("loud");
        widget.set_volume("");
        widget.set_volume("3.5");
        assert_eq!(widget.volume(), 50);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_mute_preserves_volume() {
        let (mut widget, mut rx) = widget();

        widget.set_volume("40");
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::SetVolume { .. })));

        widget.toggle_mute();
        assert!(widget.is_muted());
        assert_eq!(widget.volume(), 40);
        assert!(matches!(
            rx.try_recv(),
            Ok(AudioCommand::SetMuted { muted: true })
        ));

        widget.toggle_mute();
        assert!(!widget.is_muted());
        assert_eq!(widget.volume(), 40);
        assert!(matches!(
            rx.try_recv(),
            Ok(AudioCommand::SetMuted { muted: false })
        ));
    }

    #[test]
    fn test_set_volume_while_muted_does_not_unmute() {
        let (mut widget, _rx) = widget();

        widget.toggle_mute();
        widget.set_volume("70");

        assert!(widget.is_muted());
        assert_eq!(widget.volume(), 70);
    }

    #[test]
    fn test_event_confirmations_sync_phase() {
        let (mut widget, _rx) = widget();

        widget.play();
        widget.handle_audio_event(AudioEvent::Started {
            path: PathBuf::from("assets/track.wav"),
        });
        assert_eq!(widget.phase(), PlaybackPhase::Playing);

        widget.handle_audio_event(AudioEvent::Paused { position: secs(3) });
        assert_eq!(widget.phase(), PlaybackPhase::Paused);

        widget.handle_audio_event(AudioEvent::Resumed);
        assert_eq!(widget.phase(), PlaybackPhase::Playing);

        widget.handle_audio_event(AudioEvent::Stopped);
        assert_eq!(widget.phase(), PlaybackPhase::Stopped);
    }

    #[test]
    fn test_error_event_degrades_to_no_visible_change() {
        let (mut widget, _rx) = widget();

        widget.play();
        widget.handle_audio_event(AudioEvent::Error {
            message: "Failed to decode audio".to_string(),
        });

        // phase and display are untouched
        assert_eq!(widget.phase(), PlaybackPhase::Playing);
        assert_eq!(widget.elapsed_display(), "00:00");
    }
}
