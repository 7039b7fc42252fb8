//! Audio thread implementation
//!
//! This module runs the AudioPlayer in a dedicated thread, processing
//! commands from the widget and sending events back.
//!
//! The command channel serializes operations: a pause issued right after a
//! play is processed after it, never concurrently with the in-flight start.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::events::{
    AudioCommand, AudioCommandReceiver, AudioEvent, AudioEventSender, SharedPlaybackState,
    audio_command_channel, audio_event_channel,
};
use super::handle::AudioHandle;
use super::player::{AudioPlayer, PlaybackStatus};

/// Handle to a running audio thread
///
/// Dropping it stops playback; the thread itself exits once the last
/// `AudioHandle` clone (and with it the command channel) is dropped.
pub struct AudioThreadHandle {
    pub handle: AudioHandle,
    pub event_rx: Option<super::events::AudioEventReceiver>,
    thread_handle: Option<JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Take the event receiver (can only be taken once)
    pub fn take_event_rx(&mut self) -> Option<super::events::AudioEventReceiver> {
        self.event_rx.take()
    }

    /// Stop playback and wait for the audio thread to exit
    pub fn join(mut self, timeout: Duration) -> Result<(), String> {
        if let Some(handle) = self.thread_handle.take() {
            self.handle.stop();

            let start = std::time::Instant::now();
            loop {
                if handle.is_finished() {
                    let _ = handle.join();
                    return Ok(());
                }
                if start.elapsed() > timeout {
                    return Err("Audio thread did not exit in time".to_string());
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
        Ok(())
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        self.handle.stop();
    }
}

/// Spawn the audio thread
///
/// Creates an AudioPlayer in a dedicated thread and returns handles for
/// communication. The audio thread processes commands and sends events.
///
/// The command and event channels are created exactly once here; replaying
/// the track reuses them, so no subscription is ever registered twice.
pub fn spawn_audio_thread() -> Result<AudioThreadHandle, String> {
    // Create channels
    let (command_tx, command_rx) = audio_command_channel();
    let (event_tx, event_rx) = audio_event_channel();

    // Create shared state
    let state = SharedPlaybackState::new();
    let state_clone = state.clone();

    // Create handle for the widget
    let handle = AudioHandle::new(command_tx, state);

    // Spawn audio thread
    let thread_handle = thread::Builder::new()
        .name("audio-player".to_string())
        .spawn(move || match AudioPlayer::new() {
            Ok(player) => {
                audio_thread_main(player, command_rx, event_tx, state_clone);
            }
            Err(e) => {
                tracing::error!("Failed to create audio player: {}", e);
                let _ = event_tx.send(AudioEvent::Error { message: e });
            }
        })
        .map_err(|e| format!("Failed to spawn audio thread: {}", e))?;

    Ok(AudioThreadHandle {
        handle,
        event_rx: Some(event_rx),
        thread_handle: Some(thread_handle),
    })
}

/// Main loop for the audio thread
///
/// Processes commands from the widget and updates shared state.
/// Blocks on `command_rx.blocking_recv()` between commands.
fn audio_thread_main(
    mut player: AudioPlayer,
    mut command_rx: AudioCommandReceiver,
    event_tx: AudioEventSender,
    state: SharedPlaybackState,
) {
    tracing::info!("Audio thread started");

    // Process commands until channel closes
    while let Some(cmd) = command_rx.blocking_recv() {
        match cmd {
            AudioCommand::Play { path } => match player.play(path.clone()) {
                Ok(_) => {
                    update_state_from_player(&player, &state);
                    state.set_current_path(Some(path.clone()));
                    let _ = event_tx.send(AudioEvent::Started { path });
                }
                Err(e) => {
                    let _ = event_tx.send(AudioEvent::Error { message: e });
                }
            },

            AudioCommand::Pause => {
                player.pause();
                update_state_from_player(&player, &state);
                let pos = player.get_info().position;
                let _ = event_tx.send(AudioEvent::Paused { position: pos });
            }

            AudioCommand::Resume => {
                player.resume();
                update_state_from_player(&player, &state);
                let _ = event_tx.send(AudioEvent::Resumed);
            }

            AudioCommand::Stop => {
                player.stop();
                update_state_from_player(&player, &state);
                state.set_position(Duration::ZERO);
                state.set_current_path(None);
                let _ = event_tx.send(AudioEvent::Stopped);
            }

            AudioCommand::Seek { position } => match player.seek(position) {
                Ok(_) => {
                    state.set_position(position);
                    let _ = event_tx.send(AudioEvent::SeekComplete { position });
                }
                Err(e) => {
                    let _ = event_tx.send(AudioEvent::SeekFailed { error: e });
                }
            },

            AudioCommand::SetVolume { volume } => {
                player.set_volume(volume);
                state.set_volume(volume.clamp(0.0, 1.0));
            }

            AudioCommand::SetMuted { muted } => {
                player.set_muted(muted);
                state.set_muted(muted);
            }

            AudioCommand::Tick => {
                let info = player.get_info();
                state.set_position(info.position);

                // Paused is user intent, only a Resume command may clear it.
                // The Playing -> Stopped transition on track end is owned by
                // check_playback_finished so the Finished event fires with it.
                let shared_status = state.get_info().status;
                if shared_status != PlaybackStatus::Paused
                    && info.status != PlaybackStatus::Stopped
                {
                    state.set_status(info.status);
                }

                if !player.is_empty() {
                    let _ = event_tx.send(AudioEvent::PositionChanged {
                        position: info.position,
                        duration: info.duration,
                    });
                }
            }
        }

        // Check if playback finished after each command
        check_playback_finished(&player, &event_tx, &state);
    }

    tracing::info!("Audio thread exiting (command channel closed)");
}

/// Update shared state from player's current info
fn update_state_from_player(player: &AudioPlayer, state: &SharedPlaybackState) {
    let info = player.get_info();
    state.update_from_info(&info);
}

/// Check if playback finished and send event
///
/// The shared status guard ensures `Finished` fires exactly once per track
/// end: the first detection flips status to Stopped, which suppresses any
/// further detections until the next Play.
fn check_playback_finished(
    player: &AudioPlayer,
    event_tx: &AudioEventSender,
    state: &SharedPlaybackState,
) {
    if state.get_info().status == PlaybackStatus::Playing && player.is_finished() {
        state.set_status(PlaybackStatus::Stopped);
        let _ = event_tx.send(AudioEvent::Finished);
        tracing::info!("Playback finished");
    }
}
