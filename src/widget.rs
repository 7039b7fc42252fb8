//! Playback widget module
//!
//! The embedder-facing playback component:
//! - `PlaybackWidget`: controls + display state for one fixed track
//! - `PlaybackPhase`: tagged playback state
//! - `TrackTime`: elapsed-time value with `MM:SS` rendering

mod state;
mod time;

pub use state::{PlaybackPhase, PlaybackWidget, progress_percent};
pub use time::TrackTime;
