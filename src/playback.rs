//! Playback session: the transport state machine over a queue of tracks,
//! bound to one audio output.

mod controller;
mod types;

pub use controller::PlaybackController;
pub use types::{PlaybackError, Transport};
