//! Audio output: the trait the playback controller drives and its
//! `rodio` implementation.
//!
//! The implementation runs on its own thread; see `thread` for the command
//! loop and `sink` for fetching and decoding remote media.

mod output;
mod player;
mod sink;
mod thread;
mod types;

pub use output::{AudioOutput, NullOutput, resolve_locator};
pub use player::RodioOutput;
pub use types::{AudioError, AudioEvent};
