//! Audio-related small types.
//!
//! Commands sent to the audio thread, events it reports back and the error
//! type shared by output implementations.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Replace the current source with the media at `locator`, paused.
    SetSource { generation: u64, locator: String },
    /// Start or resume producing sound from the current source.
    Play,
    /// Stop producing sound, keeping the current source.
    Pause,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications raised asynchronously by the audio output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// The source bound as `generation` played to its end.
    Ended { generation: u64 },
    /// A source could not be loaded or played.
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoDevice(String),
    #[error("track has no audio url")]
    MissingSource,
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("audio thread is not running")]
    Disconnected,
}
