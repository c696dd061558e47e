/// Transport messages accepted by the playback controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    /// Move to the given position in the current queue.
    Select(usize),
    /// The output reached the end of the source bound as `generation`.
    TrackEnded { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("selection {index} is outside the queue (length {len})")]
    InvalidSelection { index: usize, len: usize },
}
