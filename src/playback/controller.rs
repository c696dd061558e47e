use tracing::{debug, warn};

use crate::audio::AudioOutput;
use crate::catalog::{Track, TrackId};

use super::types::{PlaybackError, Transport};

/// A single-track playback session over one queue.
///
/// The controller owns its audio output exclusively. Every position change
/// assigns the new track's locator to the output before any play intent is
/// acted on, inside the same `&mut self` call.
pub struct PlaybackController<O> {
    output: O,
    queue: Vec<Track>,
    position: Option<usize>,
    playing: bool,
    /// What the output currently has bound: the track id and locator.
    loaded: Option<(TrackId, String)>,
    /// Bumped on every bind; end-of-track reports for older binds are stale.
    generation: u64,
}

impl<O: AudioOutput> PlaybackController<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            queue: Vec::new(),
            position: None,
            playing: false,
            loaded: None,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Current position, `None` when the queue is empty.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current(&self) -> Option<&Track> {
        self.position.and_then(|p| self.queue.get(p))
    }

    /// Play intent. It may be `true` while nothing is audible, e.g. after
    /// the output rejected a play request.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &O {
        &self.output
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Single entry point for transport messages, user-initiated or not.
    pub fn dispatch(&mut self, msg: Transport) -> Result<(), PlaybackError> {
        match msg {
            Transport::Play => self.play(),
            Transport::Pause => self.pause(),
            Transport::Toggle => self.toggle(),
            Transport::Next => self.next(),
            Transport::Previous => self.previous(),
            Transport::TrackEnded { generation } => self.track_ended(generation),
            Transport::Select(index) => return self.select_index(index),
        }
        Ok(())
    }

    pub fn play(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.start_output();
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.output.pause();
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) {
        self.advance(true);
    }

    pub fn previous(&mut self) {
        self.advance(false);
    }

    /// Move to `index` in the current queue without changing play intent.
    pub fn select_index(&mut self, index: usize) -> Result<(), PlaybackError> {
        let len = self.queue.len();
        if index >= len {
            return Err(PlaybackError::InvalidSelection { index, len });
        }
        if self.position == Some(index) {
            return Ok(());
        }

        self.position = Some(index);
        self.sync_source(false);
        Ok(())
    }

    /// Replace the queue (full catalog or a filtered subset) and select
    /// `index` in it. An invalid index leaves the session untouched.
    pub fn select_from(&mut self, queue: Vec<Track>, index: usize) -> Result<(), PlaybackError> {
        if index >= queue.len() {
            return Err(PlaybackError::InvalidSelection {
                index,
                len: queue.len(),
            });
        }

        self.queue = queue;
        self.position = Some(index);
        self.sync_source(false);
        Ok(())
    }

    /// Install a freshly loaded catalog as the queue.
    ///
    /// The current track keeps its place if it is still present, otherwise
    /// the position resets to the first track. The output is re-synced if
    /// the current track's locator changed.
    pub fn load_queue(&mut self, tracks: Vec<Track>) {
        let current_id = self.current().map(|t| t.id.clone());
        self.queue = tracks;

        if self.queue.is_empty() {
            self.position = None;
            if self.playing {
                self.pause();
            }
            return;
        }

        let kept = current_id.and_then(|id| self.queue.iter().position(|t| t.id == id));
        self.position = Some(kept.unwrap_or(0));
        self.sync_source(false);
    }

    fn track_ended(&mut self, generation: u64) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "ignoring end of a replaced source"
            );
            return;
        }
        self.advance(true);
    }

    fn advance(&mut self, forward: bool) {
        let len = self.queue.len();
        let Some(pos) = self.position else {
            return;
        };

        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.position = Some(next);
        // Always rebind: with a single track this restarts it.
        self.sync_source(true);
    }

    fn sync_source(&mut self, force: bool) {
        let Some(track) = self.current() else {
            return;
        };
        let id = track.id.clone();
        let locator = track.source().to_string();

        let unchanged = self
            .loaded
            .as_ref()
            .is_some_and(|(loaded_id, loaded_locator)| *loaded_id == id && *loaded_locator == locator);
        if unchanged && !force {
            return;
        }

        if locator.is_empty() {
            warn!(track = %id, "track has no audio url");
        }
        debug!(track = %id, %locator, playing = self.playing, "binding source");

        self.generation += 1;
        self.output.set_source(self.generation, &locator);
        self.loaded = Some((id, locator));

        if self.playing {
            self.start_output();
        }
    }

    fn start_output(&mut self) {
        if let Err(e) = self.output.play() {
            warn!("play request rejected: {e}");
        }
    }
}
