use tracing::{error, info};

use super::filter::filter;
use super::loader::LoadResult;
use super::model::Track;

/// Loading indicator for the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No load has been started yet.
    #[default]
    Idle,
    /// A load cycle is in flight.
    Loading,
    /// The last load cycle finished, successfully or not.
    Settled,
}

/// The tracks known to the client, as last fetched.
#[derive(Debug, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    status: LoadStatus,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Mark a load as in flight. Returns `false` if one already is, in which
    /// case the caller must not start another.
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.status = LoadStatus::Loading;
        true
    }

    /// Apply the outcome of a load cycle and clear the loading indicator.
    ///
    /// On failure the previous tracks are kept. Returns `true` when the track
    /// list was replaced.
    pub fn finish_load(&mut self, result: LoadResult) -> bool {
        self.status = LoadStatus::Settled;
        match result {
            Ok(report) => {
                if report.seeded && report.tracks.is_empty() {
                    info!("catalog is still empty after seeding");
                } else {
                    info!(
                        count = report.tracks.len(),
                        seeded = report.seeded,
                        "catalog loaded"
                    );
                }
                self.tracks = report.tracks;
                true
            }
            Err(e) => {
                error!("failed to load catalog: {e}");
                false
            }
        }
    }

    /// Tracks whose title, artist or album contain `query`, ignoring case.
    pub fn filtered(&self, query: &str) -> Vec<Track> {
        filter(&self.tracks, query)
    }
}
