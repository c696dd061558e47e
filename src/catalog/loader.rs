//! The load cycle: fetch, seed once if the catalog is empty, refetch.
//!
//! The cycle is an explicit state machine so each transition can be driven
//! and observed on its own. `run` drives it to completion; `spawn_load` runs
//! it on a background thread and reports the outcome over a channel.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use super::client::{CatalogError, CatalogSource};
use super::model::Track;

/// Where a load cycle currently stands. Each phase names the work the next
/// `step` performs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Fetching,
    Seeding,
    Refetching,
    Settled,
}

/// The result of a completed load cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub tracks: Vec<Track>,
    /// Whether the seed endpoint was called during this cycle.
    pub seeded: bool,
}

pub type LoadResult = Result<LoadReport, CatalogError>;

pub struct Loader<S> {
    source: S,
    phase: LoadPhase,
    tracks: Vec<Track>,
    seeded: bool,
}

impl<S: CatalogSource> Loader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: LoadPhase::Idle,
            tracks: Vec::new(),
            seeded: false,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Perform the current phase's work and advance by one transition.
    ///
    /// A failing request settles the cycle and returns the error.
    pub fn step(&mut self) -> Result<LoadPhase, CatalogError> {
        let next = match self.phase {
            LoadPhase::Idle => LoadPhase::Fetching,
            LoadPhase::Fetching => {
                let tracks = self.settle_on_err(|s| s.fetch_tracks())?;
                if tracks.is_empty() {
                    LoadPhase::Seeding
                } else {
                    self.tracks = tracks;
                    LoadPhase::Settled
                }
            }
            LoadPhase::Seeding => {
                self.settle_on_err(|s| s.seed())?;
                self.seeded = true;
                LoadPhase::Refetching
            }
            LoadPhase::Refetching => {
                // No second seed: whatever comes back now is final.
                self.tracks = self.settle_on_err(|s| s.fetch_tracks())?;
                LoadPhase::Settled
            }
            LoadPhase::Settled => LoadPhase::Settled,
        };

        debug!(from = ?self.phase, to = ?next, "load transition");
        self.phase = next;
        Ok(next)
    }

    /// Step until settled.
    pub fn run(mut self) -> LoadResult {
        while self.phase() != LoadPhase::Settled {
            self.step()?;
        }
        Ok(self.into_report())
    }

    fn into_report(self) -> LoadReport {
        LoadReport {
            tracks: self.tracks,
            seeded: self.seeded,
        }
    }

    fn settle_on_err<T>(
        &mut self,
        f: impl FnOnce(&S) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        f(&self.source).inspect_err(|_| self.phase = LoadPhase::Settled)
    }
}

/// Run one load cycle on a background thread.
///
/// The result is delivered through `tx`; a closed receiver is ignored.
pub fn spawn_load<S>(source: S, tx: Sender<LoadResult>) -> JoinHandle<()>
where
    S: CatalogSource + Send + 'static,
{
    thread::spawn(move || {
        info!("loading catalog");
        let _ = tx.send(Loader::new(source).run());
    })
}
