//! Remote track catalog: the data model, the service client, the
//! fetch-and-seed load cycle and query filtering.

mod client;
mod filter;
mod loader;
mod model;
mod state;

pub use client::{CatalogError, CatalogSource, HttpCatalog};
pub use filter::{filter, filter_indices};
pub use loader::{LoadPhase, LoadReport, LoadResult, Loader, spawn_load};
pub use model::{Track, TrackId};
pub use state::{Catalog, LoadStatus};

pub(crate) use client::trim_base;
