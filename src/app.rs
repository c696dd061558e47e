//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded catalog, the
//! search query and the list cursor.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
