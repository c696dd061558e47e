//! Query filtering over the loaded catalog.
//!
//! Both helpers are pure and keep catalog order, so applying a query to its
//! own output yields the same list.

use super::model::Track;

/// Indices of the tracks matching `query`, in catalog order.
pub fn filter_indices(tracks: &[Track], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..tracks.len()).collect();
    }

    let query_lower = query.to_lowercase();
    tracks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.matches_lower(&query_lower))
        .map(|(i, _)| i)
        .collect()
}

/// The tracks matching `query`. An empty query returns the whole catalog.
pub fn filter(tracks: &[Track], query: &str) -> Vec<Track> {
    filter_indices(tracks, query)
        .into_iter()
        .map(|i| tracks[i].clone())
        .collect()
}
