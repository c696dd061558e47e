//! Application model: the catalog, the search query and the list cursor.

use crate::catalog::{Catalog, LoadResult, Track, TrackId, filter_indices};

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    /// Cursor, as an index into the catalog. Kept inside the visible list.
    pub selected: usize,
    pub follow_playback: bool,
    pub filter_mode: bool,
    pub filter_query: String,
    /// Last playback problem worth showing in the status line.
    pub notice: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            selected: 0,
            follow_playback: true,
            filter_mode: false,
            filter_query: String::new(),
            notice: None,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        self.catalog.tracks()
    }

    /// Return true if the catalog contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Apply a finished catalog load. Returns `true` when the track list was
    /// replaced.
    pub fn apply_load(&mut self, result: LoadResult) -> bool {
        let replaced = self.catalog.finish_load(result);
        if replaced {
            self.ensure_selected_visible();
        }
        replaced
    }

    /// Catalog indices of the visible tracks, in catalog order.
    pub fn display_indices(&self) -> Vec<usize> {
        filter_indices(self.catalog.tracks(), &self.filter_query)
    }

    /// The visible tracks, cloned in catalog order.
    pub fn visible_tracks(&self) -> Vec<Track> {
        self.catalog.filtered(&self.filter_query)
    }

    /// The visible list together with the cursor's position in it: the
    /// queue and index to hand to the playback session on selection.
    pub fn selection(&self) -> Option<(Vec<Track>, usize)> {
        let pos = self
            .display_indices()
            .iter()
            .position(|&i| i == self.selected)?;
        Some((self.visible_tracks(), pos))
    }

    /// Return the next visible index in the current display order after `current`.
    /// Wraps around to the first element.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index in the current display order before `current`.
    /// Wraps around to the last element.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    /// Move the cursor onto the track with `id` if it is visible.
    pub fn follow(&mut self, id: &TrackId) {
        if !self.follow_playback {
            return;
        }
        let found = self
            .display_indices()
            .into_iter()
            .find(|&i| self.catalog.tracks()[i].id == *id);
        if let Some(i) = found {
            self.selected = i;
        }
    }

    /// Enter filter mode.
    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }
    /// Leave filter mode, keeping the query.
    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }
    /// Clear the active filter and restore selection visibility.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }
    /// Append a character to the filter query and refresh view.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }
    /// Remove the last character from the filter query and refresh view.
    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    /// Ensure that `selected` is part of the current filtered view,
    /// otherwise move selection to the first visible track.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    /// Move selection to the next visible track.
    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    /// Move selection to the previous visible track.
    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }
}
