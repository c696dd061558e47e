use super::*;
use crate::catalog::{LoadReport, LoadStatus, Track, TrackId};

fn t(id: i64, title: &str, artist: &str) -> Track {
    Track {
        id: TrackId::Number(id),
        title: title.into(),
        artist: artist.into(),
        album: None,
        audio_url: None,
        cover_url: None,
    }
}

fn loaded(tracks: Vec<Track>) -> App {
    let mut app = App::new();
    app.catalog.begin_load();
    app.apply_load(Ok(LoadReport {
        tracks,
        seeded: false,
    }));
    app
}

#[test]
fn display_indices_respects_filter_query() {
    let mut app = loaded(vec![
        t(0, "Alpha", "X"),
        t(1, "Beta", "Y"),
        t(2, "Gamma", "X"),
    ]);
    assert_eq!(app.display_indices(), vec![0, 1, 2]);

    app.filter_query = "x".into();
    assert_eq!(app.display_indices(), vec![0, 2]);
}

#[test]
fn filter_uses_substring_not_fuzzy_matching() {
    let mut app = loaded(vec![t(0, "Blackened", "Metallica"), t(1, "Paranoid", "Black Sabbath")]);
    app.filter_query = "mtbk".into();
    assert!(app.display_indices().is_empty());

    app.filter_query = "black".into();
    assert_eq!(app.display_indices(), vec![0, 1]);
}

#[test]
fn next_prev_in_view_helpers_work() {
    let mut app = loaded(vec![t(0, "Alpha", "A"), t(1, "Beta", "B"), t(2, "Gamma", "C")]);
    app.filter_query = "et".into(); // only Beta is visible

    assert_eq!(app.next_in_view_from(0), Some(1));
    assert_eq!(app.prev_in_view_from(0), Some(1));
    assert_eq!(app.next_in_view_from(1), Some(1));
    assert_eq!(app.prev_in_view_from(1), Some(1));
}

#[test]
fn cursor_wraps_inside_visible_list() {
    let mut app = loaded(vec![t(0, "A", "x"), t(1, "B", "y"), t(2, "C", "x")]);
    app.push_filter_char('x');
    assert_eq!(app.selected, 0);

    app.next();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.prev();
    assert_eq!(app.selected, 2);
}

#[test]
fn editing_filter_keeps_cursor_visible() {
    let mut app = loaded(vec![t(0, "Alpha", "A"), t(1, "Beta", "B")]);
    app.selected = 0;

    app.enter_filter_mode();
    app.push_filter_char('b');
    assert_eq!(app.selected, 1);

    app.pop_filter_char();
    assert_eq!(app.selected, 1);

    app.clear_filter();
    assert!(!app.filter_mode);
    assert!(app.filter_query.is_empty());
}

#[test]
fn selection_returns_visible_queue_and_position() {
    let mut app = loaded(vec![t(0, "One", "A"), t(1, "Two", "B"), t(2, "Three", "A")]);
    app.filter_query = "a".into();
    app.selected = 2;

    let (queue, pos) = app.selection().unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(pos, 1);
    assert_eq!(queue[pos].id, TrackId::Number(2));
}

#[test]
fn selection_is_none_when_nothing_visible() {
    let mut app = loaded(vec![t(0, "One", "A")]);
    app.push_filter_char('z');
    assert!(app.selection().is_none());
    assert!(App::new().selection().is_none());
}

#[test]
fn follow_moves_cursor_to_playing_track() {
    let mut app = loaded(vec![t(0, "One", "A"), t(1, "Two", "B")]);
    app.follow(&TrackId::Number(1));
    assert_eq!(app.selected, 1);

    app.follow_playback = false;
    app.follow(&TrackId::Number(0));
    assert_eq!(app.selected, 1);
}

#[test]
fn failed_load_keeps_empty_catalog_and_settles() {
    let mut app = App::new();
    app.catalog.begin_load();
    assert!(app.catalog.is_loading());

    let err = crate::catalog::CatalogError::Status {
        url: "http://x/tracks".into(),
        status: reqwest::StatusCode::BAD_GATEWAY,
    };
    assert!(!app.apply_load(Err(err)));
    assert!(!app.has_tracks());
    assert_eq!(app.catalog.status(), LoadStatus::Settled);
}
