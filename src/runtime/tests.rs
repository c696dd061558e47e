use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event_loop::{handle_audio_event, handle_key_event};
use crate::app::App;
use crate::audio::{AudioEvent, NullOutput};
use crate::catalog::{LoadReport, Track, TrackId};
use crate::playback::PlaybackController;

fn t(id: i64, title: &str, artist: &str) -> Track {
    Track {
        id: TrackId::Number(id),
        title: title.into(),
        artist: artist.into(),
        album: None,
        audio_url: Some(format!("/media/{id}.mp3")),
        cover_url: None,
    }
}

fn setup() -> (App, PlaybackController<NullOutput>) {
    let mut app = App::new();
    let mut controller = PlaybackController::new(NullOutput::default());
    app.catalog.begin_load();
    let tracks = vec![
        t(1, "Blue Monday", "New Order"),
        t(2, "Ceremony", "New Order"),
        t(3, "Atmosphere", "Joy Division"),
    ];
    assert!(app.apply_load(Ok(LoadReport {
        tracks,
        seeded: false,
    })));
    controller.load_queue(app.tracks().to_vec());
    (app, controller)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(s: &str, app: &mut App, controller: &mut PlaybackController<NullOutput>) {
    for c in s.chars() {
        handle_key_event(key(KeyCode::Char(c)), app, controller);
    }
}

#[test]
fn loaded_catalog_becomes_queue_without_autoplay() {
    let (_app, controller) = setup();
    assert_eq!(controller.len(), 3);
    assert_eq!(controller.position(), Some(0));
    assert!(!controller.is_playing());
}

#[test]
fn q_quits_outside_search_mode_only() {
    let (mut app, mut controller) = setup();
    handle_key_event(key(KeyCode::Char('/')), &mut app, &mut controller);
    assert!(!handle_key_event(key(KeyCode::Char('q')), &mut app, &mut controller));
    assert_eq!(app.filter_query, "q");

    handle_key_event(key(KeyCode::Esc), &mut app, &mut controller);
    assert!(app.filter_query.is_empty());
    assert!(handle_key_event(key(KeyCode::Char('q')), &mut app, &mut controller));
}

#[test]
fn enter_in_search_mode_keeps_query() {
    let (mut app, mut controller) = setup();
    handle_key_event(key(KeyCode::Char('/')), &mut app, &mut controller);
    type_str("order", &mut app, &mut controller);
    handle_key_event(key(KeyCode::Enter), &mut app, &mut controller);

    assert!(!app.filter_mode);
    assert_eq!(app.filter_query, "order");
    assert_eq!(app.display_indices(), vec![0, 1]);
}

#[test]
fn enter_selects_from_visible_list_without_playing() {
    let (mut app, mut controller) = setup();
    handle_key_event(key(KeyCode::Char('/')), &mut app, &mut controller);
    type_str("joy", &mut app, &mut controller);
    handle_key_event(key(KeyCode::Enter), &mut app, &mut controller);
    handle_key_event(key(KeyCode::Enter), &mut app, &mut controller);

    assert_eq!(controller.len(), 1);
    assert_eq!(controller.current().unwrap().id, TrackId::Number(3));
    assert!(!controller.is_playing());
}

#[test]
fn transport_keys_drive_controller_and_cursor_follows() {
    let (mut app, mut controller) = setup();
    handle_key_event(key(KeyCode::Char(' ')), &mut app, &mut controller);
    assert!(controller.is_playing());

    handle_key_event(key(KeyCode::Char('l')), &mut app, &mut controller);
    assert_eq!(controller.position(), Some(1));
    assert_eq!(app.selected, 1);

    handle_key_event(key(KeyCode::Char('h')), &mut app, &mut controller);
    handle_key_event(key(KeyCode::Char('h')), &mut app, &mut controller);
    assert_eq!(controller.position(), Some(2));
    assert_eq!(app.selected, 2);

    handle_key_event(key(KeyCode::Char('p')), &mut app, &mut controller);
    assert!(!controller.is_playing());
}

#[test]
fn track_end_advances_like_next() {
    let (mut app, mut controller) = setup();
    controller.play();
    let generation = controller.generation();
    handle_audio_event(AudioEvent::Ended { generation }, &mut app, &mut controller);
    assert_eq!(controller.position(), Some(1));
    assert!(controller.is_playing());
    assert_eq!(app.selected, 1);
}

#[test]
fn audio_failure_is_shown_and_cleared_by_next_action() {
    let (mut app, mut controller) = setup();
    handle_audio_event(
        AudioEvent::Failed("decode failed".into()),
        &mut app,
        &mut controller,
    );
    assert_eq!(app.notice.as_deref(), Some("decode failed"));

    handle_key_event(key(KeyCode::Char('l')), &mut app, &mut controller);
    assert!(app.notice.is_none());
}

#[test]
fn end_of_track_racing_a_skip_moves_only_once() {
    let (mut app, mut controller) = setup();
    controller.play();
    let playing = controller.generation();

    // The audio thread reports the end of track 1 just as the user skips.
    handle_key_event(key(KeyCode::Char('l')), &mut app, &mut controller);
    handle_audio_event(
        AudioEvent::Ended {
            generation: playing,
        },
        &mut app,
        &mut controller,
    );

    assert_eq!(controller.position(), Some(1));
    assert_eq!(app.selected, 1);
}
