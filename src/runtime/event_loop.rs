use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, warn};

use crate::app::App;
use crate::audio::{AudioEvent, AudioOutput};
use crate::catalog::LoadResult;
use crate::config;
use crate::playback::{PlaybackController, Transport};
use crate::ui;

/// Main terminal event loop: applies catalog results and audio events,
/// draws, and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run<O: AudioOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<O>,
    load_rx: &mpsc::Receiver<LoadResult>,
    audio_rx: &mpsc::Receiver<AudioEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(result) = load_rx.try_recv() {
            if app.apply_load(result) {
                controller.load_queue(app.tracks().to_vec());
            }
        }

        while let Ok(ev) = audio_rx.try_recv() {
            handle_audio_event(ev, app, controller);
        }

        terminal.draw(|f| ui::draw(f, app, controller, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, controller) {
                    break;
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn handle_audio_event<O: AudioOutput>(
    ev: AudioEvent,
    app: &mut App,
    controller: &mut PlaybackController<O>,
) {
    match ev {
        AudioEvent::Ended { generation } => {
            debug!(generation, "track ended");
            dispatch(Transport::TrackEnded { generation }, app, controller);
        }
        AudioEvent::Failed(reason) => {
            warn!("playback failed: {reason}");
            app.notice = Some(reason);
        }
    }
}

fn dispatch<O: AudioOutput>(msg: Transport, app: &mut App, controller: &mut PlaybackController<O>) {
    if let Err(e) = controller.dispatch(msg) {
        error!("{e}");
        return;
    }
    if !app.filter_mode {
        if let Some(track) = controller.current() {
            app.follow(&track.id);
        }
    }
}

/// Handle one key press. Returns `true` when the user asked to quit.
pub(crate) fn handle_key_event<O: AudioOutput>(
    key: KeyEvent,
    app: &mut App,
    controller: &mut PlaybackController<O>,
) -> bool {
    if app.filter_mode {
        match key.code {
            KeyCode::Esc => app.clear_filter(),
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Enter => app.exit_filter_mode(),
            KeyCode::Char('j') | KeyCode::Char('n')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.next()
            }
            KeyCode::Char('k') | KeyCode::Char('p')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.prev()
            }
            KeyCode::Char(c) if !c.is_control() => app.push_filter_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Esc => app.clear_filter(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            if let Some((queue, index)) = app.selection() {
                app.notice = None;
                if let Err(e) = controller.select_from(queue, index) {
                    error!("{e}");
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            app.notice = None;
            dispatch(Transport::Toggle, app, controller);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.notice = None;
            dispatch(Transport::Next, app, controller);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.notice = None;
            dispatch(Transport::Previous, app, controller);
        }
        _ => {}
    }

    false
}
