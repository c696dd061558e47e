//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::AudioOutput;
use crate::catalog::{LoadStatus, Track};
use crate::config::UiSettings;
use crate::playback::PlaybackController;

const CONTROLS: [(&str, &str); 6] = [
    ("j/k", "up/down"),
    ("h/l", "prev/next song"),
    ("enter", "select song"),
    ("space/p", "play/pause"),
    ("/", "search"),
    ("q", "quit"),
];

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// "Title - Artist" for the current track, or the idle placeholder.
pub fn now_playing_text(current: Option<&Track>) -> String {
    match current {
        Some(t) => t.display(),
        None => "Nothing playing".to_string(),
    }
}

/// Cover label. Artwork itself is not rendered in the terminal.
pub fn cover_text(current: Option<&Track>) -> &str {
    match current.and_then(|t| t.cover_url.as_deref()) {
        Some(url) if !url.is_empty() => url,
        _ => "No Art",
    }
}

/// Build the status line from catalog and playback state.
fn status_text<O: AudioOutput>(app: &App, controller: &PlaybackController<O>) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(match app.catalog.status() {
        LoadStatus::Idle => "Catalog unavailable".to_string(),
        LoadStatus::Loading => "Loading…".to_string(),
        LoadStatus::Settled => format!("Tracks: {}", app.tracks().len()),
    });

    let current = controller.current();
    let state = if controller.is_empty() {
        "Stopped"
    } else if controller.is_playing() {
        "Playing"
    } else {
        "Paused"
    };
    parts.push(state.to_string());
    parts.push(format!("Song: {}", now_playing_text(current)));
    parts.push(format!("Cover: {}", cover_text(current)));

    if let Some(notice) = &app.notice {
        parts.push(format!("Error: {notice}"));
    }

    parts.join(" • ")
}

/// Compute the visible window `(start, end, selected_in_window)` that keeps
/// the selected row centered when the list is taller than `height`.
pub fn list_window(total: usize, height: usize, sel_pos: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, sel_pos);
    }
    let half = height / 2;
    let mut start = sel_pos.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, sel_pos - start)
}

/// Render the entire UI into the provided `frame`.
pub fn draw<O: AudioOutput>(
    frame: &mut Frame,
    app: &App,
    controller: &PlaybackController<O>,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vibetunes ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, controller))
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Search box
    let search_title = if app.filter_mode {
        " search (enter keeps, esc clears) "
    } else {
        " search (/) "
    };
    let mut search = Paragraph::new(app.filter_query.as_str())
        .block(Block::bordered().padding(LEFT_PAD).title(search_title));
    if app.filter_mode {
        search = search.bold();
    }
    frame.render_widget(search, chunks[2]);

    // Main list
    let display = app.display_indices();
    if display.is_empty() {
        let empty = if app.catalog.is_loading() {
            "Loading…"
        } else if app.has_tracks() {
            "No matches"
        } else {
            "No tracks"
        };
        let p = Paragraph::new(empty)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" tracks "));
        frame.render_widget(p, chunks[3]);
    } else {
        let playing_id = controller.current().map(|t| &t.id);
        let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
        // Only build ListItems for the visible window.
        let inner_height = chunks[3].height.saturating_sub(2) as usize;
        let (start, end, selected_in_window) = list_window(display.len(), inner_height, sel_pos);

        let items: Vec<ListItem> = display[start..end]
            .iter()
            .map(|&i| {
                let track = &app.tracks()[i];
                let item = ListItem::new(track.display());
                if Some(&track.id) == playing_id {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(selected_in_window));
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
