use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::App;
use crate::audio::{AudioEvent, AudioOutput, NullOutput, RodioOutput};
use crate::catalog::{HttpCatalog, LoadResult, spawn_load};
use crate::logging;
use crate::playback::PlaybackController;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_warning) = settings::load_settings();

    let log_path = logging::init(&settings.logging);
    if let Some(msg) = settings_warning {
        warn!("{msg}");
    }
    info!(
        base_url = %settings.server.base_url,
        log = ?log_path,
        "starting vibetunes"
    );

    let mut app = App::new();
    app.follow_playback = settings.ui.follow_playback;

    let (load_tx, load_rx) = mpsc::channel::<LoadResult>();
    match HttpCatalog::new(&settings.server) {
        Ok(source) => {
            if app.catalog.begin_load() {
                spawn_load(source, load_tx);
            }
        }
        Err(e) => error!("failed to build catalog client: {e}"),
    }

    let (audio_tx, audio_rx) = mpsc::channel::<AudioEvent>();
    let output: Box<dyn AudioOutput> =
        match RodioOutput::new(&settings.audio, &settings.server.base_url, audio_tx) {
            Ok(o) => Box::new(o),
            Err(e) => {
                warn!("audio output unavailable, playback disabled: {e}");
                Box::new(NullOutput::default())
            }
        };
    let mut controller = PlaybackController::new(output);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &load_rx,
        &audio_rx,
    );

    // Fades out and joins the audio thread.
    drop(controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

#[cfg(test)]
mod tests;
