use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use tracing::warn;

use crate::config::AudioSettings;

use super::output::AudioOutput;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioError, AudioEvent};

/// `rodio`-backed audio output.
///
/// Commands are forwarded to a dedicated audio thread which owns the output
/// stream; end-of-track and load failures come back through the event
/// channel passed to [`RodioOutput::new`].
pub struct RodioOutput {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
    quit_fade_out_ms: u64,
}

impl RodioOutput {
    /// Open the default output device. Fails if no device is available.
    pub fn new(
        audio_settings: &AudioSettings,
        base_url: &str,
        events: Sender<AudioEvent>,
    ) -> Result<Self, AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel();

        let join = spawn_audio_thread(
            rx,
            events,
            ready_tx,
            audio_settings.clone(),
            base_url.to_string(),
        );

        ready_rx.recv().map_err(|_| AudioError::Disconnected)??;

        Ok(Self {
            tx,
            join: Some(join),
            quit_fade_out_ms: audio_settings.quit_fade_out_ms,
        })
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), AudioError> {
        self.tx.send(cmd).map_err(|_| AudioError::Disconnected)
    }

    /// Fade out, stop the audio thread and wait for it to exit.
    pub fn quit_softly(&mut self) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: self.quit_fade_out_ms,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl AudioOutput for RodioOutput {
    fn set_source(&mut self, generation: u64, locator: &str) {
        let cmd = AudioCmd::SetSource {
            generation,
            locator: locator.to_string(),
        };
        if let Err(e) = self.send(cmd) {
            warn!("failed to set source: {e}");
        }
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        self.quit_softly();
    }
}
