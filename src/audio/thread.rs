use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::config::AudioSettings;

use super::sink::{create_sink, media_client};
use super::types::{AudioCmd, AudioError, AudioEvent};

/// How often the thread checks whether the current source ran out.
const END_POLL: Duration = Duration::from_millis(200);

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    ready: Sender<Result<(), AudioError>>,
    audio_settings: AudioSettings,
    base_url: String,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let http = match media_client(&audio_settings) {
            Ok(c) => c,
            Err(e) => {
                let _ = ready.send(Err(e));
                return;
            }
        };
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(AudioError::NoDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let _ = ready.send(Ok(()));
        info!("audio output ready");

        let mut sink: Option<Sink> = None;
        let mut bound_generation: u64 = 0;
        let mut playing = false;
        let mut pending: VecDeque<AudioCmd> = VecDeque::new();

        fn report(events: &Sender<AudioEvent>, err: AudioError) {
            warn!("audio output: {err}");
            let _ = events.send(AudioEvent::Failed(err.to_string()));
        }

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            let start = sink.volume();
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(start * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            let next = match pending.pop_front() {
                Some(cmd) => Ok(cmd),
                None => rx.recv_timeout(END_POLL),
            };

            match next {
                Ok(mut cmd) => {
                    if matches!(cmd, AudioCmd::SetSource { .. }) {
                        // Loading is slow; skip sources that were already replaced.
                        pending.extend(rx.try_iter());
                        cmd = latest_source(cmd, &mut pending);
                    }

                    match cmd {
                        AudioCmd::SetSource {
                            generation,
                            locator,
                        } => {
                            // Only one source is ever bound: drop the old one first.
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            playing = false;
                            bound_generation = generation;

                            debug!(generation, %locator, "loading source");
                            match create_sink(
                                &stream,
                                &http,
                                &base_url,
                                &locator,
                                audio_settings.volume,
                            ) {
                                Ok(s) => sink = Some(s),
                                Err(e) => report(&events, e),
                            }
                        }
                        AudioCmd::Play => match sink {
                            Some(ref s) => {
                                s.play();
                                playing = true;
                            }
                            None => report(&events, AudioError::MissingSource),
                        },
                        AudioCmd::Pause => {
                            if let Some(ref s) = sink {
                                s.pause();
                            }
                            playing = false;
                        }
                        AudioCmd::Quit { fade_out_ms } => {
                            if let Some(ref s) = sink {
                                if playing {
                                    fade_out_sink(s, fade_out_ms);
                                }
                                s.stop();
                            }
                            break;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    // End of track is reported once; the controller decides what comes next.
                    if playing && sink.as_ref().is_some_and(Sink::empty) {
                        playing = false;
                        let ev = AudioEvent::Ended {
                            generation: bound_generation,
                        };
                        if events.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("audio thread stopped");
    })
}

/// Collapse `first` and the queued commands behind it so only the newest
/// source gets loaded.
///
/// Returns the command to run now; `pending` keeps what follows it. A queued
/// `Quit` wins over everything. Play and pause requests issued before the
/// newest source are dropped, since binding a source resets them anyway.
pub(super) fn latest_source(first: AudioCmd, pending: &mut VecDeque<AudioCmd>) -> AudioCmd {
    if let Some(q) = pending
        .iter()
        .position(|c| matches!(c, AudioCmd::Quit { .. }))
    {
        let quit = pending.remove(q).unwrap_or(first);
        pending.clear();
        return quit;
    }

    let Some(last) = pending
        .iter()
        .rposition(|c| matches!(c, AudioCmd::SetSource { .. }))
    else {
        return first;
    };

    let rest = pending.split_off(last + 1);
    let newest = pending.pop_back().unwrap_or(first);
    *pending = rest;
    newest
}
