use tracing::debug;

use super::types::AudioError;

/// The capability the playback controller needs from the media layer.
///
/// Implementations own the underlying resource exclusively. `play` may be
/// rejected; everything else always succeeds from the caller's view, with
/// late failures reported as [`AudioEvent`](super::AudioEvent)s.
///
/// `generation` identifies the bind and is echoed back in
/// [`AudioEvent::Ended`](super::AudioEvent::Ended).
pub trait AudioOutput {
    fn set_source(&mut self, generation: u64, locator: &str);
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn set_source(&mut self, generation: u64, locator: &str) {
        (**self).set_source(generation, locator)
    }

    fn play(&mut self) -> Result<(), AudioError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }
}

/// Output used when no audio device could be opened. Every play request is
/// rejected so the session keeps working without sound.
#[derive(Debug, Default)]
pub struct NullOutput {
    source: Option<String>,
}

impl AudioOutput for NullOutput {
    fn set_source(&mut self, generation: u64, locator: &str) {
        debug!(generation, locator, "null output: source set");
        self.source = Some(locator.to_string());
    }

    fn play(&mut self) -> Result<(), AudioError> {
        Err(AudioError::NoDevice("audio output disabled".into()))
    }

    fn pause(&mut self) {}
}

/// Turn a track's media locator into an absolute URL.
///
/// Absolute `http(s)` locators are kept as-is; relative ones are resolved
/// against the catalog service's base URL.
pub fn resolve_locator(base_url: &str, locator: &str) -> Result<String, AudioError> {
    let locator = locator.trim();
    if locator.is_empty() {
        return Err(AudioError::MissingSource);
    }

    if locator.starts_with("http://") || locator.starts_with("https://") {
        return Ok(locator.to_string());
    }

    let base = base_url.trim_end_matches('/');
    if locator.starts_with('/') {
        Ok(format!("{base}{locator}"))
    } else {
        Ok(format!("{base}/{locator}"))
    }
}
