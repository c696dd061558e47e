//! Utilities for creating `rodio` sinks from remote media.
//!
//! The helper here downloads the media, decodes it and prepares a paused
//! `Sink` ready to be started.

use std::io::Cursor;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::{Decoder, OutputStream, Sink};

use crate::config::AudioSettings;

use super::output::resolve_locator;
use super::types::AudioError;

/// Fetch `locator` and return a paused `Sink` playing it from the start.
pub(super) fn create_sink(
    stream: &OutputStream,
    http: &Client,
    base_url: &str,
    locator: &str,
    volume: f32,
) -> Result<Sink, AudioError> {
    let url = resolve_locator(base_url, locator)?;
    let bytes = fetch(http, &url)?;

    let source = Decoder::new(Cursor::new(bytes)).map_err(|e| AudioError::Decode {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}

fn fetch(http: &Client, url: &str) -> Result<Vec<u8>, AudioError> {
    let fetch_err = |reason: String| AudioError::Fetch {
        url: url.to_string(),
        reason,
    };

    let resp = http.get(url).send().map_err(|e| fetch_err(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(fetch_err(resp.status().to_string()));
    }

    resp.bytes()
        .map(|b| b.to_vec())
        .map_err(|e| fetch_err(e.to_string()))
}

/// HTTP client for media downloads. Without `fetch_timeout_secs` a download
/// may take as long as it needs.
pub(super) fn media_client(settings: &AudioSettings) -> Result<Client, AudioError> {
    Client::builder()
        .timeout(settings.fetch_timeout_secs.map(Duration::from_secs))
        .build()
        .map_err(|e| AudioError::Client(e.to_string()))
}
