use std::fmt;

use serde::Deserialize;

/// Catalog identifier. The service may send either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One playable catalog entry as served by `GET {base}/tracks`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl Track {
    /// Media locator handed to the audio output; empty when the entry has none.
    pub fn source(&self) -> &str {
        self.audio_url.as_deref().unwrap_or("")
    }

    /// Case-insensitive substring match over title, artist and album.
    ///
    /// `query_lower` must already be lowercased.
    pub fn matches_lower(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.artist.to_lowercase().contains(query_lower)
            || self
                .album
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(query_lower)
    }

    /// "Title - Artist", used by the list and the now-playing line.
    pub fn display(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}
