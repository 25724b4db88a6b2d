//! Offline ingestion of saved Spotify Web API playlist responses.
//!
//! Accepts either a playlist-tracks page (`{"items": [...], "next": ...}`) or a full playlist
//! object (`{"name": ..., "tracks": {"items": [...]}}`). Only the fields printed on cards are read.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::foundation::error::{PlaycardsError, PlaycardsResult};
use crate::playlist::model::Track;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageRepr {
    Playlist { name: String, tracks: TrackPage },
    Page(TrackPage),
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    items: Vec<PlaylistItem>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    track: Option<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    name: String,
    album: SpotifyAlbum,
    external_urls: ExternalUrls,
    artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Deserialize)]
struct SpotifyAlbum {
    release_date: String,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

/// Tracks decoded from one saved response.
#[derive(Debug, Clone)]
pub struct SpotifyPage {
    /// Playlist name, present when the response was a full playlist object.
    pub playlist_name: Option<String>,
    /// Decoded tracks, in response order.
    pub tracks: Vec<Track>,
    /// Number of items skipped because their `track` was `null`.
    pub skipped: usize,
    /// `next` page URL, if the response was paginated.
    pub next: Option<String>,
}

impl SpotifyPage {
    pub fn from_reader<R: std::io::Read>(r: R) -> PlaycardsResult<Self> {
        let repr: PageRepr = serde_json::from_reader(r)
            .map_err(|e| PlaycardsError::validation(format!("parse Spotify page JSON: {e}")))?;
        let (playlist_name, page) = match repr {
            PageRepr::Playlist { name, tracks } => (Some(name), tracks),
            PageRepr::Page(page) => (None, page),
        };

        let mut tracks = Vec::with_capacity(page.items.len());
        let mut skipped = 0usize;
        for (i, item) in page.items.into_iter().enumerate() {
            let Some(track) = item.track else {
                tracing::warn!(item = i, "skipping playlist item without a track");
                skipped += 1;
                continue;
            };
            tracks.push(map_track(i, track)?);
        }

        Ok(Self {
            playlist_name,
            tracks,
            skipped,
            next: page.next,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> PlaycardsResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| PlaycardsError::io("open Spotify page", path, e))?;
        Self::from_reader(BufReader::new(f))
    }
}

fn map_track(index: usize, t: SpotifyTrack) -> PlaycardsResult<Track> {
    let url = t.external_urls.spotify.ok_or_else(|| {
        PlaycardsError::validation(format!(
            "item {index} ('{}') has no Spotify URL",
            t.name
        ))
    })?;
    let year: String = t.album.release_date.chars().take(4).collect();
    let artists = t
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Track::new(t.name, url, year, artists).map_err(|e| match e {
        PlaycardsError::Validation(msg) => {
            PlaycardsError::validation(format!("item {index}: {msg}"))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/playlist/spotify.rs"]
mod tests;
