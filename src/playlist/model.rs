use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{PlaycardsError, PlaycardsResult};

/// One playlist entry as printed on a card.
///
/// Fields are validated on construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrackDef")]
pub struct Track {
    name: String,
    url: String,
    year: String,
    artists: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackDef {
    name: String,
    url: String,
    year: String,
    artists: String,
}

impl TryFrom<TrackDef> for Track {
    type Error = PlaycardsError;

    fn try_from(def: TrackDef) -> Result<Self, Self::Error> {
        Self::new(def.name, def.url, def.year, def.artists)
    }
}

impl Track {
    /// Build a track, checking that `year` is four ASCII digits and `artists` is non-empty.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        year: impl Into<String>,
        artists: impl Into<String>,
    ) -> PlaycardsResult<Self> {
        let track = Self {
            name: name.into(),
            url: url.into(),
            year: year.into(),
            artists: artists.into(),
        };
        validate_year(&track.year)?;
        if track.artists.trim().is_empty() {
            return Err(PlaycardsError::validation(format!(
                "track '{}' has no artists",
                track.name
            )));
        }
        if track.url.trim().is_empty() {
            return Err(PlaycardsError::validation(format!(
                "track '{}' has an empty url",
                track.name
            )));
        }
        Ok(track)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn artists(&self) -> &str {
        &self.artists
    }

    /// Release year as an integer.
    pub fn year_number(&self) -> PlaycardsResult<i32> {
        validate_year(&self.year).map_err(|_| {
            PlaycardsError::precondition(format!(
                "track '{}' has malformed year '{}'",
                self.name, self.year
            ))
        })?;
        self.year.parse::<i32>().map_err(|e| {
            PlaycardsError::precondition(format!(
                "track '{}' has malformed year '{}': {e}",
                self.name, self.year
            ))
        })
    }
}

fn validate_year(year: &str) -> PlaycardsResult<()> {
    if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PlaycardsError::validation(format!(
            "year must be four digits, got '{year}'"
        )))
    }
}

/// A named, ordered list of tracks; the shared input of every generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Playlist {
    name: String,
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tracks in playlist order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Parse a playlist record from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> PlaycardsResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PlaycardsError::validation(format!("parse playlist JSON: {e}")))
    }

    /// Parse a playlist record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PlaycardsResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| PlaycardsError::io("open playlist", path, e))?;
        Self::from_reader(BufReader::new(f)).map_err(|e| match e {
            PlaycardsError::Validation(msg) => {
                PlaycardsError::validation(format!("{msg} (in '{}')", path.display()))
            }
            other => other,
        })
    }

    /// Write the record as two-space indented JSON.
    pub fn to_writer<W: std::io::Write>(&self, w: W) -> PlaycardsResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| PlaycardsError::render(format!("serialize playlist JSON: {e}")))
    }

    /// Write the record to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> PlaycardsResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlaycardsError::io("create playlist dir", parent, e))?;
        }
        let f = File::create(path).map_err(|e| PlaycardsError::io("create playlist", path, e))?;
        let mut w = BufWriter::new(f);
        self.to_writer(&mut w)?;
        w.write_all(b"\n")
            .and_then(|()| w.flush())
            .map_err(|e| PlaycardsError::io("write playlist", path, e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playlist/model.rs"]
mod tests;
