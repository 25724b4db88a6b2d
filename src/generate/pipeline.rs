use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::foundation::error::{PlaycardsError, PlaycardsResult};
use crate::generate::cards::{
    BACKS_DIR, CardThreading, FRONTS_DIR, OverflowWarning, generate_cards,
};
use crate::generate::histogram::{YearHistogram, generate_histogram};
use crate::generate::tiling::generate_box;
use crate::playlist::model::Playlist;

pub const HISTOGRAM_FILE: &str = "hist.png";
pub const BOX_FILE: &str = "box.png";

/// Directory the pipeline writes into.
#[derive(Clone, Debug)]
pub struct OutputTarget {
    root: PathBuf,
}

impl OutputTarget {
    /// Prepare `root` for a fresh run.
    ///
    /// With `overwrite`, an existing `root` is removed recursively first, whatever it contains
    /// (passing `.` or a home directory deletes it). Without it, `root` is created if missing and
    /// any existing pipeline output inside it is a collision.
    pub fn open(root: impl Into<PathBuf>, overwrite: bool) -> PlaycardsResult<Self> {
        let root = root.into();
        if overwrite {
            match std::fs::remove_dir_all(&root) {
                Ok(()) => tracing::info!("removed previous output '{}'", root.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(PlaycardsError::io("remove output dir", &root, e)),
            }
        } else {
            for name in [FRONTS_DIR, BACKS_DIR, HISTOGRAM_FILE, BOX_FILE] {
                let p = root.join(name);
                if p.exists() {
                    return Err(PlaycardsError::collision(p));
                }
            }
        }
        std::fs::create_dir_all(&root)
            .map_err(|e| PlaycardsError::io("create output dir", &root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn histogram_path(&self) -> PathBuf {
        self.root.join(HISTOGRAM_FILE)
    }

    pub fn box_path(&self) -> PathBuf {
        self.root.join(BOX_FILE)
    }
}

/// Options for [`generate`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateOpts {
    /// Replace an existing output directory instead of failing on collision.
    pub overwrite: bool,
    /// Render cards on a rayon pool.
    pub parallel: bool,
    /// Worker count for parallel card rendering.
    pub threads: Option<usize>,
}

/// What a [`generate`] run produced.
#[derive(Clone, Debug)]
pub struct GenerateReport {
    pub histogram: YearHistogram,
    pub files: Vec<PathBuf>,
    /// Advisory text-fit warnings, in track order.
    pub overflow: Vec<OverflowWarning>,
}

/// Run the histogram, card and box generators into `out_dir`.
///
/// Validation happens before anything is written. A failure afterwards aborts the run and
/// leaves whatever was already written in place.
#[tracing::instrument(skip_all, fields(playlist = playlist.name(), out = %out_dir.display()))]
pub fn generate(
    playlist: &Playlist,
    config: &RenderConfig,
    out_dir: &Path,
    opts: GenerateOpts,
) -> PlaycardsResult<GenerateReport> {
    YearHistogram::from_playlist(playlist)?;
    let target = OutputTarget::open(out_dir, opts.overwrite)?;

    tracing::info!("generating histogram");
    let histogram = generate_histogram(playlist, config, &target.histogram_path())?;

    tracing::info!("generating cards");
    let cards = generate_cards(
        playlist,
        config,
        target.root(),
        CardThreading {
            parallel: opts.parallel,
            threads: opts.threads,
        },
    )?;

    tracing::info!("generating box");
    generate_box(playlist, config, &target.box_path())?;

    let mut files = vec![target.histogram_path()];
    files.extend(cards.fronts);
    files.extend(cards.backs);
    files.push(target.box_path());

    if !cards.overflow.is_empty() {
        tracing::warn!(
            count = cards.overflow.len(),
            "some card text is close to the card edge"
        );
    }

    Ok(GenerateReport {
        histogram,
        files,
        overflow: cards.overflow,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/generate/pipeline.rs"]
mod tests;
