use std::fmt;
use std::path::{Path, PathBuf};

use kurbo::{Point, Rect};
use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::foundation::error::{PlaycardsError, PlaycardsResult};
use crate::generate::code::{CodeMatrix, CodePlacement, draw_code};
use crate::playlist::model::{Playlist, Track};
use crate::render::canvas::{Canvas, Frame};
use crate::render::text::{FontRole, TextEngine};

pub const FRONTS_DIR: &str = "fronts";
pub const BACKS_DIR: &str = "backs";

/// Text line printed on a card front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardField {
    Artists,
    Year,
    Name,
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Artists => "artists",
            Self::Year => "year",
            Self::Name => "name",
        })
    }
}

/// Advisory: a front text line comes within the margin of the card edge.
#[derive(Clone, Debug, PartialEq)]
pub struct OverflowWarning {
    /// Track index in playlist order.
    pub index: usize,
    pub field: CardField,
    pub value: String,
    pub width_px: f32,
}

impl fmt::Display for OverflowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "card {:05}: {} \"{}\" too long ({:.0}px)",
            self.index, self.field, self.value, self.width_px
        )
    }
}

/// `true` when a line `width_px` wide is within `margin_px` of a `canvas_px` wide card.
pub fn exceeds_fit(width_px: f32, canvas_px: u32, margin_px: u32) -> bool {
    width_px >= canvas_px.saturating_sub(margin_px) as f32
}

pub fn front_file_name(index: usize) -> String {
    format!("front_{index:05}.png")
}

pub fn back_file_name(index: usize) -> String {
    format!("back_{index:05}.png")
}

/// Card back: the track URL as a centered QR code on the background color.
pub(crate) fn render_back(track: &Track, config: &RenderConfig) -> PlaycardsResult<Frame> {
    let code = CodeMatrix::encode(track.url())?;
    let placement = CodePlacement::centered(config.canvas_px, config.code_fraction);
    let mut canvas = Canvas::new(config.canvas_px, config.canvas_px, config.background)?;
    draw_code(&mut canvas, &code, placement, config.code_dark, config.code_light);
    Ok(canvas.finish())
}

/// Card front: artists, year and title centered on 1/6, 1/2 and 5/6 of the card height.
///
/// Lines that do not fit are still drawn in full; they are reported, never clipped or shrunk.
pub(crate) fn render_front(
    index: usize,
    track: &Track,
    config: &RenderConfig,
    engine: &mut TextEngine,
) -> PlaycardsResult<(Frame, Vec<OverflowWarning>)> {
    let side = config.canvas_px;
    let mut canvas = Canvas::new(side, side, config.background)?;
    let cx = f64::from(side / 2);
    let sixth = side / 6;

    let lines = [
        (CardField::Artists, track.artists(), FontRole::Body, &config.body_font, sixth),
        (CardField::Year, track.year(), FontRole::Year, &config.year_font, side / 2),
        (CardField::Name, track.name(), FontRole::Body, &config.body_font, 5 * sixth),
    ];

    let mut warnings = Vec::new();
    for (field, value, role, font, anchor_y) in lines {
        let layout = engine.layout(value, role, font.size_px, config.foreground)?;
        canvas.draw_text_centered(&layout, Point::new(cx, f64::from(anchor_y)));

        if exceeds_fit(layout.extent.width, side, config.text_margin_px) {
            tracing::warn!(index, %field, value, width_px = layout.extent.width, "text too long for card");
            warnings.push(OverflowWarning {
                index,
                field,
                value: value.to_owned(),
                width_px: layout.extent.width,
            });
        }
    }

    if config.guides {
        let s = f64::from(side);
        for y in [sixth, side / 2, 5 * sixth] {
            let y = f64::from(y);
            canvas.fill_rect(Rect::new(0.0, y, s, y + 1.0), config.foreground);
        }
        canvas.fill_rect(Rect::new(cx, 0.0, cx + 1.0, s), config.foreground);
    }

    Ok((canvas.finish(), warnings))
}

fn render_card(
    index: usize,
    track: &Track,
    config: &RenderConfig,
    engine: &mut TextEngine,
    fronts: &Path,
    backs: &Path,
) -> PlaycardsResult<Vec<OverflowWarning>> {
    render_back(track, config)?.save_png(&backs.join(back_file_name(index)))?;
    let (front, warnings) = render_front(index, track, config, engine)?;
    front.save_png(&fronts.join(front_file_name(index)))?;
    Ok(warnings)
}

/// How card rendering is scheduled.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardThreading {
    /// Render cards on a rayon pool.
    pub parallel: bool,
    /// Worker count for the pool; `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Outcome of [`generate_cards`].
#[derive(Clone, Debug, Default)]
pub struct CardsOutput {
    pub fronts: Vec<PathBuf>,
    pub backs: Vec<PathBuf>,
    /// Overflow warnings in track order.
    pub overflow: Vec<OverflowWarning>,
}

/// Create `fronts/` and `backs/` under `out_dir` (both must be absent) and write one
/// front/back pair per track, index-aligned with playlist order.
#[tracing::instrument(skip_all, fields(playlist = playlist.name(), tracks = playlist.tracks().len()))]
pub fn generate_cards(
    playlist: &Playlist,
    config: &RenderConfig,
    out_dir: &Path,
    threading: CardThreading,
) -> PlaycardsResult<CardsOutput> {
    let (fronts, backs) = (out_dir.join(FRONTS_DIR), out_dir.join(BACKS_DIR));
    for dir in [&fronts, &backs] {
        if dir.exists() {
            return Err(PlaycardsError::collision(dir.as_path()));
        }
    }
    create_fresh_dir(&fronts)?;
    create_fresh_dir(&backs)?;
    let tracks = playlist.tracks();

    let per_card: Vec<Vec<OverflowWarning>> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        let results = pool.install(|| {
            tracks
                .par_iter()
                .enumerate()
                .map_init(
                    || TextEngine::new(config),
                    |engine, (i, track)| -> PlaycardsResult<Vec<OverflowWarning>> {
                        let engine = engine.as_mut().map_err(|e| {
                            PlaycardsError::render(format!("text engine setup failed: {e}"))
                        })?;
                        render_card(i, track, config, engine, &fronts, &backs)
                    },
                )
                .collect::<Vec<_>>()
        });
        results.into_iter().collect::<PlaycardsResult<Vec<_>>>()?
    } else {
        let mut engine = TextEngine::new(config)?;
        tracks
            .iter()
            .enumerate()
            .map(|(i, track)| render_card(i, track, config, &mut engine, &fronts, &backs))
            .collect::<PlaycardsResult<Vec<_>>>()?
    };

    let out = CardsOutput {
        fronts: (0..tracks.len()).map(|i| fronts.join(front_file_name(i))).collect(),
        backs: (0..tracks.len()).map(|i| backs.join(back_file_name(i))).collect(),
        overflow: per_card.into_iter().flatten().collect(),
    };
    tracing::debug!(cards = tracks.len(), overflow = out.overflow.len(), "cards written");
    Ok(out)
}

fn create_fresh_dir(dir: &Path) -> PlaycardsResult<()> {
    match std::fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(PlaycardsError::collision(dir))
        }
        Err(e) => Err(PlaycardsError::io("create dir", dir, e)),
    }
}

fn build_thread_pool(threads: Option<usize>) -> PlaycardsResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PlaycardsError::validation(
            "card 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PlaycardsError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/generate/cards.rs"]
mod tests;
