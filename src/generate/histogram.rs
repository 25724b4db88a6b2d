use std::path::Path;

use kurbo::{Point, Rect};

use crate::config::RenderConfig;
use crate::foundation::error::{PlaycardsError, PlaycardsResult};
use crate::playlist::model::Playlist;
use crate::render::canvas::{Canvas, Frame};
use crate::render::text::{FontRole, TextEngine};

/// Track counts per release year over a gap-free year range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearHistogram {
    min_year: i32,
    counts: Vec<u32>,
}

impl YearHistogram {
    /// Bin every track by year. Fails on an empty playlist or a malformed year.
    pub fn from_playlist(playlist: &Playlist) -> PlaycardsResult<Self> {
        let years = playlist
            .tracks()
            .iter()
            .map(|t| t.year_number())
            .collect::<PlaycardsResult<Vec<i32>>>()?;

        let (Some(&min_year), Some(&max_year)) = (years.iter().min(), years.iter().max()) else {
            return Err(PlaycardsError::precondition(format!(
                "playlist '{}' has no tracks to histogram",
                playlist.name()
            )));
        };

        let mut counts = vec![0u32; (max_year - min_year) as usize + 1];
        for year in years {
            counts[(year - min_year) as usize] += 1;
        }
        Ok(Self { min_year, counts })
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.min_year + self.counts.len() as i32 - 1
    }

    /// Count per bin, bin `i` holding year `min_year + i`.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Year label of every bin.
    pub fn labels(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.counts.len()).map(|i| self.min_year + i as i32)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Y-axis tick step and top value: at most ~5 integer ticks covering `max_count`.
pub(crate) fn count_axis(max_count: u32) -> (u32, u32) {
    let max_count = max_count.max(1);
    let step = max_count.div_ceil(5).max(1);
    (step, step * max_count.div_ceil(step))
}

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 44.0;
const TICK_LEN: f64 = 4.0;

/// Render the bar chart for `hist`, titled with the playlist name.
pub(crate) fn render_histogram(
    hist: &YearHistogram,
    title: &str,
    config: &RenderConfig,
    engine: &mut TextEngine,
) -> PlaycardsResult<Frame> {
    let style = &config.histogram;
    let mut canvas = Canvas::new(style.width, style.height, style.background)?;
    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));

    let plot = Rect::new(
        MARGIN_LEFT,
        MARGIN_TOP,
        (w - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0),
        (h - MARGIN_BOTTOM).max(MARGIN_TOP + 1.0),
    );

    let title_layout = engine.layout(title, FontRole::Body, style.title_px, style.ink)?;
    canvas.draw_text_centered(&title_layout, Point::new(w / 2.0, MARGIN_TOP / 2.0));

    let (step, top) = count_axis(hist.max_count());
    let y_of = |count: u32| plot.y1 - plot.height() * f64::from(count) / f64::from(top);

    let n = hist.counts().len();
    let slot = plot.width() / n as f64;
    for (i, &count) in hist.counts().iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x0 = plot.x0 + slot * (i as f64 + 0.1);
        let x1 = plot.x0 + slot * (i as f64 + 0.9);
        canvas.fill_rect(Rect::new(x0, y_of(count), x1, plot.y1), style.bar);
    }

    // Axes.
    canvas.fill_rect(Rect::new(plot.x0 - 1.0, plot.y0, plot.x0, plot.y1 + 1.0), style.ink);
    canvas.fill_rect(Rect::new(plot.x0 - 1.0, plot.y1, plot.x1, plot.y1 + 1.0), style.ink);

    let mut tick = 0;
    while tick <= top {
        let y = y_of(tick).round();
        canvas.fill_rect(Rect::new(plot.x0 - 1.0 - TICK_LEN, y, plot.x0 - 1.0, y + 1.0), style.ink);
        let label = engine.layout(&tick.to_string(), FontRole::Body, style.label_px, style.ink)?;
        let lw = f64::from(label.extent.width);
        canvas.draw_text_centered(
            &label,
            Point::new(plot.x0 - 1.0 - TICK_LEN * 2.0 - lw / 2.0, y),
        );
        tick += step;
    }

    let widest = engine
        .measure(&hist.max_year().to_string(), FontRole::Body, style.label_px)?
        .width;
    let stride = label_stride(slot, f64::from(widest) + 8.0);
    for (i, year) in hist.labels().enumerate() {
        let cx = plot.x0 + slot * (i as f64 + 0.5);
        canvas.fill_rect(
            Rect::new(cx.round(), plot.y1 + 1.0, cx.round() + 1.0, plot.y1 + 1.0 + TICK_LEN),
            style.ink,
        );
        if i % stride != 0 {
            continue;
        }
        let label = engine.layout(&year.to_string(), FontRole::Body, style.label_px, style.ink)?;
        let ly = plot.y1 + 1.0 + TICK_LEN * 2.0 + f64::from(label.extent.height) / 2.0;
        canvas.draw_text_centered(&label, Point::new(cx, ly));
    }

    Ok(canvas.finish())
}

/// Every how many bins an x label is drawn so labels `label_px` wide never overlap.
pub(crate) fn label_stride(slot_px: f64, label_px: f64) -> usize {
    if slot_px <= 0.0 {
        return 1;
    }
    ((label_px / slot_px).ceil() as usize).max(1)
}

/// Bin the playlist by year and write the chart to `path`.
///
/// Nothing is written when the playlist is empty or a year is malformed.
#[tracing::instrument(skip_all, fields(playlist = playlist.name(), tracks = playlist.tracks().len()))]
pub fn generate_histogram(
    playlist: &Playlist,
    config: &RenderConfig,
    path: &Path,
) -> PlaycardsResult<YearHistogram> {
    let hist = YearHistogram::from_playlist(playlist)?;
    let mut engine = TextEngine::new(config)?;
    let frame = render_histogram(&hist, playlist.name(), config, &mut engine)?;
    frame.save_png(path)?;
    tracing::debug!(
        min_year = hist.min_year(),
        max_year = hist.max_year(),
        bins = hist.counts().len(),
        "wrote {}",
        path.display()
    );
    Ok(hist)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/histogram.rs"]
mod tests;
