use std::path::Path;

use kurbo::Point;

use crate::config::RenderConfig;
use crate::foundation::error::PlaycardsResult;
use crate::playlist::model::Playlist;
use crate::render::canvas::{Canvas, Frame};
use crate::render::text::{FontRole, TextEngine};

/// Row pitch (and gap between labels): one and a half body font sizes.
pub fn tile_step(font_px: f32) -> i64 {
    ((f64::from(font_px) * 1.5).round() as i64).max(1)
}

/// Top-left corners of every label in the diagonal tiling of a `canvas_px` square.
///
/// Rows are `step` apart and labels `label_px + step` apart along a row, both iterated over
/// `-canvas..2*canvas`; each row is sheared right by its own `y`, so the pattern runs diagonally.
/// The 3x span over-covers the canvas so no corner stays blank after the shear.
pub fn tile_origins(label_px: i64, step: i64, canvas_px: u32) -> Vec<(i64, i64)> {
    let c = i64::from(canvas_px);
    let step = step.max(1) as usize;
    let pitch = (label_px.max(0) as usize) + step;

    let mut out = Vec::new();
    for y in (-c..2 * c).step_by(step) {
        for x in (-c..2 * c).step_by(pitch) {
            out.push((x + y, y));
        }
    }
    out
}

/// Box art: the playlist name tiled diagonally over the background color.
pub(crate) fn render_box(
    name: &str,
    config: &RenderConfig,
    engine: &mut TextEngine,
) -> PlaycardsResult<Frame> {
    let side = config.canvas_px;
    let mut canvas = Canvas::new(side, side, config.background)?;
    let layout = engine.layout(
        name,
        FontRole::Body,
        config.body_font.size_px,
        config.foreground,
    )?;
    let label_px = f64::from(layout.extent.advance).ceil() as i64;
    let step = tile_step(config.body_font.size_px);

    let s = i64::from(side);
    let height = f64::from(layout.extent.height).ceil() as i64;
    for (x, y) in tile_origins(label_px, step, side) {
        // Labels entirely off the canvas add nothing.
        if x + label_px < 0 || x >= s || y + height < 0 || y >= s {
            continue;
        }
        canvas.draw_text(&layout, Point::new(x as f64, y as f64));
    }
    Ok(canvas.finish())
}

/// Render the box art for `playlist` and write it to `path`.
#[tracing::instrument(skip_all, fields(playlist = playlist.name()))]
pub fn generate_box(playlist: &Playlist, config: &RenderConfig, path: &Path) -> PlaycardsResult<()> {
    let mut engine = TextEngine::new(config)?;
    let frame = render_box(playlist.name(), config, &mut engine)?;
    frame.save_png(path)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/tiling.rs"]
mod tests;
