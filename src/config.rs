//! Rendering constants, passed explicitly to every generator.
//!
//! [`RenderConfigDef`] is the JSON-facing form; [`RenderConfig`] is the validated runtime value
//! holding loaded font bytes.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgb8;
use crate::foundation::error::{PlaycardsError, PlaycardsResult};

/// A typeface (raw TTF/OTF bytes) at a given pixel size.
#[derive(Clone)]
pub struct FontSpec {
    /// Font file bytes.
    pub data: Arc<Vec<u8>>,
    /// Em size in pixels.
    pub size_px: f32,
}

impl std::fmt::Debug for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSpec")
            .field("bytes", &self.data.len())
            .field("size_px", &self.size_px)
            .finish()
    }
}

/// Palette and sizes of the year histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramStyle {
    pub width: u32,
    pub height: u32,
    pub background: Rgb8,
    pub bar: Rgb8,
    pub ink: Rgb8,
    pub title_px: f32,
    pub label_px: f32,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            background: Rgb8::WHITE,
            bar: Rgb8::new(0x1f, 0x77, 0xb4),
            ink: Rgb8::BLACK,
            title_px: 18.0,
            label_px: 12.0,
        }
    }
}

/// JSON form of [`RenderConfig`]. Every field except the font source has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfigDef {
    pub canvas_px: u32,
    pub background: Rgb8,
    pub foreground: Rgb8,
    pub font_source: Option<PathBuf>,
    pub year_font_source: Option<PathBuf>,
    pub body_font_px: f32,
    pub year_font_px: f32,
    pub code_fraction: f64,
    pub code_dark: Rgb8,
    pub code_light: Rgb8,
    pub text_margin_px: u32,
    pub guides: bool,
    pub histogram: HistogramStyle,
}

impl Default for RenderConfigDef {
    fn default() -> Self {
        Self {
            canvas_px: 1000,
            background: Rgb8::new(0xe8, 0x18, 0x28),
            foreground: Rgb8::WHITE,
            font_source: None,
            year_font_source: None,
            body_font_px: 32.0,
            year_font_px: 112.0,
            code_fraction: 0.7,
            code_dark: Rgb8::BLACK,
            code_light: Rgb8::WHITE,
            text_margin_px: 100,
            guides: false,
            histogram: HistogramStyle::default(),
        }
    }
}

impl RenderConfigDef {
    pub fn from_reader<R: std::io::Read>(r: R) -> PlaycardsResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PlaycardsError::validation(format!("parse render config JSON: {e}")))
    }

    /// Parse a config file; relative font paths are resolved against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> PlaycardsResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| PlaycardsError::io("open render config", path, e))?;
        let mut def = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        def.font_source = def.font_source.map(|p| base.join(p));
        def.year_font_source = def.year_font_source.map(|p| base.join(p));
        Ok(def)
    }
}

/// Validated, immutable rendering constants.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub canvas_px: u32,
    pub background: Rgb8,
    pub foreground: Rgb8,
    pub body_font: FontSpec,
    pub year_font: FontSpec,
    pub code_fraction: f64,
    pub code_dark: Rgb8,
    pub code_light: Rgb8,
    pub text_margin_px: u32,
    pub guides: bool,
    pub histogram: HistogramStyle,
}

impl RenderConfig {
    /// Default constants around the given font bytes (used for both faces).
    pub fn with_font(font_bytes: Vec<u8>) -> PlaycardsResult<Self> {
        let data = Arc::new(font_bytes);
        Self::build(RenderConfigDef::default(), data.clone(), data)
    }

    /// Load font files named by `def` and validate every field.
    pub fn from_def(def: RenderConfigDef) -> PlaycardsResult<Self> {
        let body_path = def.font_source.clone().ok_or_else(|| {
            PlaycardsError::validation("render config needs a font_source (or --font)")
        })?;
        let body = Arc::new(read_font(&body_path)?);
        let year = match &def.year_font_source {
            Some(p) => Arc::new(read_font(p)?),
            None => body.clone(),
        };
        Self::build(def, body, year)
    }

    fn build(def: RenderConfigDef, body: Arc<Vec<u8>>, year: Arc<Vec<u8>>) -> PlaycardsResult<Self> {
        if def.canvas_px == 0 || def.canvas_px > u32::from(u16::MAX) {
            return Err(PlaycardsError::validation(
                "canvas_px must be in 1..=65535",
            ));
        }
        for (what, px) in [
            ("body_font_px", def.body_font_px),
            ("year_font_px", def.year_font_px),
            ("histogram.title_px", def.histogram.title_px),
            ("histogram.label_px", def.histogram.label_px),
        ] {
            if !px.is_finite() || px <= 0.0 {
                return Err(PlaycardsError::validation(format!(
                    "{what} must be finite and > 0"
                )));
            }
        }
        if !(def.code_fraction > 0.0 && def.code_fraction <= 1.0) {
            return Err(PlaycardsError::validation(
                "code_fraction must be in (0, 1]",
            ));
        }
        if def.text_margin_px >= def.canvas_px {
            return Err(PlaycardsError::validation(
                "text_margin_px must be smaller than canvas_px",
            ));
        }
        let h = &def.histogram;
        if h.width == 0 || h.height == 0 || h.width > u32::from(u16::MAX) || h.height > u32::from(u16::MAX)
        {
            return Err(PlaycardsError::validation(
                "histogram width/height must be in 1..=65535",
            ));
        }
        if body.is_empty() || year.is_empty() {
            return Err(PlaycardsError::validation("font bytes must be non-empty"));
        }

        Ok(Self {
            canvas_px: def.canvas_px,
            background: def.background,
            foreground: def.foreground,
            body_font: FontSpec {
                data: body,
                size_px: def.body_font_px,
            },
            year_font: FontSpec {
                data: year,
                size_px: def.year_font_px,
            },
            code_fraction: def.code_fraction,
            code_dark: def.code_dark,
            code_light: def.code_light,
            text_margin_px: def.text_margin_px,
            guides: def.guides,
            histogram: def.histogram,
        })
    }

    /// Widest text that still fits on a card without an overflow warning.
    pub fn text_fit_limit_px(&self) -> f32 {
        self.canvas_px.saturating_sub(self.text_margin_px) as f32
    }
}

fn read_font(path: &Path) -> PlaycardsResult<Vec<u8>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != "ttf" && ext != "otf" && ext != "ttc" {
        return Err(PlaycardsError::validation(format!(
            "font '{}' must be a .ttf, .otf or .ttc file",
            path.display()
        )));
    }
    std::fs::read(path).map_err(|e| PlaycardsError::io("read font", path, e))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
