use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{FontSpec, RenderConfig};
use crate::foundation::color::Rgb8;
use crate::foundation::error::{PlaycardsError, PlaycardsResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrush {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Which configured typeface to shape with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRole {
    /// Artists, titles, box label, histogram text.
    Body,
    /// The large release year on card fronts.
    Year,
}

/// Laid-out size of a single line of text, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    /// Width of the laid-out line, excluding trailing whitespace.
    pub width: f32,
    /// Full advance width, including trailing whitespace.
    pub advance: f32,
    /// Line box height (ascent + descent + leading).
    pub height: f32,
}

/// One glyph run ready for `vello_cpu`, positioned relative to the layout's top-left corner.
pub(crate) struct GlyphRunDraw {
    pub(crate) brush: TextBrush,
    pub(crate) font_size: f32,
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
}

/// A shaped single-line text block.
pub(crate) struct TextLayout {
    pub(crate) extent: TextExtent,
    pub(crate) runs: Vec<GlyphRunDraw>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

/// One face in its own font collection, so same-family faces never shadow each other.
struct RegisteredFace {
    font_ctx: parley::FontContext,
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Stateful helper for building Parley text layouts from the configured faces.
///
/// Not `Sync`; parallel renderers create one engine per worker.
pub struct TextEngine {
    layout_ctx: parley::LayoutContext<TextBrush>,
    body: RegisteredFace,
    year: RegisteredFace,
}

impl TextEngine {
    /// Register the body and year faces of `config`.
    pub fn new(config: &RenderConfig) -> PlaycardsResult<Self> {
        let body = register_face(&config.body_font)?;
        let year = register_face(&config.year_font)?;
        Ok(Self {
            layout_ctx: parley::LayoutContext::new(),
            body,
            year,
        })
    }

    /// Family name resolved for a role (diagnostics).
    pub fn family_name(&self, role: FontRole) -> &str {
        &self.face(role).family
    }

    /// Measure `text` as one unbroken line.
    pub fn measure(
        &mut self,
        text: &str,
        role: FontRole,
        size_px: f32,
    ) -> PlaycardsResult<TextExtent> {
        Ok(self.layout(text, role, size_px, Rgb8::WHITE)?.extent)
    }

    /// Shape `text` as one unbroken line (no wrapping, no truncation).
    pub(crate) fn layout(
        &mut self,
        text: &str,
        role: FontRole,
        size_px: f32,
        color: Rgb8,
    ) -> PlaycardsResult<TextLayout> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PlaycardsError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let face = match role {
            FontRole::Body => &mut self.body,
            FontRole::Year => &mut self.year,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Borrowed(face.family.as_str())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(color)));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let extent = TextExtent {
            width: layout.width(),
            advance: layout.full_width(),
            height: layout.height(),
        };

        let mut runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                runs.push(GlyphRunDraw {
                    brush: run.style().brush,
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }

        Ok(TextLayout {
            extent,
            runs,
            font: face.font.clone(),
        })
    }

    fn face(&self, role: FontRole) -> &RegisteredFace {
        match role {
            FontRole::Body => &self.body,
            FontRole::Year => &self.year,
        }
    }
}

fn register_face(face: &FontSpec) -> PlaycardsResult<RegisteredFace> {
    let bytes: Arc<dyn AsRef<[u8]> + Send + Sync> = face.data.clone();
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::new(bytes.clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| PlaycardsError::render("no font families registered from font bytes"))?;

    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| PlaycardsError::render("registered font family has no name"))?
        .to_string();

    let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::new(bytes), 0);
    Ok(RegisteredFace {
        font_ctx,
        family,
        font,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
