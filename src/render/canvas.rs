use std::io::Cursor;
use std::path::Path;

use kurbo::{Point, Rect};

use crate::foundation::color::Rgb8;
use crate::foundation::error::{PlaycardsError, PlaycardsResult};
use crate::render::text::TextLayout;

/// A rendered raster as tightly packed, row-major RGBA8 bytes.
///
/// Every canvas starts from an opaque background fill, so alpha is always 255 and the bytes are
/// the same premultiplied or straight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl Frame {
    /// Color at `(x, y)`; `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Rgb8::new(px[0], px[1], px[2]))
    }

    fn to_rgb_image(&self) -> PlaycardsResult<image::RgbImage> {
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .ok_or_else(|| PlaycardsError::render("frame byte length does not match dimensions"))
    }

    /// Encode as an RGB PNG.
    pub fn encode_png(&self) -> PlaycardsResult<Vec<u8>> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(self.to_rgb_image()?)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| PlaycardsError::render(format!("encode png: {e}")))?;
        Ok(buf)
    }

    /// Write an RGB PNG to `path`.
    pub fn save_png(&self, path: &Path) -> PlaycardsResult<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|e| PlaycardsError::io("write png", path, e))
    }
}

/// Drawing surface backed by a `vello_cpu` render context.
pub(crate) struct Canvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub(crate) fn new(width: u32, height: u32, background: Rgb8) -> PlaycardsResult<Self> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(PlaycardsError::validation(format!(
                "canvas {width}x{height} exceeds 65535 px"
            )));
        };
        if w == 0 || h == 0 {
            return Err(PlaycardsError::validation("canvas must be non-empty"));
        }
        let mut canvas = Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        };
        canvas.fill_rect(
            Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
            background,
        );
        Ok(canvas)
    }

    pub(crate) fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub(crate) fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgb8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, 255,
        ));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
    }

    /// Draw `layout` with its layout box's top-left corner at `origin`.
    pub(crate) fn draw_text(&mut self, layout: &TextLayout, origin: Point) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for run in &layout.runs {
            let brush = run.brush;
            self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            self.ctx
                .glyph_run(&layout.font)
                .font_size(run.font_size)
                .fill_glyphs(run.glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
        }
    }

    /// Draw `layout` so that the center of its layout box lands on `center`.
    pub(crate) fn draw_text_centered(&mut self, layout: &TextLayout, center: Point) {
        let origin = Point::new(
            center.x - f64::from(layout.extent.width) / 2.0,
            center.y - f64::from(layout.extent.height) / 2.0,
        );
        self.draw_text(layout, origin);
    }

    /// Rasterize everything drawn so far.
    pub(crate) fn finish(mut self) -> Frame {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Frame {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
