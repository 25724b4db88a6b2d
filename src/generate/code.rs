use kurbo::Rect;

use crate::foundation::color::Rgb8;
use crate::foundation::error::{PlaycardsError, PlaycardsResult};
use crate::render::canvas::Canvas;

/// Light modules around the symbol, as recommended for reliable scanning.
pub const QUIET_ZONE_MODULES: usize = 4;

/// A QR symbol for one URL, including its quiet zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeMatrix {
    size: usize,
    dark: Vec<bool>,
}

impl CodeMatrix {
    /// Encode `url` at error-correction level M.
    pub fn encode(url: &str) -> PlaycardsResult<Self> {
        let code = qrcode::QrCode::with_error_correction_level(url.as_bytes(), qrcode::EcLevel::M)
            .map_err(|e| PlaycardsError::render(format!("encode QR code for '{url}': {e}")))?;
        let inner = code.width();
        let size = inner + 2 * QUIET_ZONE_MODULES;
        let colors = code.to_colors();

        let mut dark = vec![false; size * size];
        for y in 0..inner {
            for x in 0..inner {
                if colors[y * inner + x] == qrcode::Color::Dark {
                    dark[(y + QUIET_ZONE_MODULES) * size + x + QUIET_ZONE_MODULES] = true;
                }
            }
        }
        Ok(Self { size, dark })
    }

    /// Modules per side, quiet zone included.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.dark[y * self.size + x]
    }
}

/// Where the code lands on a square card back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePlacement {
    /// Left and top offset in pixels.
    pub offset: u32,
    /// Side length in pixels.
    pub size: u32,
}

impl CodePlacement {
    /// Centered square of `fraction * canvas_px`, offset `canvas/2 - size/2` on both axes.
    pub fn centered(canvas_px: u32, fraction: f64) -> Self {
        let size = ((f64::from(canvas_px) * fraction).round() as u32).clamp(1, canvas_px);
        Self {
            offset: canvas_px / 2 - size / 2,
            size,
        }
    }

    /// Pixel edge of module boundary `i` along either axis, snapped to whole pixels.
    pub fn module_edge(&self, i: usize, modules: usize) -> u32 {
        let frac = (i as f64) * f64::from(self.size) / (modules as f64);
        self.offset + frac.round() as u32
    }
}

/// Paint `code` into `placement`: light square, then each dark module.
pub(crate) fn draw_code(
    canvas: &mut Canvas,
    code: &CodeMatrix,
    placement: CodePlacement,
    dark: Rgb8,
    light: Rgb8,
) {
    let o = f64::from(placement.offset);
    let s = f64::from(placement.size);
    canvas.fill_rect(Rect::new(o, o, o + s, o + s), light);

    let n = code.size();
    let edges: Vec<f64> = (0..=n)
        .map(|i| f64::from(placement.module_edge(i, n)))
        .collect();
    for y in 0..n {
        // Merge horizontal runs of dark modules into one rect.
        let mut x = 0;
        while x < n {
            if !code.is_dark(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < n && code.is_dark(x, y) {
                x += 1;
            }
            canvas.fill_rect(Rect::new(edges[start], edges[y], edges[x], edges[y + 1]), dark);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/code.rs"]
mod tests;
