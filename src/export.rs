use std::io::Cursor;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use egui::Pos2;
use image::{ImageFormat, Rgba, RgbaImage};
use log::{info, warn};
use thiserror::Error;

use crate::document::Document;
use crate::surface::Surface;

/// Default export edge length in pixels, double the native canvas.
pub const DEFAULT_EXPORT_SIZE: u32 = 1024;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Errors that can occur while producing an export image.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export target must be at least 1x1 pixels")]
    InvalidDimensions,
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
}

/// A [`Surface`] that rasterizes into an RGBA buffer.
///
/// Polylines become discs stamped densely along each segment, which gives
/// round caps and joins. Glyphs come from the supplied font outlines.
/// Every canvas-space coordinate and length is multiplied by `scale`
/// before it touches the buffer, so the same draw calls that fill the
/// on-screen canvas fill an export of any size.
pub struct RasterSurface<'a> {
    image: RgbaImage,
    scale: f32,
    fonts: &'a [FontArc],
}

impl<'a> RasterSurface<'a> {
    pub fn new(width: u32, height: u32, scale: f32, fonts: &'a [FontArc]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, PAPER),
            scale,
            fonts,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn map(&self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x * self.scale, pos.y * self.scale)
    }

    /// Blend ink over the pixel at (`x`, `y`) with the given coverage.
    /// Out-of-bounds writes are dropped.
    fn blend(&mut self, x: i64, y: i64, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        let (width, height) = self.image.dimensions();
        if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
            return;
        }
        let coverage = coverage.min(1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let dst = f32::from(pixel.0[channel]);
            let ink = f32::from(INK.0[channel]);
            pixel.0[channel] = (dst + (ink - dst) * coverage).round() as u8;
        }
    }

    /// Stamp a filled disc with a half-pixel anti-aliased rim.
    fn stamp_disc(&mut self, center: Pos2, radius: f32) {
        let radius = radius.max(0.5);
        let min_x = (center.x - radius - 1.0).floor() as i64;
        let max_x = (center.x + radius + 1.0).ceil() as i64;
        let min_y = (center.y - radius - 1.0).floor() as i64;
        let max_y = (center.y + radius + 1.0).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                self.blend(x, y, radius + 0.5 - dist);
            }
        }
    }

    /// Stamp a one-pixel circle outline.
    fn stamp_ring(&mut self, center: Pos2, radius: f32) {
        let reach = radius + 1.5;
        let min_x = (center.x - reach).floor() as i64;
        let max_x = (center.x + reach).ceil() as i64;
        let min_y = (center.y - reach).floor() as i64;
        let max_y = (center.y + reach).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                self.blend(x, y, 1.0 - (dist - radius).abs());
            }
        }
    }

    fn stamp_segment(&mut self, from: Pos2, to: Pos2, radius: f32) {
        let delta = to - from;
        let length = delta.length();
        if length < 0.1 {
            self.stamp_disc(from, radius);
            return;
        }
        // Two stamps per pixel of travel keeps the joints smooth.
        let steps = (length * 2.0).ceil() as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp_disc(from + delta * t, radius);
        }
    }

    fn draw_glyph_text(&mut self, anchor: Pos2, text: &str, size: f32) {
        let scale = PxScale::from(size * self.scale);

        // Lay the glyphs out along a baseline at y = 0, falling back
        // through the font list per character. Kerning only applies
        // between characters that resolved to the same font.
        let mut outlines = Vec::new();
        let mut bounds: Option<ab_glyph::Rect> = None;
        let mut cursor = 0.0f32;
        let mut previous: Option<(usize, ab_glyph::GlyphId)> = None;

        for ch in text.chars() {
            let Some(font_index) = self.fonts.iter().position(|f| f.glyph_id(ch).0 != 0) else {
                warn!("no loaded font covers {:?}; skipping it", ch);
                previous = None;
                continue;
            };
            let font = &self.fonts[font_index];
            let scaled = font.as_scaled(scale);
            let glyph_id = font.glyph_id(ch);

            if let Some((prev_font, prev_id)) = previous {
                if prev_font == font_index {
                    cursor += scaled.kern(prev_id, glyph_id);
                }
            }

            let glyph = glyph_id.with_scale_and_position(scale, point(cursor, 0.0));
            cursor += scaled.h_advance(glyph_id);
            previous = Some((font_index, glyph_id));

            if let Some(outline) = font.outline_glyph(glyph) {
                let glyph_bounds = outline.px_bounds();
                bounds = Some(match bounds {
                    Some(acc) => ab_glyph::Rect {
                        min: point(acc.min.x.min(glyph_bounds.min.x), acc.min.y.min(glyph_bounds.min.y)),
                        max: point(acc.max.x.max(glyph_bounds.max.x), acc.max.y.max(glyph_bounds.max.y)),
                    },
                    None => glyph_bounds,
                });
                outlines.push(outline);
            }
        }

        // Whitespace-only text has no outlines and draws nothing.
        let Some(bounds) = bounds else {
            return;
        };

        // Shift the laid-out block so its bounds center on the anchor.
        let target = self.map(anchor);
        let offset_x = target.x - (bounds.min.x + bounds.max.x) / 2.0;
        let offset_y = target.y - (bounds.min.y + bounds.max.y) / 2.0;

        for outline in outlines {
            let glyph_bounds = outline.px_bounds();
            let base_x = (glyph_bounds.min.x + offset_x).round() as i64;
            let base_y = (glyph_bounds.min.y + offset_y).round() as i64;
            outline.draw(|gx, gy, coverage| {
                self.blend(base_x + i64::from(gx), base_y + i64::from(gy), coverage);
            });
        }
    }
}

impl Surface for RasterSurface<'_> {
    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = PAPER;
        }
    }

    fn stroke_polyline(&mut self, points: &[Pos2], thickness: f32) {
        let radius = thickness * self.scale / 2.0;
        for pair in points.windows(2) {
            let from = self.map(pair[0]);
            let to = self.map(pair[1]);
            self.stamp_segment(from, to, radius);
        }
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32) {
        let center = self.map(center);
        self.stamp_disc(center, radius * self.scale);
    }

    fn outline_circle(&mut self, center: Pos2, radius: f32) {
        let center = self.map(center);
        self.stamp_ring(center, radius * self.scale);
    }

    fn draw_glyph(&mut self, anchor: Pos2, glyph: &str, size: f32) {
        self.draw_glyph_text(anchor, glyph, size);
    }
}

/// Renders the committed sketch into a raster image and encodes it as
/// PNG. Holds the fonts used for sticker glyphs.
#[derive(Default)]
pub struct Exporter {
    fonts: Vec<FontArc>,
}

impl Exporter {
    /// An exporter with no fonts loaded. Strokes export fine; sticker
    /// glyphs are skipped. Prefer [`Exporter::with_embedded_fonts`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull the emoji and text faces egui already embeds, so exports
    /// match the canvas without touching the filesystem.
    pub fn with_embedded_fonts() -> Self {
        let mut exporter = Self::new();
        let definitions = egui::FontDefinitions::default();
        for name in ["NotoEmoji-Regular", "emoji-icon-font", "Ubuntu-Light"] {
            if let Some(data) = definitions.font_data.get(name) {
                exporter.add_font_bytes(data.font.to_vec());
            }
        }
        if exporter.fonts.is_empty() {
            warn!("no embedded fonts found; stickers will be missing from exports");
        }
        exporter
    }

    /// Register a font for sticker glyphs. Fonts are tried in
    /// registration order per character. Returns false if the bytes do
    /// not parse as a font.
    pub fn add_font_bytes(&mut self, bytes: Vec<u8>) -> bool {
        match FontArc::try_from_vec(bytes) {
            Ok(font) => {
                self.fonts.push(font);
                true
            }
            Err(err) => {
                warn!("ignoring unusable font: {}", err);
                false
            }
        }
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Render the committed sketch into a `width` x `height` image.
    ///
    /// The document is scaled uniformly by `width / canvas_width`; the
    /// height is extra (or missing) paper, never a distortion.
    pub fn render(
        &self,
        document: &Document,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::InvalidDimensions);
        }
        let scale = width as f32 / document.canvas_size().x;
        let mut surface = RasterSurface::new(width, height, scale, &self.fonts);
        document.render_all(&mut surface);
        Ok(surface.into_image())
    }

    /// Render and PNG-encode. A pure read: the document is untouched.
    pub fn export_png(
        &self,
        document: &Document,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let image = self.render(document, width, height)?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        info!("exported {}x{} png, {} bytes", width, height, bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn is_ink(image: &RgbaImage, x: u32, y: u32) -> bool {
        image.get_pixel(x, y).0[0] < 128
    }

    #[test]
    fn test_disc_covers_its_center() {
        let mut surface = RasterSurface::new(64, 64, 1.0, &[]);
        surface.fill_circle(pos2(32.0, 32.0), 5.0);
        let image = surface.into_image();
        assert!(is_ink(&image, 32, 32));
        assert!(!is_ink(&image, 32, 45));
    }

    #[test]
    fn test_ring_leaves_its_center_clear() {
        let mut surface = RasterSurface::new(64, 64, 1.0, &[]);
        surface.outline_circle(pos2(32.0, 32.0), 10.5);
        let image = surface.into_image();
        assert!(!is_ink(&image, 32, 32));
        assert!(is_ink(&image, 42, 32));
    }

    #[test]
    fn test_marks_off_the_surface_are_dropped() {
        let mut surface = RasterSurface::new(32, 32, 1.0, &[]);
        surface.fill_circle(pos2(-100.0, -100.0), 5.0);
        surface.fill_circle(pos2(100.0, 100.0), 5.0);
        let image = surface.into_image();
        assert!(image.pixels().all(|p| p.0 == PAPER.0));
    }

    #[test]
    fn test_scale_applies_to_positions_and_widths() {
        let mut surface = RasterSurface::new(128, 128, 2.0, &[]);
        surface.fill_circle(pos2(30.0, 30.0), 4.0);
        let image = surface.into_image();
        // Center lands at 60,60 and the radius doubles to 8.
        assert!(is_ink(&image, 60, 60));
        assert!(is_ink(&image, 66, 60));
        assert!(!is_ink(&image, 70, 60));
    }

    #[test]
    fn test_glyph_text_without_fonts_is_skipped() {
        let mut surface = RasterSurface::new(64, 64, 1.0, &[]);
        surface.draw_glyph(pos2(32.0, 32.0), "😀", 32.0);
        let image = surface.into_image();
        assert!(image.pixels().all(|p| p.0 == PAPER.0));
    }
}
