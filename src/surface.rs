use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

/// Ink color for every mark on the sketch.
pub const INK: Color32 = Color32::BLACK;
/// Background color the canvas is cleared to.
pub const PAPER: Color32 = Color32::WHITE;

/// Drawing commands an element can issue, independent of where the pixels
/// end up. The on-screen canvas and the raster exporter both implement
/// this, so one `draw` per element covers both paths.
///
/// All coordinates are canvas-local, origin at the top-left corner.
pub trait Surface {
    /// Reset the whole drawing area to the paper color.
    fn clear(&mut self);

    /// Draw a connected line through `points` at the given width.
    /// Callers pass at least two points; a lone point is a circle.
    fn stroke_polyline(&mut self, points: &[Pos2], thickness: f32);

    /// Draw a filled disc.
    fn fill_circle(&mut self, center: Pos2, radius: f32);

    /// Draw a thin circle outline.
    fn outline_circle(&mut self, center: Pos2, radius: f32);

    /// Draw a text glyph centered on `anchor` at `size` pixels.
    fn draw_glyph(&mut self, anchor: Pos2, glyph: &str, size: f32);
}

/// [`Surface`] backed by an egui [`Painter`], for the live canvas.
///
/// `rect` is the canvas placement in screen space; canvas-local points are
/// offset by its top-left corner before painting.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.rect.min + pos.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, PAPER);
    }

    fn stroke_polyline(&mut self, points: &[Pos2], thickness: f32) {
        let screen_points: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(egui::Shape::line(screen_points, Stroke::new(thickness, INK)));
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32) {
        self.painter.circle_filled(self.to_screen(center), radius, INK);
    }

    fn outline_circle(&mut self, center: Pos2, radius: f32) {
        self.painter
            .circle_stroke(self.to_screen(center), radius, Stroke::new(1.0, INK));
    }

    fn draw_glyph(&mut self, anchor: Pos2, glyph: &str, size: f32) {
        self.painter.text(
            self.to_screen(anchor),
            Align2::CENTER_CENTER,
            glyph,
            FontId::proportional(size),
            INK,
        );
    }
}
