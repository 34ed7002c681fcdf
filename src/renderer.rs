use egui::{Color32, Painter, Rect, Stroke};

use crate::state::SketchState;
use crate::surface::PainterSurface;

/// Draws one frame of the sketch: the committed document replayed from a
/// cleared surface, then the hover preview, then the canvas border.
#[derive(Debug)]
pub struct Renderer {
    border: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            border: Stroke::new(1.0, Color32::from_gray(160)),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, painter: &Painter, canvas_rect: Rect, state: &SketchState) {
        // Strokes can run past the canvas edge; never paint outside it.
        let clipped = painter.with_clip_rect(canvas_rect);
        let mut surface = PainterSurface::new(&clipped, canvas_rect);

        state.document().render_all(&mut surface);

        if let Some(preview) = state.preview() {
            preview.draw(&mut surface);
        }

        painter.rect_stroke(canvas_rect, 0.0, self.border);
    }
}
