use egui::Pos2;

use super::Element;
use crate::surface::Surface;

/// Font size every sticker glyph is drawn at, in canvas pixels.
pub const GLYPH_SIZE: f32 = 32.0;

/// A glyph pinned to a single anchor point. The glyph itself is immutable
/// once placed; dragging only repositions the anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Sticker {
    anchor: Pos2,
    glyph: String,
}

impl Sticker {
    pub(crate) fn new(anchor: Pos2, glyph: String) -> Self {
        debug_assert!(!glyph.is_empty(), "sticker glyph must be non-empty");
        Self { anchor, glyph }
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }
}

impl Element for Sticker {
    fn kind(&self) -> &'static str {
        "sticker"
    }

    // The previous anchor is forgotten; only the final position matters.
    fn drag(&mut self, pos: Pos2) {
        self.anchor = pos;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_glyph(self.anchor, &self.glyph, GLYPH_SIZE);
    }
}
