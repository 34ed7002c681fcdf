use egui::Pos2;

use crate::surface::Surface;

mod sticker;
mod stroke;

pub use sticker::{GLYPH_SIZE, Sticker};
pub use stroke::Stroke;

/// Common behavior every entity on the canvas implements.
pub trait Element {
    /// Short name for logs.
    fn kind(&self) -> &'static str;

    /// React to the pointer moving while this entity is being placed.
    /// Strokes grow by one point; stickers move to the new position.
    fn drag(&mut self, pos: Pos2);

    /// Issue the draw commands for this entity alone. Implementations
    /// never clear or touch anything outside their own marks.
    fn draw(&self, surface: &mut dyn Surface);
}

/// The closed set of entity kinds a sketch can hold.
///
/// Dispatch is a plain match per trait method. Adding a kind means adding
/// a variant here and letting the compiler point at every match to update.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementType {
    Stroke(Stroke),
    Sticker(Sticker),
}

impl Element for ElementType {
    fn kind(&self) -> &'static str {
        match self {
            ElementType::Stroke(stroke) => stroke.kind(),
            ElementType::Sticker(sticker) => sticker.kind(),
        }
    }

    fn drag(&mut self, pos: Pos2) {
        match self {
            ElementType::Stroke(stroke) => stroke.drag(pos),
            ElementType::Sticker(sticker) => sticker.drag(pos),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            ElementType::Stroke(stroke) => stroke.draw(surface),
            ElementType::Sticker(sticker) => sticker.draw(surface),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;

    /// Start a freehand stroke at `origin` with the given line width.
    pub fn create_stroke(origin: Pos2, thickness: f32) -> ElementType {
        ElementType::Stroke(Stroke::new(origin, thickness))
    }

    /// Place a sticker glyph anchored at `origin`.
    pub fn create_sticker(origin: Pos2, glyph: impl Into<String>) -> ElementType {
        ElementType::Sticker(Sticker::new(origin, glyph.into()))
    }
}
