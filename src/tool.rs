use egui::Pos2;

use crate::element::GLYPH_SIZE;
use crate::surface::Surface;

/// Marker widths offered by the tool panel.
pub const THIN: f32 = 2.0;
pub const THICK: f32 = 5.0;

/// Glyphs the sticker palette starts with.
pub const DEFAULT_STICKERS: [&str; 3] = ["😀", "🎉", "🌟"];

/// Longest custom sticker the palette accepts, in characters.
pub const MAX_GLYPH_LEN: usize = 16;

/// What the next canvas press will place: marker lines at one width, or
/// one sticker glyph. Exactly one tool is active at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Tool {
    Marker { thickness: f32 },
    Sticker { glyph: String },
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Marker { thickness: THIN }
    }
}

impl Tool {
    pub fn is_marker_with(&self, width: f32) -> bool {
        matches!(self, Tool::Marker { thickness } if *thickness == width)
    }

    pub fn is_sticker_with(&self, wanted: &str) -> bool {
        matches!(self, Tool::Sticker { glyph } if glyph == wanted)
    }
}

/// The sticker glyphs offered by the panel: the built-ins plus whatever
/// the user added this session.
#[derive(Clone, Debug)]
pub struct StickerPalette {
    glyphs: Vec<String>,
}

impl Default for StickerPalette {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_STICKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StickerPalette {
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Validate and add a user-supplied glyph. Input is trimmed first;
    /// empty, over-long and duplicate entries are rejected. Returns the
    /// accepted glyph so the caller can select it.
    pub fn add(&mut self, text: &str) -> Option<String> {
        let glyph = text.trim();
        if glyph.is_empty() || glyph.chars().count() > MAX_GLYPH_LEN {
            return None;
        }
        if self.glyphs.iter().any(|existing| existing == glyph) {
            return None;
        }
        self.glyphs.push(glyph.to_owned());
        Some(glyph.to_owned())
    }
}

/// Cursor-following hint of what a press would place. Rebuilt on every
/// idle pointer move and never part of the document, so it leaves no
/// trace in history.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolPreview {
    /// Outline circle matching the marker's footprint.
    Marker { pos: Pos2, thickness: f32 },
    /// The sticker glyph itself, at placement size.
    Sticker { pos: Pos2, glyph: String },
}

impl ToolPreview {
    pub fn for_tool(tool: &Tool, pos: Pos2) -> Self {
        match tool {
            Tool::Marker { thickness } => ToolPreview::Marker {
                pos,
                thickness: *thickness,
            },
            Tool::Sticker { glyph } => ToolPreview::Sticker {
                pos,
                glyph: glyph.clone(),
            },
        }
    }

    /// Drawn after a full document pass, so the hint sits on top.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            ToolPreview::Marker { pos, thickness } => {
                surface.outline_circle(*pos, thickness / 2.0);
            }
            ToolPreview::Sticker { pos, glyph } => {
                surface.draw_glyph(*pos, glyph, GLYPH_SIZE);
            }
        }
    }
}
