use egui::Pos2;
use log::{debug, info, warn};

use crate::document::Document;
use crate::element::{Element, factory};
use crate::tool::{StickerPalette, Tool, ToolPreview};

/// What the pointer is doing to the canvas right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Drawing,
}

/// Everything a sketch session mutates: the document, the selected tool,
/// the sticker palette and the transient preview, plus the idle/drawing
/// phase that routes pointer events.
///
/// The phase lives here rather than in [`Document`] so the history core
/// stays a pure model: it only ever sees `begin`, `extend_active` and
/// `end_active` calls in a valid order.
#[derive(Debug, Default)]
pub struct SketchState {
    document: Document,
    tool: Tool,
    palette: StickerPalette,
    preview: Option<ToolPreview>,
    phase: Phase,
}

impl SketchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn palette(&self) -> &StickerPalette {
        &self.palette
    }

    pub fn preview(&self) -> Option<&ToolPreview> {
        self.preview.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.phase == Phase::Drawing
    }

    /// Press inside the canvas: commit a fresh entity for the active tool
    /// and start feeding it drag positions.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.phase == Phase::Drawing {
            // A second press without a release in between. Keep extending
            // the current entity instead of opening another one.
            self.document.extend_active(pos);
            return;
        }
        self.preview = None;
        let element = match &self.tool {
            Tool::Marker { thickness } => factory::create_stroke(pos, *thickness),
            Tool::Sticker { glyph } => factory::create_sticker(pos, glyph.clone()),
        };
        debug!("placing {} at {:?}", element.kind(), pos);
        self.document.begin(element);
        self.phase = Phase::Drawing;
    }

    /// Move inside the canvas: extend the active entity while drawing,
    /// otherwise refresh the hover preview.
    pub fn pointer_moved(&mut self, pos: Pos2) {
        match self.phase {
            Phase::Drawing => self.document.extend_active(pos),
            Phase::Idle => self.preview = Some(ToolPreview::for_tool(&self.tool, pos)),
        }
    }

    /// Release: the entity keeps its committed place, dragging stops.
    pub fn pointer_up(&mut self) {
        self.document.end_active();
        self.phase = Phase::Idle;
    }

    /// The pointer left the canvas. Ends the active entity exactly like a
    /// release (this is not an undo) and hides the preview.
    pub fn pointer_left(&mut self) {
        self.document.end_active();
        self.phase = Phase::Idle;
        self.preview = None;
    }

    pub fn select_marker(&mut self, thickness: f32) {
        info!("tool selected: marker {}px", thickness);
        self.tool = Tool::Marker { thickness };
        self.preview = None;
    }

    pub fn select_sticker(&mut self, glyph: &str) {
        info!("tool selected: sticker {}", glyph);
        self.tool = Tool::Sticker {
            glyph: glyph.to_owned(),
        };
        self.preview = None;
    }

    /// Add a custom sticker to the palette and select it. Returns false
    /// if the palette rejected the input.
    pub fn add_custom_sticker(&mut self, text: &str) -> bool {
        match self.palette.add(text) {
            Some(glyph) => {
                self.select_sticker(&glyph);
                true
            }
            None => {
                warn!("palette rejected custom sticker {:?}", text);
                false
            }
        }
    }

    // Structural edits force the phase back to idle first, so a drag that
    // is somehow still in flight cannot keep writing into a stack the
    // edit just rearranged.

    pub fn undo(&mut self) {
        self.phase = Phase::Idle;
        self.document.undo();
    }

    pub fn redo(&mut self) {
        self.phase = Phase::Idle;
        self.document.redo();
    }

    pub fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.document.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::tool::{THICK, THIN};
    use egui::pos2;

    #[test]
    fn test_press_starts_drawing_and_release_stops() {
        let mut state = SketchState::new();
        assert!(!state.is_drawing());

        state.pointer_down(pos2(10.0, 10.0));
        assert!(state.is_drawing());
        assert_eq!(state.document().elements().len(), 1);

        state.pointer_up();
        assert!(!state.is_drawing());
        assert_eq!(state.document().elements().len(), 1);
    }

    #[test]
    fn test_moves_while_drawing_extend_the_stroke() {
        let mut state = SketchState::new();
        state.select_marker(THICK);
        state.pointer_down(pos2(0.0, 0.0));
        state.pointer_moved(pos2(5.0, 0.0));
        state.pointer_moved(pos2(5.0, 5.0));
        state.pointer_up();

        match &state.document().elements()[0] {
            ElementType::Stroke(stroke) => {
                assert_eq!(stroke.points().len(), 3);
                assert_eq!(stroke.thickness(), THICK);
            }
            other => panic!("expected a stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_moves_after_release_do_not_extend() {
        let mut state = SketchState::new();
        state.pointer_down(pos2(0.0, 0.0));
        state.pointer_up();
        state.pointer_moved(pos2(50.0, 50.0));

        match &state.document().elements()[0] {
            ElementType::Stroke(stroke) => assert_eq!(stroke.points().len(), 1),
            other => panic!("expected a stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_idle_moves_refresh_the_preview() {
        let mut state = SketchState::new();
        state.select_marker(THIN);
        assert!(state.preview().is_none());

        state.pointer_moved(pos2(30.0, 40.0));
        assert_eq!(
            state.preview(),
            Some(&ToolPreview::Marker {
                pos: pos2(30.0, 40.0),
                thickness: THIN
            })
        );

        // Press hides it; it stays hidden for the whole drag.
        state.pointer_down(pos2(30.0, 40.0));
        assert!(state.preview().is_none());
        state.pointer_moved(pos2(35.0, 45.0));
        assert!(state.preview().is_none());
    }

    #[test]
    fn test_leaving_the_canvas_ends_the_stroke_without_undoing_it() {
        let mut state = SketchState::new();
        state.pointer_down(pos2(1.0, 1.0));
        state.pointer_moved(pos2(2.0, 2.0));
        state.pointer_left();

        assert!(!state.is_drawing());
        assert_eq!(state.document().elements().len(), 1);
        assert!(state.preview().is_none());

        // Coming back in and moving must not extend the finished stroke.
        state.pointer_moved(pos2(9.0, 9.0));
        match &state.document().elements()[0] {
            ElementType::Stroke(stroke) => assert_eq!(stroke.points().len(), 2),
            other => panic!("expected a stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_sticker_tool_places_and_drags_a_sticker() {
        let mut state = SketchState::new();
        state.select_sticker("🎉");
        state.pointer_down(pos2(10.0, 10.0));
        state.pointer_moved(pos2(60.0, 80.0));
        state.pointer_up();

        match &state.document().elements()[0] {
            ElementType::Sticker(sticker) => {
                assert_eq!(sticker.glyph(), "🎉");
                assert_eq!(sticker.anchor(), pos2(60.0, 80.0));
            }
            other => panic!("expected a sticker, got {:?}", other),
        }
    }

    #[test]
    fn test_switching_tools_clears_the_preview() {
        let mut state = SketchState::new();
        state.pointer_moved(pos2(5.0, 5.0));
        assert!(state.preview().is_some());

        state.select_sticker("😀");
        assert!(state.preview().is_none());

        // The next idle move previews the new tool.
        state.pointer_moved(pos2(6.0, 6.0));
        assert_eq!(
            state.preview(),
            Some(&ToolPreview::Sticker {
                pos: pos2(6.0, 6.0),
                glyph: "😀".to_owned()
            })
        );
    }

    #[test]
    fn test_adding_a_custom_sticker_selects_it() {
        let mut state = SketchState::new();
        assert!(state.add_custom_sticker(" ok "));
        assert!(state.tool().is_sticker_with("ok"));
        assert_eq!(state.palette().glyphs().len(), 4);

        assert!(!state.add_custom_sticker("   "));
        assert_eq!(state.palette().glyphs().len(), 4);
    }

    #[test]
    fn test_undo_during_a_drag_stops_the_drag() {
        let mut state = SketchState::new();
        state.pointer_down(pos2(0.0, 0.0));
        state.undo();

        assert!(!state.is_drawing());
        assert!(state.document().elements().is_empty());

        // Stray move events after the undo must not resurrect anything.
        state.pointer_moved(pos2(1.0, 1.0));
        assert!(state.document().elements().is_empty());
        assert_eq!(state.document().undone().len(), 1);
    }
}
