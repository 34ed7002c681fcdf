use egui::{Pos2, Vec2, vec2};

use crate::element::{Element, ElementType};
use crate::surface::Surface;

/// Native edge length of the square drawing area, in logical pixels.
pub const CANVAS_SIZE: f32 = 512.0;

/// The sketch and its history.
///
/// `committed` holds every visible entity in z-order (index 0 is the
/// bottom). `undone` holds what undo removed, newest last, ready for
/// redo. Strokes and stickers share the same two stacks, so undo always
/// targets the most recent action of either kind.
///
/// Pixels are a pure function of `committed`: the only way anything gets
/// drawn is [`Document::render_all`], which replays the list from a
/// cleared surface.
#[derive(Debug)]
pub struct Document {
    committed: Vec<ElementType>,
    undone: Vec<ElementType>,
    active: bool,
    revision: u64,
    canvas_size: Vec2,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(vec2(CANVAS_SIZE, CANVAS_SIZE))
    }
}

impl Document {
    pub fn new(canvas_size: Vec2) -> Self {
        Self {
            committed: Vec::new(),
            undone: Vec::new(),
            active: false,
            revision: 0,
            canvas_size,
        }
    }

    /// Commit a new entity and mark it active for dragging.
    ///
    /// Committing happens up front, not on release: the entity is undoable
    /// and visible from the moment it exists. Starting a new action also
    /// discards the redo buffer, the undone entities are no longer
    /// reachable.
    pub fn begin(&mut self, element: ElementType) {
        self.committed.push(element);
        self.undone.clear();
        self.active = true;
        self.bump();
    }

    /// Forward a pointer position to the entity begun by the last
    /// [`Document::begin`]. No-op when nothing is active.
    pub fn extend_active(&mut self, pos: Pos2) {
        if !self.active {
            return;
        }
        if let Some(element) = self.committed.last_mut() {
            element.drag(pos);
            self.bump();
        }
    }

    /// Stop dragging the current entity. It stays committed; neither
    /// stack changes, so no notification is emitted.
    pub fn end_active(&mut self) {
        self.active = false;
    }

    /// Move the most recent entity to the redo buffer. On an empty canvas
    /// this is a no-op.
    pub fn undo(&mut self) {
        self.active = false;
        if let Some(element) = self.committed.pop() {
            self.undone.push(element);
            self.bump();
        }
    }

    /// Restore the most recently undone entity, identical to how it was
    /// removed. No-op when the redo buffer is empty.
    pub fn redo(&mut self) {
        self.active = false;
        if let Some(element) = self.undone.pop() {
            self.committed.push(element);
            self.bump();
        }
    }

    /// Drop everything, the redo buffer included.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
        self.active = false;
        self.bump();
    }

    /// Redraw the whole sketch: clear, then every committed entity in
    /// z-order.
    pub fn render_all(&self, surface: &mut dyn Surface) {
        surface.clear();
        for element in &self.committed {
            element.draw(surface);
        }
    }

    /// Committed entities in z-order, oldest first.
    pub fn elements(&self) -> &[ElementType] {
        &self.committed
    }

    /// Undone entities, oldest first; the last one is what redo restores.
    pub fn undone(&self) -> &[ElementType] {
        &self.undone
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Whether an entity is still receiving drag positions.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Change counter, bumped once per content mutation. Callers compare
    /// it against the last value they saw to learn about changes; no-ops
    /// leave it untouched.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
