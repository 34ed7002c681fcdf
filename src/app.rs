use egui::{Key, Modifiers, PointerButton, Rect};
use log::warn;

use crate::export::{DEFAULT_EXPORT_SIZE, Exporter};
use crate::input::{InputEvent, InputHandler};
use crate::panels;
use crate::renderer::Renderer;
use crate::state::SketchState;

/// The sketchpad application: session state plus the frame loop glue
/// that feeds it input and paints it.
pub struct SketchApp {
    state: SketchState,
    renderer: Renderer,
    input: InputHandler,
    exporter: Exporter,
    sticker_draft: String,
    export_status: Option<String>,
    seen_revision: u64,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            state: SketchState::new(),
            renderer: Renderer::new(),
            input: InputHandler::new(Rect::ZERO),
            exporter: Exporter::with_embedded_fonts(),
            sticker_draft: String::new(),
            export_status: None,
            seen_revision: 0,
        }
    }

    pub fn state(&self) -> &SketchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SketchState {
        &mut self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn sticker_draft_mut(&mut self) -> &mut String {
        &mut self.sticker_draft
    }

    pub fn export_status(&self) -> Option<&str> {
        self.export_status.as_deref()
    }

    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.input.set_canvas_rect(rect);
    }

    /// Drain this frame's input and run it through the pointer state
    /// machine.
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        for event in self.input.process_input(ctx) {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown {
                location,
                button: PointerButton::Primary,
            } if location.is_in_canvas => {
                self.state.pointer_down(location.canvas_pos);
            }
            InputEvent::PointerMove { location } => {
                if location.is_in_canvas {
                    self.state.pointer_moved(location.canvas_pos);
                } else {
                    // Wandering off the widget ends the mark, the same as
                    // leaving the window.
                    self.state.pointer_left();
                }
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => {
                self.state.pointer_up();
            }
            InputEvent::PointerLeave { .. } => {
                self.state.pointer_left();
            }
            InputEvent::KeyDown { key, modifiers } => self.handle_key(key, modifiers),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        if !modifiers.command {
            return;
        }
        match key {
            Key::Z if modifiers.shift => self.state.redo(),
            Key::Z => self.state.undo(),
            Key::Y => self.state.redo(),
            _ => {}
        }
    }

    /// Move the draft text into the sticker palette. Rejected input is
    /// left in the box for another try.
    pub fn submit_custom_sticker(&mut self) {
        let text = std::mem::take(&mut self.sticker_draft);
        if !self.state.add_custom_sticker(&text) {
            self.sticker_draft = text;
        }
    }

    /// Render the committed sketch to a PNG and save it.
    pub fn export_png(&mut self) {
        let size = DEFAULT_EXPORT_SIZE;
        match self.exporter.export_png(self.state.document(), size, size) {
            Ok(bytes) => self.save_png(bytes),
            Err(err) => {
                warn!("export failed: {}", err);
                self.export_status = Some(format!("Export failed: {}", err));
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_png(&mut self, bytes: Vec<u8>) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("sketch.png")
            .save_file()
        else {
            self.export_status = Some("Export cancelled".to_owned());
            return;
        };
        match std::fs::write(&path, &bytes) {
            Ok(()) => {
                log::info!("saved export to {}", path.display());
                self.export_status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                warn!("failed to write {}: {}", path.display(), err);
                self.export_status = Some(format!("Export failed: {}", err));
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn save_png(&mut self, bytes: Vec<u8>) {
        // TODO: wire up a browser download; for now only the native build
        // can save the encoded bytes.
        warn!("discarding {} byte png export, saving is native-only", bytes.len());
        self.export_status = Some("Export is available in the native build".to_owned());
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        // Anything that changed history gets one more frame immediately,
        // instead of waiting for the next input event.
        let revision = self.state.document().revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            ctx.request_repaint();
        }
    }
}
