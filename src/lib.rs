#![warn(clippy::all, rust_2018_idioms)]

//! A small sketchpad: freehand marker strokes and emoji stickers on a
//! fixed canvas, with unified undo/redo across both and PNG export.

pub mod app;
pub mod document;
pub mod element;
pub mod export;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod tool;

pub use app::SketchApp;
pub use document::Document;
pub use element::{Element, ElementType};
pub use export::{ExportError, Exporter};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use renderer::Renderer;
pub use state::SketchState;
pub use surface::Surface;
pub use tool::{StickerPalette, Tool, ToolPreview};
