use egui::Pos2;

use super::Element;
use crate::surface::Surface;

/// A freehand marker line: an append-only trail of pointer samples drawn
/// at a fixed width. Points are canvas-local and kept verbatim, duplicate
/// samples included.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    thickness: f32,
}

impl Stroke {
    pub(crate) fn new(origin: Pos2, thickness: f32) -> Self {
        debug_assert!(thickness > 0.0, "stroke thickness must be positive");
        Self {
            points: vec![origin],
            thickness,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl Element for Stroke {
    fn kind(&self) -> &'static str {
        "stroke"
    }

    fn drag(&mut self, pos: Pos2) {
        self.points.push(pos);
    }

    /// A single-point stroke draws as a dot of radius `thickness / 2`, so
    /// a click without movement still leaves a visible mark.
    fn draw(&self, surface: &mut dyn Surface) {
        match self.points.as_slice() {
            [] => {}
            [point] => surface.fill_circle(*point, self.thickness / 2.0),
            points => surface.stroke_polyline(points, self.thickness),
        }
    }
}
