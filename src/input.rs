use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// Where an input event landed, in both screen and canvas terms.
#[derive(Debug, Clone, Copy)]
pub struct InputLocation {
    /// Position in screen coordinates.
    pub position: Pos2,
    /// The same position relative to the canvas origin.
    pub canvas_pos: Pos2,
    /// Whether the position is within the canvas bounds.
    pub is_in_canvas: bool,
}

/// Input events in the sketch's own vocabulary, independent of the raw
/// egui event stream they were distilled from.
#[derive(Debug, Clone)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    PointerMove {
        location: InputLocation,
    },
    /// The pointer stopped hovering the window entirely.
    PointerLeave {
        last_known_location: InputLocation,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

/// Turns egui's per-frame input snapshot into [`InputEvent`]s.
///
/// Owns the current canvas rectangle so every location it hands out
/// already carries canvas coordinates and containment.
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// The canvas moves when panels resize; keep the mapping current.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            canvas_pos: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Drain this frame's input into an ordered event list.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Keystrokes belong to the focused text widget when there is one;
        // they only become domain events while nothing claims the keyboard.
        let keyboard_claimed = ctx.wants_keyboard_input();

        ctx.input(|input| {
            // Hover tracking first, so a move lands before the press that
            // follows it within the same frame.
            if let Some(pos) = input.pointer.hover_pos() {
                if self.last_pointer_pos != Some(pos) {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }
                self.last_pointer_pos = Some(pos);
            } else if let Some(last) = self.last_pointer_pos.take() {
                events.push(InputEvent::PointerLeave {
                    last_known_location: self.make_location(last),
                });
            }

            for button in [
                PointerButton::Primary,
                PointerButton::Secondary,
                PointerButton::Middle,
            ] {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = input.pointer.hover_pos() {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
                if input.pointer.button_released(button) {
                    if let Some(pos) = input.pointer.hover_pos() {
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
            }

            if !keyboard_claimed {
                for event in &input.raw.events {
                    if let egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } = event
                    {
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(pos2(100.0, 50.0), vec2(512.0, 512.0)))
    }

    #[test]
    fn test_locations_carry_canvas_coordinates() {
        let handler = handler();
        let inside = handler.make_location(pos2(110.0, 70.0));
        assert!(inside.is_in_canvas);
        assert_eq!(inside.canvas_pos, pos2(10.0, 20.0));

        let outside = handler.make_location(pos2(10.0, 10.0));
        assert!(!outside.is_in_canvas);
    }

    #[test]
    fn test_canvas_rect_can_be_updated() {
        let mut handler = handler();
        handler.set_canvas_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(512.0, 512.0)));
        assert!(handler.make_location(pos2(5.0, 5.0)).is_in_canvas);
        assert_eq!(
            handler.make_location(pos2(5.0, 5.0)).canvas_pos,
            pos2(5.0, 5.0)
        );
    }

    #[test]
    fn test_keys_are_dropped_while_a_text_field_has_focus() {
        let mut handler = handler();
        let ctx = Context::default();
        let undo_press = egui::Event::Key {
            key: Key::Z,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::COMMAND,
        };

        // Nothing focused: the press surfaces as a domain event.
        let raw = egui::RawInput {
            events: vec![undo_press.clone()],
            ..Default::default()
        };
        let mut seen = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            seen = handler.process_input(ctx);
        });
        assert!(
            seen.iter()
                .any(|event| matches!(event, InputEvent::KeyDown { key: Key::Z, .. }))
        );

        // Focus a text field and send the same press: it belongs to the
        // field now, so no domain event may fire.
        let raw = egui::RawInput {
            events: vec![undo_press],
            ..Default::default()
        };
        let mut draft = String::new();
        let mut seen = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut draft);
                response.request_focus();
            });
            seen = handler.process_input(ctx);
        });
        assert!(
            seen.iter()
                .all(|event| !matches!(event, InputEvent::KeyDown { .. }))
        );
    }
}
