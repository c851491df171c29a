use egui::{Context, PointerButton, Pos2, Rect, TouchPhase};

pub mod mapper;
pub mod session;

pub use mapper::{SurfaceGeometry, to_logical};
pub use session::{PaintSession, SessionState};

/// What kind of device produced a pointer event.
///
/// Pens arrive from egui as touches or as the primary mouse button, so they
/// need no variant of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is over the drawing surface
    pub is_on_surface: bool,
}

/// Pointer events the canvas reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A button was pressed or a contact started
    PointerDown {
        location: InputLocation,
        button: PointerButton,
        kind: PointerKind,
    },
    /// The pointer moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
        kind: PointerKind,
    },
    /// A button was released anywhere in the window
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// The platform aborted the contact
    PointerCancel,
    /// The pointer left the canvas area or the window
    PointerLeave {
        last_known_location: InputLocation,
    },
}

impl InputEvent {
    /// Location of a pointer-down that may start painting or filling: the
    /// primary mouse button or any touch contact, landing on the surface.
    pub fn qualifying_down(&self) -> Option<InputLocation> {
        match self {
            InputEvent::PointerDown {
                location,
                button,
                kind,
            } if location.is_on_surface
                && (*kind == PointerKind::Touch || *button == PointerButton::Primary) =>
            {
                Some(*location)
            }
            _ => None,
        }
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    held_buttons: Vec<PointerButton>,
    touch_active: bool,
    /// Where a stroke may start
    surface_rect: Option<Rect>,
    /// Leaving this rect ends a stroke
    bounds_rect: Option<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the drawing surface rectangle
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface_rect = Some(rect);
    }

    /// Update the rectangle whose exit ends a stroke
    pub fn set_bounds_rect(&mut self, rect: Rect) {
        self.bounds_rect = Some(rect);
    }

    /// Creates an InputLocation from a position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_on_surface: self.surface_rect.is_some_and(|rect| rect.contains(pos)),
        }
    }

    fn in_bounds(&self, pos: Pos2) -> bool {
        self.bounds_rect.is_none_or(|rect| rect.contains(pos))
    }

    /// Process this frame's egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        ctx.input(|input| self.translate(&input.events))
    }

    /// Translate raw egui events, in order, into InputEvents
    pub fn translate(&mut self, raw: &[egui::Event]) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // egui emulates pointer events for touches; tag them all as touch.
        let touch_in_frame = raw.iter().any(|e| matches!(e, egui::Event::Touch { .. }));

        for event in raw {
            let kind = if self.touch_active || touch_in_frame {
                PointerKind::Touch
            } else {
                PointerKind::Mouse
            };

            match event {
                egui::Event::Touch { phase, .. } => match phase {
                    TouchPhase::Start => self.touch_active = true,
                    TouchPhase::Move => {}
                    TouchPhase::End => self.touch_active = false,
                    TouchPhase::Cancel => {
                        self.touch_active = false;
                        events.push(InputEvent::PointerCancel);
                    }
                },
                egui::Event::PointerMoved(pos) => {
                    if let Some(last) = self.last_pointer_pos {
                        if self.in_bounds(last) && !self.in_bounds(*pos) {
                            events.push(InputEvent::PointerLeave {
                                last_known_location: self.make_location(last),
                            });
                        }
                    }
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(*pos),
                        held_buttons: self.held_buttons.clone(),
                        kind,
                    });
                    self.last_pointer_pos = Some(*pos);
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    if *pressed {
                        if !self.held_buttons.contains(button) {
                            self.held_buttons.push(*button);
                        }
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(*pos),
                            button: *button,
                            kind,
                        });
                    } else {
                        self.held_buttons.retain(|b| b != button);
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(*pos),
                            button: *button,
                        });
                    }
                    self.last_pointer_pos = Some(*pos);
                }
                egui::Event::PointerGone => {
                    // Pointer left the window
                    if let Some(last) = self.last_pointer_pos.take() {
                        events.push(InputEvent::PointerLeave {
                            last_known_location: self.make_location(last),
                        });
                    }
                    self.held_buttons.clear();
                }
                _ => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, pos2, vec2};

    fn handler() -> InputHandler {
        let mut handler = InputHandler::new();
        handler.set_bounds_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 400.0)));
        handler.set_surface_rect(Rect::from_min_size(pos2(50.0, 50.0), vec2(300.0, 300.0)));
        handler
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_mouse_press_move_release() {
        let mut handler = handler();
        let events = handler.translate(&[
            button(pos2(100.0, 100.0), true),
            egui::Event::PointerMoved(pos2(110.0, 100.0)),
            button(pos2(110.0, 100.0), false),
        ]);

        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            InputEvent::PointerDown { location, kind: PointerKind::Mouse, .. } if location.is_on_surface
        ));
        assert!(matches!(
            &events[1],
            InputEvent::PointerMove { held_buttons, .. } if held_buttons == &[PointerButton::Primary]
        ));
        assert!(matches!(&events[2], InputEvent::PointerUp { .. }));
    }

    #[test]
    fn test_leaving_bounds_emits_leave() {
        let mut handler = handler();
        let events = handler.translate(&[
            egui::Event::PointerMoved(pos2(390.0, 200.0)),
            egui::Event::PointerMoved(pos2(420.0, 200.0)),
        ]);
        assert!(matches!(events[1], InputEvent::PointerLeave { .. }));
        assert!(matches!(events[2], InputEvent::PointerMove { .. }));
    }

    #[test]
    fn test_touch_events_are_tagged() {
        let mut handler = handler();
        let events = handler.translate(&[
            egui::Event::Touch {
                device_id: egui::TouchDeviceId(0),
                id: egui::TouchId(1),
                phase: TouchPhase::Start,
                pos: pos2(100.0, 100.0),
                force: None,
            },
            button(pos2(100.0, 100.0), true),
        ]);
        assert!(matches!(
            events[0],
            InputEvent::PointerDown { kind: PointerKind::Touch, .. }
        ));
    }

    #[test]
    fn test_touch_cancel() {
        let mut handler = handler();
        let events = handler.translate(&[egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(1),
            phase: TouchPhase::Cancel,
            pos: pos2(100.0, 100.0),
            force: None,
        }]);
        assert_eq!(events, vec![InputEvent::PointerCancel]);
    }

    #[test]
    fn test_pointer_gone() {
        let mut handler = handler();
        let events = handler.translate(&[
            egui::Event::PointerMoved(pos2(100.0, 100.0)),
            egui::Event::PointerGone,
        ]);
        assert!(matches!(events[1], InputEvent::PointerLeave { .. }));
    }
}
