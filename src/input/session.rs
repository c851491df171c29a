use egui::{PointerButton, Pos2};

use super::{InputEvent, PointerKind, SurfaceGeometry};
use crate::stroke::{self, DrawOp, StrokeStyle};

/// Raster-mode pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A contact is down; `last_point` is the last painted logical point
    Painting { last_point: Pos2 },
}

/// Turns pointer events into paint operations.
#[derive(Debug, Default)]
pub struct PaintSession {
    state: SessionState,
    /// Button whose release ends the stroke
    stroke_button: Option<PointerButton>,
}

impl PaintSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Painting { .. })
    }

    pub fn last_point(&self) -> Option<Pos2> {
        match self.state {
            SessionState::Painting { last_point } => Some(last_point),
            SessionState::Idle => None,
        }
    }

    /// End any stroke in progress.
    pub fn end(&mut self) {
        if self.is_active() {
            log::debug!("Stroke session ended");
        }
        self.state = SessionState::Idle;
        self.stroke_button = None;
    }

    /// Feed one event; returns the draw operation it produces, if any.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        surface: &SurfaceGeometry,
        style: StrokeStyle,
    ) -> Option<DrawOp> {
        match event {
            InputEvent::PointerDown { button, .. } => {
                let location = event.qualifying_down()?;
                let point = surface.to_logical(location.position)?;
                log::debug!("Stroke session started at {:?}", point);
                self.stroke_button = Some(*button);
                Some(self.paint(point, true, style))
            }
            InputEvent::PointerMove {
                location,
                held_buttons,
                kind,
            } => {
                if !self.is_active() {
                    return None;
                }
                if *kind == PointerKind::Mouse && held_buttons.is_empty() {
                    return None;
                }
                let point = surface.to_logical(location.position)?;
                Some(self.paint(point, false, style))
            }
            InputEvent::PointerUp { button, .. } => {
                // Releasing another button mid-stroke keeps painting
                if self.stroke_button.is_none_or(|held| held == *button) {
                    self.end();
                }
                None
            }
            InputEvent::PointerCancel
            | InputEvent::PointerLeave { .. } => {
                self.end();
                None
            }
        }
    }

    fn paint(&mut self, point: Pos2, start_new_stroke: bool, style: StrokeStyle) -> DrawOp {
        let mut last = self.last_point();
        let op = stroke::paint_at(&mut last, point, start_new_stroke, style);
        self.state = SessionState::Painting { last_point: point };
        op
    }
}
