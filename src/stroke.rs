use egui::{Color32, Pos2};

use crate::config::StudioConfig;
use crate::selection::{Selection, Tool};

/// How a stroke combines with what is already on the layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Paint over existing content
    SourceOver,
    /// Remove opacity where the stroke lands
    DestinationOut,
}

/// Colour, width and compositing of one tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub composite: CompositeMode,
}

impl StrokeStyle {
    pub fn brush(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            composite: CompositeMode::SourceOver,
        }
    }

    /// Erasing is always at full strength.
    pub fn eraser(width: f32) -> Self {
        Self {
            color: Color32::BLACK,
            width,
            composite: CompositeMode::DestinationOut,
        }
    }
}

/// Brush and eraser widths in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolWidths {
    pub brush: f32,
    pub eraser: f32,
}

impl Default for ToolWidths {
    fn default() -> Self {
        Self {
            brush: 6.0,
            eraser: 14.0,
        }
    }
}

impl From<&StudioConfig> for ToolWidths {
    fn from(config: &StudioConfig) -> Self {
        Self {
            brush: config.brush_width,
            eraser: config.eraser_width,
        }
    }
}

impl ToolWidths {
    /// The style the current selection paints with.
    pub fn style_for(&self, selection: &Selection) -> StrokeStyle {
        match selection.tool() {
            Tool::Brush => StrokeStyle::brush(selection.color(), self.brush),
            Tool::Eraser => StrokeStyle::eraser(self.eraser),
        }
    }
}

/// One draw call against the paint layer. `from == to` draws a dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOp {
    pub from: Pos2,
    pub to: Pos2,
    pub style: StrokeStyle,
}

impl DrawOp {
    pub fn is_dot(&self) -> bool {
        self.from == self.to
    }
}

/// Decide what to draw for `point` and record it as the new last point.
///
/// A new stroke, or a stroke with no previous point, starts with a dot so a
/// single tap is visible; otherwise the segment continues from the last point.
pub fn paint_at(
    last_point: &mut Option<Pos2>,
    point: Pos2,
    start_new_stroke: bool,
    style: StrokeStyle,
) -> DrawOp {
    let from = match *last_point {
        Some(last) if !start_new_stroke => last,
        _ => point,
    };
    *last_point = Some(point);
    DrawOp {
        from,
        to: point,
        style,
    }
}
