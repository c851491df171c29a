use egui::{Pos2, Rect, Vec2};

/// Where the drawing surface currently sits on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// On-screen rect of the surface container, `None` until it has been laid out
    pub container: Option<Rect>,
    /// Size of the logical canvas the container displays
    pub logical_size: Vec2,
}

impl SurfaceGeometry {
    pub fn new(container: Option<Rect>, logical_size: Vec2) -> Self {
        Self {
            container,
            logical_size,
        }
    }

    pub fn to_logical(&self, screen: Pos2) -> Option<Pos2> {
        to_logical(screen, self.container, self.logical_size)
    }

    /// Whether `screen` lies over the container
    pub fn contains(&self, screen: Pos2) -> bool {
        self.container.is_some_and(|rect| rect.contains(screen))
    }
}

/// Map a screen position onto the logical canvas by linear ratio.
///
/// No clamping: positions outside the container map outside the canvas.
/// Returns `None` when there is no measurable container.
pub fn to_logical(screen: Pos2, container: Option<Rect>, logical_size: Vec2) -> Option<Pos2> {
    let rect = container?;
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x_ratio = (screen.x - rect.left()) / rect.width();
    let y_ratio = (screen.y - rect.top()) / rect.height();
    Some(Pos2::new(
        x_ratio * logical_size.x,
        y_ratio * logical_size.y,
    ))
}
