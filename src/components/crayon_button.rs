use egui::{Color32, Response, Sense, Stroke, Ui, vec2};

const SIZE: f32 = 44.0;
const ROUNDING: f32 = 12.0;
const ACTIVE_RING: Color32 = Color32::from_rgb(0x4b, 0x2b, 0x5f);

/// What a crayon-box button stands for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swatch {
    Crayon(Color32),
    Eraser,
}

/// A square crayon-box button that shows its colour instead of a label.
pub struct CrayonButton {
    pub swatch: Swatch,
    pub name: &'static str,
    pub selected: bool,
}

impl CrayonButton {
    pub fn new(swatch: Swatch, name: &'static str, selected: bool) -> Self {
        Self {
            swatch,
            name,
            selected,
        }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(vec2(SIZE, SIZE), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let rect = if response.hovered() { rect } else { rect.shrink(2.0) };

            match self.swatch {
                Swatch::Crayon(color) => {
                    painter.rect_filled(rect, ROUNDING, color);
                }
                Swatch::Eraser => {
                    painter.rect_filled(rect, ROUNDING, Color32::WHITE);
                    painter.rect_stroke(rect, ROUNDING, Stroke::new(1.5, Color32::GRAY));
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Erase",
                        egui::FontId::proportional(12.0),
                        Color32::DARK_GRAY,
                    );
                }
            }

            if self.selected {
                painter.rect_stroke(rect.expand(2.0), ROUNDING + 2.0, Stroke::new(3.0, ACTIVE_RING));
            }
        }

        response.on_hover_text(self.name)
    }
}
