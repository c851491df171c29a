use egui::{Color32, CursorIcon, Rect, Sense, pos2, vec2};

use crate::ColoringApp;
use crate::config::PaintMode;

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

pub fn canvas_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Largest centred square; leaving the panel ends a stroke
        let bounds = ui.available_rect_before_wrap();
        let side = bounds.width().min(bounds.height()).max(0.0);
        let surface = Rect::from_center_size(bounds.center(), vec2(side, side));

        app.set_canvas_rects(bounds, surface);
        app.handle_input(ctx);

        let response = ui.allocate_rect(surface, Sense::click_and_drag());
        let painter = ui.painter_at(surface);

        if let Some(scene) = app.scene_texture(ctx) {
            painter.image(scene, surface, FULL_UV, Color32::WHITE);
        }
        if app.mode() == PaintMode::Raster {
            painter.image(app.paint_texture(ctx), surface, FULL_UV, Color32::WHITE);
        }

        if response.hovered() {
            let icon = match app.mode() {
                PaintMode::Raster => CursorIcon::Crosshair,
                PaintMode::Vector => CursorIcon::PointingHand,
            };
            ctx.set_cursor_icon(icon);
        }
    });
}
