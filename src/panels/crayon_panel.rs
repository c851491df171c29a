use crate::ColoringApp;
use crate::components::{CrayonButton, Swatch};
use crate::config::PaintMode;
use crate::selection::{CRAYONS, Tool};

pub fn crayon_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::SidePanel::right("crayon_panel")
        .resizable(false)
        .default_width(72.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                for crayon in &CRAYONS {
                    let selected = app.selection().is_crayon_active(crayon);
                    let button = CrayonButton::new(Swatch::Crayon(crayon.color), crayon.name, selected);
                    if button.show(ui).clicked() {
                        app.pick_crayon(crayon.color);
                    }
                }

                // Tap-to-fill has no eraser
                if app.mode() == PaintMode::Raster {
                    ui.add_space(8.0);
                    let selected = app.selection().tool() == Tool::Eraser;
                    if CrayonButton::new(Swatch::Eraser, "eraser", selected).show(ui).clicked() {
                        app.select_tool(Tool::Eraser);
                    }
                }
            });
        });
}
