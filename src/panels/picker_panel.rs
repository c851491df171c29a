use crate::ColoringApp;
use crate::config::PaintMode;
use crate::selection::PictureId;

const TITLE: &str = "Magic Coloring Studio";
const SUBTITLE: &str = "Pick a crayon, then drag your finger or mouse to paint anywhere.";
const CLEAR_HINT: &str = "Clear painting for this picture";
const CLEAR_FILLS_HINT: &str = "Clear colours for this picture";

pub fn picker_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("picker_panel").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.heading(TITLE);
        ui.label(SUBTITLE);
        ui.add_space(4.0);

        ui.horizontal_wrapped(|ui| {
            let current = app.selection().picture();
            for picture in PictureId::ALL {
                if ui.selectable_label(current == picture, picture.label()).clicked() {
                    app.select_picture(picture);
                }
            }

            ui.separator();

            for (mode, label) in [(PaintMode::Raster, "Crayons"), (PaintMode::Vector, "Tap to fill")] {
                if ui.selectable_label(app.mode() == mode, label).clicked() {
                    app.set_mode(mode);
                }
            }

            ui.separator();

            let hint = match app.mode() {
                PaintMode::Raster => CLEAR_HINT,
                PaintMode::Vector => CLEAR_FILLS_HINT,
            };
            if ui.button("Clear").on_hover_text(hint).clicked() {
                app.clear_current();
            }
        });
        ui.add_space(4.0);
    });
}
