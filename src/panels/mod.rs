mod canvas_panel;
mod crayon_panel;
mod picker_panel;

pub use canvas_panel::canvas_panel;
pub use crayon_panel::crayon_panel;
pub use picker_panel::picker_panel;
