mod crayon_button;

pub use crayon_button::{CrayonButton, Swatch};
