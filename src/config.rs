use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::selection::PictureId;

/// Environment variable naming an optional JSON config file (native only).
pub const CONFIG_ENV_VAR: &str = "COLORING_STUDIO_CONFIG";

/// How the paint layers of inactive pictures are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerRetention {
    /// One owned raster buffer per picture; switching just moves buffers.
    #[default]
    Arena,
    /// Encode the outgoing layer to a PNG snapshot, decode it on return.
    Snapshots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintMode {
    /// Freehand brush/eraser over a raster layer
    #[default]
    Raster,
    /// Tap a region to flood it with the current colour
    Vector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)] // partial files fall back to defaults field by field
pub struct StudioConfig {
    /// Side of the square logical canvas, in logical units
    pub logical_size: u32,
    pub brush_width: f32,
    pub eraser_width: f32,
    pub retention: LayerRetention,
    pub start_mode: PaintMode,
    pub start_picture: PictureId,
    /// Vector-mode colour of regions that were never tapped, as `#rrggbb`
    pub base_fill: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            logical_size: 300,
            brush_width: 6.0,
            eraser_width: 14.0,
            retention: LayerRetention::default(),
            start_mode: PaintMode::default(),
            start_picture: PictureId::default(),
            base_fill: "#ffffff".to_owned(),
        }
    }
}

impl StudioConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], falling back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.to_string_lossy());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    pub fn base_fill_color(&self) -> Color32 {
        parse_hex_rgb(&self.base_fill).unwrap_or_else(|| {
            log::warn!("Invalid base_fill {:?}, using white", self.base_fill);
            Color32::WHITE
        })
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_rgb(text: &str) -> Option<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
