#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod fill;
pub mod input;
pub mod layers;
pub mod panels;
pub mod raster;
pub mod scene;
pub mod selection;
pub mod stroke;
pub mod textures;

pub use app::ColoringApp;
pub use config::{LayerRetention, PaintMode, StudioConfig};
pub use error::{ConfigError, SceneError, SnapshotError};
pub use fill::FillModel;
pub use input::{InputEvent, InputLocation, PaintSession, PointerKind, SurfaceGeometry};
pub use layers::{PaintLayers, SnapshotCodec};
pub use raster::RasterLayer;
pub use scene::{Region, SceneCatalog};
pub use selection::{CRAYONS, PictureId, Selection, Tool};
pub use stroke::{DrawOp, StrokeStyle, ToolWidths};
