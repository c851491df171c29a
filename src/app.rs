use egui::{Color32, Pos2, Rect, vec2};

use crate::config::{PaintMode, StudioConfig};
use crate::fill::FillModel;
use crate::input::{InputEvent, InputHandler, PaintSession, SurfaceGeometry};
use crate::layers::PaintLayers;
use crate::panels::{canvas_panel, crayon_panel, picker_panel};
use crate::scene::{Region, RenderOptions, SceneCatalog, SceneKey, rasterize_scene, to_color_image};
use crate::selection::{PictureId, Selection, Tool};
use crate::stroke::ToolWidths;
use crate::textures::TextureSlot;

/// Scene artwork is rendered at this many pixels per logical unit
const SCENE_SCALE: f32 = 2.0;

/// Top-level controller. Owns every piece of application state and hands
/// out references to the panels.
pub struct ColoringApp {
    config: StudioConfig,
    selection: Selection,
    mode: PaintMode,
    widths: ToolWidths,
    layers: PaintLayers,
    fills: FillModel,
    catalog: SceneCatalog,
    session: PaintSession,
    input: InputHandler,
    geometry: SurfaceGeometry,
    scene_texture: TextureSlot<SceneKey>,
    paint_texture: TextureSlot<u64>,
}

impl std::fmt::Debug for ColoringApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColoringApp")
            .field("selection", &self.selection)
            .field("mode", &self.mode)
            .field("layers", &self.layers)
            .field("session", &self.session.state())
            .finish_non_exhaustive()
    }
}

impl ColoringApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: StudioConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_config(config)
    }

    /// Builds the app state without a window, for tests and headless use.
    pub fn with_config(config: StudioConfig) -> Self {
        log::info!(
            "Starting on {:?} in {:?} mode ({:?} retention, {}x{} canvas)",
            config.start_picture,
            config.start_mode,
            config.retention,
            config.logical_size,
            config.logical_size
        );
        let size = config.logical_size;
        Self {
            selection: Selection::new(config.start_picture),
            mode: config.start_mode,
            widths: ToolWidths::from(&config),
            layers: PaintLayers::new(size, config.start_picture, config.retention),
            fills: FillModel::new(),
            catalog: SceneCatalog::new(size),
            session: PaintSession::new(),
            input: InputHandler::new(),
            geometry: SurfaceGeometry::new(None, vec2(size as f32, size as f32)),
            scene_texture: TextureSlot::new("scene"),
            paint_texture: TextureSlot::new("paint_layer"),
            config,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn layers(&self) -> &PaintLayers {
        &self.layers
    }

    pub fn fills(&self) -> &FillModel {
        &self.fills
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    pub fn logical_size(&self) -> u32 {
        self.config.logical_size
    }

    pub fn select_picture(&mut self, picture: PictureId) {
        if picture == self.selection.picture() {
            return;
        }
        log::info!("Picture selected: {}", picture.label());
        self.session.end();
        self.selection.set_picture(picture);
        self.layers.switch_to(picture);
    }

    /// Choose a crayon; this also switches back to the brush.
    pub fn pick_crayon(&mut self, color: Color32) {
        log::info!("Crayon picked: {:?}", color);
        self.selection.pick_crayon(color);
    }

    pub fn select_tool(&mut self, tool: Tool) {
        log::info!("Tool selected: {:?}", tool);
        self.selection.set_tool(tool);
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        if mode == self.mode {
            return;
        }
        log::info!("Paint mode: {:?} -> {:?}", self.mode, mode);
        self.session.end();
        self.mode = mode;
    }

    /// Clear what the current mode shows for the current picture: the
    /// painting in raster mode, the tap-to-fill colours in vector mode.
    pub fn clear_current(&mut self) {
        let picture = self.selection.picture();
        self.session.end();
        match self.mode {
            PaintMode::Raster => self.layers.clear_current(),
            PaintMode::Vector => {
                log::info!("Clearing fills for {:?}", picture);
                self.fills.clear_picture(picture);
            }
        }
    }

    /// Lay out the drawing surface: `bounds` is the area whose exit ends a
    /// stroke, `surface` the on-screen square showing the logical canvas.
    pub fn set_canvas_rects(&mut self, bounds: Rect, surface: Rect) {
        self.input.set_bounds_rect(bounds);
        self.input.set_surface_rect(surface);
        self.geometry.container = Some(surface);
    }

    /// Translate this frame's egui input and apply it.
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        for event in self.input.process_input(ctx) {
            self.handle_event(&event);
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match self.mode {
            PaintMode::Raster => {
                let style = self.widths.style_for(&self.selection);
                if let Some(op) = self.session.handle(event, &self.geometry, style) {
                    self.layers.apply(&op);
                }
            }
            PaintMode::Vector => {
                let Some(location) = event.qualifying_down() else {
                    return;
                };
                if let Some(point) = self.geometry.to_logical(location.position) {
                    self.tap_fill(point);
                }
            }
        }
    }

    /// Fill the topmost region under `point` (logical coordinates) with
    /// the current colour. Returns the region that was filled.
    pub fn tap_fill(&mut self, point: Pos2) -> Option<Region> {
        let picture = self.selection.picture();
        let region = self.catalog.scene(picture)?.hit_test(point)?;
        let key = self.catalog.fill_key(picture, region.id)?;
        self.fills.fill_region(picture, key, self.selection.color());
        Some(region)
    }

    /// Texture of the current scene, rendered for the current mode and fills.
    pub fn scene_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        let picture = self.selection.picture();
        let scene = self.catalog.scene(picture)?;
        let key = SceneKey::new(picture, self.mode, &self.fills);
        let (config, fills, mode) = (&self.config, &self.fills, self.mode);
        Some(self.scene_texture.get_or_update(ctx, key, || {
            let options = RenderOptions {
                mode,
                base_fill: config.base_fill_color(),
                logical_size: config.logical_size,
                scale: SCENE_SCALE,
            };
            match rasterize_scene(scene, fills, &options) {
                Ok(pixmap) => to_color_image(&pixmap),
                Err(e) => {
                    log::warn!("Failed to render {:?}: {}", scene.picture, e);
                    egui::ColorImage::new([1, 1], Color32::TRANSPARENT)
                }
            }
        }))
    }

    /// Texture of the live paint layer, re-uploaded only when it changed.
    pub fn paint_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let live = self.layers.live();
        self.paint_texture
            .get_or_update(ctx, live.revision(), || live.to_color_image())
    }
}

impl eframe::App for ColoringApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.layers.poll_restores();

        picker_panel(self, ctx);
        crayon_panel(self, ctx);
        canvas_panel(self, ctx);

        if self.layers.is_restore_pending() {
            ctx.request_repaint();
        }
    }
}
