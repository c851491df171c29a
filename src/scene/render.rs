use egui::{Color32, ColorImage};
use resvg::{tiny_skia, usvg};

use super::{ARTWORK_SIZE, Part, Scene};
use crate::config::PaintMode;
use crate::error::SceneError;
use crate::fill::FillModel;
use crate::selection::PictureId;

/// Identifies one rendering of a scene; a changed key means the texture is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneKey {
    pub picture: PictureId,
    pub mode: PaintMode,
    /// Revision of the fill model, only meaningful in vector mode
    pub fill_revision: u64,
}

impl SceneKey {
    pub fn new(picture: PictureId, mode: PaintMode, fills: &FillModel) -> Self {
        let fill_revision = match mode {
            PaintMode::Raster => 0,
            PaintMode::Vector => fills.revision(),
        };
        Self {
            picture,
            mode,
            fill_revision,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub mode: PaintMode,
    /// Colour of unfilled sections
    pub base_fill: Color32,
    /// Side of the square canvas in logical units
    pub logical_size: u32,
    /// Pixels per logical unit of the output image
    pub scale: f32,
}

/// Render a scene's SVG, with region fills taken from `fills` in vector
/// mode, into a square pixmap of `logical_size * scale` pixels.
pub fn rasterize_scene(
    scene: &Scene,
    fills: &FillModel,
    options: &RenderOptions,
) -> Result<tiny_skia::Pixmap, SceneError> {
    let svg = svg_document(&scene.parts, |part| {
        paint_for(scene.picture, part, fills, options)
    });
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())?;

    let side = (options.logical_size as f32 * options.scale).round().max(1.0) as u32;
    let mut pixmap = tiny_skia::Pixmap::new(side, side).ok_or(SceneError::Canvas(side))?;
    let scale = side as f32 / ARTWORK_SIZE;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

pub fn to_color_image(pixmap: &tiny_skia::Pixmap) -> ColorImage {
    let size = [pixmap.width() as usize, pixmap.height() as usize];
    ColorImage::from_rgba_premultiplied(size, pixmap.data())
}

/// Serialize `parts` as one SVG document, painting each with `paint`.
pub(super) fn svg_document<F>(parts: &[Part], mut paint: F) -> String
where
    F: FnMut(&Part) -> (Option<Color32>, Option<(f32, Color32)>),
{
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
        ARTWORK_SIZE
    );
    for part in parts {
        let (fill, stroke) = paint(part);
        svg.push('<');
        svg.push_str(part.element);
        if let Some(region) = part.region {
            svg.push_str(&format!(r#" id="{}""#, region.id));
        }
        match fill {
            Some(color) => svg.push_str(&format!(r#" fill="{}""#, hex(color))),
            None => svg.push_str(r#" fill="none""#),
        }
        if let Some((width, color)) = stroke {
            svg.push_str(&format!(
                r#" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
                hex(color),
                width
            ));
        }
        svg.push_str("/>");
    }
    svg.push_str("</svg>");
    svg
}

fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

fn paint_for(
    picture: PictureId,
    part: &Part,
    fills: &FillModel,
    options: &RenderOptions,
) -> (Option<Color32>, Option<(f32, Color32)>) {
    let Some(region) = part.region else {
        return (part.fill, part.stroke);
    };
    let fill = part.fill.map(|_| match options.mode {
        PaintMode::Raster => options.base_fill,
        PaintMode::Vector => fills.color_for(picture, region.fill_key, options.base_fill),
    });
    let stroke = match (options.mode, part.stroke) {
        (PaintMode::Vector, Some((width, color))) if part.is_line_region() => {
            Some((width, fills.color_for(picture, region.fill_key, color)))
        }
        (_, stroke) => stroke,
    };
    (fill, stroke)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneCatalog;

    fn options(mode: PaintMode) -> RenderOptions {
        RenderOptions {
            mode,
            base_fill: Color32::WHITE,
            logical_size: 300,
            scale: 1.0,
        }
    }

    fn rgba(pixmap: &tiny_skia::Pixmap, x: u32, y: u32) -> [u8; 4] {
        let pixel = pixmap.pixel(x, y).unwrap();
        [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]
    }

    #[test]
    fn test_image_is_scaled() {
        let catalog = SceneCatalog::builtin();
        let scene = catalog.scene(PictureId::Fish).unwrap();
        let pixmap = rasterize_scene(
            scene,
            &FillModel::new(),
            &RenderOptions {
                scale: 2.0,
                ..options(PaintMode::Raster)
            },
        )
        .unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (600, 600));
        assert_eq!(to_color_image(&pixmap).size, [600, 600]);
    }

    #[test]
    fn test_vector_fill_shows_in_region() {
        let catalog = SceneCatalog::builtin();
        let scene = catalog.scene(PictureId::Cake).unwrap();
        let mut fills = FillModel::new();
        fills.fill_region(PictureId::Cake, "top", Color32::from_rgb(0xb3, 0x7b, 0xff));

        let vector = rasterize_scene(scene, &fills, &options(PaintMode::Vector)).unwrap();
        assert_eq!(rgba(&vector, 120, 135), [0xb3, 0x7b, 0xff, 255]);

        // Raster mode ignores stored fills
        let raster = rasterize_scene(scene, &fills, &options(PaintMode::Raster)).unwrap();
        assert_eq!(rgba(&raster, 120, 135), [255, 255, 255, 255]);
    }

    #[test]
    fn test_artwork_follows_logical_size() {
        let catalog = SceneCatalog::new(150);
        let scene = catalog.scene(PictureId::Cake).unwrap();
        let mut fills = FillModel::new();
        fills.fill_region(PictureId::Cake, "top", Color32::from_rgb(0xb3, 0x7b, 0xff));

        // 150 units at 2x: the artwork maps 1:1 onto a 300px image
        let options = RenderOptions {
            logical_size: 150,
            scale: 2.0,
            ..options(PaintMode::Vector)
        };
        let pixmap = rasterize_scene(scene, &fills, &options).unwrap();
        assert_eq!(pixmap.width(), 300);
        assert_eq!(rgba(&pixmap, 120, 135), [0xb3, 0x7b, 0xff, 255]);
    }

    #[test]
    fn test_line_region_colored_through_stroke() {
        let catalog = SceneCatalog::builtin();
        let scene = catalog.scene(PictureId::Umbrella).unwrap();
        let mut fills = FillModel::new();
        fills.fill_region(PictureId::Umbrella, "handle", Color32::RED);

        let pixmap = rasterize_scene(scene, &fills, &options(PaintMode::Vector)).unwrap();
        assert_eq!(rgba(&pixmap, 150, 190), [255, 0, 0, 255]);
    }

    #[test]
    fn test_svg_carries_region_ids_and_fills() {
        let catalog = SceneCatalog::builtin();
        let scene = catalog.scene(PictureId::Cat).unwrap();
        let mut fills = FillModel::new();
        fills.fill_region(PictureId::Cat, "ears", Color32::from_rgb(0xff, 0x80, 0x00));

        let options = options(PaintMode::Vector);
        let svg = svg_document(&scene.parts, |part| {
            paint_for(PictureId::Cat, part, &fills, &options)
        });
        assert!(svg.contains(r##"id="ear-left" fill="#ff8000""##));
        assert!(svg.contains(r##"id="ear-right" fill="#ff8000""##));
        assert!(svg.contains(r##"id="head" fill="#ffffff""##));
    }

    #[test]
    fn test_scene_key_ignores_fills_in_raster_mode() {
        let mut fills = FillModel::new();
        let before = SceneKey::new(PictureId::Cat, PaintMode::Raster, &fills);
        fills.fill_region(PictureId::Cat, "head", Color32::RED);
        assert_eq!(before, SceneKey::new(PictureId::Cat, PaintMode::Raster, &fills));
        assert_ne!(
            SceneKey::new(PictureId::Cat, PaintMode::Vector, &FillModel::new()),
            SceneKey::new(PictureId::Cat, PaintMode::Vector, &fills)
        );
    }
}
