//! Line-art scenes: SVG artwork, fill regions and hit testing.

use std::collections::HashMap;

use egui::{Color32, Pos2};
use resvg::{tiny_skia, usvg};

use crate::error::SceneError;
use crate::selection::PictureId;

mod catalog;
pub mod render;

pub use render::{RenderOptions, SceneKey, rasterize_scene, to_color_image};

/// Side of the square the artwork is authored in, in SVG user units
pub const ARTWORK_SIZE: f32 = 300.0;

/// Extra reach, in artwork units, when tapping a line-only region
const LINE_HIT_SLOP: f32 = 3.0;

/// A tappable section of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: &'static str,
    /// Key the fill colour is stored under; shared by grouped regions
    pub fill_key: &'static str,
}

/// One SVG element of a scene, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub region: Option<Region>,
    /// Element name and geometry attributes, e.g. `circle cx="150" cy="125" r="38"`
    pub element: &'static str,
    /// Interior colour; `None` for line-only parts
    pub fill: Option<Color32>,
    /// Outline width and colour
    pub stroke: Option<(f32, Color32)>,
}

impl Part {
    /// Line-only regions are coloured through their stroke
    pub fn is_line_region(&self) -> bool {
        self.region.is_some() && self.fill.is_none()
    }
}

/// The artwork of one picture
#[derive(Debug, Clone)]
pub struct Scene {
    pub picture: PictureId,
    pub parts: Vec<Part>,
    hits: HitMap,
}

impl Scene {
    fn new(picture: PictureId, parts: Vec<Part>, logical_size: u32) -> Self {
        let hits = HitMap::build(&parts, logical_size).unwrap_or_else(|e| {
            log::warn!("No hit testing for {:?}: {}", picture, e);
            HitMap::default()
        });
        Self {
            picture,
            parts,
            hits,
        }
    }

    /// Topmost region under `point`, in logical coordinates
    pub fn hit_test(&self, point: Pos2) -> Option<Region> {
        self.hits.lookup(point)
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.parts.iter().filter_map(|part| part.region)
    }
}

/// Region label per logical pixel; later regions paint over earlier ones,
/// so each cell holds the topmost region. 0 is "no region".
#[derive(Debug, Clone, Default)]
struct HitMap {
    size: u32,
    cells: Vec<u8>,
    regions: Vec<Region>,
}

impl HitMap {
    fn build(parts: &[Part], size: u32) -> Result<Self, SceneError> {
        let regions: Vec<Region> = parts.iter().filter_map(|part| part.region).collect();
        let labels: HashMap<&str, u8> = regions
            .iter()
            .enumerate()
            .filter_map(|(i, region)| Some((region.id, u8::try_from(i + 1).ok()?)))
            .collect();

        let svg = render::svg_document(parts, |part| (part.fill, part.stroke));
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())?;
        let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or(SceneError::Canvas(size))?;
        let scale = size as f32 / ARTWORK_SIZE;

        visit_paths(tree.root(), &mut |path: &usvg::Path| {
            let Some(&label) = labels.get(path.id()) else {
                return;
            };
            let mut paint = tiny_skia::Paint::default();
            paint.set_color_rgba8(label, 0, 0, 255);
            paint.anti_alias = false;
            let transform =
                tiny_skia::Transform::from_scale(scale, scale).pre_concat(path.abs_transform());

            if path.fill().is_some() {
                pixmap.fill_path(
                    path.data(),
                    &paint,
                    tiny_skia::FillRule::Winding,
                    transform,
                    None,
                );
            } else if let Some(stroke) = path.stroke() {
                let reach = tiny_skia::Stroke {
                    width: stroke.width().get() + 2.0 * LINE_HIT_SLOP,
                    line_cap: tiny_skia::LineCap::Round,
                    line_join: tiny_skia::LineJoin::Round,
                    ..Default::default()
                };
                pixmap.stroke_path(path.data(), &paint, &reach, transform, None);
            }
        });

        let cells = pixmap.pixels().iter().map(|pixel| pixel.red()).collect();
        Ok(Self {
            size,
            cells,
            regions,
        })
    }

    fn lookup(&self, point: Pos2) -> Option<Region> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.size || y >= self.size {
            return None;
        }
        let label = *self.cells.get((y * self.size + x) as usize)?;
        let index = usize::from(label.checked_sub(1)?);
        self.regions.get(index).copied()
    }
}

fn visit_paths(group: &usvg::Group, visit: &mut impl FnMut(&usvg::Path)) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => visit_paths(group, visit),
            usvg::Node::Path(path) => visit(path),
            _ => {}
        }
    }
}

/// Every scene, plus the region → fill key table resolved from them.
#[derive(Debug)]
pub struct SceneCatalog {
    scenes: HashMap<PictureId, Scene>,
    fill_keys: HashMap<(PictureId, &'static str), &'static str>,
}

impl SceneCatalog {
    /// The built-in coloring pages at their authored size
    pub fn builtin() -> Self {
        Self::new(ARTWORK_SIZE as u32)
    }

    /// The built-in coloring pages, hit-tested on a `logical_size` canvas
    pub fn new(logical_size: u32) -> Self {
        let scenes: HashMap<_, _> = PictureId::ALL
            .iter()
            .map(|&picture| {
                let scene = Scene::new(picture, catalog::parts(picture), logical_size);
                (picture, scene)
            })
            .collect();

        let fill_keys = scenes
            .values()
            .flat_map(|scene| {
                scene
                    .regions()
                    .map(move |region| ((scene.picture, region.id), region.fill_key))
            })
            .collect();

        Self { scenes, fill_keys }
    }

    pub fn scene(&self, picture: PictureId) -> Option<&Scene> {
        self.scenes.get(&picture)
    }

    /// The key a region's colour is stored under, `None` for unknown regions
    pub fn fill_key(&self, picture: PictureId, region_id: &str) -> Option<&'static str> {
        self.fill_keys.get(&(picture, region_id)).copied()
    }
}
