use egui::{Color32, ColorImage, Pos2};
use image::{Rgba, RgbaImage};

use crate::stroke::{CompositeMode, DrawOp};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The live freehand paint buffer.
///
/// Pixels are stored unpremultiplied so the buffer can be encoded as a PNG
/// snapshot and uploaded to egui without conversion. `revision` changes on
/// every mutation so the canvas only re-uploads its texture when needed.
#[derive(Debug, Clone)]
pub struct RasterLayer {
    image: RgbaImage,
    revision: u64,
}

impl RasterLayer {
    /// Creates a transparent square layer of `size` × `size` logical units
    pub fn new(size: u32) -> Self {
        Self {
            image: blank_image(size, size),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA of one pixel, `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    /// Erase everything to fully transparent.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
        self.touch();
    }

    /// Rasterize one stroke step onto the layer.
    pub fn apply(&mut self, op: &DrawOp) {
        stroke_segment(
            &mut self.image,
            op.from,
            op.to,
            op.style.width,
            op.style.color,
            op.style.composite,
        );
        self.touch();
    }

    /// Draw `image` over the layer at the origin; anything larger is clipped.
    pub fn draw_image(&mut self, image: &RgbaImage) {
        image::imageops::overlay(&mut self.image, image, 0, 0);
        self.touch();
    }

    /// Swap the pixel content with `image`, returning the previous content.
    pub fn replace_image(&mut self, image: RgbaImage) -> RgbaImage {
        let previous = std::mem::replace(&mut self.image, image);
        self.touch();
        previous
    }

    pub fn to_color_image(&self) -> ColorImage {
        to_color_image(&self.image)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

pub fn blank_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, TRANSPARENT)
}

pub fn to_color_image(image: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

/// Stroke a straight segment with round caps, in pixel coordinates.
///
/// A zero-length segment produces a round dot of diameter `width`.
pub fn stroke_segment(
    image: &mut RgbaImage,
    from: Pos2,
    to: Pos2,
    width: f32,
    color: Color32,
    mode: CompositeMode,
) {
    let radius = width / 2.0;
    let reach = radius + 1.0;
    let min_x = from.x.min(to.x) - reach;
    let max_x = from.x.max(to.x) + reach;
    let min_y = from.y.min(to.y) - reach;
    let max_y = from.y.max(to.y) + reach;

    let Some((x0, x1)) = pixel_span(min_x, max_x, image.width()) else {
        return;
    };
    let Some((y0, y1)) = pixel_span(min_y, max_y, image.height()) else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = distance_to_segment(center, from, to);
            let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let pixel = image.get_pixel_mut(x, y);
                *pixel = composite(*pixel, color, coverage, mode);
            }
        }
    }
}

/// Composite `color` at `coverage` onto `dst`.
pub fn composite(dst: Rgba<u8>, color: Color32, coverage: f32, mode: CompositeMode) -> Rgba<u8> {
    let src_a = coverage * color.a() as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;

    match mode {
        CompositeMode::DestinationOut => {
            let out_a = dst_a * (1.0 - src_a);
            if out_a <= 0.0 {
                return TRANSPARENT;
            }
            Rgba([dst[0], dst[1], dst[2], to_u8(out_a)])
        }
        CompositeMode::SourceOver => {
            let out_a = src_a + dst_a * (1.0 - src_a);
            if out_a <= 0.0 {
                return TRANSPARENT;
            }
            let channel = |src: u8, dst: u8| {
                let src = src as f32 / 255.0;
                let dst = dst as f32 / 255.0;
                to_u8((src * src_a + dst * dst_a * (1.0 - src_a)) / out_a)
            };
            Rgba([
                channel(color.r(), dst[0]),
                channel(color.g(), dst[1]),
                channel(color.b(), dst[2]),
                to_u8(out_a),
            ])
        }
    }
}

/// Distance from `point` to the segment `a`-`b`.
pub fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let line = b - a;
    let length_sq = line.length_sq();
    if length_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(line) / length_sq).clamp(0.0, 1.0);
    point.distance(a + line * t)
}

fn pixel_span(min: f32, max: f32, limit: u32) -> Option<(u32, u32)> {
    let start = min.floor().max(0.0);
    let end = (max.ceil() + 1.0).min(limit as f32);
    (start < end).then(|| (start as u32, end as u32))
}

fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
