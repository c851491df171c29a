use egui::Color32;

use super::{Part, Region};
use crate::selection::PictureId;

const fn rgb(hex: u32) -> Color32 {
    Color32::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const PAPER: Color32 = Color32::WHITE;
const INK: Color32 = rgb(0x333333);

/// Collects the SVG elements of a scene in draw order.
struct SceneBuilder {
    parts: Vec<Part>,
}

impl SceneBuilder {
    fn new(backdrop_fill: u32, backdrop_stroke: u32) -> Self {
        Self { parts: Vec::new() }.decor(
            r#"rect x="10" y="10" width="280" height="280" rx="24""#,
            Some(rgb(backdrop_fill)),
            Some((3.0, rgb(backdrop_stroke))),
        )
    }

    fn push(
        mut self,
        region: Option<Region>,
        element: &'static str,
        fill: Option<Color32>,
        stroke: Option<(f32, Color32)>,
    ) -> Self {
        self.parts.push(Part {
            region,
            element,
            fill,
            stroke,
        });
        self
    }

    /// A fillable section with its own fill key
    fn section(self, id: &'static str, element: &'static str, width: f32, stroke: u32) -> Self {
        self.grouped(id, id, element, width, stroke)
    }

    /// A fillable section sharing `group` as its fill key
    fn grouped(
        self,
        id: &'static str,
        group: &'static str,
        element: &'static str,
        width: f32,
        stroke: u32,
    ) -> Self {
        let region = Region { id, fill_key: group };
        self.push(Some(region), element, Some(PAPER), Some((width, rgb(stroke))))
    }

    /// A line-only section, coloured through its stroke
    fn line(
        self,
        id: &'static str,
        group: &'static str,
        element: &'static str,
        width: f32,
        stroke: u32,
    ) -> Self {
        let region = Region { id, fill_key: group };
        self.push(Some(region), element, None, Some((width, rgb(stroke))))
    }

    /// Fixed decoration that cannot be coloured
    fn decor(
        self,
        element: &'static str,
        fill: Option<Color32>,
        stroke: Option<(f32, Color32)>,
    ) -> Self {
        self.push(None, element, fill, stroke)
    }
}

pub(super) fn parts(picture: PictureId) -> Vec<Part> {
    let builder = match picture {
        PictureId::Cake => cake(),
        PictureId::Apple => apple(),
        PictureId::Noodles => noodles(),
        PictureId::Umbrella => umbrella(),
        PictureId::Cat => cat(),
        PictureId::Fish => fish(),
    };
    builder.parts
}

fn cake() -> SceneBuilder {
    let mut builder = SceneBuilder::new(0xfff7fb, 0xf5b2d6)
        .section("plate", r#"ellipse cx="150" cy="220" rx="90" ry="18""#, 3.0, 0xd58bb5)
        .section(
            "base",
            r#"path d="M70 200 H230 Q240 200 240 190 V150 H60 V190 Q60 200 70 200 Z""#,
            3.0,
            0x4b2b5f,
        )
        .section(
            "cream",
            r#"path d="M65 165 Q90 175 105 165 Q120 155 135 165 Q150 175 165 165 Q180 155 195 165 Q210 175 235 165 V150 H65 Z""#,
            3.0,
            0x4b2b5f,
        )
        .section(
            "top",
            r#"path d="M95 150 H205 V120 Q205 110 195 110 H105 Q95 110 95 120 Z""#,
            3.0,
            0x4b2b5f,
        )
        .section("candle", r#"rect x="140" y="80" width="20" height="40" rx="4""#, 3.0, 0x4b2b5f)
        .section("flame", r#"path d="M150 80 Q160 70 150 60 Q140 70 150 80 Z""#, 2.5, 0xe28c4a);

    for (sprinkle, color) in [
        (r#"circle cx="90" cy="155" r="3""#, 0xff9fd2),
        (r#"circle cx="120" cy="145" r="3""#, 0xffc66c),
        (r#"circle cx="150" cy="152" r="3""#, 0x8fd4ff),
        (r#"circle cx="180" cy="145" r="3""#, 0xff9fd2),
        (r#"circle cx="210" cy="155" r="3""#, 0x8fd4ff),
    ] {
        builder = builder.decor(sprinkle, Some(rgb(color)), None);
    }
    builder
}

fn apple() -> SceneBuilder {
    SceneBuilder::new(0xf5fff6, 0xa5d69a)
        .section(
            "apple-left",
            r#"path d="M140 85 Q105 70 90 105 Q70 145 90 190 Q105 220 135 220""#,
            3.0,
            0x3e5d2b,
        )
        .section(
            "apple-right",
            r#"path d="M160 85 Q195 70 210 105 Q230 145 210 190 Q195 220 165 220""#,
            3.0,
            0x3e5d2b,
        )
        .section(
            "highlight",
            r#"path d="M145 110 Q130 105 120 120 Q110 140 120 155 Q130 165 145 160""#,
            2.0,
            0xc0d6b0,
        )
        .line("stem", "stem", r#"path d="M150 90 Q148 75 145 65""#, 4.0, 0x4a3523)
        .section("leaf", r#"path d="M145 70 Q155 60 170 62 Q165 78 150 82 Z""#, 3.0, 0x3e5d2b)
        .grouped("seed-left", "seeds", r#"ellipse cx="110" cy="165" rx="3" ry="5""#, 2.0, 0xb58c6a)
        .grouped("seed-right", "seeds", r#"ellipse cx="190" cy="165" rx="3" ry="5""#, 2.0, 0xb58c6a)
}

fn noodles() -> SceneBuilder {
    SceneBuilder::new(0xfffdf5, 0xf0c58a)
        .section("bowl", r#"path d="M60 190 Q75 235 150 245 Q225 235 240 190 Z""#, 3.0, 0x9b6b3c)
        .line(
            "noodle-upper",
            "noodles",
            r#"path d="M70 165 Q110 145 150 155 Q190 165 230 150""#,
            6.0,
            0xf0c58a,
        )
        .line(
            "noodle-lower",
            "noodles",
            r#"path d="M80 170 Q120 150 155 160 Q190 170 225 155""#,
            5.0,
            0xf0c58a,
        )
        .section("broth", r#"ellipse cx="150" cy="175" rx="85" ry="18""#, 3.0, 0xd8b07e)
        .section("egg", r#"circle cx="110" cy="168" r="8""#, 3.0, 0xe08c6a)
        .section("meat", r#"rect x="175" y="162" width="16" height="10" rx="3""#, 3.0, 0xc9655a)
}

fn umbrella() -> SceneBuilder {
    SceneBuilder::new(0xf3fbff, 0x9bc5f0)
        .line(
            "handle",
            "handle",
            r#"path d="M150 110 V215 Q150 230 140 235 Q130 240 125 232""#,
            5.0,
            0x5a6a8a,
        )
        .section(
            "canopy",
            r#"path d="M70 140 Q150 70 230 140 Q200 140 185 150 Q170 140 150 150 Q130 140 115 150 Q100 140 70 140 Z""#,
            3.0,
            0x5a6a8a,
        )
        .section(
            "canopy-left",
            r#"path d="M70 140 Q110 120 135 130 Q120 137 110 145 Q95 140 70 140 Z""#,
            2.0,
            0x5a6a8a,
        )
        .section(
            "canopy-middle",
            r#"path d="M110 145 Q150 120 190 145 Q170 142 150 150 Q130 142 110 145 Z""#,
            2.0,
            0x5a6a8a,
        )
        .section(
            "canopy-right",
            r#"path d="M190 145 Q205 137 220 132 Q235 137 230 140 Q205 140 190 145 Z""#,
            2.0,
            0x5a6a8a,
        )
        .section("tip", r#"circle cx="150" cy="112" r="4""#, 2.0, 0x5a6a8a)
}

fn cat() -> SceneBuilder {
    let mut builder = SceneBuilder::new(0xfff9f5, 0xf0bba3)
        .section("head", r#"circle cx="150" cy="125" r="38""#, 3.0, 0x82524c)
        .grouped("ear-left", "ears", r#"path d="M125 95 L110 75 L135 85 Z""#, 3.0, 0x82524c)
        .grouped("ear-right", "ears", r#"path d="M175 95 L190 75 L165 85 Z""#, 3.0, 0x82524c)
        .section("body", r#"ellipse cx="150" cy="195" rx="55" ry="45""#, 3.0, 0x82524c)
        .grouped(
            "paw-left",
            "paws",
            r#"rect x="125" y="212" width="18" height="26" rx="9""#,
            3.0,
            0x82524c,
        )
        .grouped(
            "paw-right",
            "paws",
            r#"rect x="157" y="212" width="18" height="26" rx="9""#,
            3.0,
            0x82524c,
        )
        .section("tail", r#"path d="M195 185 Q215 175 220 190 Q215 210 200 215""#, 4.0, 0x82524c)
        .decor(r#"circle cx="138" cy="125" r="3""#, Some(INK), None)
        .decor(r#"circle cx="162" cy="125" r="3""#, Some(INK), None)
        .decor(r#"path d="M150 130 Q148 134 150 136 Q152 134 150 130""#, None, Some((2.0, INK)))
        .decor(r#"path d="M140 138 Q145 140 150 139 Q155 140 160 138""#, None, Some((1.5, INK)));

    for whisker in [
        r#"path d="M140 132 L122 128""#,
        r#"path d="M140 136 L122 136""#,
        r#"path d="M160 132 L178 128""#,
        r#"path d="M160 136 L178 136""#,
    ] {
        builder = builder.decor(whisker, None, Some((2.0, rgb(0x82524c))));
    }
    builder
}

fn fish() -> SceneBuilder {
    let mut builder = SceneBuilder::new(0xf3fbff, 0x8fd0f0)
        .section("body", r#"ellipse cx="150" cy="160" rx="70" ry="40""#, 3.0, 0x326c88)
        .section("tail", r#"path d="M215 140 L255 120 L250 160 L255 200 Z""#, 3.0, 0x326c88)
        .section("fin", r#"path d="M120 135 Q145 110 170 130""#, 3.0, 0x326c88)
        .decor(r#"circle cx="120" cy="155" r="5""#, Some(rgb(0x326c88)), None);

    for (id, element) in [
        ("stripe-1", r#"path d="M135 135 Q130 160 135 185""#),
        ("stripe-2", r#"path d="M155 135 Q150 160 155 185""#),
        ("stripe-3", r#"path d="M175 135 Q170 160 175 185""#),
    ] {
        builder = builder.line(id, "stripes", element, 6.0, 0xffffff);
    }
    builder
}
