use egui::Color32;
use serde::{Deserialize, Serialize};

/// The pictures a child can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PictureId {
    #[default]
    Cake,
    Apple,
    Noodles,
    Umbrella,
    Cat,
    Fish,
}

impl PictureId {
    /// Picker order.
    pub const ALL: [PictureId; 6] = [
        PictureId::Cake,
        PictureId::Apple,
        PictureId::Noodles,
        PictureId::Umbrella,
        PictureId::Cat,
        PictureId::Fish,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Cake => "Cake",
            Self::Apple => "Apple",
            Self::Noodles => "Noodles",
            Self::Umbrella => "Umbrella",
            Self::Cat => "Cat",
            Self::Fish => "Fish",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

/// A swatch in the crayon box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crayon {
    pub name: &'static str,
    pub color: Color32,
}

pub const CRAYONS: [Crayon; 7] = [
    Crayon { name: "pink", color: Color32::from_rgb(0xff, 0x7e, 0xb8) },
    Crayon { name: "purple", color: Color32::from_rgb(0xb3, 0x7b, 0xff) },
    Crayon { name: "sky", color: Color32::from_rgb(0x7f, 0xd4, 0xff) },
    Crayon { name: "mint", color: Color32::from_rgb(0x7d, 0xff, 0xc4) },
    Crayon { name: "sunny", color: Color32::from_rgb(0xff, 0xe6, 0x80) },
    Crayon { name: "peach", color: Color32::from_rgb(0xff, 0xb4, 0x8a) },
    Crayon { name: "lavender", color: Color32::from_rgb(0xe2, 0xb8, 0xff) },
];

/// Current picture, colour and tool, shared by both paint modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    picture: PictureId,
    color: Color32,
    tool: Tool,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(PictureId::default())
    }
}

impl Selection {
    pub fn new(picture: PictureId) -> Self {
        Self {
            picture,
            color: CRAYONS[0].color,
            tool: Tool::Brush,
        }
    }

    pub fn picture(&self) -> PictureId {
        self.picture
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_picture(&mut self, picture: PictureId) {
        self.picture = picture;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Picking a crayon always goes back to the brush.
    pub fn pick_crayon(&mut self, color: Color32) {
        self.tool = Tool::Brush;
        self.color = color;
    }

    /// Whether the crayon box should highlight `crayon`.
    pub fn is_crayon_active(&self, crayon: &Crayon) -> bool {
        self.tool == Tool::Brush && self.color == crayon.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selection = Selection::default();
        assert_eq!(selection.picture(), PictureId::Cake);
        assert_eq!(selection.tool(), Tool::Brush);
        assert_eq!(selection.color(), CRAYONS[0].color);
    }

    #[test]
    fn test_pick_crayon_returns_to_brush() {
        let mut selection = Selection::default();
        selection.set_tool(Tool::Eraser);
        selection.pick_crayon(CRAYONS[3].color);

        assert_eq!(selection.tool(), Tool::Brush);
        assert_eq!(selection.color(), CRAYONS[3].color);
        assert!(selection.is_crayon_active(&CRAYONS[3]));
    }

    #[test]
    fn test_no_crayon_active_with_eraser() {
        let mut selection = Selection::default();
        selection.set_tool(Tool::Eraser);
        assert!(CRAYONS.iter().all(|c| !selection.is_crayon_active(c)));
    }

    #[test]
    fn test_picture_serde_names() {
        let json = serde_json::to_string(&PictureId::Umbrella).unwrap();
        assert_eq!(json, "\"umbrella\"");
        let back: PictureId = serde_json::from_str("\"fish\"").unwrap();
        assert_eq!(back, PictureId::Fish);
    }
}
