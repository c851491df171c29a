use std::collections::HashMap;

use egui::Color32;

use crate::selection::PictureId;

/// Vector-mode colours, keyed by picture and then by fill key.
///
/// A fill key is a region id, or the group key shared by several regions
/// (both ears of the cat, say). Keys are not checked against the scene
/// catalog; a key no scene uses is stored and simply never drawn.
#[derive(Debug, Default, Clone)]
pub struct FillModel {
    fills: HashMap<PictureId, HashMap<String, Color32>>,
    revision: u64,
}

impl FillModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped whenever a stored colour actually changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn fill_region(&mut self, picture: PictureId, key: &str, color: Color32) {
        let regions = self.fills.entry(picture).or_default();
        if regions.get(key) == Some(&color) {
            return;
        }
        log::debug!("Filling {:?}/{} with {:?}", picture, key, color);
        regions.insert(key.to_owned(), color);
        self.revision += 1;
    }

    /// The stored colour, or `default` if the region was never filled
    pub fn color_for(&self, picture: PictureId, key: &str, default: Color32) -> Color32 {
        self.fills
            .get(&picture)
            .and_then(|regions| regions.get(key))
            .copied()
            .unwrap_or(default)
    }

    /// Number of fill keys stored for `picture`
    pub fn filled_count(&self, picture: PictureId) -> usize {
        self.fills.get(&picture).map_or(0, HashMap::len)
    }

    /// Forget every fill of `picture`
    pub fn clear_picture(&mut self, picture: PictureId) {
        if self.fills.remove(&picture).is_some_and(|regions| !regions.is_empty()) {
            self.revision += 1;
        }
    }
}
