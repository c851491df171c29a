use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

/// One GPU texture that is regenerated only when its key changes.
///
/// The canvas keeps one slot for the scene artwork (keyed by [`SceneKey`])
/// and one for the paint layer (keyed by the layer revision), so neither is
/// re-uploaded on frames where nothing changed.
///
/// [`SceneKey`]: crate::scene::SceneKey
pub struct TextureSlot<K> {
    name: &'static str,
    key: Option<K>,
    handle: Option<TextureHandle>,
    uploads: u64,
}

impl<K: PartialEq + Copy + std::fmt::Debug> TextureSlot<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            key: None,
            handle: None,
            uploads: 0,
        }
    }

    /// The texture for `key`, calling `generator` only if the key changed.
    pub fn get_or_update<F>(&mut self, ctx: &Context, key: K, generator: F) -> TextureId
    where
        F: FnOnce() -> ColorImage,
    {
        if let (Some(handle), Some(current)) = (&self.handle, self.key) {
            if current == key {
                return handle.id();
            }
        }

        let image = generator();
        log::trace!("Uploading texture {} for {:?}", self.name, key);
        let id = match &mut self.handle {
            Some(handle) => {
                handle.set(image, TextureOptions::LINEAR);
                handle.id()
            }
            None => {
                let handle = ctx.load_texture(self.name, image, TextureOptions::LINEAR);
                let id = handle.id();
                self.handle = Some(handle);
                id
            }
        };
        self.key = Some(key);
        self.uploads += 1;
        id
    }

    /// How many times the texture has been (re)generated
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for TextureSlot<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureSlot")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("uploads", &self.uploads)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    fn white() -> ColorImage {
        ColorImage::new([10, 10], Color32::WHITE)
    }

    #[test]
    fn test_same_key_hits_cache() {
        let ctx = Context::default();
        let mut slot = TextureSlot::new("test");

        let first = slot.get_or_update(&ctx, 1u64, white);
        let second = slot.get_or_update(&ctx, 1u64, || panic!("should not regenerate"));

        assert_eq!(first, second);
        assert_eq!(slot.uploads(), 1);
    }

    #[test]
    fn test_new_key_reuses_texture_id() {
        let ctx = Context::default();
        let mut slot = TextureSlot::new("test");

        let first = slot.get_or_update(&ctx, 1u64, white);
        let second = slot.get_or_update(&ctx, 2u64, white);

        assert_eq!(first, second);
        assert_eq!(slot.uploads(), 2);
    }
}
