use std::io::Cursor;
use std::rc::Rc;

use image::{ImageFormat, RgbaImage};

use crate::error::SnapshotError;

/// Opaque encoded copy of one picture's paint layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Rc<[u8]>,
}

impl Snapshot {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Turns paint layers into snapshots and back.
pub trait SnapshotCodec {
    fn encode(&self, image: &RgbaImage) -> Result<Snapshot, SnapshotError>;

    fn decode(&self, snapshot: &Snapshot) -> Result<RgbaImage, SnapshotError>;
}

/// Lossless PNG snapshots.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngCodec;

impl SnapshotCodec for PngCodec {
    fn encode(&self, image: &RgbaImage) -> Result<Snapshot, SnapshotError> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(SnapshotError::Encode)?;
        Ok(Snapshot::from_bytes(bytes))
    }

    fn decode(&self, snapshot: &Snapshot) -> Result<RgbaImage, SnapshotError> {
        let image = image::load_from_memory_with_format(snapshot.as_bytes(), ImageFormat::Png)
            .map_err(SnapshotError::Decode)?;
        Ok(image.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_preserves_pixels() {
        let mut image = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        image.put_pixel(3, 4, Rgba([0xff, 0x7e, 0xb8, 0x80]));

        let codec = PngCodec;
        let snapshot = codec.encode(&image).unwrap();
        assert!(!snapshot.is_empty());

        let decoded = codec.decode(&snapshot).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let snapshot = Snapshot::from_bytes(vec![1, 2, 3, 4]);
        assert!(matches!(
            PngCodec.decode(&snapshot),
            Err(SnapshotError::Decode(_))
        ));
    }
}
