//! Per-picture freehand paint layers.
//!
//! Exactly one [`RasterLayer`] is live at a time. The layers of the other
//! pictures are parked according to the configured [`LayerRetention`]:
//! either as owned buffers, or as encoded snapshots that are decoded again
//! when their picture comes back.

use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use image::RgbaImage;

use crate::config::LayerRetention;
use crate::error::SnapshotError;
use crate::raster::{RasterLayer, blank_image};
use crate::selection::PictureId;
use crate::stroke::DrawOp;

mod snapshot;
pub use snapshot::{PngCodec, Snapshot, SnapshotCodec};

pub struct PaintLayers {
    live: RasterLayer,
    /// The picture the live layer belongs to
    current: PictureId,
    store: LayerStore,
}

enum LayerStore {
    Arena(HashMap<PictureId, RgbaImage>),
    Snapshots(SnapshotStore),
}

struct SnapshotStore {
    codec: Rc<dyn SnapshotCodec>,
    saved: HashMap<PictureId, Snapshot>,
    pool: LocalPool,
    pending: Vec<PendingRestore>,
    latest_ticket: u64,
}

/// A decode in flight, tagged so a late result can be recognised as stale
struct PendingRestore {
    target: PictureId,
    ticket: u64,
    receiver: oneshot::Receiver<Result<RgbaImage, SnapshotError>>,
}

impl std::fmt::Debug for PaintLayers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (retention, parked) = match &self.store {
            LayerStore::Arena(parked) => ("arena", parked.len()),
            LayerStore::Snapshots(store) => ("snapshots", store.saved.len()),
        };
        f.debug_struct("PaintLayers")
            .field("current", &self.current)
            .field("retention", &retention)
            .field("parked", &parked)
            .field("live_revision", &self.live.revision())
            .finish()
    }
}

impl PaintLayers {
    pub fn new(size: u32, start: PictureId, retention: LayerRetention) -> Self {
        let store = match retention {
            LayerRetention::Arena => LayerStore::Arena(HashMap::new()),
            LayerRetention::Snapshots => LayerStore::Snapshots(SnapshotStore::new(Rc::new(PngCodec))),
        };
        Self {
            live: RasterLayer::new(size),
            current: start,
            store,
        }
    }

    /// Snapshot retention with a custom codec
    pub fn with_codec(size: u32, start: PictureId, codec: impl SnapshotCodec + 'static) -> Self {
        Self {
            live: RasterLayer::new(size),
            current: start,
            store: LayerStore::Snapshots(SnapshotStore::new(Rc::new(codec))),
        }
    }

    pub fn current(&self) -> PictureId {
        self.current
    }

    pub fn live(&self) -> &RasterLayer {
        &self.live
    }

    pub fn retention(&self) -> LayerRetention {
        match self.store {
            LayerStore::Arena(_) => LayerRetention::Arena,
            LayerStore::Snapshots(_) => LayerRetention::Snapshots,
        }
    }

    /// Paint onto the live layer.
    pub fn apply(&mut self, op: &DrawOp) {
        self.live.apply(op);
    }

    /// Whether artwork is parked for `picture` (the live picture never is)
    pub fn has_saved(&self, picture: PictureId) -> bool {
        match &self.store {
            LayerStore::Arena(parked) => parked.contains_key(&picture),
            LayerStore::Snapshots(store) => store.saved.contains_key(&picture),
        }
    }

    pub fn is_restore_pending(&self) -> bool {
        match &self.store {
            LayerStore::Arena(_) => false,
            LayerStore::Snapshots(store) => !store.pending.is_empty(),
        }
    }

    /// Park the live layer under the current picture and bring up `picture`.
    pub fn switch_to(&mut self, picture: PictureId) {
        if picture == self.current {
            return;
        }
        let previous = self.current;
        log::info!("Switching paint layer {:?} -> {:?}", previous, picture);

        match &mut self.store {
            LayerStore::Arena(parked) => {
                let size = self.live.width();
                let incoming = parked
                    .remove(&picture)
                    .unwrap_or_else(|| blank_image(size, size));
                let outgoing = self.live.replace_image(incoming);
                parked.insert(previous, outgoing);
            }
            LayerStore::Snapshots(store) => {
                store.save(previous, &self.live);
                self.live.clear();
                store.request_restore(picture);
            }
        }

        self.current = picture;
    }

    /// Erase the current picture's artwork, live and parked.
    pub fn clear_current(&mut self) {
        log::info!("Clearing paint layer for {:?}", self.current);
        self.live.clear();
        match &mut self.store {
            LayerStore::Arena(parked) => {
                parked.remove(&self.current);
            }
            LayerStore::Snapshots(store) => {
                store.saved.remove(&self.current);
                let current = self.current;
                store.pending.retain(|p| p.target != current);
            }
        }
    }

    /// Drive in-flight restores; returns true if one landed on the live layer.
    ///
    /// Call once per frame.
    pub fn poll_restores(&mut self) -> bool {
        let LayerStore::Snapshots(store) = &mut self.store else {
            return false;
        };
        store.pool.run_until_stalled();

        let current = self.current;
        let latest = store.latest_ticket;
        let live = &mut self.live;
        let mut landed = false;

        store.pending.retain_mut(|restore| {
            let result = match restore.receiver.try_recv() {
                Ok(None) => return true,
                Ok(Some(result)) => result,
                Err(oneshot::Canceled) => Err(SnapshotError::RestoreCancelled),
            };
            match result {
                Ok(image) if restore.target == current && restore.ticket == latest => {
                    live.clear();
                    live.draw_image(&image);
                    landed = true;
                }
                Ok(_) => {
                    log::debug!(
                        "Discarding stale restore for {:?} (ticket {})",
                        restore.target,
                        restore.ticket
                    );
                }
                Err(e) => {
                    log::warn!("Could not restore paint layer for {:?}: {}", restore.target, e);
                }
            }
            false
        });

        landed
    }
}

impl SnapshotStore {
    fn new(codec: Rc<dyn SnapshotCodec>) -> Self {
        Self {
            codec,
            saved: HashMap::new(),
            pool: LocalPool::new(),
            pending: Vec::new(),
            latest_ticket: 0,
        }
    }

    fn restore_pending_for(&self, picture: PictureId) -> bool {
        self.pending
            .iter()
            .any(|p| p.target == picture && p.ticket == self.latest_ticket)
    }

    /// Encode the outgoing layer. Failures lose that picture's artwork.
    fn save(&mut self, picture: PictureId, live: &RasterLayer) {
        if self.restore_pending_for(picture) {
            // The live layer never received this picture's artwork
            log::debug!("Restore for {:?} still pending, keeping its snapshot", picture);
            return;
        }
        match self.codec.encode(live.image()) {
            Ok(snapshot) => {
                self.saved.insert(picture, snapshot);
            }
            Err(e) => {
                log::warn!("Dropping paint layer for {:?}: {}", picture, e);
                self.saved.remove(&picture);
            }
        }
    }

    fn request_restore(&mut self, picture: PictureId) {
        self.latest_ticket += 1;
        let Some(snapshot) = self.saved.get(&picture).cloned() else {
            return;
        };

        let (sender, receiver) = oneshot::channel();
        let codec = Rc::clone(&self.codec);
        let spawned = self.pool.spawner().spawn_local(async move {
            let _ = sender.send(codec.decode(&snapshot));
        });
        if let Err(e) = spawned {
            log::warn!("Could not schedule restore for {:?}: {}", picture, e);
            return;
        }

        self.pending.push(PendingRestore {
            target: picture,
            ticket: self.latest_ticket,
            receiver,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeStyle;
    use egui::{Color32, Pos2};

    fn dot(x: f32, y: f32) -> DrawOp {
        let at = Pos2::new(x, y);
        DrawOp {
            from: at,
            to: at,
            style: StrokeStyle::brush(Color32::RED, 6.0),
        }
    }

    fn alpha(layers: &PaintLayers, x: u32, y: u32) -> u8 {
        layers.live().pixel(x, y).map_or(0, |p| p[3])
    }

    #[test]
    fn test_switch_to_same_picture_is_no_op() {
        let mut layers = PaintLayers::new(50, PictureId::Cake, LayerRetention::Snapshots);
        layers.apply(&dot(10.0, 10.0));
        layers.switch_to(PictureId::Cake);
        assert_eq!(alpha(&layers, 10, 10), 255);
        assert!(!layers.is_restore_pending());
    }

    #[test]
    fn test_snapshot_restore_is_deferred_until_polled() {
        let mut layers = PaintLayers::new(50, PictureId::Cake, LayerRetention::Snapshots);
        layers.apply(&dot(10.0, 10.0));
        layers.switch_to(PictureId::Apple);
        layers.switch_to(PictureId::Cake);

        assert!(layers.is_restore_pending());
        assert_eq!(alpha(&layers, 10, 10), 0);

        assert!(layers.poll_restores());
        assert_eq!(alpha(&layers, 10, 10), 255);
        assert!(!layers.is_restore_pending());
    }

    #[test]
    fn test_clear_cancels_pending_restore() {
        let mut layers = PaintLayers::new(50, PictureId::Cake, LayerRetention::Snapshots);
        layers.apply(&dot(10.0, 10.0));
        layers.switch_to(PictureId::Apple);
        layers.switch_to(PictureId::Cake);
        layers.clear_current();

        assert!(!layers.poll_restores());
        assert!(layers.live().is_blank());
        assert!(!layers.has_saved(PictureId::Cake));
    }

    #[test]
    fn test_arena_switch_is_immediate() {
        let mut layers = PaintLayers::new(50, PictureId::Cake, LayerRetention::Arena);
        layers.apply(&dot(10.0, 10.0));
        layers.switch_to(PictureId::Fish);
        assert!(layers.live().is_blank());
        assert!(layers.has_saved(PictureId::Cake));

        layers.switch_to(PictureId::Cake);
        assert_eq!(alpha(&layers, 10, 10), 255);
        assert!(!layers.poll_restores());
    }

    #[test]
    fn test_arena_clear_only_touches_current() {
        let mut layers = PaintLayers::new(50, PictureId::Cake, LayerRetention::Arena);
        layers.apply(&dot(10.0, 10.0));
        layers.switch_to(PictureId::Fish);
        layers.apply(&dot(30.0, 30.0));
        layers.clear_current();
        assert!(layers.live().is_blank());

        layers.switch_to(PictureId::Cake);
        assert_eq!(alpha(&layers, 10, 10), 255);
    }
}
