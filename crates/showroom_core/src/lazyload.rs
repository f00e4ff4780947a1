//! Boundary-visibility driven pagination
//!
//! An external collaborator watches a sentinel element and feeds its
//! visibility over a channel. The coordinator turns that raw bool stream
//! into debounced load triggers: one `load_more` per rising edge, and a
//! full visibility cycle (a `false` sample) required before the next.

use crate::gallery::RecordFilterEngine;
use crossbeam_channel::{Receiver, Sender};

/// Create a visibility feed: the sender side goes to the viewport
/// collaborator, the receiver side to [`LazyLoadCoordinator::attach`].
pub fn visibility_feed() -> (Sender<bool>, Receiver<bool>) {
    crossbeam_channel::unbounded()
}

/// Edge-detecting bridge from the visibility signal to gallery pagination
pub struct LazyLoadCoordinator {
    feed: Receiver<bool>,
    last_visible: bool,
}

impl LazyLoadCoordinator {
    /// Subscribe to a visibility feed. The sentinel starts off-screen, so
    /// the first `true` sample is a rising edge.
    pub fn attach(feed: Receiver<bool>) -> Self {
        Self {
            feed,
            last_visible: false,
        }
    }

    /// Drain all queued visibility samples, advancing the gallery once per
    /// rising edge. Returns the number of triggers fired.
    pub fn pump(&mut self, gallery: &mut RecordFilterEngine) -> usize {
        let mut fired = 0;
        while let Ok(visible) = self.feed.try_recv() {
            if self.observe(visible) {
                gallery.load_more();
                fired += 1;
            }
        }
        fired
    }

    /// Unsubscribe from the feed
    pub fn detach(self) {
        drop(self.feed);
        tracing::debug!("lazy-load coordinator detached");
    }

    /// Edge detection: fires only on a false -> true flank
    fn observe(&mut self, visible: bool) -> bool {
        let rising = visible && !self.last_visible;
        self.last_visible = visible;
        rising
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::gallery::{MediaRecord, RecordId};
    use crate::source::StaticRecordSource;

    fn loaded_gallery() -> RecordFilterEngine {
        let records = (0..20)
            .map(|i| MediaRecord {
                id: RecordId(format!("r{}", i)),
                title: format!("Project r{}", i),
                room: "Kitchen".to_string(),
                style: "Modern".to_string(),
                image: String::new(),
                extra_images: Vec::new(),
            })
            .collect();
        let mut gallery = RecordFilterEngine::new(&GalleryConfig::default());
        gallery.load_from(&StaticRecordSource::new(records));
        gallery
    }

    #[test]
    fn test_rising_edge_fires_once() {
        let (tx, rx) = visibility_feed();
        let mut coordinator = LazyLoadCoordinator::attach(rx);
        let mut gallery = loaded_gallery();

        tx.send(true).unwrap();
        assert_eq!(coordinator.pump(&mut gallery), 1);
        assert_eq!(gallery.visible_count(), 8);
    }

    #[test]
    fn test_sustained_visibility_does_not_refire() {
        let (tx, rx) = visibility_feed();
        let mut coordinator = LazyLoadCoordinator::attach(rx);
        let mut gallery = loaded_gallery();

        tx.send(true).unwrap();
        tx.send(true).unwrap();
        tx.send(true).unwrap();
        assert_eq!(coordinator.pump(&mut gallery), 1);
        assert_eq!(gallery.visible_count(), 8);
    }

    #[test]
    fn test_falling_edge_never_fires() {
        let (tx, rx) = visibility_feed();
        let mut coordinator = LazyLoadCoordinator::attach(rx);
        let mut gallery = loaded_gallery();

        tx.send(true).unwrap();
        tx.send(false).unwrap();
        assert_eq!(coordinator.pump(&mut gallery), 1);
        assert_eq!(gallery.visible_count(), 8);
    }

    #[test]
    fn test_full_cycle_required_between_triggers() {
        let (tx, rx) = visibility_feed();
        let mut coordinator = LazyLoadCoordinator::attach(rx);
        let mut gallery = loaded_gallery();

        // Two full visibility cycles queued from one scroll burst
        tx.send(true).unwrap();
        tx.send(false).unwrap();
        tx.send(true).unwrap();
        assert_eq!(coordinator.pump(&mut gallery), 2);
        assert_eq!(gallery.visible_count(), 12);
    }

    #[test]
    fn test_edge_state_survives_pump_batches() {
        let (tx, rx) = visibility_feed();
        let mut coordinator = LazyLoadCoordinator::attach(rx);
        let mut gallery = loaded_gallery();

        tx.send(true).unwrap();
        assert_eq!(coordinator.pump(&mut gallery), 1);

        // Still visible in the next batch: no new edge
        tx.send(true).unwrap();
        assert_eq!(coordinator.pump(&mut gallery), 0);

        tx.send(false).unwrap();
        tx.send(true).unwrap();
        assert_eq!(coordinator.pump(&mut gallery), 1);
    }

    #[test]
    fn test_trigger_on_exhausted_gallery_is_harmless() {
        let (tx, rx) = visibility_feed();
        let mut coordinator = LazyLoadCoordinator::attach(rx);
        let mut gallery = loaded_gallery();

        for _ in 0..10 {
            tx.send(true).unwrap();
            tx.send(false).unwrap();
        }
        coordinator.pump(&mut gallery);
        assert_eq!(gallery.visible_count(), 20);
        assert!(gallery.exhausted());
    }
}
