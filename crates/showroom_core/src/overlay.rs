//! Detail overlay: one expanded item at a time
//!
//! Orthogonal to navigation and gallery state; opening or closing never
//! touches either. The overlay drives the external scroll-lock
//! collaborator so the page behind it stops scrolling while it is up.

use crate::catalog::CategoryId;
use crate::gallery::RecordId;
use std::sync::Arc;

/// What the overlay currently presents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayItem {
    Category(CategoryId),
    Record(RecordId),
}

/// External page scroll-lock collaborator
pub trait ScrollLock: Send + Sync {
    fn lock(&self);
    fn unlock(&self);
}

/// Exclusive detail overlay controller
pub struct DetailOverlay {
    current: Option<OverlayItem>,
    scroll: Arc<dyn ScrollLock>,
}

impl DetailOverlay {
    pub fn new(scroll: Arc<dyn ScrollLock>) -> Self {
        Self {
            current: None,
            scroll,
        }
    }

    /// Present an item. Re-opening the identical item is a no-op; a
    /// different item replaces the current one (still exclusive).
    /// Returns whether the overlay content changed.
    pub fn open(&mut self, item: OverlayItem) -> bool {
        if self.current.as_ref() == Some(&item) {
            return false;
        }
        let was_closed = self.current.is_none();
        tracing::debug!(?item, replaced = !was_closed, "overlay opened");
        self.current = Some(item);
        if was_closed {
            self.scroll.lock();
        }
        true
    }

    /// Dismiss the overlay and release the scroll lock. Idempotent.
    pub fn close(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.current = None;
        self.scroll.unlock();
        tracing::debug!("overlay closed");
        true
    }

    pub fn current(&self) -> Option<&OverlayItem> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    /// Counts net lock depth and total calls for assertions
    #[derive(Default)]
    struct CountingLock {
        depth: AtomicI32,
        locks: AtomicI32,
        unlocks: AtomicI32,
    }

    impl ScrollLock for CountingLock {
        fn lock(&self) {
            self.depth.fetch_add(1, Ordering::SeqCst);
            self.locks.fetch_add(1, Ordering::SeqCst);
        }
        fn unlock(&self) {
            self.depth.fetch_sub(1, Ordering::SeqCst);
            self.unlocks.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn overlay() -> (DetailOverlay, Arc<CountingLock>) {
        let lock = Arc::new(CountingLock::default());
        (DetailOverlay::new(lock.clone()), lock)
    }

    #[test]
    fn test_open_locks_and_close_unlocks() {
        let (mut overlay, lock) = overlay();

        assert!(overlay.open(OverlayItem::Category(CategoryId(3))));
        assert!(overlay.is_open());
        assert_eq!(lock.depth.load(Ordering::SeqCst), 1);

        assert!(overlay.close());
        assert!(!overlay.is_open());
        assert_eq!(lock.depth.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reopening_identical_item_is_noop() {
        let (mut overlay, lock) = overlay();
        let item = OverlayItem::Record(RecordId("r1".to_string()));

        assert!(overlay.open(item.clone()));
        assert!(!overlay.open(item));
        assert_eq!(lock.locks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_last_writer_wins_replacement() {
        let (mut overlay, lock) = overlay();

        overlay.open(OverlayItem::Category(CategoryId(3)));
        assert!(overlay.open(OverlayItem::Record(RecordId("r1".to_string()))));
        assert_eq!(
            overlay.current(),
            Some(&OverlayItem::Record(RecordId("r1".to_string())))
        );
        // Replacing while open keeps a single held lock
        assert_eq!(lock.locks.load(Ordering::SeqCst), 1);
        assert_eq!(lock.depth.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let (mut overlay, lock) = overlay();
        assert!(!overlay.close());
        assert!(!overlay.close());
        assert_eq!(lock.unlocks.load(Ordering::SeqCst), 0);
    }
}
