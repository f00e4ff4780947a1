//! Session wiring
//!
//! One mounted presentation session: the catalog, the navigation
//! controller, the gallery, the overlay and the shared UI flags, created
//! together on mount and torn down together on unmount. The flags object
//! replaces what the original surface kept as module-level globals
//! (scroll lock, audio mute, footer contact trigger) with state scoped to
//! the session that owns it.

use crate::catalog::CategoryTree;
use crate::command::Command;
use crate::config::EngineConfig;
use crate::gallery::RecordFilterEngine;
use crate::lazyload::LazyLoadCoordinator;
use crate::navigation::{NavigationController, SelectOutcome};
use crate::overlay::{DetailOverlay, OverlayItem, ScrollLock};
use crate::scheduler::{StepTimer, TransitionStep};
use crate::source::RecordSource;
use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use std::sync::Arc;

/// Session-scoped UI flags shared with external collaborators
#[derive(Default)]
pub struct SessionFlags {
    scroll_locked: RwLock<bool>,
    muted: RwLock<bool>,
    footer_contact: RwLock<Option<Box<dyn Fn() + Send + Sync>>>,
}

impl SessionFlags {
    pub fn new(start_muted: bool) -> Self {
        Self {
            scroll_locked: RwLock::new(false),
            muted: RwLock::new(start_muted),
            footer_contact: RwLock::new(None),
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        *self.scroll_locked.read()
    }

    pub fn is_muted(&self) -> bool {
        *self.muted.read()
    }

    pub fn toggle_mute(&self) -> bool {
        let mut muted = self.muted.write();
        *muted = !*muted;
        *muted
    }

    /// Install the opaque footer-contact callback
    pub fn set_footer_contact(&self, trigger: Box<dyn Fn() + Send + Sync>) {
        *self.footer_contact.write() = Some(trigger);
    }

    /// Invoke the footer-contact trigger if one is installed
    pub fn trigger_footer_contact(&self) -> bool {
        match &*self.footer_contact.read() {
            Some(trigger) => {
                trigger();
                true
            }
            None => {
                tracing::debug!("footer contact trigger not installed");
                false
            }
        }
    }
}

impl ScrollLock for SessionFlags {
    fn lock(&self) {
        *self.scroll_locked.write() = true;
    }

    fn unlock(&self) {
        *self.scroll_locked.write() = false;
    }
}

/// A mounted presentation session
pub struct Session<T: StepTimer> {
    pub config: EngineConfig,
    pub catalog: Arc<CategoryTree>,
    pub navigation: NavigationController,
    pub gallery: RecordFilterEngine,
    pub overlay: DetailOverlay,
    pub flags: Arc<SessionFlags>,
    pub timer: T,
    coordinator: LazyLoadCoordinator,
    source: Box<dyn RecordSource + Send + Sync>,
}

impl<T: StepTimer> Session<T> {
    /// Mount a session: build the components and perform the once-per-
    /// session record fetch. A failed fetch leaves the gallery in its
    /// recoverable error state rather than failing the mount.
    pub fn mount(
        config: EngineConfig,
        catalog: Arc<CategoryTree>,
        timer: T,
        source: Box<dyn RecordSource + Send + Sync>,
        visibility: Receiver<bool>,
    ) -> Self {
        let flags = Arc::new(SessionFlags::new(config.general.start_muted));
        let navigation = NavigationController::new(catalog.clone(), &config.transition);
        let mut gallery = RecordFilterEngine::new(&config.gallery);
        gallery.load_from(source.as_ref());
        let overlay = DetailOverlay::new(flags.clone());
        let coordinator = LazyLoadCoordinator::attach(visibility);

        tracing::info!(
            categories = catalog.len(),
            records = gallery.filtered_count(),
            "session mounted"
        );

        Self {
            config,
            catalog,
            navigation,
            gallery,
            overlay,
            flags,
            timer,
            coordinator,
            source,
        }
    }

    /// Route one parsed command into the engine
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::NavSelect(id) => {
                if let SelectOutcome::OpenDetail(id) =
                    self.navigation.select_node(id, &mut self.timer)
                {
                    self.overlay.open(OverlayItem::Category(id));
                }
            }
            Command::NavBack => {
                self.navigation.go_back(&mut self.timer);
            }
            Command::GalleryRoom(room) => self.gallery.set_room(room),
            Command::GalleryStyle(style) => self.gallery.set_style(style),
            Command::GalleryClear => self.gallery.reset(),
            Command::GalleryMore => {
                self.gallery.load_more();
            }
            Command::GalleryRetry => self.gallery.retry(self.source.as_ref()),
            Command::GalleryRefresh => self.gallery.refresh(self.source.as_ref()),
            Command::GalleryOpen(id) => {
                if self.gallery.record(&id).is_some() {
                    self.overlay.open(OverlayItem::Record(id));
                } else {
                    tracing::debug!(%id, "overlay open dropped: unknown record");
                }
            }
            Command::OverlayClose => {
                self.overlay.close();
            }
            Command::Contact => {
                self.flags.trigger_footer_contact();
            }
            Command::ToggleMute => {
                self.flags.toggle_mute();
            }
        }
    }

    /// Advance an in-flight navigation transition
    pub fn on_step(&mut self, step: TransitionStep) {
        self.navigation.on_step(step, &mut self.timer);
    }

    /// Drain queued visibility samples into gallery pagination
    pub fn pump_visibility(&mut self) -> usize {
        self.coordinator.pump(&mut self.gallery)
    }

    /// Unmount: cancel any in-flight transition, dismiss the overlay and
    /// release the subscriptions.
    pub fn unmount(mut self) {
        self.navigation.teardown(&mut self.timer);
        self.overlay.close();
        self.coordinator.detach();
        tracing::info!("session unmounted");
    }
}
