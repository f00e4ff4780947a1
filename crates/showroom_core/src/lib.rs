//! Showroom Core Engine
//!
//! This crate contains:
//! - Category catalog and two-level navigation
//! - Filtered media gallery with lazy pagination
//! - Detail overlay and session-scoped UI flags
//! - Command surface
//! - Configuration
//! - Error types
//! - Record source boundary

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod gallery;
pub mod lazyload;
pub mod navigation;
pub mod overlay;
pub mod scheduler;
pub mod session;
pub mod source;

pub use catalog::{CatalogError, CategoryId, CategoryNode, CategorySpec, CategoryTree};
pub use command::{Command, CommandError};
pub use config::{EngineConfig, GalleryConfig, GeneralConfig, TransitionConfig};
pub use error::EngineError;
pub use gallery::{FacetFilters, FetchState, MediaRecord, RecordFilterEngine, RecordId};
pub use lazyload::{visibility_feed, LazyLoadCoordinator};
pub use navigation::{
    BackOutcome, Level, NavigationController, SelectOutcome, TransitionPhase,
};
pub use overlay::{DetailOverlay, OverlayItem, ScrollLock};
pub use scheduler::{ManualStepTimer, StepTimer, TimerToken, TokioStepTimer, TransitionStep};
pub use session::{Session, SessionFlags};
pub use source::{FetchError, JsonRecordSource, RecordSource, StaticRecordSource};
