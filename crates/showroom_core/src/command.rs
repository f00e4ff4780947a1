//! Command surface for user actions
//!
//! Interactions arrive as dot-namespaced textual commands (`nav.select 2`,
//! `gallery.room Kitchen`) and parse into a closed, typed set the session
//! dispatches. Parsing is pure so drivers and tests share it.

use crate::catalog::CategoryId;
use crate::gallery::RecordId;
use thiserror::Error;

/// A parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click a category card
    NavSelect(CategoryId),
    /// Return from the drilled level
    NavBack,
    /// Set or clear the category facet
    GalleryRoom(Option<String>),
    /// Set or clear the style facet
    GalleryStyle(Option<String>),
    /// Clear both facets
    GalleryClear,
    /// Extend the visible window one page
    GalleryMore,
    /// Re-invoke the record source after a failed fetch
    GalleryRetry,
    /// Replace the record collection wholesale
    GalleryRefresh,
    /// Expand a gallery record in the overlay
    GalleryOpen(RecordId),
    /// Dismiss the overlay
    OverlayClose,
    /// Invoke the footer contact trigger
    Contact,
    /// Toggle ambient audio mute
    ToggleMute,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{0} requires an argument")]
    MissingArg(&'static str),

    #[error("{command}: invalid argument {value:?}")]
    BadArg {
        command: &'static str,
        value: String,
    },
}

impl Command {
    pub const NAV_SELECT: &'static str = "nav.select";
    pub const NAV_BACK: &'static str = "nav.back";
    pub const GALLERY_ROOM: &'static str = "gallery.room";
    pub const GALLERY_STYLE: &'static str = "gallery.style";
    pub const GALLERY_CLEAR: &'static str = "gallery.clear";
    pub const GALLERY_MORE: &'static str = "gallery.more";
    pub const GALLERY_RETRY: &'static str = "gallery.retry";
    pub const GALLERY_REFRESH: &'static str = "gallery.refresh";
    pub const GALLERY_OPEN: &'static str = "gallery.open";
    pub const OVERLAY_CLOSE: &'static str = "overlay.close";
    pub const APP_CONTACT: &'static str = "app.contact";
    pub const APP_MUTE: &'static str = "app.mute";

    /// Parse one command line. Facet commands take the rest of the line
    /// as the value ("gallery.style Art Deco"); "all" clears the facet.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            Self::NAV_SELECT => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArg(Self::NAV_SELECT));
                }
                let id = rest.parse::<u32>().map_err(|_| CommandError::BadArg {
                    command: Self::NAV_SELECT,
                    value: rest.to_string(),
                })?;
                Ok(Command::NavSelect(CategoryId(id)))
            }
            Self::NAV_BACK => Ok(Command::NavBack),
            Self::GALLERY_ROOM => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArg(Self::GALLERY_ROOM));
                }
                Ok(Command::GalleryRoom(parse_facet(rest)))
            }
            Self::GALLERY_STYLE => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArg(Self::GALLERY_STYLE));
                }
                Ok(Command::GalleryStyle(parse_facet(rest)))
            }
            Self::GALLERY_CLEAR => Ok(Command::GalleryClear),
            Self::GALLERY_MORE => Ok(Command::GalleryMore),
            Self::GALLERY_RETRY => Ok(Command::GalleryRetry),
            Self::GALLERY_REFRESH => Ok(Command::GalleryRefresh),
            Self::GALLERY_OPEN => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArg(Self::GALLERY_OPEN));
                }
                Ok(Command::GalleryOpen(RecordId(rest.to_string())))
            }
            Self::OVERLAY_CLOSE => Ok(Command::OverlayClose),
            Self::APP_CONTACT => Ok(Command::Contact),
            Self::APP_MUTE => Ok(Command::ToggleMute),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_facet(value: &str) -> Option<String> {
    if value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value.to_string())
    }
}
