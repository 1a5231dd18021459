//! Static overrides prepended to every render.

use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// User-maintained content placed verbatim at the top of the hosts file.
/// Held as raw bytes: the file is opaque and need not be valid UTF-8.
/// Loaded once at startup and never re-read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticOverlay {
    bytes: Vec<u8>,
}

impl StaticOverlay {
    /// Wrap already-loaded overlay content.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// An overlay with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the overlay from `path`.
    ///
    /// A missing or unreadable file is logged and yields an empty overlay;
    /// container entries are still managed without user overrides.
    pub fn load(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => {
                info!(path = %path.display(), bytes = bytes.len(), "loaded static overlay");
                Self { bytes }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "static overlay unavailable, continuing without it");
                Self::empty()
            }
        }
    }

    /// Raw overlay content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when the overlay has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
