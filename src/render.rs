//! Serialization of overlay + registry into the hosts file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::HostsError;
use crate::metrics;
use crate::overlay::StaticOverlay;
use crate::registry::Registry;

/// Blank lines between the overlay and the managed entries.
pub const SEPARATOR: &[u8] = b"\n\n\n";

/// Build the full hosts file contents.
///
/// Layout: overlay bytes (line-terminated if non-empty), three blank lines,
/// then `<address> <name>` per registry entry in registry order.
pub fn render(overlay: &StaticOverlay, registry: &Registry) -> Vec<u8> {
    let prefix = overlay.as_bytes();
    let mut out = Vec::with_capacity(prefix.len() + SEPARATOR.len() + registry.len() * 32);

    out.extend_from_slice(prefix);
    if !prefix.is_empty() && !prefix.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(SEPARATOR);

    for entry in registry.entries() {
        out.extend_from_slice(entry.address.as_bytes());
        out.push(b' ');
        out.extend_from_slice(entry.name.as_bytes());
        out.push(b'\n');
    }

    out
}

/// Writes rendered contents to the target hosts file.
#[derive(Debug, Clone)]
pub struct HostsWriter {
    target: PathBuf,
}

impl HostsWriter {
    /// Create a writer for `target`.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Target path.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Render and replace the target file.
    pub fn write(&self, overlay: &StaticOverlay, registry: &Registry) -> Result<(), HostsError> {
        let timer = metrics::Timer::start();
        let content = render(overlay, registry);

        atomic_write_file(&self.target, &content).map_err(|source| HostsError::Render {
            path: self.target.clone(),
            source,
        })?;

        metrics::record_render(registry.len(), timer.elapsed());
        debug!(
            path = %self.target.display(),
            entries = registry.len(),
            content = %String::from_utf8_lossy(&content),
            "wrote hosts file"
        );
        Ok(())
    }
}

/// Path of the staging file written before the rename.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `data` to `path` and flush it to disk.
fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Atomically writes `data` to `path` via a synced `.tmp` sibling + rename.
fn atomic_write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp_path = staging_path(path);
    if let Err(e) = write_synced(&tmp_path, data) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp_path);
    })
}
