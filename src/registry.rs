//! In-memory registry of live containers.
//!
//! The registry is owned by the engine and mutated only from its event loop,
//! so it carries no internal locking.

use indexmap::IndexMap;
use tracing::debug;

/// Resolvable identity of one running container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Host name, without the runtime's leading `/`.
    pub name: String,
    /// Address as reported by the runtime. May be empty.
    pub address: String,
}

impl HostEntry {
    /// Build an entry from a runtime-reported container name and address.
    ///
    /// Docker reports names as `/web`; the single leading separator is dropped.
    pub fn from_runtime(name: &str, address: &str) -> Self {
        Self {
            name: name.strip_prefix('/').unwrap_or(name).to_string(),
            address: address.to_string(),
        }
    }
}

/// Container id -> host entry, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: IndexMap<String, HostEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for a container.
    /// A replaced entry keeps its position. Returns the previous entry, if any.
    pub fn upsert(&mut self, id: &str, entry: HostEntry) -> Option<HostEntry> {
        debug!(container_id = id, name = %entry.name, address = %entry.address, "upserting container");
        self.entries.insert(id.to_string(), entry)
    }

    /// Remove a container. Returns the removed entry, if it was present.
    pub fn remove(&mut self, id: &str) -> Option<HostEntry> {
        let removed = self.entries.shift_remove(id);
        if removed.is_some() {
            debug!(container_id = id, "removed container");
        }
        removed
    }

    /// Look up the entry for a container.
    pub fn get(&self, id: &str) -> Option<&HostEntry> {
        self.entries.get(id)
    }

    /// Check whether a container is known.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of known containers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no containers are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(container id, entry)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Iterate over entries in registry order.
    pub fn entries(&self) -> impl Iterator<Item = &HostEntry> {
        self.entries.values()
    }
}
