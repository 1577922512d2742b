use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::catalogue::DEFAULT_ALIASES;

/// Maps short names to canonical slugs.
///
/// The table may be written to at any time, including while other threads resolve
/// references through it. Writes replace whole entries under a lock, so a reader
/// sees either the old slug or the new one. Concurrent writes to the same alias are
/// resolved as last-writer-wins.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: RwLock<HashMap<String, String>>,
}

impl AliasTable {
    pub fn new() -> AliasTable {
        AliasTable::default()
    }

    /// A table seeded with the built-in aliases
    pub fn with_defaults() -> AliasTable {
        let table = AliasTable::new();

        for (alias, slug) in DEFAULT_ALIASES.iter() {
            table.register(alias, slug);
        }

        table
    }

    /// Inserts or overwrites an alias. The slug is not checked against the registry;
    /// a dangling alias only fails once it is resolved.
    pub fn register(&self, alias: &str, slug: &str) {
        // A panicking writer cannot leave a partial entry behind, so the map is
        // still consistent after poisoning.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = entries.insert(alias.to_string(), slug.to_string()) {
            if previous != slug {
                debug!(alias, previous = %previous, slug, "alias overwritten");
            }
        }
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, alias: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        entries.get(alias).cloned()
    }

    /// A snapshot of every alias, sorted by alias
    pub fn entries(&self) -> Vec<(String, String)> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        let mut snapshot: Vec<(String, String)> = entries
            .iter()
            .map(|(alias, slug)| (alias.clone(), slug.clone()))
            .collect();

        snapshot.sort();
        snapshot
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
