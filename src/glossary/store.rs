/*!
 * In-memory registry of named glossaries.
 *
 * The store lives as long as the session that owns it; nothing is persisted.
 * Loading a name that already exists replaces its entry list wholesale.
 * Glossaries are held behind `Arc` so a reader keeps a consistent snapshot
 * while a writer swaps in a new list.
 */

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use super::model::{Glossary, GlossaryEntry, GlossarySummary};

#[derive(Debug, Default)]
struct StoreInner {
    /// Glossaries in first-load order
    glossaries: Vec<Arc<Glossary>>,

    /// Name to position in `glossaries`
    index: HashMap<String, usize>,
}

/// Registry of glossaries keyed by name
#[derive(Debug, Default)]
pub struct GlossaryStore {
    inner: RwLock<StoreInner>,
}

impl GlossaryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the named glossary.
    ///
    /// A replaced glossary keeps its position in `list`.
    pub fn load(&self, name: &str, entries: Vec<GlossaryEntry>) {
        let glossary = Arc::new(Glossary::new(name, entries));
        let count = glossary.len();

        let mut inner = self.inner.write();
        match inner.index.get(name).copied() {
            Some(position) => {
                inner.glossaries[position] = glossary;
                debug!("Replaced glossary '{}' ({} entries)", name, count);
            }
            None => {
                let position = inner.glossaries.len();
                inner.glossaries.push(glossary);
                inner.index.insert(name.to_string(), position);
                debug!("Loaded glossary '{}' ({} entries)", name, count);
            }
        }
    }

    /// Look up a glossary by name.
    pub fn get(&self, name: &str) -> Option<Arc<Glossary>> {
        let inner = self.inner.read();
        inner
            .index
            .get(name)
            .map(|&position| Arc::clone(&inner.glossaries[position]))
    }

    /// Names and entry counts in load order.
    pub fn list(&self) -> Vec<(String, usize)> {
        self.inner
            .read()
            .glossaries
            .iter()
            .map(|glossary| (glossary.name.clone(), glossary.len()))
            .collect()
    }

    /// Number of distinct glossary names held.
    pub fn size(&self) -> usize {
        self.inner.read().glossaries.len()
    }

    /// Reporting view of every glossary, in load order.
    pub fn summaries(&self) -> Vec<GlossarySummary> {
        self.inner
            .read()
            .glossaries
            .iter()
            .map(|glossary| glossary.summary())
            .collect()
    }

    /// Consistent snapshot of every glossary, in load order.
    pub fn snapshot(&self) -> Vec<Arc<Glossary>> {
        self.inner.read().glossaries.clone()
    }
}
