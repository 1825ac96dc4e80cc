//! Ordered entry set keyed by identifier

use super::entry::Entry;
use std::collections::btree_map::{self, BTreeMap};

/// Entries ordered by identifier, unique by identifier.
///
/// Only the identifier decides uniqueness: a later entry with an identifier
/// that is already present is dropped, whatever its other fields hold.
#[derive(Debug, Clone, Default)]
pub struct EntryCollection {
    entries: BTreeMap<String, Entry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` unless its identifier is taken.
    ///
    /// Returns `false` when the entry was dropped.
    pub fn insert(&mut self, entry: Entry) -> bool {
        match self.entries.entry(entry.identifier().to_string()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&Entry> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a Entry;
    type IntoIter = btree_map::Values<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl Extend<Entry> for EntryCollection {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<Entry> for EntryCollection {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}
