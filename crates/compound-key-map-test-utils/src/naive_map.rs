use crate::test_entry::TestEntry;
use compound_key_map::{CompoundKey, errors::DuplicateEntry};

/// A naive, inefficient map that acts as an oracle for property-based tests.
///
/// Entries are stored in a vector and every operation is a linear scan
/// comparing both key parts, so this doesn't rely on key packing at all.
#[derive(Debug, Default)]
pub struct NaiveMap {
    entries: Vec<TestEntry>,
}

impl NaiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry, returning the previous value for its key pair.
    pub fn insert(&mut self, entry: TestEntry) -> Option<String> {
        match self.position(entry.a, entry.b) {
            Some(index) => {
                Some(std::mem::replace(&mut self.entries[index], entry).value)
            }
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn insert_unique(
        &mut self,
        entry: TestEntry,
    ) -> Result<(), DuplicateEntry<String, &String>> {
        match self.position(entry.a, entry.b) {
            Some(index) => Err(DuplicateEntry::__internal_new(
                CompoundKey::pack(entry.a, entry.b),
                entry.value,
                &self.entries[index].value,
            )),
            None => {
                self.entries.push(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, a: i32, b: i32) -> Option<&String> {
        self.entries.iter().find(|e| e.a == a && e.b == b).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, a: i32, b: i32) -> Option<&mut String> {
        self.entries
            .iter_mut()
            .find(|e| e.a == a && e.b == b)
            .map(|e| &mut e.value)
    }

    pub fn remove(&mut self, a: i32, b: i32) -> Option<String> {
        let index = self.position(a, b)?;
        Some(self.entries.remove(index).value)
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(i32, i32, &mut String) -> bool,
    {
        self.entries.retain_mut(|e| f(e.a, e.b, &mut e.value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `(a, b, &value)` triples sorted by key pair.
    pub fn sorted_triples(&self) -> Vec<(i32, i32, &String)> {
        let mut triples =
            self.entries.iter().map(TestEntry::as_triple).collect::<Vec<_>>();
        triples.sort();
        triples
    }

    fn position(&self, a: i32, b: i32) -> Option<usize> {
        self.entries.iter().position(|e| e.a == a && e.b == b)
    }
}
