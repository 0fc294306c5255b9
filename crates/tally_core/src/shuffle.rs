use std::collections::HashMap;

use crate::{MappedPair, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedEntry {
    pub key: Token,
    pub units: Vec<u64>,
}

/// Mapped pairs grouped by exact key equality.
///
/// Iteration order over groups is unspecified; callers that need a stable
/// order must sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shuffled {
    groups: HashMap<Token, Vec<u64>>,
}

impl Shuffled {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the pair's unit to its key's group, creating the group on first sight.
    pub fn insert(&mut self, pair: MappedPair) {
        self.groups.entry(pair.key).or_default().push(pair.unit);
    }

    pub fn units(&self, key: &str) -> Option<&[u64]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of units across all groups.
    pub fn unit_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn into_entries(self) -> Vec<GroupedEntry> {
        self.groups
            .into_iter()
            .map(|(key, units)| GroupedEntry { key, units })
            .collect()
    }
}

impl Extend<MappedPair> for Shuffled {
    fn extend<I: IntoIterator<Item = MappedPair>>(&mut self, iter: I) {
        for pair in iter {
            self.insert(pair);
        }
    }
}

/// Groups the complete set of mapped pairs. Must only be called once every
/// mapper invocation has finished.
pub fn shuffle<I>(pairs: I) -> Shuffled
where
    I: IntoIterator<Item = MappedPair>,
{
    let mut shuffled = Shuffled::new();
    shuffled.extend(pairs);
    shuffled
}
