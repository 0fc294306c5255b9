use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{ReducedPair, Token};

/// The final word -> count mapping of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: HashMap<Token, u64>,
}

/// One row of a top-N listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedWord {
    pub word: Token,
    pub count: u64,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; equals the number of tokens that went in.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn as_map(&self) -> &HashMap<Token, u64> {
        &self.counts
    }

    pub fn into_map(self) -> HashMap<Token, u64> {
        self.counts
    }

    pub fn top_n(&self, n: usize) -> Vec<RankedWord> {
        top_n(self, n)
    }
}

impl From<HashMap<Token, u64>> for WordCounts {
    fn from(counts: HashMap<Token, u64>) -> Self {
        Self { counts }
    }
}

impl FromIterator<ReducedPair> for WordCounts {
    fn from_iter<I: IntoIterator<Item = ReducedPair>>(iter: I) -> Self {
        let counts = iter
            .into_iter()
            .map(|pair| (pair.key, pair.count))
            .collect();
        Self { counts }
    }
}

impl<'a> FromIterator<(&'a str, u64)> for WordCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let counts = iter
            .into_iter()
            .map(|(word, count)| (word.to_owned(), count))
            .collect();
        Self { counts }
    }
}

/// The `n` most frequent words, highest count first.
///
/// Equal counts are ordered by word, ascending in byte order, so the result
/// does not depend on the map's iteration order.
pub fn top_n(counts: &WordCounts, n: usize) -> Vec<RankedWord> {
    if n == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(&str, u64)> = counts.iter().collect();
    ranked.sort_unstable_by(|a, b| rank_order(*a, *b));
    ranked
        .into_iter()
        .take(n)
        .map(|(word, count)| RankedWord {
            word: word.to_owned(),
            count,
        })
        .collect()
}

fn rank_order(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}
