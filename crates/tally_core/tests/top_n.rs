use pretty_assertions::assert_eq;
use tally_core::{top_n, RankedWord, WordCounts};

fn ranked(word: &str, count: u64) -> RankedWord {
    RankedWord {
        word: word.to_string(),
        count,
    }
}

#[test]
fn ties_break_lexicographically() {
    let counts: WordCounts = [("b", 5), ("c", 1), ("a", 5)].into_iter().collect();
    assert_eq!(top_n(&counts, 2), vec![ranked("a", 5), ranked("b", 5)]);
}

#[test]
fn sorted_descending_by_count() {
    let counts: WordCounts = [("x", 1), ("y", 7), ("z", 3)].into_iter().collect();
    assert_eq!(
        counts.top_n(10),
        vec![ranked("y", 7), ranked("z", 3), ranked("x", 1)]
    );
}

#[test]
fn never_returns_more_than_vocabulary() {
    let counts: WordCounts = [("only", 4)].into_iter().collect();
    assert_eq!(top_n(&counts, 10).len(), 1);
}

#[test]
fn zero_and_empty_yield_nothing() {
    let counts: WordCounts = [("a", 1)].into_iter().collect();
    assert!(top_n(&counts, 0).is_empty());
    assert!(top_n(&WordCounts::new(), 3).is_empty());
}

#[test]
fn uppercase_sorts_before_lowercase_on_ties() {
    let counts: WordCounts = [("the", 2), ("The", 2)].into_iter().collect();
    assert_eq!(top_n(&counts, 2), vec![ranked("The", 2), ranked("the", 2)]);
}
