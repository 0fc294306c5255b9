use std::collections::HashSet;
use std::sync::Once;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tally_core::{
    shuffle, GroupedEntry, MappedPair, Mapper, PunctuationTokenizer, Reducer, SumReducer,
    Tokenizer, UnitMapper, WordCounts,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tally_logging::initialize_for_tests);
}

fn run_sequential(text: &str) -> WordCounts {
    let tokens = PunctuationTokenizer.tokenize(text);
    let pairs = tokens.into_iter().map(|token| UnitMapper.map(token));
    shuffle(pairs)
        .into_entries()
        .into_iter()
        .map(|entry| SumReducer.reduce(entry))
        .collect()
}

#[test]
fn unit_mapper_emits_one() {
    init_logging();
    assert_eq!(
        UnitMapper.map("word".to_string()),
        MappedPair {
            key: "word".to_string(),
            unit: 1
        }
    );
}

#[test]
fn shuffle_groups_by_exact_key() {
    init_logging();
    let pairs = ["a", "b", "a", "A", "a"]
        .into_iter()
        .map(|word| UnitMapper.map(word.to_string()));
    let shuffled = shuffle(pairs);

    assert_eq!(shuffled.len(), 3);
    assert_eq!(shuffled.unit_count(), 5);
    assert_eq!(shuffled.units("a"), Some(&[1, 1, 1][..]));
    assert_eq!(shuffled.units("A"), Some(&[1][..]));
    assert_eq!(shuffled.units("c"), None);
}

#[test]
fn shuffle_of_nothing_is_empty() {
    init_logging();
    let shuffled = shuffle(Vec::new());
    assert!(shuffled.is_empty());
    assert!(shuffled.into_entries().is_empty());
}

#[test]
fn sum_reducer_adds_units() {
    init_logging();
    let reduced = SumReducer.reduce(GroupedEntry {
        key: "k".to_string(),
        units: vec![1, 1, 3],
    });
    assert_eq!(reduced.key, "k");
    assert_eq!(reduced.count, 5);
}

#[test]
fn sequential_composition_counts_words() {
    init_logging();
    let counts = run_sequential("The cat sat. The cat ran!");
    let expected: WordCounts = [("The", 2), ("cat", 2), ("sat", 1), ("ran", 1)]
        .into_iter()
        .collect();
    assert_eq!(counts, expected);
}

proptest! {
    #[test]
    fn counts_sum_to_token_total(text in "[a-cA-C .,!?\n]{0,200}") {
        let tokens = PunctuationTokenizer.tokenize(&text);
        let counts = run_sequential(&text);
        prop_assert_eq!(counts.total(), tokens.len() as u64);
    }

    #[test]
    fn one_entry_per_distinct_token(text in "[a-dA-D '\t\n]{0,200}") {
        let distinct: HashSet<String> = PunctuationTokenizer.tokenize(&text).into_iter().collect();
        let counts = run_sequential(&text);
        prop_assert_eq!(counts.len(), distinct.len());
    }

    #[test]
    fn repeated_runs_agree(text in "\\PC{0,120}") {
        prop_assert_eq!(run_sequential(&text), run_sequential(&text));
    }
}
