use crate::{GroupedEntry, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedPair {
    pub key: Token,
    pub count: u64,
}

/// Folds one group into its final count. Same purity contract as [`crate::Mapper`].
pub trait Reducer: Send + Sync {
    fn reduce(&self, entry: GroupedEntry) -> ReducedPair;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SumReducer;

impl Reducer for SumReducer {
    fn reduce(&self, entry: GroupedEntry) -> ReducedPair {
        ReducedPair {
            count: entry.units.iter().sum(),
            key: entry.key,
        }
    }
}
