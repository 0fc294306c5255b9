//! Word tally core: the pure map-reduce stages and their data model.
mod counts;
mod map;
mod reduce;
mod shuffle;
mod token;

pub use counts::{top_n, RankedWord, WordCounts};
pub use map::{MappedPair, Mapper, UnitMapper};
pub use reduce::{ReducedPair, Reducer, SumReducer};
pub use shuffle::{shuffle, GroupedEntry, Shuffled};
pub use token::{PunctuationTokenizer, Token, Tokenizer};
