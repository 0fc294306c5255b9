/// A single word unit. Owned so tokens never share storage with the source text.
pub type Token = String;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Strips ASCII punctuation without substitution, then splits on whitespace.
///
/// Case is preserved, so `The` and `the` are distinct tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct PunctuationTokenizer;

impl Tokenizer for PunctuationTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let stripped: String = text
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();
        stripped.split_whitespace().map(ToOwned::to_owned).collect()
    }
}
