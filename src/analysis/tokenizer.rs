pub trait Tokenizer: Send + Sync {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    fn name(&self) -> &str;
}

/// Splits on runs of ASCII space. No other whitespace class is
/// recognized; tabs and newlines stay inside their token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(' ').filter(|word| !word.is_empty()).collect()
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// A word is valid when none of its bytes is an ASCII control character.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|byte| byte < b' ')
}
