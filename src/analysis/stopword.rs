use std::collections::HashSet;
use crate::analysis::tokenizer::is_valid_word;
use crate::core::error::{Error, ErrorKind, Result};

/// Words excluded from indexing and from query processing.
///
/// Fixed at server construction. Empty entries are dropped; a control
/// byte in any entry fails construction.
#[derive(Debug, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn from_words<I>(words: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    format!("stop word {:?} contains a control character", word),
                ));
            }
            set.insert(word.to_string());
        }
        Ok(StopWordSet { words: set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
