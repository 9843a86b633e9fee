use std::collections::BTreeSet;
use rayon::prelude::*;
use crate::analysis::stopword::StopWordSet;
use crate::analysis::tokenizer::{Tokenizer, is_valid_word};
use crate::core::error::{Error, ErrorKind, Result};
use crate::parallel::ExecutionPolicy;

/// A parsed query: de-duplicated plus and minus word sets, borrowed from
/// the raw query text. Iteration over either set is ascending.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: BTreeSet<&'a str>,
    pub minus_words: BTreeSet<&'a str>,
}

/// Classification of one raw query token
struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// Converts raw query text into a [`Query`], dropping stop words and
/// rejecting malformed tokens.
pub struct QueryParser<'s> {
    stop_words: &'s StopWordSet,
}

impl<'s> QueryParser<'s> {
    pub fn new(stop_words: &'s StopWordSet) -> Self {
        QueryParser { stop_words }
    }

    pub fn parse<'a>(&self, tokenizer: &dyn Tokenizer, text: &'a str) -> Result<Query<'a>> {
        self.parse_with_policy(ExecutionPolicy::Sequential, tokenizer, text)
    }

    /// Parses with the given traversal strategy; both strategies yield
    /// equal word sets.
    pub fn parse_with_policy<'a>(
        &self,
        policy: ExecutionPolicy,
        tokenizer: &dyn Tokenizer,
        text: &'a str,
    ) -> Result<Query<'a>> {
        let tokens = tokenizer.tokenize(text);
        let words: Vec<QueryWord<'a>> = match policy {
            ExecutionPolicy::Sequential => tokens
                .iter()
                .map(|&token| self.parse_word(token))
                .collect::<Result<_>>()?,
            ExecutionPolicy::Parallel => tokens
                .par_iter()
                .map(|&token| self.parse_word(token))
                .collect::<Result<_>>()?,
        };

        let mut query = Query::default();
        for word in words {
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.word);
            } else {
                query.plus_words.insert(word.word);
            }
        }
        Ok(query)
    }

    /// A leading `-` marks a minus word. The remainder must be non-empty,
    /// must not start with another `-` and must carry no control bytes.
    fn parse_word<'a>(&self, token: &'a str) -> Result<QueryWord<'a>> {
        let (word, is_minus) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        if word.is_empty() || word.starts_with('-') || !is_valid_word(word) {
            return Err(Error::new(
                ErrorKind::Parse,
                format!("query word {:?} is invalid", token),
            ));
        }
        Ok(QueryWord {
            word,
            is_minus,
            is_stop: self.stop_words.contains(word),
        })
    }
}
