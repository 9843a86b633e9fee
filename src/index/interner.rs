use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An indexed word. Clones share the backing bytes, which keep a stable
/// address until the last clone is dropped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(Arc<str>);

impl Term {
    pub fn new(word: &str) -> Self {
        Term(Arc::from(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for Term {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backing store for indexed words.
///
/// Each distinct word is stored once; every map in the index keys into
/// the same allocation through cheap `Term` clones.
#[derive(Debug, Default)]
pub struct TermInterner {
    terms: HashSet<Term>,
}

impl TermInterner {
    pub fn new() -> Self {
        TermInterner::default()
    }

    /// Canonical handle for `word`, stored on first sight.
    pub fn intern(&mut self, word: &str) -> Term {
        if let Some(term) = self.terms.get(word) {
            term.clone()
        } else {
            let term = Term::new(word);
            self.terms.insert(term.clone());
            term
        }
    }

    /// Drops the canonical entry. The bytes are freed once the last
    /// outstanding handle goes away.
    pub fn release(&mut self, word: &str) {
        self.terms.remove(word);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.terms.contains(word)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
