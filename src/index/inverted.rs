use std::collections::{BTreeMap, BTreeSet, HashMap};
use rayon::prelude::*;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, DocumentMeta, DocumentStatus};
use crate::index::interner::{Term, TermInterner};

/// Inverted index over short text documents.
///
/// Postings are kept in both directions so removal and per-document
/// lookups never scan the vocabulary: `word → document → tf` and
/// `document → word → tf` hold the same entries at all times. Term
/// frequency of a word in a document is its count divided by the
/// document's token count, so the frequencies of one document sum to 1.
#[derive(Debug)]
pub struct InvertedIndex {
    interner: TermInterner,
    word_to_document_freqs: HashMap<Term, BTreeMap<DocId, f64>>,
    document_to_word_freqs: BTreeMap<DocId, BTreeMap<Term, f64>>,
    documents: HashMap<DocId, DocumentMeta>,
    document_ids: BTreeSet<DocId>,
    empty_freqs: BTreeMap<Term, f64>,  // view returned for unknown ids
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            interner: TermInterner::new(),
            word_to_document_freqs: HashMap::new(),
            document_to_word_freqs: BTreeMap::new(),
            documents: HashMap::new(),
            document_ids: BTreeSet::new(),
            empty_freqs: BTreeMap::new(),
        }
    }

    /// Indexes a document from its already-filtered words.
    ///
    /// `words` must not contain stop words or invalid words; a document
    /// whose words were all stop words indexes with metadata only.
    pub fn add(&mut self, id: DocId, words: &[&str], meta: DocumentMeta) -> Result<()> {
        if id.value() < 0 || self.documents.contains_key(&id) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("document id {} is negative or already present", id),
            ));
        }
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            let forward = self.document_to_word_freqs.entry(id).or_default();
            for word in words {
                let term = self.interner.intern(word);
                *self
                    .word_to_document_freqs
                    .entry(term.clone())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += inv_word_count;
                *forward.entry(term).or_insert(0.0) += inv_word_count;
            }
        }
        self.documents.insert(id, meta);
        self.document_ids.insert(id);
        Ok(())
    }

    /// Erases the document and all of its postings. Unknown ids are a
    /// no-op.
    pub fn remove(&mut self, id: DocId) {
        if !self.document_ids.contains(&id) {
            return;
        }
        if let Some(forward) = self.document_to_word_freqs.remove(&id) {
            for term in forward.keys() {
                if let Some(postings) = self.word_to_document_freqs.get_mut(term.as_str()) {
                    postings.remove(&id);
                    if postings.is_empty() {
                        self.word_to_document_freqs.remove(term.as_str());
                        self.interner.release(term.as_str());
                    }
                }
            }
        }
        self.documents.remove(&id);
        self.document_ids.remove(&id);
    }

    /// Data-parallel variant of [`remove`](Self::remove); the final
    /// state is identical.
    ///
    /// Disjoint `&mut` access to posting maps selected by key is not
    /// expressible, so this sweeps the whole postings table; each map is
    /// touched by exactly one task.
    pub fn remove_par(&mut self, id: DocId) {
        if !self.document_ids.contains(&id) {
            return;
        }
        if let Some(forward) = self.document_to_word_freqs.remove(&id) {
            self.word_to_document_freqs
                .par_iter_mut()
                .for_each(|(term, postings)| {
                    if forward.contains_key(term.as_str()) {
                        postings.remove(&id);
                    }
                });
            for term in forward.keys() {
                if self
                    .word_to_document_freqs
                    .get(term.as_str())
                    .is_some_and(BTreeMap::is_empty)
                {
                    self.word_to_document_freqs.remove(term.as_str());
                    self.interner.release(term.as_str());
                }
            }
        }
        self.documents.remove(&id);
        self.document_ids.remove(&id);
    }

    /// Word frequencies of one document; an empty view for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<Term, f64> {
        self.document_to_word_freqs.get(&id).unwrap_or(&self.empty_freqs)
    }

    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_document_freqs.get(word)
    }

    /// Number of documents containing `word`
    pub fn document_frequency(&self, word: &str) -> usize {
        self.word_to_document_freqs.get(word).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, word: &str, id: DocId) -> bool {
        self.postings(word).is_some_and(|postings| postings.contains_key(&id))
    }

    /// Canonical handle of an indexed word
    pub fn term(&self, word: &str) -> Option<Term> {
        self.word_to_document_freqs
            .get_key_value(word)
            .map(|(term, _)| term.clone())
    }

    pub fn contains_document(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn meta(&self, id: DocId) -> Option<DocumentMeta> {
        self.documents.get(&id).copied()
    }

    pub fn status(&self, id: DocId) -> Option<DocumentStatus> {
        self.documents.get(&id).map(|meta| meta.status)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.document_ids.iter().copied()
    }

    /// Distinct indexed words
    pub fn term_count(&self) -> usize {
        self.interner.len()
    }

    /// All indexed words, in no particular order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.word_to_document_freqs.keys()
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        InvertedIndex::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> DocumentMeta {
        DocumentMeta { rating: 0, status: DocumentStatus::Actual }
    }

    #[test]
    fn add_accumulates_term_frequencies() {
        let mut index = InvertedIndex::new();
        index.add(DocId(4), &["pet", "rat", "rat", "rat"], meta()).unwrap();

        let freqs = index.word_frequencies(DocId(4));
        assert_eq!(freqs.len(), 2);
        assert!((freqs["pet"] - 0.25).abs() < 1e-12);
        assert!((freqs["rat"] - 0.75).abs() < 1e-12);
        assert_eq!(index.document_frequency("rat"), 1);
    }

    #[test]
    fn add_rejects_negative_and_duplicate_ids() {
        let mut index = InvertedIndex::new();
        assert_eq!(
            index.add(DocId(-1), &["word"], meta()).unwrap_err().kind,
            ErrorKind::InvalidArgument
        );
        index.add(DocId(1), &["word"], meta()).unwrap();
        assert_eq!(
            index.add(DocId(1), &["other"], meta()).unwrap_err().kind,
            ErrorKind::InvalidArgument
        );
        assert_eq!(index.document_count(), 1);
        assert_eq!(index.document_frequency("other"), 0);
    }

    #[test]
    fn both_posting_directions_agree() {
        let mut index = InvertedIndex::new();
        index.add(DocId(1), &["funny", "pet"], meta()).unwrap();
        index.add(DocId(2), &["funny", "rat"], meta()).unwrap();

        for id in index.ids().collect::<Vec<_>>() {
            for (term, tf) in index.word_frequencies(id) {
                let postings = index.postings(term.as_str()).unwrap();
                assert_eq!(postings.get(&id), Some(tf));
            }
        }
        assert_eq!(index.document_frequency("funny"), 2);
    }

    #[test]
    fn remove_erases_postings_and_releases_words() {
        let mut index = InvertedIndex::new();
        index.add(DocId(1), &["funny", "pet"], meta()).unwrap();
        index.add(DocId(2), &["funny", "rat"], meta()).unwrap();

        index.remove(DocId(2));
        assert_eq!(index.document_count(), 1);
        assert_eq!(index.document_frequency("funny"), 1);
        assert_eq!(index.document_frequency("rat"), 0);
        assert_eq!(index.term_count(), 2);
        assert!(index.word_frequencies(DocId(2)).is_empty());

        // idempotent
        index.remove(DocId(2));
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn parallel_remove_matches_sequential_remove() {
        let corpus: [(i32, &[&str]); 3] = [
            (1, &["funny", "pet", "rat"]),
            (2, &["funny", "curly", "hair"]),
            (3, &["nasty", "rat"]),
        ];

        let mut sequential = InvertedIndex::new();
        let mut parallel = InvertedIndex::new();
        for (id, words) in corpus {
            sequential.add(DocId(id), words, meta()).unwrap();
            parallel.add(DocId(id), words, meta()).unwrap();
        }
        sequential.remove(DocId(2));
        parallel.remove_par(DocId(2));

        assert_eq!(
            sequential.ids().collect::<Vec<_>>(),
            parallel.ids().collect::<Vec<_>>()
        );
        assert_eq!(sequential.term_count(), parallel.term_count());
        for id in sequential.ids().collect::<Vec<_>>() {
            assert_eq!(sequential.word_frequencies(id), parallel.word_frequencies(id));
        }
    }

    #[test]
    fn all_stop_word_document_holds_metadata_only() {
        let mut index = InvertedIndex::new();
        index.add(DocId(7), &[], meta()).unwrap();
        assert_eq!(index.document_count(), 1);
        assert!(index.word_frequencies(DocId(7)).is_empty());
        assert_eq!(index.term_count(), 0);
        assert!(index.contains_document(DocId(7)));
    }
}
