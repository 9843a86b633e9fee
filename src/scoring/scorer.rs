use std::collections::BTreeMap;
use rayon::prelude::*;
use crate::core::types::{DocId, DocumentStatus, ScoredDocument};
use crate::index::inverted::InvertedIndex;
use crate::parallel::ExecutionPolicy;
use crate::parallel::concurrent_map::ConcurrentMap;
use crate::query::parser::Query;

/// TF·IDF scorer over the inverted index.
///
/// Relevance of a document is `Σ tf(word, doc) · idf(word)` over the
/// plus words it contains; any minus-word hit drops the document. The
/// parallel path fans the plus and minus passes out word by word,
/// accumulating into a sharded map instead of one map under one lock.
pub struct TfIdfScorer<'i> {
    index: &'i InvertedIndex,
    accumulator_shards: usize,
}

impl<'i> TfIdfScorer<'i> {
    pub fn new(index: &'i InvertedIndex, accumulator_shards: usize) -> Self {
        TfIdfScorer { index, accumulator_shards }
    }

    /// `ln(N / df)`. Callers skip words with zero document frequency.
    pub fn inverse_document_freq(&self, word: &str) -> f64 {
        (self.index.document_count() as f64 / self.index.document_frequency(word) as f64).ln()
    }

    /// Scores every document accepted by `predicate` against `query`.
    /// The result is unordered; ranking happens downstream.
    pub fn score<P>(
        &self,
        query: &Query<'_>,
        predicate: P,
        policy: ExecutionPolicy,
    ) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let document_to_relevance = match policy {
            ExecutionPolicy::Sequential => self.score_sequential(query, &predicate),
            ExecutionPolicy::Parallel => self.score_parallel(query, &predicate),
        };

        document_to_relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.index.meta(id).map(|meta| ScoredDocument {
                    id,
                    relevance,
                    rating: meta.rating,
                })
            })
            .collect()
    }

    fn score_sequential<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let inverse_document_freq = self.inverse_document_freq(word);
            for (&id, &term_freq) in postings {
                let Some(meta) = self.index.meta(id) else {
                    continue;
                };
                if predicate(id, meta.status, meta.rating) {
                    *document_to_relevance.entry(id).or_insert(0.0) +=
                        term_freq * inverse_document_freq;
                }
            }
        }

        for word in &query.minus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            for &id in postings.keys() {
                document_to_relevance.remove(&id);
            }
        }
        document_to_relevance
    }

    fn score_parallel<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.accumulator_shards);

        query.plus_words.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            let inverse_document_freq = self.inverse_document_freq(word);
            for (&id, &term_freq) in postings {
                let Some(meta) = self.index.meta(id) else {
                    continue;
                };
                if predicate(id, meta.status, meta.rating) {
                    *accumulator.get(id) += term_freq * inverse_document_freq;
                }
            }
        });

        query.minus_words.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            for &id in postings.keys() {
                accumulator.remove(id);
            }
        });

        accumulator.build_ordinary_map()
    }
}
