use std::collections::BTreeMap;
use tracing::{debug, trace};
use crate::analysis::stopword::StopWordSet;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer, is_valid_word};
use crate::core::config::SearchConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, DocumentMeta, DocumentStatus, IndexStats, ScoredDocument};
use crate::index::interner::Term;
use crate::index::inverted::InvertedIndex;
use crate::parallel::ExecutionPolicy;
use crate::query::parser::QueryParser;
use crate::scoring::ranker;
use crate::scoring::scorer::TfIdfScorer;

/// In-memory search server.
///
/// Owns the inverted index and the stop-word set; parses queries,
/// scores with TF·IDF and returns ranked results. Queries take `&self`
/// and may run concurrently; mutations take `&mut self`, so the borrow
/// checker enforces the no-query-during-mutation contract.
pub struct SearchServer {
    config: SearchConfig,
    tokenizer: Box<dyn Tokenizer>,
    stop_words: StopWordSet,
    index: InvertedIndex,
}

impl std::fmt::Debug for SearchServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchServer")
            .field("config", &self.config)
            .field("stop_words", &self.stop_words)
            .field("index", &self.index)
            .finish()
    }
}

impl SearchServer {
    /// Stop words given as one space-separated string.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        let tokenizer = WhitespaceTokenizer;
        let stop_words = StopWordSet::from_words(tokenizer.tokenize(stop_words_text))?;
        Ok(Self::build(stop_words, SearchConfig::default()))
    }

    /// Stop words given as a container; empty entries are dropped.
    pub fn from_stop_words<I>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(Self::build(StopWordSet::from_words(stop_words)?, SearchConfig::default()))
    }

    pub fn with_config(stop_words_text: &str, config: SearchConfig) -> Result<Self> {
        let tokenizer = WhitespaceTokenizer;
        let stop_words = StopWordSet::from_words(tokenizer.tokenize(stop_words_text))?;
        Ok(Self::build(stop_words, config))
    }

    fn build(stop_words: StopWordSet, config: SearchConfig) -> Self {
        SearchServer {
            config,
            tokenizer: Box::new(WhitespaceTokenizer),
            stop_words,
            index: InvertedIndex::new(),
        }
    }

    /// Indexes a document. Fails on a negative or already-present id and
    /// on any invalid word; a failed add leaves the index untouched.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        let words = self.split_into_words_no_stop(text)?;
        let meta = DocumentMeta { rating: average_rating(ratings), status };
        self.index.add(id, &words, meta)?;
        debug!(id = id.value(), words = words.len(), "document added");
        Ok(())
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_policy(ExecutionPolicy::Sequential, raw_query)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_policy_with_status(ExecutionPolicy::Sequential, raw_query, status)
    }

    pub fn find_top_documents_with_predicate<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_policy_with_predicate(
            ExecutionPolicy::Sequential,
            raw_query,
            predicate,
        )
    }

    pub fn find_top_documents_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_policy_with_status(policy, raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_policy_with_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_policy_with_predicate(
            policy,
            raw_query,
            move |_, document_status, _| document_status == status,
        )
    }

    /// Parses, scores and ranks: the top documents accepted by
    /// `predicate`, relevance descending, rating breaking near-ties.
    pub fn find_top_documents_policy_with_predicate<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let parser = QueryParser::new(&self.stop_words);
        let query = parser.parse_with_policy(policy, self.tokenizer.as_ref(), raw_query)?;
        let scorer = TfIdfScorer::new(&self.index, self.config.accumulator_shards);
        let mut documents = scorer.score(&query, predicate, policy);
        ranker::sort_and_truncate(&mut documents);
        trace!(query = raw_query, results = documents.len(), "ranked query executed");
        Ok(documents)
    }

    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<Term>, DocumentStatus)> {
        self.match_document_policy(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Plus words of the query that occur in document `id`, ascending.
    /// A minus-word hit short-circuits to an empty list.
    pub fn match_document_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<Term>, DocumentStatus)> {
        let parser = QueryParser::new(&self.stop_words);
        let query = parser.parse_with_policy(policy, self.tokenizer.as_ref(), raw_query)?;
        let status = self.index.status(id).ok_or_else(|| {
            Error::new(ErrorKind::NotFound, format!("document {} is not in the index", id))
        })?;

        if query.minus_words.iter().any(|word| self.index.contains(word, id)) {
            return Ok((Vec::new(), status));
        }

        let matched = match policy {
            ExecutionPolicy::Sequential => query
                .plus_words
                .iter()
                .filter(|word| self.index.contains(word, id))
                .filter_map(|word| self.index.term(word))
                .collect(),
            ExecutionPolicy::Parallel => {
                use rayon::prelude::*;
                let mut matched: Vec<Term> = query
                    .plus_words
                    .par_iter()
                    .filter(|word| self.index.contains(word, id))
                    .filter_map(|word| self.index.term(word))
                    .collect();
                matched.sort_unstable();
                matched
            }
        };
        Ok((matched, status))
    }

    /// Erases the document and its postings. Unknown ids are a no-op.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_policy(ExecutionPolicy::Sequential, id);
    }

    pub fn remove_document_policy(&mut self, policy: ExecutionPolicy, id: DocId) {
        if !self.index.contains_document(id) {
            return;
        }
        match policy {
            ExecutionPolicy::Sequential => self.index.remove(id),
            ExecutionPolicy::Parallel => self.index.remove_par(id),
        }
        debug!(id = id.value(), "document removed");
    }

    /// Word frequencies of one document; an empty view for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<Term, f64> {
        self.index.word_frequencies(id)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Live ids in ascending order
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.ids()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.index.document_count(),
            term_count: self.index.term_count(),
        }
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in self.tokenizer.tokenize(text) {
            if !is_valid_word(word) {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    format!("word {:?} is invalid", word),
                ));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

impl Default for SearchServer {
    fn default() -> Self {
        SearchServer::build(StopWordSet::default(), SearchConfig::default())
    }
}

fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    ratings.iter().sum::<i32>() / ratings.len() as i32
}
