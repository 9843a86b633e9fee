use std::collections::VecDeque;
use crate::core::error::Result;
use crate::core::types::{DocId, DocumentStatus, ScoredDocument};
use crate::search::server::SearchServer;

/// How many recent requests the history retains
const REQUEST_CAPACITY: usize = 1440;

struct QueryRecord {
    raw_query: String,
    found: bool,
}

/// Bounded history of the most recent ranked queries against one
/// server. At capacity, adding a request evicts the oldest one. A
/// failing query propagates its error and is not recorded.
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<QueryRecord>,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        RequestQueue { server, requests: VecDeque::new() }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents(raw_query)?;
        Ok(self.record(raw_query, result))
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents_with_status(raw_query, status)?;
        Ok(self.record(raw_query, result))
    }

    pub fn add_find_request_with_predicate<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let result = self.server.find_top_documents_with_predicate(raw_query, predicate)?;
        Ok(self.record(raw_query, result))
    }

    /// Retained requests that produced no results
    pub fn no_result_count(&self) -> usize {
        self.requests.iter().filter(|record| !record.found).count()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Retained raw queries, oldest first
    pub fn recent_queries(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().map(|record| record.raw_query.as_str())
    }

    fn record(&mut self, raw_query: &str, result: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
        if self.requests.len() == REQUEST_CAPACITY {
            self.requests.pop_front();
        }
        self.requests.push_back(QueryRecord {
            raw_query: raw_query.to_string(),
            found: !result.is_empty(),
        });
        result
    }
}
