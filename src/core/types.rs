use serde::{Serialize, Deserialize};
use std::fmt;

/// Document identifier. Valid ids are non-negative; the server rejects
/// the rest at add time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub i32);

impl DocId {
    pub fn new(id: i32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for DocId {
    fn from(id: i32) -> Self {
        DocId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle tag fixed when the document is added; no operation mutates
/// it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Per-document record kept alongside the postings
#[derive(Debug, Clone, Copy)]
pub struct DocumentMeta {
    pub rating: i32,      // integer average of the rating samples
    pub status: DocumentStatus,
}

/// One entry of a ranked result list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

/// Index size counters
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexStats {
    pub document_count: usize,  // live documents
    pub term_count: usize,      // distinct indexed words
}
