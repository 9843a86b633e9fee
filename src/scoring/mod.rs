pub mod ranker;
pub mod scorer;

/// Ranked queries return at most this many documents
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance difference below which two documents tie and rating decides
pub const RELEVANCE_ACCURACY: f64 = 1e-6;
