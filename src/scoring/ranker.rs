use std::cmp::Ordering;
use crate::core::types::ScoredDocument;
use crate::scoring::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_ACCURACY};

/// Ranked order: relevance descending; inside the accuracy band the
/// rating decides, also descending.
pub fn compare(lhs: &ScoredDocument, rhs: &ScoredDocument) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_ACCURACY {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.partial_cmp(&lhs.relevance).unwrap_or(Ordering::Equal)
    }
}

/// Sorts into ranked order and cuts to the result limit.
pub fn sort_and_truncate(documents: &mut Vec<ScoredDocument>) {
    documents.sort_by(compare);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
}
