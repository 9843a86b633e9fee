use rayon::prelude::*;
use crate::core::error::Result;
use crate::core::types::ScoredDocument;
use crate::parallel::ExecutionPolicy;
use crate::search::server::SearchServer;

/// Runs one ranked query per input string. Output order matches input
/// order under either policy.
pub fn process_queries(
    policy: ExecutionPolicy,
    server: &SearchServer,
    queries: &[String],
) -> Result<Vec<Vec<ScoredDocument>>> {
    match policy {
        ExecutionPolicy::Sequential => queries
            .iter()
            .map(|query| server.find_top_documents(query))
            .collect(),
        ExecutionPolicy::Parallel => queries
            .par_iter()
            .map(|query| server.find_top_documents(query))
            .collect(),
    }
}

/// Concatenation of [`process_queries`] results, per-query order and
/// query order preserved; capacity is reserved from a size reduction
/// over the per-query result counts.
pub fn process_queries_joined(
    policy: ExecutionPolicy,
    server: &SearchServer,
    queries: &[String],
) -> Result<Vec<ScoredDocument>> {
    let results = process_queries(policy, server, queries)?;
    let document_count: usize = match policy {
        ExecutionPolicy::Sequential => results.iter().map(Vec::len).sum(),
        ExecutionPolicy::Parallel => results.par_iter().map(Vec::len).sum(),
    };

    let mut joined = Vec::with_capacity(document_count);
    for result in results {
        joined.extend(result);
    }
    Ok(joined)
}
