use std::collections::HashSet;
use std::io::Write;
use tracing::debug;
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::interner::Term;
use crate::search::server::SearchServer;

/// Removes every document whose set of distinct words equals that of a
/// document with a smaller id. Each removed id is reported on `sink` as
/// `Found duplicate document id <id>` and returned, ascending.
///
/// Ids are visited in ascending order, so the first document of an
/// equivalence class is the one that survives.
pub fn remove_duplicates(
    server: &mut SearchServer,
    sink: &mut impl Write,
) -> Result<Vec<DocId>> {
    let mut seen: HashSet<Vec<Term>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in server.document_ids() {
        let words: Vec<Term> = server.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        writeln!(sink, "Found duplicate document id {}", id)?;
        server.remove_document(id);
    }
    if !duplicates.is_empty() {
        debug!(removed = duplicates.len(), "duplicate documents removed");
    }
    Ok(duplicates)
}
