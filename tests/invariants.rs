use proptest::prelude::*;
use lexum::core::types::{DocId, DocumentMeta, DocumentStatus};
use lexum::index::inverted::InvertedIndex;
use lexum::parallel::ExecutionPolicy;
use lexum::search::server::SearchServer;

const STOP_WORDS: &str = "and the";
const VOCABULARY: &[&str] = &[
    "and", "cat", "curly", "dog", "funny", "hair", "nasty", "pet", "rat", "the", "very",
];

#[derive(Debug, Clone)]
enum Op {
    Add { id: i32, words: Vec<&'static str>, ratings: Vec<i32> },
    Remove { id: i32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (
            0..24i32,
            prop::collection::vec(prop::sample::select(VOCABULARY), 1..8),
            prop::collection::vec(-5..10i32, 0..4),
        )
            .prop_map(|(id, words, ratings)| Op::Add { id, words, ratings }),
        1 => (0..24i32).prop_map(|id| Op::Remove { id }),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..40)
}

fn replay(ops: &[Op]) -> SearchServer {
    let mut server = SearchServer::new(STOP_WORDS).unwrap();
    for op in ops {
        match op {
            Op::Add { id, words, ratings } => {
                // duplicate ids are rejected; that path is exercised too
                let _ = server.add_document(
                    DocId(*id),
                    &words.join(" "),
                    DocumentStatus::Actual,
                    ratings,
                );
            }
            Op::Remove { id } => server.remove_document(DocId(*id)),
        }
    }
    server
}

fn observable_state(server: &SearchServer) -> (Vec<(DocId, Vec<(String, f64)>)>, usize) {
    let documents = server
        .document_ids()
        .map(|id| {
            let freqs = server
                .word_frequencies(id)
                .iter()
                .map(|(term, &tf)| (term.to_string(), tf))
                .collect();
            (id, freqs)
        })
        .collect();
    (documents, server.stats().term_count)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ids_iterate_strictly_ascending(ops in ops_strategy()) {
        let server = replay(&ops);
        let ids: Vec<DocId> = server.document_ids().collect();
        prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(ids.len(), server.document_count());
    }

    #[test]
    fn term_frequencies_of_a_document_sum_to_one(ops in ops_strategy()) {
        let server = replay(&ops);
        for id in server.document_ids().collect::<Vec<_>>() {
            let freqs = server.word_frequencies(id);
            if !freqs.is_empty() {
                let sum: f64 = freqs.values().sum();
                prop_assert!((sum - 1.0).abs() < 1e-9, "document {} sums to {}", id, sum);
            }
        }
    }

    #[test]
    fn stop_words_never_appear_in_postings(ops in ops_strategy()) {
        let server = replay(&ops);
        for id in server.document_ids().collect::<Vec<_>>() {
            for term in server.word_frequencies(id).keys() {
                prop_assert!(term.as_str() != "and" && term.as_str() != "the");
            }
        }
    }

    #[test]
    fn remove_is_idempotent(ops in ops_strategy(), id in 0..24i32) {
        let mut once = replay(&ops);
        let mut twice = replay(&ops);
        once.remove_document(DocId(id));
        twice.remove_document(DocId(id));
        twice.remove_document(DocId(id));
        prop_assert_eq!(observable_state(&once), observable_state(&twice));
    }

    #[test]
    fn parallel_remove_equals_sequential_remove(ops in ops_strategy(), id in 0..24i32) {
        let mut sequential = replay(&ops);
        let mut parallel = replay(&ops);
        sequential.remove_document(DocId(id));
        parallel.remove_document_policy(ExecutionPolicy::Parallel, DocId(id));
        prop_assert_eq!(observable_state(&sequential), observable_state(&parallel));
    }

    #[test]
    fn add_then_remove_restores_the_observable_state(
        ops in ops_strategy(),
        words in prop::collection::vec(prop::sample::select(VOCABULARY), 1..8),
        ratings in prop::collection::vec(-5..10i32, 0..4),
    ) {
        let without = replay(&ops);
        let mut with = replay(&ops);

        // an id none of the generated operations can touch
        let id = DocId(1000);
        if with
            .add_document(id, &words.join(" "), DocumentStatus::Actual, &ratings)
            .is_ok()
        {
            with.remove_document(id);
        }
        prop_assert_eq!(observable_state(&without), observable_state(&with));
    }

    #[test]
    fn parallel_find_equals_sequential_find(
        ops in ops_strategy(),
        query_words in prop::collection::vec(
            (any::<bool>(), prop::sample::select(VOCABULARY)),
            1..6,
        ),
    ) {
        let server = replay(&ops);
        let raw_query = query_words
            .iter()
            .map(|(minus, word)| if *minus { format!("-{word}") } else { (*word).to_string() })
            .collect::<Vec<_>>()
            .join(" ");

        let mut sequential = server.find_top_documents(&raw_query).unwrap();
        let mut parallel = server
            .find_top_documents_policy(ExecutionPolicy::Parallel, &raw_query)
            .unwrap();
        prop_assert_eq!(sequential.len(), parallel.len());
        sequential.sort_by_key(|document| document.id);
        parallel.sort_by_key(|document| document.id);
        for (lhs, rhs) in sequential.iter().zip(&parallel) {
            prop_assert_eq!(lhs.id, rhs.id);
            prop_assert_eq!(lhs.rating, rhs.rating);
            prop_assert!((lhs.relevance - rhs.relevance).abs() < 1e-9);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn posting_directions_stay_symmetric(ops in ops_strategy()) {
        let mut index = InvertedIndex::new();
        for op in &ops {
            match op {
                Op::Add { id, words, ratings } => {
                    let filtered: Vec<&str> = words
                        .iter()
                        .copied()
                        .filter(|word| *word != "and" && *word != "the")
                        .collect();
                    let rating = if ratings.is_empty() {
                        0
                    } else {
                        ratings.iter().sum::<i32>() / ratings.len() as i32
                    };
                    let _ = index.add(
                        DocId(*id),
                        &filtered,
                        DocumentMeta { rating, status: DocumentStatus::Actual },
                    );
                }
                Op::Remove { id } => index.remove(DocId(*id)),
            }
        }

        let mut forward_entries = 0usize;
        for id in index.ids().collect::<Vec<_>>() {
            for (term, tf) in index.word_frequencies(id) {
                forward_entries += 1;
                let postings = index.postings(term.as_str());
                prop_assert!(postings.is_some(), "missing postings for {}", term);
                prop_assert_eq!(postings.unwrap().get(&id), Some(tf));
            }
        }

        // no inverted entry exists without its forward mirror
        let inverted_entries: usize = index
            .terms()
            .map(|term| index.document_frequency(term.as_str()))
            .sum();
        prop_assert_eq!(inverted_entries, forward_entries);
        prop_assert_eq!(index.terms().count(), index.term_count());
    }
}
