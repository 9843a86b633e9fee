pub mod analysis;
pub mod core;
pub mod index;
pub mod parallel;
pub mod query;
pub mod scoring;
pub mod search;

/*
┌──────────────────────────────────────────────────────────────────────┐
│                         LEXUM ARCHITECTURE                           │
└──────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── FACADE ────────────────────────────────┐
│  struct SearchServer                                                 │
│    config: SearchConfig          // accumulator shard count          │
│    tokenizer: Box<dyn Tokenizer> // ASCII-space word splitting       │
│    stop_words: StopWordSet       // fixed at construction            │
│    index: InvertedIndex          // postings + metadata + id set     │
│                                                                      │
│  add_document ──► tokenize ──► drop stop words ──► index.add         │
│  find_top_documents ──► QueryParser ──► TfIdfScorer ──► ranker       │
│  match_document / remove_document / word_frequencies / stats         │
└──────────────────────────────────────────────────────────────────────┘

┌───────────────────────────── INDEX LAYER ────────────────────────────┐
│  TermInterner                    // one allocation per distinct word │
│  InvertedIndex                                                       │
│    word_to_document_freqs: word → doc → tf                           │
│    document_to_word_freqs: doc → word → tf   (mirror of the above)   │
│    documents: doc → (rating, status)                                 │
│    document_ids: ascending live id set                               │
└──────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── QUERY LAYER ─────────────────────────────┐
│  QueryParser  ──► Query { plus_words, minus_words }  (BTreeSet)      │
│  TfIdfScorer  ──► plus pass accumulates tf·idf, minus pass erases    │
│    sequential: one BTreeMap accumulator                              │
│    parallel:   ConcurrentMap (per-shard mutex), rayon word fan-out   │
│  ranker       ──► relevance desc, rating desc within 1e-6, top 5     │
└──────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── COLLABORATORS ───────────────────────────┐
│  process_queries / process_queries_joined   // batch pipeline        │
│  remove_duplicates                          // word-set equivalence  │
│  RequestQueue                               // bounded query history │
└──────────────────────────────────────────────────────────────────────┘
*/
