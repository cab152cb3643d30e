use lexis::persist::{load_index, save_index, IndexFormat, IndexPaths};
use lexis::{DirectorySource, Document, DocumentSource, Index, NfkcNormalizer, PruningPolicy};
use std::fs;
use tempfile::tempdir;

fn corpus() -> Vec<Document> {
    vec![
        Document::new("law.txt", "the moral law binds every rational being"),
        Document::new("free.txt", "freedom and law"),
        Document::new("nature.txt", "human nature and the moral sense of human beings"),
        Document::new("land.txt", "the land is wide and the land is old"),
        Document::new("speech.txt", "the use of language shapes moral thought"),
    ]
}

fn names(results: &[lexis::SearchResult<'_>]) -> Vec<String> {
    results.iter().map(|r| r.document.name.clone()).collect()
}

#[test]
fn it_keeps_idf_at_least_one() {
    let idx = Index::build(corpus());
    assert!(idx.term_count() > 0);
    assert!(idx.terms().values().all(|e| e.idf >= 1.0));
    assert!(idx.terms().values().all(|e| e.tf.keys().all(|&d| idx.document(d).is_some())));
}

#[test]
fn it_scores_only_matching_documents() {
    let idx = Index::build(corpus());
    let queries: [&[&str]; 4] = [&["moral", "law"], &["human", "nature"], &["land"], &["use", "of", "language"]];
    for query in queries {
        let results = idx.search(query, 10);
        assert!(!results.is_empty(), "{query:?}");
        let terms = idx.query_terms(query);
        for r in &results {
            assert!(r.score > 0.0);
            assert!(terms.iter().any(|t| idx.tf_log_idf(t, r.doc_id) > 0.0));
        }
        let returned: Vec<_> = results.iter().map(|r| r.doc_id).collect();
        for doc_id in 0..idx.doc_count() as u32 {
            if !returned.contains(&doc_id) {
                assert!(terms.iter().all(|t| idx.tf_log_idf(t, doc_id) <= 0.0));
            }
        }
    }
}

#[test]
fn it_ranks_phrase_matches_first() {
    let idx = Index::build(corpus());
    let results = idx.search(&["human", "nature"], 10);
    assert_eq!(results[0].document.name, "nature.txt");
    let results = idx.search(&["use", "of", "language"], 3);
    assert_eq!(results[0].document.name, "speech.txt");
}

#[test]
fn it_handles_the_law_scenario() {
    // With only two documents "law" is in every one of them and is pruned.
    let two = Index::build(vec![
        Document::new("law.txt", "the moral law binds"),
        Document::new("free.txt", "freedom and law"),
    ]);
    assert!(two.term("law").is_none());
    assert!(two.search(&["law"], 10).is_empty());
    assert_eq!(names(&two.search(&["moral"], 10)), vec!["law.txt"]);

    let three = Index::build(vec![
        Document::new("law.txt", "the moral law binds"),
        Document::new("free.txt", "freedom and law"),
        Document::new("land.txt", "the land is wide"),
    ]);
    let results = three.search(&["law"], 10);
    let mut got = names(&results);
    got.sort();
    assert_eq!(got, vec!["free.txt", "law.txt"]);
    assert!(results.iter().all(|r| r.score > 0.0));
}

#[test]
fn it_returns_nothing_for_unknown_terms_or_zero_limit() {
    let idx = Index::build(corpus());
    assert!(idx.search(&["zzz_nonexistent_term"], 10).is_empty());
    assert!(idx.search(&["law"], 0).is_empty());
    assert!(idx.search(&["moral"], 0).is_empty());
}

#[test]
fn it_returns_all_candidates_under_a_large_limit() {
    let idx = Index::build(corpus());
    let all = idx.search(&["moral"], 1000);
    assert_eq!(all.len(), 3);
    let top = idx.search(&["moral"], 2);
    assert_eq!(names(&top), names(&all[..2]));
}

#[test]
fn it_breaks_ties_by_name() {
    let idx = Index::build(vec![
        Document::new("b.txt", "apple pie"),
        Document::new("a.txt", "apple tart"),
        Document::new("c.txt", "plum jam"),
    ]);
    let results = idx.search(&["apple"], 10);
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(names(&results), vec!["a.txt", "b.txt"]);
}

#[test]
fn it_is_unaffected_by_unrelated_documents() {
    let base = Index::build(corpus());
    let mut docs = corpus();
    docs.push(Document::new("extra.txt", "quantum chromodynamics lattice"));
    let grown = Index::build(docs);

    for term in ["moral", "land", "human"] {
        let a = base.search(&[term], 10);
        let b = grown.search(&[term], 10);
        assert_eq!(names(&a), names(&b));
        for (x, y) in a.iter().zip(&b) {
            assert!((x.score - y.score).abs() < 1e-9);
        }
    }
}

#[test]
fn it_builds_identical_tables_from_identical_input() {
    let a = Index::build(corpus());
    let b = Index::build(corpus());
    assert_eq!(a.terms(), b.terms());
    assert_eq!(a.documents(), b.documents());
}

#[test]
fn it_prunes_relative_to_corpus_size() {
    let docs: Vec<Document> = (0..1000)
        .map(|i| {
            let mut content = format!("w{i} x{i}");
            if i < 100 {
                content.push_str(" common");
            }
            if i < 99 {
                content.push_str(" rare");
            }
            Document::new(format!("d{i:04}"), content)
        })
        .collect();
    let idx = Index::build(docs);
    assert!(idx.term("common").is_none());
    assert!(idx.term("rare").is_some());
    assert!((idx.idf("rare") - 1000.0 / 99.0).abs() < 1e-9);

    let ten: Vec<Document> = (0..10)
        .map(|i| {
            let extra = if i < 9 { " nine" } else { "" };
            Document::new(format!("t{i}"), format!("all y{i}{extra}"))
        })
        .collect();
    let idx = Index::build(ten.clone());
    assert!(idx.term("all").is_none());
    assert!(idx.term("nine").is_some());

    let unpruned = Index::builder().pruning(PruningPolicy::disabled()).build(ten);
    assert!(unpruned.term("all").is_some());
}

#[test]
fn it_round_trips_through_disk() {
    let idx = Index::build(corpus());
    let queries: [&[&str]; 4] = [&["moral", "law"], &["human", "nature"], &["land"], &["the", "use", "of"]];

    for format in [IndexFormat::Bincode, IndexFormat::Json, IndexFormat::Brotli] {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        save_index(&paths, &idx, format).unwrap();
        let loaded = load_index(&paths).unwrap();

        assert_eq!(loaded.doc_count(), idx.doc_count());
        assert_eq!(loaded.term_count(), idx.term_count());
        for q in queries {
            let a = idx.search(q, 10);
            let b = loaded.search(q, 10);
            assert_eq!(names(&a), names(&b), "{format:?} {q:?}");
            for (x, y) in a.iter().zip(&b) {
                assert!((x.score - y.score).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn it_uses_the_injected_normalizer_for_documents_and_queries() {
    let docs = vec![
        Document::new("a.txt", "ﬁle systems"),
        Document::new("b.txt", "network protocols"),
        Document::new("c.txt", "storage engines"),
    ];
    let folded = Index::builder().normalizer(NfkcNormalizer).build(docs.clone());
    assert_eq!(names(&folded.search(&["file"], 10)), vec!["a.txt"]);
    assert_eq!(names(&folded.search(&["ﬁle"], 10)), vec!["a.txt"]);

    let plain = Index::build(docs);
    assert!(plain.search(&["file"], 10).is_empty());

    let shouting = Index::builder().normalizer(|s: &str| s.to_uppercase()).build(vec![
        Document::new("x", "quiet words"),
        Document::new("y", "other text"),
    ]);
    assert!(shouting.term("QUIET").is_some());
    assert_eq!(names(&shouting.search(&["quiet"], 10)), vec!["x"]);
}

#[test]
fn it_finds_non_ascii_words_in_directory_corpora() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "Café ﬁle systems").unwrap();
    fs::write(dir.path().join("b.txt"), "network protocols").unwrap();
    fs::write(dir.path().join("c.txt"), "storage engines").unwrap();
    let docs = DirectorySource::new(dir.path()).load().unwrap();

    let folded = Index::builder().normalizer(NfkcNormalizer).build(docs.clone());
    for q in ["file", "ﬁle", "café", "CAFÉ"] {
        assert_eq!(names(&folded.search(&[q], 10)), vec!["a.txt"], "{q}");
    }

    let plain = Index::build(docs);
    assert_eq!(names(&plain.search(&["café"], 10)), vec!["a.txt"]);
    assert_eq!(names(&plain.search(&["ﬁle"], 10)), vec!["a.txt"]);
    assert!(plain.search(&["file"], 10).is_empty());
}
