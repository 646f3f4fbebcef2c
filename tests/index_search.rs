//! End-to-end tests: build an index over a sample tree and query it.

mod common;

use common::sample_dir;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use trigrep::utils::line_trigrams;
use trigrep::{Error, Index, IndexBuilder, IndexConfig, SearchQueryExecutor, SearchResult, search};

fn build(root: &Path) -> Index {
    IndexBuilder::with_config(root, IndexConfig::quiet())
        .build()
        .unwrap()
}

#[test]
fn test_word_present_in_one_file() {
    let sample = sample_dir();
    let index = build(&sample.root);

    let results = search("Oppenheimer", &index).unwrap();
    assert_eq!(
        results,
        vec![SearchResult::new(sample.path("Oppenheimer/oppenheimer.txt"), 64)]
    );
}

#[test]
fn test_empty_directory() {
    let sample = sample_dir();
    let index = build(&sample.path("Subdirectory/EmptyDirectory"));

    assert_eq!(index.file_count(), 0);
    assert!(search("Oppenheimer", &index).unwrap().is_empty());
}

#[test]
fn test_non_present_string() {
    let sample = sample_dir();
    let index = build(&sample.root);
    assert!(search("non-presentWord", &index).unwrap().is_empty());
}

#[test]
fn test_word_in_several_files() {
    let sample = sample_dir();
    let index = build(&sample.root);

    let results = search("first", &index).unwrap();
    assert_eq!(
        results,
        vec![
            SearchResult::new(sample.path("Oppenheimer/oppenheimer.txt"), 157),
            SearchResult::new(sample.path("a.txt"), 4),
            SearchResult::new(sample.path("b.txt"), 8),
        ]
    );
}

#[test]
fn test_welcome_but_not_first() {
    let sample = sample_dir();
    let index = build(&sample.root);
    let target = sample.path("Subdirectory/Subsubdirectory/textWithoutFirst.txt");

    let first = search("first", &index).unwrap();
    assert!(first.iter().all(|r| r.path != target));

    let welcome = search("Welcome", &index).unwrap();
    assert_eq!(welcome, vec![SearchResult::new(&target, 2)]);
}

#[test]
fn test_missing_root_is_not_found() {
    let sample = sample_dir();
    let err = IndexBuilder::with_config(sample.path("WrongDirectory"), IndexConfig::quiet())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_root_is_a_file() {
    let sample = sample_dir();
    let file = sample.path("Oppenheimer/oppenheimer.txt");
    let index = build(&file);

    assert_eq!(index.file_count(), 1);
    assert_eq!(
        search("Oppenheimer", &index).unwrap(),
        vec![SearchResult::new(&file, 64)]
    );
}

#[test]
fn test_undecodable_file_is_excluded() {
    let sample = sample_dir();
    let baseline = search("first", &build(&sample.root)).unwrap();

    // Invalid UTF-8 that would otherwise contain "first"
    fs::write(sample.path("broken.txt"), b"first\n\xc3\x28 first\n").unwrap();
    let index = build(&sample.root);

    assert_eq!(index.stats().files_skipped, 1);
    assert_eq!(index.stats().files_discovered, 5);
    assert_eq!(search("first", &index).unwrap(), baseline);

    let broken_id = index
        .files()
        .iter()
        .position(|p| p == &sample.path("broken.txt"))
        .unwrap() as u32;
    for t in ["fir", "irs", "rst"] {
        assert!(!index.get_documents(t).unwrap().contains(broken_id));
    }
}

#[test]
fn test_cancelled_build_returns_no_index() {
    let sample = sample_dir();
    let builder = IndexBuilder::with_config(&sample.root, IndexConfig::quiet());
    builder.cancel();

    let err = builder.build().unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[test]
fn test_cancel_from_another_thread() {
    let sample = sample_dir();
    let builder = Arc::new(IndexBuilder::with_config(&sample.root, IndexConfig::quiet()));

    let token = builder.cancel_token();
    token.cancel();
    let worker = {
        let builder = Arc::clone(&builder);
        thread::spawn(move || builder.build())
    };
    assert!(worker.join().unwrap().unwrap_err().is_cancelled());
}

#[test]
fn test_get_documents_rejects_non_trigram() {
    let sample = sample_dir();
    let index = build(&sample.root);
    assert!(matches!(
        index.get_documents("not trigram"),
        Err(Error::InvalidTrigram(_))
    ));
}

#[test]
fn test_short_query_rejected() {
    let sample = sample_dir();
    let index = build(&sample.root);
    assert!(matches!(search("fi", &index), Err(Error::InvalidQuery(_))));
}

#[test]
fn test_get_documents_matches_file_contents() {
    let sample = sample_dir();
    let index = build(&sample.root);

    for (id, path) in index.files().iter().enumerate() {
        let content = fs::read_to_string(path).unwrap();
        for line in content.lines() {
            for t in line_trigrams(line) {
                let docs = index.get_documents(&t.to_string()).unwrap();
                assert!(docs.contains(id as u32), "{t:?} missing for {path:?}");
            }
        }
    }

    // Postings hold only files that really contain the trigram
    let welcome = index.get_documents("Wel").unwrap();
    assert_eq!(welcome.len(), 1);
}

#[test]
fn test_rebuild_is_identical() {
    let sample = sample_dir();
    let first = build(&sample.root);
    let second = build(&sample.root);

    assert_eq!(first.files(), second.files());
    assert_eq!(first.trigram_count(), second.trigram_count());
    for path in first.files() {
        let content = fs::read_to_string(path).unwrap();
        for line in content.lines() {
            for t in line_trigrams(line) {
                let key = t.to_string();
                assert_eq!(
                    first.get_documents(&key).unwrap(),
                    second.get_documents(&key).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_queries_share_index_across_threads() {
    let sample = sample_dir();
    let index = Arc::new(build(&sample.root));

    let handles: Vec<_> = ["first", "Welcome", "Oppenheimer", "filler"]
        .into_iter()
        .map(|q| {
            let index = Arc::clone(&index);
            thread::spawn(move || search(q, &index).unwrap().len())
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![3, 1, 1, 4]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_results_within_candidates(
        contents in prop::collection::vec("[abc\n]{0,40}", 1..6),
        query in "[abc]{3,5}",
    ) {
        let dir = tempfile::tempdir().unwrap();
        for (i, text) in contents.iter().enumerate() {
            fs::write(dir.path().join(format!("f{i}.txt")), text).unwrap();
        }
        let index = build(dir.path());
        let executor = SearchQueryExecutor::new(&index);

        let candidates = executor.candidates(&query).unwrap();
        let results = executor.search(&query).unwrap();

        let expected: BTreeSet<_> = contents
            .iter()
            .enumerate()
            .filter(|(_, text)| text.lines().any(|l| l.contains(query.as_str())))
            .map(|(i, _)| dir.path().join(format!("f{i}.txt")))
            .collect();
        let found: BTreeSet<_> = results.iter().map(|r| r.path.clone()).collect();
        prop_assert_eq!(found, expected);

        for result in &results {
            let id = index.files().iter().position(|p| p == &result.path).unwrap() as u32;
            prop_assert!(candidates.contains(id));

            let content = fs::read_to_string(&result.path).unwrap();
            let line = content.lines().nth(result.line_number as usize - 1).unwrap();
            prop_assert!(line.contains(query.as_str()));
        }
    }
}
