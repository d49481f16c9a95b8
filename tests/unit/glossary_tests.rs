/*!
 * Tests for glossary parsing and the glossary store
 */

use scriptorium::glossary::{parse, GlossaryStore};
use crate::common;

#[test]
fn test_parse_sampleGlossary_shouldSkipProseLine() {
    let entries = parse(common::SAMPLE_GLOSSARY);

    let pairs: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.original.as_str(), e.translation.as_str()))
        .collect();
    assert_eq!(pairs, vec![("thee", "you"), ("thou", "you"), ("verily", "truly")]);
}

#[test]
fn test_parse_blankAndHeaderLines_shouldBeIgnored() {
    let text = "GLOSSARY OF TERMS\n\n\nPage 1\nbehoove: be necessary\n";

    let entries = parse(text);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].original, "behoove");
}

#[test]
fn test_parse_everyEntry_shouldHaveNonEmptyOriginal() {
    let text = ":\n-\n : x\nfoo:\n-bar\nok - fine";

    let entries = parse(text);

    assert!(entries.iter().all(|e| !e.original.is_empty()));
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_store_loadThenGet_shouldReturnLoadedEntries() {
    let store = GlossaryStore::new();
    let loaded = common::entries(&[("thee", "you"), ("hath", "has")]);

    store.load("N", loaded.clone());

    assert_eq!(store.get("N").unwrap().entries, loaded);
}

#[test]
fn test_store_loadSameNameTwice_shouldKeepOnlySecond() {
    let store = GlossaryStore::new();
    let first = common::entries(&[("thee", "you")]);
    let second = common::entries(&[("hath", "has"), ("doth", "does")]);

    store.load("N", first);
    store.load("N", second.clone());

    assert_eq!(store.get("N").unwrap().entries, second);
    assert_eq!(store.size(), 1);
    assert_eq!(store.list(), vec![("N".to_string(), 2)]);
}

#[test]
fn test_store_summaries_shouldReportCounts() {
    let store = GlossaryStore::new();
    store.load("a", common::entries(&[("x", "y")]));
    store.load("b", Vec::new());

    let summaries = store.summaries();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "a");
    assert_eq!(summaries[0].entry_count, 1);
    assert_eq!(summaries[1].entry_count, 0);
}

#[test]
fn test_store_concurrentReadersAndWriter_shouldNeverSeePartialList() {
    use std::sync::Arc;

    let store = Arc::new(GlossaryStore::new());
    let small = common::entries(&[("a", "1")]);
    let large = common::entries(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
    store.load("g", small.clone());

    let writer = {
        let store = Arc::clone(&store);
        let (small, large) = (small.clone(), large.clone());
        std::thread::spawn(move || {
            for i in 0..500 {
                store.load("g", if i % 2 == 0 { large.clone() } else { small.clone() });
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    let len = store.get("g").unwrap().len();
                    assert!(len == 1 || len == 4, "observed partial list of {}", len);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
