//! Invariants of result deduplication and ranking

use proptest::prelude::*;
use std::collections::HashSet;
use websearch::ResultEntry;
use websearch::search::finalize;

fn entry_strategy() -> impl Strategy<Value = ResultEntry> {
    (0usize..6, "[a-c]{1,6}", prop::sample::select(vec!["Home", "About", "Docs"])).prop_map(
        |(count, path, title)| ResultEntry {
            occurrence_count: count,
            context_snippet: String::new(),
            url: format!("a.com/{path}"),
            title: title.to_string(),
        },
    )
}

proptest! {
    #[test]
    fn finalize_invariants(entries in prop::collection::vec(entry_strategy(), 0..30)) {
        let results = finalize(entries.clone());

        prop_assert!(results.iter().all(|e| e.occurrence_count > 0));

        let titles: HashSet<&str> = results.iter().map(|e| e.title.as_str()).collect();
        prop_assert_eq!(titles.len(), results.len());

        prop_assert!(results
            .windows(2)
            .all(|pair| pair[0].occurrence_count >= pair[1].occurrence_count));

        for survivor in &results {
            let shortest = entries
                .iter()
                .filter(|e| e.title == survivor.title && e.occurrence_count > 0)
                .map(|e| e.url.len())
                .min();
            prop_assert_eq!(Some(survivor.url.len()), shortest);
        }
    }
}
