//! Result deduplication and ranking

use ahash::AHashMap;

use super::types::ResultEntry;

/// Collapse same-title entries and order the rest by occurrence count
///
/// Among entries sharing a title only the one with the shortest URL is kept;
/// on equal lengths the earlier entry wins. Survivors keep their retrieval
/// position before a stable sort on `occurrence_count`, highest first.
/// Entries without occurrences are dropped.
#[must_use]
pub fn finalize(entries: Vec<ResultEntry>) -> Vec<ResultEntry> {
    let mut best_by_title: AHashMap<&str, usize> = AHashMap::new();
    for (position, entry) in entries.iter().enumerate() {
        if entry.occurrence_count == 0 {
            continue;
        }
        best_by_title
            .entry(entry.title.as_str())
            .and_modify(|best| {
                if url_len(entry) < url_len(&entries[*best]) {
                    *best = position;
                }
            })
            .or_insert(position);
    }

    let mut keep = vec![false; entries.len()];
    for position in best_by_title.into_values() {
        keep[position] = true;
    }

    let mut survivors: Vec<ResultEntry> = entries
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, kept)| kept.then_some(entry))
        .collect();

    survivors.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));
    survivors
}

#[inline]
fn url_len(entry: &ResultEntry) -> usize {
    entry.url.chars().count()
}
