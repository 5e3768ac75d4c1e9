//! Search Filter
//!
//! Narrows the visible rows by a case-insensitive substring match on labels.

use super::collection::CollectionItem;

/// Items whose label contains `term`, ignoring case.
///
/// When search is disabled or `term` is empty every item is returned in its
/// original order. The term is matched literally; whitespace is not trimmed.
pub fn search_filter<'a, V: 'a>(
    items: impl IntoIterator<Item = &'a CollectionItem<V>>,
    term: &str,
    searchable: bool,
) -> Vec<&'a CollectionItem<V>> {
    if !searchable || term.is_empty() {
        return items.into_iter().collect();
    }

    let needle = term.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.label.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(value: u32, label: &str) -> CollectionItem<u32> {
        CollectionItem {
            value,
            label: label.to_string().into(),
            disabled: false,
        }
    }

    fn sample() -> Vec<CollectionItem<u32>> {
        vec![
            item(1, "Azərbaycan dili"),
            item(2, "English"),
            item(3, "Deutsch"),
            item(4, "Türk dili"),
            item(5, "Русский"),
        ]
    }

    fn values(items: &[&CollectionItem<u32>]) -> Vec<u32> {
        items.iter().map(|item| item.value).collect()
    }

    #[test]
    fn empty_term_returns_everything() {
        let items = sample();
        let result = search_filter(&items, "", true);
        assert_eq!(values(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn disabled_search_ignores_term() {
        let items = sample();
        let result = search_filter(&items, "dili", false);
        assert_eq!(values(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn match_is_case_insensitive_subsequence() {
        let items = sample();
        let result = search_filter(&items, "DILI", true);
        assert_eq!(values(&result), vec![1, 4]);

        let result = search_filter(&items, "ру", true);
        assert_eq!(values(&result), vec![5]);
    }

    #[test]
    fn whitespace_is_matched_literally() {
        let items = sample();
        assert_eq!(values(&search_filter(&items, " ", true)), vec![1, 4]);
        assert!(search_filter(&items, "  ", true).is_empty());
    }

    #[test]
    fn empty_collection_gives_empty_result() {
        let items: Vec<CollectionItem<u32>> = Vec::new();
        assert!(search_filter(&items, "a", true).is_empty());
    }
}
