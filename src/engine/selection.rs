use std::cmp::Ordering;
use std::collections::HashSet;

use icu_normalizer::DecomposingNormalizerBorrowed;

use crate::catalog::{Catalog, StageSelector, VocabularyEntry};

/// Collation key for case- and accent-insensitive comparison: NFD, combining
/// marks removed, lowercased.
pub fn collation_key(text: &str) -> String {
    let nfd = DecomposingNormalizerBorrowed::new_nfd();
    nfd.normalize(text)
        .chars()
        .filter(|&ch| !is_combining_mark(ch))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Base-sensitivity text ordering: "apple", "Apple" and "Äpple" share a key.
/// Equal keys fall back to the raw strings so the order stays total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Distinct values, sorted with [`compare_text`].
pub fn unique_sorted<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut out: Vec<String> = values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect();
    out.sort_by_cached_key(|v| (collation_key(v), v.clone()));
    out
}

pub fn categories_for_stage(catalog: &Catalog, stage: StageSelector) -> Vec<String> {
    unique_sorted(
        catalog
            .entries()
            .iter()
            .filter(|e| stage.matches(&e.stage))
            .map(|e| e.category.as_str()),
    )
}

/// Entries eligible for sampling. An empty category yields an empty pool.
pub fn pool_for_selection<'a>(
    catalog: &'a Catalog,
    stage: StageSelector,
    category: &str,
) -> Vec<&'a VocabularyEntry> {
    if category.is_empty() {
        return Vec::new();
    }
    catalog
        .entries()
        .iter()
        .filter(|e| e.category == category && stage.matches(&e.stage))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_catalog;
    use super::*;

    #[test]
    fn compare_text_ignores_case_and_accents() {
        assert_eq!(collation_key("Naïve"), collation_key("naive"));
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Zebra", "apple"), Ordering::Greater);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
    }

    #[test]
    fn unique_sorted_dedups_and_orders_case_insensitively() {
        let sorted = unique_sorted(["beta", "Alpha", "beta", "gamma", "alpha"]);
        assert_eq!(sorted, vec!["Alpha", "alpha", "beta", "gamma"]);
    }

    #[test]
    fn categories_filtered_by_stage() {
        let catalog = sample_catalog();
        assert_eq!(
            categories_for_stage(&catalog, StageSelector::General),
            vec!["english", "Science"]
        );
        assert_eq!(
            categories_for_stage(&catalog, StageSelector::Ks3),
            vec!["Computing", "Science"]
        );
        assert_eq!(
            categories_for_stage(&catalog, StageSelector::Ks4),
            vec!["Economics", "English", "Science"]
        );
    }

    #[test]
    fn mixed_returns_full_unfiltered_set() {
        let catalog = sample_catalog();
        assert_eq!(
            categories_for_stage(&catalog, StageSelector::Mixed),
            vec!["Computing", "Economics", "English", "english", "Science"]
        );
    }

    #[test]
    fn pool_matches_category_and_stage() {
        let catalog = sample_catalog();
        let pool = pool_for_selection(&catalog, StageSelector::General, "Science");
        let words: Vec<&str> = pool.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["photosynthesis", "friction", "evaporation"]);

        let mixed = pool_for_selection(&catalog, StageSelector::Mixed, "Science");
        assert_eq!(mixed.len(), 6);
    }

    #[test]
    fn pool_category_match_is_exact() {
        let catalog = sample_catalog();
        assert!(pool_for_selection(&catalog, StageSelector::General, "English").is_empty());
        assert_eq!(
            pool_for_selection(&catalog, StageSelector::General, "english").len(),
            1
        );
    }

    #[test]
    fn empty_category_yields_empty_pool() {
        let catalog = sample_catalog();
        assert!(pool_for_selection(&catalog, StageSelector::Mixed, "").is_empty());
    }

    #[test]
    fn stage_without_category_yields_empty_pool() {
        let catalog = sample_catalog();
        assert!(pool_for_selection(&catalog, StageSelector::General, "Economics").is_empty());
    }
}
