use std::cmp::Ordering;

use crate::catalog::{Catalog, VocabularyEntry};
use crate::engine::selection::{compare_text, unique_sorted};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupBy {
    #[default]
    Category,
    StartsWith,
}

impl GroupBy {
    pub fn label(self) -> &'static str {
        match self {
            GroupBy::Category => "Category",
            GroupBy::StartsWith => "Starts with",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            GroupBy::Category => GroupBy::StartsWith,
            GroupBy::StartsWith => GroupBy::Category,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    CategoryAsc,
    CategoryDesc,
    WordAsc,
    WordDesc,
}

impl SortMode {
    const ALL: [SortMode; 4] = [
        SortMode::CategoryAsc,
        SortMode::CategoryDesc,
        SortMode::WordAsc,
        SortMode::WordDesc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::CategoryAsc => "Category (A \u{2192} Z)",
            SortMode::CategoryDesc => "Category (Z \u{2192} A)",
            SortMode::WordAsc => "Word (A \u{2192} Z)",
            SortMode::WordDesc => "Word (Z \u{2192} A)",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn compare(self, a: &VocabularyEntry, b: &VocabularyEntry) -> Ordering {
        match self {
            SortMode::WordAsc => compare_text(&a.word, &b.word),
            SortMode::WordDesc => compare_text(&b.word, &a.word),
            SortMode::CategoryAsc | SortMode::CategoryDesc => {
                let by_category = compare_text(&a.category, &b.category);
                let by_category = if self == SortMode::CategoryDesc {
                    by_category.reverse()
                } else {
                    by_category
                };
                by_category.then_with(|| compare_text(&a.word, &b.word))
            }
        }
    }
}

/// First letter of the trimmed word, uppercased; `#` for anything else.
pub fn starts_with_key(word: &str) -> char {
    match word.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some(c) if c.is_ascii_uppercase() => c,
        _ => '#',
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordListQuery {
    pub group_by: GroupBy,
    pub sort: SortMode,
    pub category_filter: Option<String>,
    pub starts_with_filter: Option<char>,
}

impl WordListQuery {
    pub fn clear_filters(&mut self) {
        self.category_filter = None;
        self.starts_with_filter = None;
    }

    fn accepts(&self, entry: &VocabularyEntry) -> bool {
        if let Some(category) = &self.category_filter
            && entry.category != *category
        {
            return false;
        }
        if let Some(key) = self.starts_with_filter
            && starts_with_key(&entry.word) != key
        {
            return false;
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordGroup<'a> {
    pub header: String,
    pub entries: Vec<&'a VocabularyEntry>,
}

pub fn category_options(catalog: &Catalog) -> Vec<String> {
    unique_sorted(catalog.entries().iter().map(|e| e.category.as_str()))
}

pub fn starts_with_options(catalog: &Catalog) -> Vec<char> {
    let mut keys: Vec<char> = catalog
        .entries()
        .iter()
        .map(|e| starts_with_key(&e.word))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

pub fn filtered_sorted<'a>(catalog: &'a Catalog, query: &WordListQuery) -> Vec<&'a VocabularyEntry> {
    let mut words: Vec<&VocabularyEntry> = catalog
        .entries()
        .iter()
        .filter(|e| query.accepts(e))
        .collect();
    words.sort_by(|a, b| query.sort.compare(a, b));
    words
}

/// Groups the filtered, sorted words. Category groups follow the sort
/// direction when sorting by category descending; letter groups are always
/// ascending.
pub fn grouped<'a>(catalog: &'a Catalog, query: &WordListQuery) -> Vec<WordGroup<'a>> {
    let words = filtered_sorted(catalog, query);
    let mut groups: Vec<WordGroup<'a>> = Vec::new();

    for entry in words {
        let header = match query.group_by {
            GroupBy::Category => entry.category.clone(),
            GroupBy::StartsWith => starts_with_key(&entry.word).to_string(),
        };
        match groups.iter_mut().find(|g| g.header == header) {
            Some(group) => group.entries.push(entry),
            None => groups.push(WordGroup {
                header,
                entries: vec![entry],
            }),
        }
    }

    let descending = query.group_by == GroupBy::Category && query.sort == SortMode::CategoryDesc;
    groups.sort_by(|a, b| {
        let ord = compare_text(&a.header, &b.header);
        if descending { ord.reverse() } else { ord }
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Stage;
    use crate::engine::selection::test_support::entry;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            entry("velocity", "Science", Stage::Ks3),
            entry("algorithm", "Computing", Stage::Ks3),
            entry("Friction", "Science", Stage::General),
            entry("enzyme", "Science", Stage::Ks4),
            entry("3D model", "Computing", Stage::General),
            entry("abstraction", "Computing", Stage::Ks4),
        ])
    }

    fn words<'a>(entries: &[&'a VocabularyEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn starts_with_key_handles_non_letters() {
        assert_eq!(starts_with_key("  apple"), 'A');
        assert_eq!(starts_with_key("Zebra"), 'Z');
        assert_eq!(starts_with_key("3D model"), '#');
        assert_eq!(starts_with_key(""), '#');
        assert_eq!(starts_with_key("\u{e9}clair"), '#');
    }

    #[test]
    fn default_sort_is_category_then_word() {
        let catalog = catalog();
        let sorted = filtered_sorted(&catalog, &WordListQuery::default());
        assert_eq!(
            words(&sorted),
            vec!["3D model", "abstraction", "algorithm", "enzyme", "Friction", "velocity"]
        );
    }

    #[test]
    fn word_desc_sort() {
        let catalog = catalog();
        let query = WordListQuery {
            sort: SortMode::WordDesc,
            ..WordListQuery::default()
        };
        let sorted = filtered_sorted(&catalog, &query);
        assert_eq!(words(&sorted)[0], "velocity");
        assert_eq!(*words(&sorted).last().unwrap(), "3D model");
    }

    #[test]
    fn filters_combine() {
        let catalog = catalog();
        let query = WordListQuery {
            category_filter: Some("Computing".to_string()),
            starts_with_filter: Some('A'),
            ..WordListQuery::default()
        };
        let sorted = filtered_sorted(&catalog, &query);
        assert_eq!(words(&sorted), vec!["abstraction", "algorithm"]);
    }

    #[test]
    fn clear_filters_restores_everything() {
        let catalog = catalog();
        let mut query = WordListQuery {
            category_filter: Some("Science".to_string()),
            ..WordListQuery::default()
        };
        query.clear_filters();
        assert_eq!(filtered_sorted(&catalog, &query).len(), catalog.len());
    }

    #[test]
    fn groups_by_category_follow_sort_direction() {
        let catalog = catalog();
        let mut query = WordListQuery::default();
        let headers: Vec<String> = grouped(&catalog, &query).into_iter().map(|g| g.header).collect();
        assert_eq!(headers, vec!["Computing", "Science"]);

        query.sort = SortMode::CategoryDesc;
        let groups = grouped(&catalog, &query);
        assert_eq!(groups[0].header, "Science");
        assert_eq!(words(&groups[0].entries), vec!["enzyme", "Friction", "velocity"]);
    }

    #[test]
    fn groups_by_letter_are_ascending() {
        let catalog = catalog();
        let query = WordListQuery {
            group_by: GroupBy::StartsWith,
            sort: SortMode::WordDesc,
            ..WordListQuery::default()
        };
        let headers: Vec<String> = grouped(&catalog, &query).into_iter().map(|g| g.header).collect();
        assert_eq!(headers, vec!["#", "A", "E", "F", "V"]);
    }

    #[test]
    fn options_are_distinct_and_sorted() {
        let catalog = catalog();
        assert_eq!(category_options(&catalog), vec!["Computing", "Science"]);
        assert_eq!(starts_with_options(&catalog), vec!['#', 'A', 'E', 'F', 'V']);
    }
}
